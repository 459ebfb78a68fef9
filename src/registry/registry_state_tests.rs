//! Tests for PickerRegistry

use std::time::Instant;

use crossterm::event::KeyCode;
use ratatui::layout::Rect;

use super::*;
use crate::layout::PortalHost;
use crate::picker::{ItemId, PickerMode};
use crate::test_utils::test_helpers::*;

const A: InputId = InputId(1);
const B: InputId = InputId(2);

fn input_rect(y: u16) -> Rect {
    Rect::new(2, y, 30, 1)
}

/// Two zero-min_chars pickers stacked on the left side of the viewport
fn two_pickers() -> PickerRegistry {
    let mut registry = PickerRegistry::new();
    registry.attach(A, PickerOptions::single().min_chars(0), static_fetcher(people()));
    registry.attach(B, PickerOptions::multi().min_chars(0), static_fetcher(people()));
    registry.set_anchor(A, Anchor::new(input_rect(1), PortalHost::Viewport(VIEWPORT)));
    registry.set_anchor(B, Anchor::new(input_rect(3), PortalHost::Viewport(VIEWPORT)));
    registry.set_regions(
        A,
        PickerRegions {
            input: Some(input_rect(1)),
            ..Default::default()
        },
    );
    registry.set_regions(
        B,
        PickerRegions {
            input: Some(input_rect(3)),
            ..Default::default()
        },
    );
    registry
}

/// Run every issued request synchronously and apply the responses
fn settle(registry: &mut PickerRegistry, now: Instant) {
    for request in registry.poll_requests(now) {
        let result = futures::executor::block_on(request.fetcher.fetch(&request.query));
        registry.apply_response(SearchResponse {
            input: request.input,
            seq: request.seq,
            query: request.query,
            result,
        });
    }
}

fn open(registry: &mut PickerRegistry, input: InputId) {
    registry.focus(Some(input));
    settle(registry, Instant::now());
    assert_eq!(registry.open_input(), Some(input));
}

#[test]
fn test_attach_is_idempotent() {
    let mut registry = PickerRegistry::new();

    assert!(registry.attach(A, PickerOptions::single().min_chars(0), static_fetcher(people())));
    registry.focus(Some(A));
    let seq = registry.picker(A).unwrap().latest_seq();

    assert!(!registry.attach(A, PickerOptions::multi(), failing_fetcher()));
    let picker = registry.picker(A).unwrap();
    assert_eq!(picker.latest_seq(), seq);
    assert_eq!(picker.options().mode, PickerMode::Single);
}

#[test]
fn test_opening_b_closes_a() {
    let mut registry = two_pickers();
    open(&mut registry, A);

    open(&mut registry, B);

    assert!(!registry.picker(A).unwrap().is_open());
    assert!(registry.picker(B).unwrap().is_open());
    assert_eq!(registry.picker(A).unwrap().list_area(), None);
}

#[test]
fn test_response_opening_a_list_closes_the_other() {
    let mut registry = two_pickers();
    let now = Instant::now();
    registry.focus(Some(A));
    registry.text_changed(A, "al", now);
    let requests = registry.poll_requests(now + ms(200));
    assert_eq!(requests.len(), 1);
    // B opens by other means while A's search is in flight
    let picker_b = registry.picker_mut(B).unwrap();
    let seq_b = picker_b.latest_seq();
    picker_b.apply_response(seq_b, Ok(people()));
    assert!(registry.picker(B).unwrap().is_open());

    let request = &requests[0];
    registry.apply_response(SearchResponse {
        input: request.input,
        seq: request.seq,
        query: request.query.clone(),
        result: Ok(people()),
    });

    assert_eq!(registry.open_input(), Some(A));
    assert!(!registry.picker(B).unwrap().is_open());
}

#[test]
fn test_focus_elsewhere_invalidates_pending_search() {
    let mut registry = two_pickers();
    registry.focus(Some(A));
    let request = registry.poll_requests(Instant::now()).pop().unwrap();

    registry.focus(Some(B));
    let applied = registry.apply_response(SearchResponse {
        input: A,
        seq: request.seq,
        query: request.query,
        result: Ok(people()),
    });

    assert!(!applied);
    assert!(!registry.picker(A).unwrap().is_open());
}

#[test]
fn test_detach_drops_late_responses() {
    let mut registry = two_pickers();
    registry.focus(Some(A));
    let request = registry.poll_requests(Instant::now()).pop().unwrap();

    assert!(registry.detach(A));
    let applied = registry.apply_response(SearchResponse {
        input: A,
        seq: request.seq,
        query: request.query,
        result: Ok(people()),
    });

    assert!(!applied);
    assert!(!registry.is_attached(A));
    assert_eq!(registry.focused(), None);
    assert_eq!(registry.value(A), None);
}

#[test]
fn test_pointer_outside_dismisses_without_touching_selection() {
    let mut registry = two_pickers();
    open(&mut registry, B);
    registry.handle_key(B, key(KeyCode::Down));
    registry.handle_key(B, key(KeyCode::Enter));
    open(&mut registry, B);

    let hit = registry.pointer_down(70, 20);

    assert_eq!(hit, None);
    assert_eq!(registry.open_input(), None);
    assert_eq!(registry.value(B), Some(PickerValue::Multi(vec![ItemId(1)])));
}

#[test]
fn test_pointer_on_row_commits_it() {
    let mut registry = two_pickers();
    open(&mut registry, A);
    let area = registry.picker(A).unwrap().list_area().unwrap();

    // second row inside the border
    let hit = registry.pointer_down(area.x + 3, area.y + 2);

    assert_eq!(hit, Some((A, PickerHit::Row(1))));
    assert_eq!(registry.value(A), Some(PickerValue::Single(Some(ItemId(2)))));
    assert!(!registry.picker(A).unwrap().is_open());
    assert_eq!(
        registry.drain_events(),
        vec![
            RegistryEvent::SetText {
                input: A,
                text: "Bruno Alves".to_string()
            },
            RegistryEvent::Picked {
                input: A,
                item: Item::new(2, "Bruno Alves")
            },
        ]
    );
}

#[test]
fn test_pointer_on_other_input_focuses_it() {
    let mut registry = two_pickers();
    open(&mut registry, A);

    // A's list covers rows 2.., so click B's input to the right of it
    registry.set_regions(
        B,
        PickerRegions {
            input: Some(Rect::new(40, 1, 30, 1)),
            ..Default::default()
        },
    );
    let hit = registry.pointer_down(45, 1);

    assert_eq!(hit, Some((B, PickerHit::Input)));
    assert_eq!(registry.focused(), Some(B));
    assert_eq!(registry.open_input(), None);
    settle(&mut registry, Instant::now());
    assert_eq!(registry.open_input(), Some(B));
}

#[test]
fn test_open_list_is_hit_before_inputs_underneath() {
    let mut registry = two_pickers();
    open(&mut registry, A);
    let area = registry.picker(A).unwrap().list_area().unwrap();
    // A's list is drawn over B's input row
    assert!(area.y <= 3 && area.bottom() > 3);

    let hit = registry.pointer_down(5, 3);

    assert!(matches!(hit, Some((A, PickerHit::Row(_)))));
}

#[test]
fn test_chip_dismiss_click_keeps_other_lists_open() {
    let mut registry = two_pickers();
    registry.picker_mut(B).unwrap().choose(Item::new(3, "Chloé Bernard"));
    registry.set_regions(
        B,
        PickerRegions {
            input: Some(Rect::new(40, 1, 30, 1)),
            chip_dismiss: vec![(ItemId(3), Rect::new(50, 1, 1, 1))],
            clear: None,
        },
    );
    open(&mut registry, A);

    let hit = registry.pointer_down(50, 1);

    assert_eq!(hit, Some((B, PickerHit::ChipDismiss(ItemId(3)))));
    assert_eq!(registry.value(B), Some(PickerValue::Multi(vec![])));
    assert_eq!(registry.open_input(), Some(A));
}

#[test]
fn test_pointer_move_sets_hover_on_open_list_only() {
    let mut registry = two_pickers();
    open(&mut registry, A);
    let area = registry.picker(A).unwrap().list_area().unwrap();

    registry.pointer_move(area.x + 2, area.y + 1);
    assert_eq!(registry.picker(A).unwrap().hovered_index(), Some(0));

    registry.pointer_move(70, 20);
    assert_eq!(registry.picker(A).unwrap().hovered_index(), None);
}

#[test]
fn test_next_deadline_is_earliest_pending_delay() {
    let mut registry = two_pickers();
    let now = Instant::now();

    registry.text_changed(A, "al", now + ms(100));
    registry.text_changed(B, "br", now);

    assert_eq!(registry.next_deadline(), Some(now + ms(200)));
}

#[test]
fn test_viewport_change_moves_open_list_only() {
    let mut registry = two_pickers();
    open(&mut registry, A);
    registry.set_anchor(A, Anchor::new(Rect::new(2, 8, 30, 1), PortalHost::Viewport(VIEWPORT)));
    let before = registry.picker(A).unwrap().list_area().unwrap();
    assert_eq!(before.y, 9);

    // Shrink the viewport so the list no longer fits below its input
    registry.viewport_changed(Rect::new(0, 0, 80, 10));

    let after = registry.picker(A).unwrap().list_area().unwrap();
    assert_ne!(before, after);
    assert!(after.bottom() <= 8);
    assert_eq!(registry.picker(B).unwrap().list_area(), None);
}

#[test]
fn test_escape_routed_to_picker() {
    let mut registry = two_pickers();
    open(&mut registry, A);

    assert_eq!(registry.handle_key(A, key(KeyCode::Esc)), KeyOutcome::Consumed);
    assert_eq!(registry.open_input(), None);
    assert_eq!(registry.handle_key(A, key(KeyCode::Esc)), KeyOutcome::Ignored);
}

#[test]
fn test_keys_for_unknown_input_are_ignored() {
    let mut registry = two_pickers();

    assert_eq!(
        registry.handle_key(InputId(99), key(KeyCode::Down)),
        KeyOutcome::Ignored
    );
}

#[test]
fn test_values_before_any_selection() {
    let registry = two_pickers();

    assert_eq!(registry.value(A), Some(PickerValue::Single(None)));
    assert_eq!(registry.value(B), Some(PickerValue::Multi(vec![])));
}
