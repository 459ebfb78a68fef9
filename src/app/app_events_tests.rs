//! Tests for App event handling

use std::time::Instant;

use crossterm::event::{Event, KeyCode, KeyModifiers};

use super::*;
use crate::app::app_state::{CO_THEME, PERSON, STRUCTURES, THEME};
use crate::picker::ItemId;
use crate::test_utils::test_helpers::*;

fn press(app: &mut App, code: KeyCode, now: Instant) {
    app.handle_event(Event::Key(key(code)), now);
}

fn type_text(app: &mut App, text: &str, now: Instant) {
    for c in text.chars() {
        press(app, KeyCode::Char(c), now);
    }
}

#[test]
fn test_typing_searches_after_debounce_and_commits_chip() {
    let now = Instant::now();
    let mut app = test_app();
    app.focus_input(STRUCTURES);

    type_text(&mut app, "hy", now);
    settle_app(&mut app, now);
    assert_eq!(app.registry.open_input(), None);

    settle_app(&mut app, now + ms(200));
    let picker = app.registry.picker(STRUCTURES).unwrap();
    assert_eq!(picker.suggestions().len(), 2);

    press(&mut app, KeyCode::Down, now);
    press(&mut app, KeyCode::Enter, now);

    assert_eq!(app.values().structures, vec![ItemId(20)]);
    assert_eq!(app.field(STRUCTURES).unwrap().text(), "");
    assert_eq!(app.registry.open_input(), None);
}

#[test]
fn test_single_char_never_searches_structures() {
    let now = Instant::now();
    let mut app = test_app();
    app.focus_input(STRUCTURES);

    type_text(&mut app, "h", now);

    assert!(app.poll_requests(now + ms(1_000)).is_empty());
}

#[test]
fn test_down_opens_and_enter_commits_label() {
    let now = Instant::now();
    let mut app = test_app();
    app.focus = PERSON;

    press(&mut app, KeyCode::Down, now);
    settle_app(&mut app, now);
    assert_eq!(app.registry.picker(PERSON).unwrap().active_index(), Some(0));
    press(&mut app, KeyCode::Enter, now);

    assert_eq!(app.values().person, Some(ItemId(1)));
    assert_eq!(app.field(PERSON).unwrap().text(), "Alice Martin");
    assert_eq!(app.status(), "Picked Alice Martin");
}

#[test]
fn test_escape_closes_list_before_quitting() {
    let now = Instant::now();
    let mut app = test_app();
    app.focus_input(PERSON);
    settle_app(&mut app, now);

    press(&mut app, KeyCode::Esc, now);
    assert_eq!(app.registry.open_input(), None);
    assert!(!app.should_quit());

    press(&mut app, KeyCode::Esc, now);
    assert!(app.should_quit());
    assert_eq!(app.submission(), None);
}

#[test]
fn test_ctrl_s_submits() {
    let mut app = test_app();

    app.handle_event(
        Event::Key(key_with_mods(KeyCode::Char('s'), KeyModifiers::CONTROL)),
        Instant::now(),
    );

    assert!(app.should_quit());
    assert!(app.submission().is_some());
    assert_eq!(app.field(PERSON).unwrap().text(), "");
}

#[test]
fn test_ctrl_c_quits_without_output() {
    let mut app = test_app();

    app.handle_event(
        Event::Key(key_with_mods(KeyCode::Char('c'), KeyModifiers::CONTROL)),
        Instant::now(),
    );

    assert!(app.should_quit());
    assert_eq!(app.submission(), None);
}

#[test]
fn test_escape_in_dialog_closes_list_then_dialog() {
    let now = Instant::now();
    let mut app = test_app();
    app.focus_input(THEME);
    press(&mut app, KeyCode::F(2), now);
    settle_app(&mut app, now);
    assert_eq!(app.registry.open_input(), Some(CO_THEME));

    press(&mut app, KeyCode::Esc, now);
    assert!(app.dialog_open);

    press(&mut app, KeyCode::Esc, now);
    assert!(!app.dialog_open);
    assert_eq!(app.focus, THEME);
    assert!(!app.should_quit());
}

#[test]
fn test_co_theme_commits_as_chip() {
    let now = Instant::now();
    let mut app = test_app();
    press(&mut app, KeyCode::F(2), now);
    type_text(&mut app, "wa", now);
    settle_app(&mut app, now + ms(200));

    press(&mut app, KeyCode::Down, now);
    press(&mut app, KeyCode::Down, now);
    press(&mut app, KeyCode::Enter, now);

    assert_eq!(app.values().co_theme, Some(ItemId(12)));
    assert_eq!(app.field(CO_THEME).unwrap().text(), "");
    let chips = app.registry.picker(CO_THEME).unwrap().chips();
    assert_eq!(chips.len(), 1);
    assert_eq!(chips[0].label, "Waste");
}

#[test]
fn test_backspace_on_empty_field_removes_last_chip() {
    let now = Instant::now();
    let mut app = test_app();
    app.focus = STRUCTURES;
    {
        let picker = app.registry.picker_mut(STRUCTURES).unwrap();
        picker.choose(crate::picker::Item::new(20, "Hydrology lab"));
        picker.choose(crate::picker::Item::new(22, "Hydraulics team"));
    }

    press(&mut app, KeyCode::Backspace, now);

    assert_eq!(app.values().structures, vec![ItemId(20)]);
}

#[test]
fn test_tab_moves_focus_and_closes_previous_list() {
    let now = Instant::now();
    let mut app = test_app();
    app.focus_input(PERSON);
    settle_app(&mut app, now);

    press(&mut app, KeyCode::Tab, now);

    assert_eq!(app.focus, THEME);
    assert!(!app.registry.picker(PERSON).unwrap().is_open());
    settle_app(&mut app, now);
    assert_eq!(app.registry.open_input(), Some(THEME));
}

#[test]
fn test_resize_updates_viewport() {
    let mut app = test_app();

    app.handle_event(Event::Resize(100, 30), Instant::now());

    assert_eq!(app.viewport, ratatui::layout::Rect::new(0, 0, 100, 30));
}
