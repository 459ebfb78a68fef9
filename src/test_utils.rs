#[cfg(test)]
pub mod test_helpers {
    use std::sync::Arc;
    use std::time::{Duration, Instant};

    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;
    use ratatui::layout::Rect;

    use crate::app::{App, Sources};
    use crate::catalog::Catalog;
    use crate::config::{LocalConfig, PickerConfig};
    use crate::fetch::{FetchError, FetchFuture, Fetcher};
    use crate::picker::{InputId, Item, Picker, PickerOptions, SearchResponse};

    pub const VIEWPORT: Rect = Rect {
        x: 0,
        y: 0,
        width: 80,
        height: 24,
    };

    pub fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::empty())
    }

    pub fn key_with_mods(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    pub fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    /// `n` items labelled "item 0".."item n-1" with ids 0..n
    pub fn numbered_items(n: usize) -> Vec<Item> {
        (0..n)
            .map(|i| Item::new(i as i64, format!("item {}", i)))
            .collect()
    }

    pub fn people() -> Vec<Item> {
        vec![
            Item::new(1, "Alice Martin"),
            Item::new(2, "Bruno Alves"),
            Item::new(3, "Chloé Bernard"),
            Item::new(4, "Alan Turner"),
        ]
    }

    /// Fetcher that answers from a fixed list by case-insensitive label match
    pub fn static_fetcher(items: Vec<Item>) -> Arc<dyn Fetcher> {
        Arc::new(move |query: &str| -> FetchFuture {
            let needle = query.to_lowercase();
            let found: Vec<Item> = items
                .iter()
                .filter(|item| item.label.to_lowercase().contains(&needle))
                .cloned()
                .collect();
            Box::pin(async move { Ok(found) })
        })
    }

    pub fn failing_fetcher() -> Arc<dyn Fetcher> {
        Arc::new(|_: &str| -> FetchFuture {
            Box::pin(async { Err(FetchError::Network("connection refused".to_string())) })
        })
    }

    pub fn test_picker(options: PickerOptions) -> Picker {
        Picker::new(InputId(1), options, static_fetcher(people()))
    }

    /// Type `text`, let the debounce delay elapse and return the issued query
    pub fn type_and_settle(picker: &mut Picker, text: &str, now: Instant) -> Option<(u64, String)> {
        picker.handle_text_changed(text, now);
        picker.tick(now + picker.options().debounce);
        picker.take_request().map(|r| (r.seq, r.query))
    }

    pub fn test_catalog() -> Catalog {
        Catalog {
            people: people(),
            themes: vec![
                Item::new(10, "Energy"),
                Item::new(11, "Water management"),
                Item::new(12, "Waste"),
            ],
            structures: vec![
                Item::new(20, "Hydrology lab"),
                Item::new(21, "Geology unit"),
                Item::new(22, "Hydraulics team"),
            ],
        }
    }

    /// Demo app over the local test catalog with default settings
    pub fn test_app() -> App {
        App::new(
            Sources::local(test_catalog(), &LocalConfig::default()),
            &PickerConfig::default(),
        )
    }

    /// Run every search due at `now` to completion and apply the results
    pub fn settle_app(app: &mut App, now: Instant) {
        for request in app.poll_requests(now) {
            let result = futures::executor::block_on(request.fetcher.fetch(&request.query));
            app.apply_response(SearchResponse {
                input: request.input,
                seq: request.seq,
                query: request.query,
                result,
            });
        }
        app.apply_registry_events();
    }

    /// Render `app` into an 80x24 test terminal
    pub fn render_app(app: &mut App) -> Terminal<TestBackend> {
        let mut terminal = Terminal::new(TestBackend::new(VIEWPORT.width, VIEWPORT.height)).unwrap();
        terminal.draw(|f| app.render(f)).unwrap();
        terminal
    }

    pub fn buffer_line(terminal: &Terminal<TestBackend>, y: u16) -> String {
        let buffer = terminal.backend().buffer();
        (0..buffer.area.width)
            .map(|x| buffer[(x, y)].symbol())
            .collect()
    }
}
