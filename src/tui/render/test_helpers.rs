use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::layout::Rect;

use crate::io::storage::{MemoryStorage, Storage};
use crate::io::store::TaskStore;
use crate::model::config::{DEFAULT_STORAGE_KEY, UiConfig};
use crate::model::task::{Task, TaskStatus};
use crate::tui::app::App;
use crate::tui::input;

pub const TERM_W: u16 = 80;
pub const TERM_H: u16 = 24;

/// Fixed "now" for seeded stores: 2024-08-01T00:00:00Z
pub const NOW_MS: i64 = 1_722_470_400_000;

/// Render into an in-memory buffer and return plain text (no styles).
pub fn render_to_string<F>(w: u16, h: u16, f: F) -> String
where
    F: FnOnce(&mut ratatui::Frame, Rect),
{
    let backend = TestBackend::new(w, h);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal
        .draw(|frame| {
            let area = frame.area();
            f(frame, area);
        })
        .unwrap();

    let buf = terminal.backend().buffer().clone();
    let w = buf.area.width as usize;
    let lines: Vec<String> = buf
        .content
        .chunks(w)
        .map(|row| {
            let s: String = row.iter().map(|cell| cell.symbol()).collect();
            s.trim_end().to_string()
        })
        .collect();

    // Trim trailing blank lines
    let end = lines
        .iter()
        .rposition(|l| !l.is_empty())
        .map_or(0, |i| i + 1);
    lines[..end].join("\n")
}

fn app_over(storage: MemoryStorage) -> App {
    let storage: Box<dyn Storage> = Box::new(storage);
    let store = TaskStore::new(storage, DEFAULT_STORAGE_KEY)
        .with_clock(|| NOW_MS)
        .hydrate();
    App::new(store, &UiConfig::default())
}

/// An App over empty storage, so it starts from the four example tasks.
pub fn seeded_app() -> App {
    app_over(MemoryStorage::new())
}

/// An App whose storage already holds `tasks`.
pub fn app_with_tasks(tasks: Vec<Task>) -> App {
    let json = serde_json::to_string(&tasks).unwrap();
    app_over(MemoryStorage::new().with_value(DEFAULT_STORAGE_KEY, json))
}

pub fn task(id: &str, title: &str, status: TaskStatus) -> Task {
    Task {
        id: id.into(),
        title: title.into(),
        description: None,
        date: "2024-09-01".into(),
        status,
        created_at: NOW_MS,
    }
}

pub fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

/// Feed each char of `s` through the key handler.
pub fn type_str(app: &mut App, s: &str) {
    for c in s.chars() {
        input::handle_key(app, key(KeyCode::Char(c)));
    }
}
