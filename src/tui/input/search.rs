use crossterm::event::{KeyCode, KeyEvent};

use crate::tui::app::{App, Mode};

use super::*;

/// Typing in the search box. The board filters on every keystroke; Enter
/// keeps the query, Esc drops it.
pub(super) fn handle_search(app: &mut App, key: KeyEvent) {
    if is_force_quit(&key) {
        app.should_quit = true;
        return;
    }

    match key.code {
        KeyCode::Enter | KeyCode::Down => {
            app.mode = Mode::Navigate;
        }
        KeyCode::Esc => {
            app.clear_search();
            app.mode = Mode::Navigate;
        }
        _ => {
            let before = app.search.text.len();
            let handled = edit_text_field(&mut app.search, key);
            if handled && app.search.text.len() != before {
                app.query_changed();
            }
        }
    }
}
