use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::tui::app::App;

use super::*;

pub(super) fn handle_confirm(app: &mut App, key: KeyEvent) {
    if is_force_quit(&key) {
        app.should_quit = true;
        return;
    }

    match (key.modifiers, key.code) {
        // Confirm: y or Enter
        (KeyModifiers::NONE, KeyCode::Char('y')) | (_, KeyCode::Enter) => {
            app.resolve_delete(true);
        }
        // Cancel: n or Esc
        (KeyModifiers::NONE, KeyCode::Char('n')) | (_, KeyCode::Esc) => {
            app.resolve_delete(false);
        }
        _ => {}
    }
}
