use crossterm::event::{KeyCode, KeyEvent};

use crate::tui::app::{App, Row};

use super::*;

pub(super) fn handle_navigate(app: &mut App, key: KeyEvent) {
    if is_force_quit(&key) {
        app.should_quit = true;
        return;
    }

    match key.code {
        KeyCode::Char('q') => app.should_quit = true,
        KeyCode::Char('j') | KeyCode::Down => app.move_cursor(1),
        KeyCode::Char('k') | KeyCode::Up => app.move_cursor(-1),
        KeyCode::Char('g') | KeyCode::Home => app.cursor_to_top(),
        KeyCode::Char('G') | KeyCode::End => app.cursor_to_bottom(),
        KeyCode::Char('/') => app.begin_search(),
        KeyCode::Esc => {
            if !app.query().is_empty() {
                app.clear_search();
            }
        }
        KeyCode::Tab | KeyCode::Char(' ') => app.toggle_section(),
        KeyCode::Enter => match app.selected_row() {
            Some(Row::Task { .. }) => app.open_edit_form(),
            Some(_) => app.toggle_section(),
            None => {}
        },
        KeyCode::Char('a') => app.open_add_form(),
        KeyCode::Char('e') => app.open_edit_form(),
        KeyCode::Char('s') => app.cycle_status(),
        KeyCode::Char('d') | KeyCode::Delete => app.request_delete(),
        KeyCode::Char('?') => app.show_key_hints = !app.show_key_hints,
        _ => {}
    }
}
