use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::tui::app::App;
use crate::tui::form::FormField;

use super::*;

pub(super) fn handle_form(app: &mut App, key: KeyEvent) {
    if is_force_quit(&key) {
        app.should_quit = true;
        return;
    }

    match key.code {
        KeyCode::Esc => {
            app.cancel_form();
            return;
        }
        KeyCode::Enter => {
            app.submit_form();
            return;
        }
        _ => {}
    }

    let Some(form) = &mut app.form else {
        return;
    };
    match key.code {
        KeyCode::Tab | KeyCode::Down => form.focus = form.focus.next(),
        KeyCode::BackTab | KeyCode::Up => form.focus = form.focus.prev(),
        _ if form.focus == FormField::Status => match key.code {
            KeyCode::Right | KeyCode::Char(' ') | KeyCode::Char('l') => {
                form.status = form.status.cycle();
            }
            KeyCode::Left | KeyCode::Char('h') => {
                // Two steps forward in a three-cycle is one step back
                form.status = form.status.cycle().cycle();
            }
            _ => {}
        },
        _ => {
            if key.modifiers.contains(KeyModifiers::ALT) {
                return;
            }
            if let Some(field) = form.focused_field_mut()
                && edit_text_field(field, key)
            {
                form.error = None;
            }
        }
    }
}
