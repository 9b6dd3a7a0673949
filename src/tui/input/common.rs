use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::tui::form::TextField;

/// Ctrl+C quits from every mode
pub(super) fn is_force_quit(key: &KeyEvent) -> bool {
    key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c')
}

/// Apply a line-editing key to `field`. Returns false when the key is not
/// an editing key, so the caller can handle it. Ctrl and Alt chords never
/// insert text.
pub(super) fn edit_text_field(field: &mut TextField, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            field.clear();
        }
        KeyCode::Char(c)
            if !key
                .modifiers
                .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
        {
            field.insert_char(c);
        }
        KeyCode::Backspace => field.backspace(),
        KeyCode::Delete => field.delete(),
        KeyCode::Left => field.left(),
        KeyCode::Right => field.right(),
        KeyCode::Home => field.home(),
        KeyCode::End => field.end(),
        _ => return false,
    }
    true
}
