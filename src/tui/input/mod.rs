mod common;
mod confirm;
mod form;
mod navigate;
mod search;

use crossterm::event::{KeyCode, KeyEvent};

use super::app::{App, Mode};

// Submodules reach shared helpers through `use super::*;`
#[allow(unused_imports)]
use common::*;
#[allow(unused_imports)]
use confirm::*;
#[allow(unused_imports)]
use form::*;
#[allow(unused_imports)]
use navigate::*;
#[allow(unused_imports)]
use search::*;

/// Handle a key event in the current mode
pub fn handle_key(app: &mut App, key: KeyEvent) {
    // Ignore bare modifier key presses (Shift, Ctrl, Alt, etc.)
    if matches!(key.code, KeyCode::Modifier(_)) {
        return;
    }
    app.message = None;

    match app.mode {
        Mode::Navigate => handle_navigate(app, key),
        Mode::Search => handle_search(app, key),
        Mode::Form => handle_form(app, key),
        Mode::Confirm => handle_confirm(app, key),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::task::TaskStatus;
    use crate::tui::app::Row;
    use crate::tui::render::test_helpers::{key, seeded_app, type_str};
    use crossterm::event::KeyModifiers;
    use pretty_assertions::assert_eq;

    #[test]
    fn q_quits() {
        let mut app = seeded_app();
        handle_key(&mut app, key(KeyCode::Char('q')));
        assert!(app.should_quit);
    }

    #[test]
    fn ctrl_c_quits_from_any_mode() {
        let mut app = seeded_app();
        handle_key(&mut app, key(KeyCode::Char('a')));
        assert_eq!(app.mode, Mode::Form);
        handle_key(
            &mut app,
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
        );
        assert!(app.should_quit);
    }

    #[test]
    fn j_k_move_cursor() {
        let mut app = seeded_app();
        handle_key(&mut app, key(KeyCode::Char('j')));
        handle_key(&mut app, key(KeyCode::Down));
        assert_eq!(app.selected_task().map(|t| t.id.as_str()), Some("t2"));
        handle_key(&mut app, key(KeyCode::Char('k')));
        assert_eq!(app.selected_task().map(|t| t.id.as_str()), Some("t1"));
        handle_key(&mut app, key(KeyCode::Char('G')));
        assert_eq!(app.selected_row(), Some(Row::Header(TaskStatus::Completed)));
        handle_key(&mut app, key(KeyCode::Char('g')));
        assert_eq!(app.cursor, 0);
    }

    #[test]
    fn enter_on_header_toggles_section() {
        let mut app = seeded_app();
        handle_key(&mut app, key(KeyCode::Enter));
        assert!(!app.expanded.contains(&TaskStatus::InProgress));
        handle_key(&mut app, key(KeyCode::Char(' ')));
        assert!(app.expanded.contains(&TaskStatus::InProgress));
    }

    #[test]
    fn enter_on_task_opens_edit_form() {
        let mut app = seeded_app();
        handle_key(&mut app, key(KeyCode::Char('j')));
        handle_key(&mut app, key(KeyCode::Enter));
        assert_eq!(app.mode, Mode::Form);
        assert_eq!(
            app.form.as_ref().and_then(|f| f.editing.as_deref()),
            Some("t1")
        );
    }

    #[test]
    fn search_filters_live_and_esc_clears() {
        let mut app = seeded_app();
        handle_key(&mut app, key(KeyCode::Char('/')));
        assert_eq!(app.mode, Mode::Search);
        type_str(&mut app, "ipsum 2");
        assert_eq!(app.query(), "ipsum 2");
        assert_eq!(app.groups().total(), 1);

        handle_key(&mut app, key(KeyCode::Enter));
        assert_eq!(app.mode, Mode::Navigate);
        assert_eq!(app.groups().total(), 1);

        handle_key(&mut app, key(KeyCode::Char('/')));
        handle_key(&mut app, key(KeyCode::Esc));
        assert_eq!(app.mode, Mode::Navigate);
        assert_eq!(app.query(), "");
        assert_eq!(app.groups().total(), 4);
    }

    #[test]
    fn search_backspace_edits_query() {
        let mut app = seeded_app();
        handle_key(&mut app, key(KeyCode::Char('/')));
        type_str(&mut app, "xyz");
        assert_eq!(app.groups().total(), 0);
        for _ in 0..3 {
            handle_key(&mut app, key(KeyCode::Backspace));
        }
        assert_eq!(app.groups().total(), 4);
    }

    #[test]
    fn search_ignores_alt_chords() {
        let mut app = seeded_app();
        handle_key(&mut app, key(KeyCode::Char('/')));
        type_str(&mut app, "item");
        handle_key(&mut app, KeyEvent::new(KeyCode::Char('x'), KeyModifiers::ALT));
        handle_key(
            &mut app,
            KeyEvent::new(KeyCode::Char('b'), KeyModifiers::ALT | KeyModifiers::SHIFT),
        );
        assert_eq!(app.query(), "item");
        assert_eq!(app.mode, Mode::Search);

        handle_key(&mut app, KeyEvent::new(KeyCode::Char('S'), KeyModifiers::SHIFT));
        assert_eq!(app.query(), "itemS");
    }

    #[test]
    fn add_task_through_form() {
        let mut app = seeded_app();
        handle_key(&mut app, key(KeyCode::Char('a')));
        type_str(&mut app, "Call the bank");
        handle_key(&mut app, key(KeyCode::Tab));
        type_str(&mut app, "before noon");
        handle_key(&mut app, key(KeyCode::Tab));
        handle_key(&mut app, key(KeyCode::Tab));
        // Status selector: pending -> in-progress
        handle_key(&mut app, key(KeyCode::Right));
        handle_key(&mut app, key(KeyCode::Enter));

        assert_eq!(app.mode, Mode::Navigate);
        let first = &app.store.tasks()[0];
        assert_eq!(first.title, "Call the bank");
        assert_eq!(first.description.as_deref(), Some("before noon"));
        assert_eq!(first.status, TaskStatus::InProgress);
    }

    #[test]
    fn esc_cancels_form_without_changes() {
        let mut app = seeded_app();
        handle_key(&mut app, key(KeyCode::Char('a')));
        type_str(&mut app, "Never saved");
        handle_key(&mut app, key(KeyCode::Esc));
        assert_eq!(app.mode, Mode::Navigate);
        assert_eq!(app.store.len(), 4);
    }

    #[test]
    fn delete_prompt_y_and_n() {
        let mut app = seeded_app();
        handle_key(&mut app, key(KeyCode::Char('j')));
        handle_key(&mut app, key(KeyCode::Char('d')));
        assert_eq!(app.mode, Mode::Confirm);
        handle_key(&mut app, key(KeyCode::Char('n')));
        assert_eq!(app.store.len(), 4);

        handle_key(&mut app, key(KeyCode::Char('d')));
        handle_key(&mut app, key(KeyCode::Char('y')));
        assert_eq!(app.store.len(), 3);
        assert!(app.store.get("t1").is_none());
    }

    #[test]
    fn s_cycles_status() {
        let mut app = seeded_app();
        handle_key(&mut app, key(KeyCode::Char('j')));
        handle_key(&mut app, key(KeyCode::Char('s')));
        assert_eq!(
            app.store.get("t1").map(|t| t.status),
            Some(TaskStatus::Completed)
        );
    }
}
