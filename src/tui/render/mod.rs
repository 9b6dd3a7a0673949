pub mod board;
pub mod confirm_dialog;
pub mod form_dialog;
pub mod header;
pub mod status_row;

#[cfg(test)]
pub(crate) mod test_helpers;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::Span;
use ratatui::widgets::Block;

use crate::ops::search::match_ranges;

use super::app::{App, Mode};

/// Main render function: dispatches to sub-renderers
pub fn render(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    let bg_style = Style::default().bg(app.theme.background);
    frame.render_widget(Block::default().style(bg_style), area);

    // Layout: title bar | search box | board | status row
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(area);

    header::render_title_bar(frame, app, chunks[0]);
    header::render_search_box(frame, app, chunks[1]);
    board::render_board(frame, app, chunks[2]);
    status_row::render_status_row(frame, app, chunks[3]);

    match app.mode {
        Mode::Form => form_dialog::render_form_dialog(frame, app, area),
        Mode::Confirm => confirm_dialog::render_confirm_dialog(frame, app, area),
        Mode::Navigate | Mode::Search => {}
    }
}

/// A `width` x `height` rect centered in `area`, shrunk to fit.
pub(super) fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    Rect::new(
        area.x + (area.width - w) / 2,
        area.y + (area.height - h) / 2,
        w,
        h,
    )
}

/// Push spans for `text`, with every case-insensitive occurrence of `query`
/// in `highlight_style`. A blank query yields one `base_style` span.
pub(super) fn push_highlighted_spans(
    spans: &mut Vec<Span<'static>>,
    text: &str,
    base_style: Style,
    highlight_style: Style,
    query: &str,
) {
    let mut last_end = 0;
    for range in match_ranges(text, query) {
        if range.start > last_end {
            spans.push(Span::styled(
                text[last_end..range.start].to_string(),
                base_style,
            ));
        }
        spans.push(Span::styled(text[range.clone()].to_string(), highlight_style));
        last_end = range.end;
    }
    if last_end < text.len() || text.is_empty() {
        spans.push(Span::styled(text[last_end..].to_string(), base_style));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::task::TaskStatus;
    use crate::tui::render::test_helpers::*;
    use ratatui::style::Color;

    #[test]
    fn full_screen_layout() {
        let mut app = seeded_app();
        let output = render_to_string(TERM_W, TERM_H, |frame, _| render(frame, &mut app));
        let lines: Vec<&str> = output.lines().collect();
        assert!(lines[0].contains("TO-DO APP"));
        assert!(lines[2].contains("Search To-Do"));
        assert!(output.contains("In Progress (2)"));
        assert!(output.contains("Lorem Ipsum 2"));
        assert!(output.contains("Pending (1)"));
        assert!(output.contains("Completed (1)"));
        // Collapsed sections hide their tasks
        assert!(!output.contains("Pending item"));
    }

    #[test]
    fn form_overlay_drawn_on_top() {
        let mut app = seeded_app();
        app.open_add_form();
        let output = render_to_string(TERM_W, TERM_H, |frame, _| render(frame, &mut app));
        assert!(output.contains("Add Task"));
        assert!(output.contains("Title"));
    }

    #[test]
    fn confirm_overlay_drawn_on_top() {
        let mut app = seeded_app();
        app.expanded.insert(TaskStatus::Completed);
        app.cursor_to_bottom();
        app.request_delete();
        let output = render_to_string(TERM_W, TERM_H, |frame, _| render(frame, &mut app));
        assert!(output.contains("Are you sure you want to delete this task?"));
        assert!(output.contains("Completed task"));
    }

    #[test]
    fn highlighted_spans_split_on_matches() {
        let base = Style::default();
        let hl = Style::default().bg(Color::Yellow);
        let mut spans = Vec::new();
        push_highlighted_spans(&mut spans, "Lorem Ipsum lorem", base, hl, "LOREM");
        let parts: Vec<(&str, bool)> = spans
            .iter()
            .map(|s| (s.content.as_ref(), s.style == hl))
            .collect();
        assert_eq!(
            parts,
            vec![("Lorem", true), (" Ipsum ", false), ("lorem", true)]
        );

        let mut spans = Vec::new();
        push_highlighted_spans(&mut spans, "plain", base, hl, "  ");
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].content, "plain");
    }
}
