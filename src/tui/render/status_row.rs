use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::{App, Mode};
use crate::util::unicode::display_width;

/// Key hints for the current mode
fn hints(mode: Mode) -> &'static str {
    match mode {
        Mode::Navigate => "a add  e edit  s status  d delete  / search  q quit",
        Mode::Search => "Enter keep  Esc clear",
        Mode::Form => "Tab next field  Enter save  Esc cancel",
        Mode::Confirm => "y delete  n cancel",
    }
}

/// Render the status row (bottom of screen)
pub fn render_status_row(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let width = area.width as usize;

    // Left: last action message, else key hints
    let left = match &app.message {
        Some(msg) => Span::styled(format!(" {}", msg), Style::default().fg(app.theme.text).bg(bg)),
        None if app.show_key_hints => Span::styled(
            format!(" {}", hints(app.mode)),
            Style::default().fg(app.theme.dim).bg(bg),
        ),
        None => Span::styled("", Style::default().bg(bg)),
    };

    let total = app.store.len();
    let right = format!("{} task{} ", total, if total == 1 { "" } else { "s" });

    let left_width = display_width(&left.content);
    let right_width = display_width(&right);
    let mut spans = vec![left];
    if left_width + right_width < width {
        let padding = width - left_width - right_width;
        spans.push(Span::styled(" ".repeat(padding), Style::default().bg(bg)));
        spans.push(Span::styled(right, Style::default().fg(app.theme.dim).bg(bg)));
    }

    let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}
