use ratatui::Frame;
use ratatui::layout::{Position, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::tui::app::{App, Mode};
use crate::util::unicode::{
    byte_offset_to_display_col, display_col_to_byte_offset, display_width,
};

const TITLE: &str = "TO-DO APP";
const SEARCH_PLACEHOLDER: &str = "Search To-Do";

/// The colored bar across the top
pub fn render_title_bar(frame: &mut Frame, app: &App, area: Rect) {
    let style = Style::default()
        .fg(app.theme.header_fg)
        .bg(app.theme.header_bg);
    let line = Line::from(Span::styled(
        format!(" {}", TITLE),
        style.add_modifier(Modifier::BOLD),
    ));
    frame.render_widget(Paragraph::new(line).style(style), area);
}

/// Bordered search input. Shows the placeholder while empty and unfocused.
pub fn render_search_box(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let focused = app.mode == Mode::Search;
    let border_color = if focused {
        app.theme.highlight
    } else {
        app.theme.dim
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color).bg(bg))
        .style(Style::default().bg(bg));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let query = app.query();
    let count = if query.trim().is_empty() {
        None
    } else {
        Some(format!("{} found ", app.groups().total()))
    }
    .filter(|c| display_width(c) as u16 + 2 < inner.width);
    let count_w = count.as_deref().map_or(0, |c| display_width(c) as u16);
    let text_area = Rect::new(inner.x, inner.y, inner.width - count_w, inner.height);

    // One cell of padding on the left, one kept free for the cursor at the end
    let visible_cols = (text_area.width as usize).saturating_sub(2);
    let cursor_col = byte_offset_to_display_col(query, app.search.cursor);
    let start = display_col_to_byte_offset(query, cursor_col.saturating_sub(visible_cols));
    let start_col = byte_offset_to_display_col(query, start);

    let line = if query.is_empty() && !focused {
        Line::from(Span::styled(
            format!(" {}", SEARCH_PLACEHOLDER),
            Style::default().fg(app.theme.dim).bg(bg),
        ))
    } else {
        Line::from(vec![
            Span::styled(" ", Style::default().bg(bg)),
            Span::styled(&query[start..], Style::default().fg(app.theme.text).bg(bg)),
        ])
    };
    frame.render_widget(Paragraph::new(line), text_area);

    if focused && text_area.width > 0 && text_area.height > 0 {
        let col = 1 + cursor_col - start_col;
        let max_col = text_area.width.saturating_sub(1) as usize;
        frame.set_cursor_position(Position::new(
            text_area.x + col.min(max_col) as u16,
            text_area.y,
        ));
    }

    // Match count on the right edge while filtering
    if let Some(count) = count {
        let count_area = Rect::new(text_area.x + text_area.width, inner.y, count_w, 1);
        frame.render_widget(
            Paragraph::new(Span::styled(count, Style::default().fg(app.theme.dim).bg(bg))),
            count_area,
        );
    }
}
