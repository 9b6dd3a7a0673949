use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::model::task::{Task, TaskStatus};
use crate::tui::app::{App, Row};
use crate::util::unicode::{display_width, truncate_to_width};

use super::push_highlighted_spans;

const EXPANDED_ICON: &str = "\u{25BE}"; // ▾
const COLLAPSED_ICON: &str = "\u{25B8}"; // ▸
const STATUS_DOT: &str = "\u{25CF}"; // ●

/// Render the accordion of status sections
pub fn render_board(frame: &mut Frame, app: &mut App, area: Rect) {
    let rows = app.rows();
    let height = area.height as usize;

    // Keep the cursor on screen
    if app.cursor < app.scroll_offset {
        app.scroll_offset = app.cursor;
    } else if height > 0 && app.cursor >= app.scroll_offset + height {
        app.scroll_offset = app.cursor + 1 - height;
    }
    let max_scroll = rows.len().saturating_sub(height);
    app.scroll_offset = app.scroll_offset.min(max_scroll);

    let app = &*app;
    let groups = app.groups();
    let width = area.width as usize;
    let lines: Vec<Line> = rows
        .iter()
        .enumerate()
        .skip(app.scroll_offset)
        .take(height)
        .map(|(i, row)| {
            let selected = i == app.cursor;
            match row {
                Row::Header(status) => {
                    section_header_line(app, *status, groups.count(*status), selected, width)
                }
                Row::Task { id, .. } => match app.store.get(id) {
                    Some(task) => task_line(app, task, selected, width),
                    None => Line::default(),
                },
                Row::Empty(_) => Line::from(Span::styled(
                    "    No tasks",
                    Style::default()
                        .fg(app.theme.dim)
                        .bg(app.theme.background)
                        .add_modifier(Modifier::ITALIC),
                )),
            }
        })
        .collect();

    let paragraph = Paragraph::new(lines).style(Style::default().bg(app.theme.background));
    frame.render_widget(paragraph, area);
}

fn section_header_line(
    app: &App,
    status: TaskStatus,
    count: usize,
    selected: bool,
    width: usize,
) -> Line<'static> {
    let bg = if selected {
        app.theme.selection_bg
    } else {
        app.theme.section_bg
    };
    let icon = if app.expanded.contains(&status) {
        EXPANDED_ICON
    } else {
        COLLAPSED_ICON
    };
    let base = Style::default().fg(app.theme.text).bg(bg);
    let text = format!(" {} {} ({})", icon, status.label(), count);
    let pad = width.saturating_sub(display_width(&text));
    Line::from(vec![
        Span::styled(text, base.add_modifier(Modifier::BOLD)),
        Span::styled(" ".repeat(pad), base),
    ])
}

/// `  ● Title  description            2024-07-31`
fn task_line(app: &App, task: &Task, selected: bool, width: usize) -> Line<'static> {
    let bg = if selected {
        app.theme.selection_bg
    } else {
        app.theme.background
    };
    let title_style = Style::default().fg(app.theme.text).bg(bg);
    let desc_style = Style::default().fg(app.theme.dim).bg(bg);
    let match_style = Style::default()
        .fg(app.theme.text)
        .bg(app.theme.match_bg)
        .add_modifier(Modifier::BOLD);
    let query = app.query();

    let prefix = format!("  {} ", STATUS_DOT);
    let date = format!("  {} ", task.date);
    let room = width.saturating_sub(display_width(&prefix) + display_width(&date));

    let title = truncate_to_width(&task.title, room);
    let mut used = display_width(&title);
    let description = match task.description.as_deref() {
        Some(d) if !d.is_empty() && used + 3 < room => {
            used += 2;
            let d = truncate_to_width(d, room - used);
            used += display_width(&d);
            Some(d)
        }
        _ => None,
    };

    let mut spans = vec![
        Span::styled("  ", title_style),
        Span::styled(
            STATUS_DOT,
            Style::default().fg(app.theme.status_color(task.status)).bg(bg),
        ),
        Span::styled(" ", title_style),
    ];
    push_highlighted_spans(&mut spans, &title, title_style, match_style, query);
    if let Some(d) = description {
        spans.push(Span::styled("  ", desc_style));
        push_highlighted_spans(&mut spans, &d, desc_style, match_style, query);
    }
    spans.push(Span::styled(" ".repeat(room - used), title_style));
    spans.push(Span::styled(date, desc_style));
    Line::from(spans)
}
