use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::tui::app::App;
use crate::util::unicode::truncate_to_width;

use super::centered_rect;

/// Render the delete confirmation popup
pub fn render_confirm_dialog(frame: &mut Frame, app: &App, area: Rect) {
    let Some(task) = app.confirm_delete.as_deref().and_then(|id| app.store.get(id)) else {
        return;
    };

    let bg = app.theme.background;
    let text_style = Style::default().fg(app.theme.text).bg(bg);
    let dim_style = Style::default().fg(app.theme.dim).bg(bg);
    let warn_style = Style::default()
        .fg(app.theme.red)
        .bg(bg)
        .add_modifier(Modifier::BOLD);

    let popup = centered_rect(50, 8, area);
    frame.render_widget(Clear, popup);

    let block = Block::default()
        .title(Span::styled(" Delete Task ", warn_style))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.red).bg(bg))
        .style(Style::default().bg(bg));
    let inner = block.inner(popup);
    frame.render_widget(block, popup);

    let title_w = (inner.width as usize).saturating_sub(4);
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            " Are you sure you want to delete this task?",
            text_style,
        )),
        Line::from(Span::styled(
            format!("   {}", truncate_to_width(&task.title, title_w)),
            text_style.add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled(" y", warn_style),
            Span::styled(" Yes   ", dim_style),
            Span::styled("n", text_style.add_modifier(Modifier::BOLD)),
            Span::styled(" No", dim_style),
        ]),
    ];
    frame.render_widget(Paragraph::new(lines).style(Style::default().bg(bg)), inner);
}
