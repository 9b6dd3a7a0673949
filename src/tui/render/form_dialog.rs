use ratatui::Frame;
use ratatui::layout::{Position, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::model::task::TaskStatus;
use crate::tui::app::App;
use crate::tui::form::{FormField, TaskForm};
use crate::util::unicode::{byte_offset_to_display_col, truncate_to_width};

use super::centered_rect;

const LABEL_W: usize = 13;
const FIELDS: [FormField; 4] = [
    FormField::Title,
    FormField::Description,
    FormField::Date,
    FormField::Status,
];

/// Render the add/edit task dialog
pub fn render_form_dialog(frame: &mut Frame, app: &App, area: Rect) {
    let Some(form) = &app.form else {
        return;
    };

    let bg = app.theme.background;
    let text_style = Style::default().fg(app.theme.text).bg(bg);
    let dim_style = Style::default().fg(app.theme.dim).bg(bg);
    let focus_style = Style::default()
        .fg(app.theme.highlight)
        .bg(bg)
        .add_modifier(Modifier::BOLD);

    let popup = centered_rect(64, 12, area);
    frame.render_widget(Clear, popup);

    let block = Block::default()
        .title(Span::styled(format!(" {} ", form.heading()), focus_style))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.highlight).bg(bg))
        .style(Style::default().bg(bg));
    let inner = block.inner(popup);
    frame.render_widget(block, popup);

    let value_w = (inner.width as usize).saturating_sub(LABEL_W + 2);
    let mut lines = vec![Line::from("")];
    for field in FIELDS {
        let focused = form.focus == field;
        let label = format!(" {:<width$}", field.label(), width = LABEL_W - 1);
        let label_style = if focused { focus_style } else { dim_style };
        let value = field_value(form, field, value_w);
        lines.push(Line::from(vec![
            Span::styled(label, label_style),
            Span::styled(value, text_style),
        ]));
        lines.push(Line::from(""));
    }
    if let Some(err) = &form.error {
        lines.push(Line::from(Span::styled(
            format!(" {}", err),
            Style::default().fg(app.theme.red).bg(bg),
        )));
    }
    frame.render_widget(Paragraph::new(lines).style(Style::default().bg(bg)), inner);

    // Terminal cursor inside the focused text field
    if let Some(tf) = form.field(form.focus) {
        let row = 1 + 2 * field_index(form.focus);
        let col = LABEL_W + byte_offset_to_display_col(&tf.text, tf.cursor);
        if (row as u16) < inner.height && (col as u16) < inner.width {
            frame.set_cursor_position(Position::new(
                inner.x + col as u16,
                inner.y + row as u16,
            ));
        }
    }
}

fn field_index(field: FormField) -> usize {
    FIELDS.iter().position(|f| *f == field).unwrap_or(0)
}

fn field_value(form: &TaskForm, field: FormField, width: usize) -> String {
    match form.field(field) {
        Some(tf) => truncate_to_width(&tf.text, width),
        None => status_selector(form.status),
    }
}

/// `‹ In Progress ›`
fn status_selector(status: TaskStatus) -> String {
    format!("\u{2039} {} \u{203A}", status.label())
}
