use ratatui::style::Color;

use crate::model::{TaskStatus, UiConfig};

/// Colors for the TUI. Defaults follow a light Material palette.
#[derive(Debug, Clone)]
pub struct Theme {
    pub background: Color,
    pub text: Color,
    pub dim: Color,
    pub highlight: Color,
    pub header_bg: Color,
    pub header_fg: Color,
    pub section_bg: Color,
    pub selection_bg: Color,
    pub match_bg: Color,
    pub red: Color,
    pub green: Color,
    pub orange: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Theme {
            background: Color::Rgb(0xFF, 0xFF, 0xFF),
            text: Color::Rgb(0x21, 0x21, 0x21),
            dim: Color::Rgb(0x75, 0x75, 0x75),
            highlight: Color::Rgb(0x19, 0x76, 0xD2),
            header_bg: Color::Rgb(0x19, 0x76, 0xD2),
            header_fg: Color::Rgb(0xFF, 0xFF, 0xFF),
            section_bg: Color::Rgb(0xF3, 0xF6, 0xF9),
            selection_bg: Color::Rgb(0xE3, 0xF2, 0xFD),
            match_bg: Color::Rgb(0xFF, 0xF5, 0x9D),
            red: Color::Rgb(0xD3, 0x2F, 0x2F),
            green: Color::Rgb(0x38, 0x8E, 0x3C),
            orange: Color::Rgb(0xF5, 0x7C, 0x00),
        }
    }
}

/// Parse a hex color string like "#1976D2" into an RGB Color
fn parse_hex_color(hex: &str) -> Option<Color> {
    let hex = hex.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some(Color::Rgb(r, g, b))
}

impl Theme {
    /// Defaults with `[ui.colors]` overrides applied. Unknown keys and
    /// unparsable values are ignored.
    pub fn from_config(ui: &UiConfig) -> Self {
        let mut theme = Theme::default();
        for (key, value) in &ui.colors {
            let Some(color) = parse_hex_color(value) else {
                continue;
            };
            match key.as_str() {
                "background" => theme.background = color,
                "text" => theme.text = color,
                "dim" => theme.dim = color,
                "highlight" => theme.highlight = color,
                "header_bg" => theme.header_bg = color,
                "header_fg" => theme.header_fg = color,
                "section_bg" => theme.section_bg = color,
                "selection_bg" => theme.selection_bg = color,
                "match_bg" => theme.match_bg = color,
                "red" => theme.red = color,
                "green" => theme.green = color,
                "orange" => theme.orange = color,
                _ => {}
            }
        }
        theme
    }

    /// Accent used for a task's status chip
    pub fn status_color(&self, status: TaskStatus) -> Color {
        match status {
            TaskStatus::Pending => self.orange,
            TaskStatus::InProgress => self.highlight,
            TaskStatus::Completed => self.green,
        }
    }
}
