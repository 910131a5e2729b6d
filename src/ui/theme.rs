use crate::ui::style::{Color, Style};

#[derive(Debug, Clone)]
pub struct Theme {
    pub title: Style,
    pub hint: Style,
    pub error: Style,
    pub valid_marker: Style,
    pub invalid_marker: Style,
    pub button: Style,
}

impl Theme {
    pub fn default_theme() -> Self {
        Self {
            title: Style::new().bold(),
            hint: Style::new().color(Color::DarkGrey),
            error: Style::new().color(Color::Red).bold(),
            valid_marker: Style::new().color(Color::Green),
            invalid_marker: Style::new().color(Color::Red),
            button: Style::new()
                .color(Color::White)
                .background(Color::Black)
                .bold(),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::default_theme()
    }
}
