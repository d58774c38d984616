pub mod clock;
pub mod conditions;
pub mod forecast;

use ratatui::style::{Color, Modifier, Style};

pub(crate) const TEXT: Color = Color::Rgb(235, 238, 245);
pub(crate) const MUTED: Color = Color::Rgb(150, 160, 185);
pub(crate) const WARNING: Color = Color::Rgb(240, 190, 90);

pub(crate) fn text_style() -> Style {
    Style::default().fg(TEXT)
}

pub(crate) fn muted_style() -> Style {
    Style::default().fg(MUTED)
}

pub(crate) fn strong_style() -> Style {
    text_style().add_modifier(Modifier::BOLD)
}
