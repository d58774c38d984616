use chrono::NaiveDateTime;
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::{
    app::state::AppState,
    domain::weather::format_clock,
    ui::widgets::{muted_style, strong_style},
};

pub const CLOCK_ROWS: u16 = 5;

/// Block glyphs, five rows tall.
const DIGITS: [[&str; 5]; 10] = [
    ["█████", "█   █", "█   █", "█   █", "█████"],
    ["  █  ", " ██  ", "  █  ", "  █  ", " ███ "],
    ["█████", "    █", "█████", "█    ", "█████"],
    ["█████", "    █", " ████", "    █", "█████"],
    ["█   █", "█   █", "█████", "    █", "    █"],
    ["█████", "█    ", "█████", "    █", "█████"],
    ["█████", "█    ", "█████", "█   █", "█████"],
    ["█████", "    █", "   █ ", "  █  ", "  █  "],
    ["█████", "█   █", "█████", "█   █", "█████"],
    ["█████", "█   █", "█████", "    █", "█████"],
];
const COLON: [&str; 5] = [" ", "█", " ", "█", " "];
const BLANK: [&str; 5] = [" "; 5];

fn glyph(ch: char) -> [&'static str; 5] {
    match ch {
        ':' => COLON,
        _ => ch
            .to_digit(10)
            .and_then(|digit| DIGITS.get(digit as usize))
            .copied()
            .unwrap_or(BLANK),
    }
}

/// Render `text` as `CLOCK_ROWS` lines of block glyphs, one space apart.
#[must_use]
pub fn big_text_lines(text: &str) -> Vec<String> {
    (0..CLOCK_ROWS as usize)
        .map(|row| {
            text.chars()
                .map(|ch| glyph(ch)[row])
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect()
}

pub fn render(frame: &mut Frame, area: Rect, state: &AppState, now: NaiveDateTime) {
    let (digits, meridiem) = format_clock(&now, state.settings.clock_format);
    let mut lines: Vec<Line> = big_text_lines(&digits)
        .into_iter()
        .map(|row| Line::from(Span::styled(row, strong_style())))
        .collect();

    // The meridiem sits beside the last row; pad the others so columns line up.
    if let Some(meridiem) = meridiem {
        let pad = " ".repeat(meridiem.len() + 1);
        let last = lines.len().saturating_sub(1);
        for (idx, line) in lines.iter_mut().enumerate() {
            if idx == last {
                line.spans.push(Span::styled(format!(" {meridiem}"), muted_style()));
            } else {
                line.spans.push(Span::raw(pad.clone()));
            }
        }
    }

    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
}

/// Single-line clock for terminals too small for anything else.
pub fn render_compact(frame: &mut Frame, area: Rect, state: &AppState, now: NaiveDateTime) {
    let text = match format_clock(&now, state.settings.clock_format) {
        (digits, Some(meridiem)) => format!("{digits} {meridiem}"),
        (digits, None) => digits,
    };
    let row = Rect {
        y: area.y + area.height / 2,
        height: area.height.min(1),
        ..area
    };
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(text, strong_style())))
            .alignment(Alignment::Center),
        row,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn big_text_has_one_line_per_row() {
        let lines = big_text_lines("12:05");
        assert_eq!(lines.len(), CLOCK_ROWS as usize);
        assert_eq!(lines[0], "  █   █████   █████ █████");
    }

    #[test]
    fn all_rows_share_a_width() {
        let lines = big_text_lines("09:47");
        let width = lines[0].chars().count();
        assert!(lines.iter().all(|line| line.chars().count() == width));
        assert_eq!(width, 4 * 5 + 1 + 4);
    }

    #[test]
    fn unknown_characters_render_blank() {
        assert_eq!(glyph('x'), BLANK);
        assert_eq!(glyph(':')[1], "█");
    }
}
