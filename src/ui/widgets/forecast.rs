use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::{
    app::state::AppState,
    domain::weather::{DailyForecast, forecast_day_label, round_temp, weather_icon},
    ui::widgets::{muted_style, strong_style, text_style},
};

pub const FORECAST_DAYS: usize = 6;
pub const FORECAST_ROWS: u16 = 3;

pub fn render(frame: &mut Frame, area: Rect, state: &AppState) {
    let Some(bundle) = &state.weather else {
        return;
    };
    let days: Vec<&DailyForecast> = bundle.daily.iter().take(FORECAST_DAYS).collect();
    if days.is_empty() {
        return;
    }

    let count = u32::try_from(days.len()).unwrap_or(1);
    let columns = Layout::horizontal(vec![Constraint::Ratio(1, count); days.len()]).split(area);
    for (idx, (day, column)) in days.iter().zip(columns.iter()).enumerate() {
        frame.render_widget(
            Paragraph::new(day_lines(idx, day)).alignment(Alignment::Center),
            *column,
        );
    }
}

/// Day label, icon, then high/low.
#[must_use]
pub fn day_lines(index: usize, day: &DailyForecast) -> Vec<Line<'static>> {
    let icon = day
        .weather_code
        .map_or("·", |code| weather_icon(code, true));
    let temps = match (day.temperature_max_c, day.temperature_min_c) {
        (Some(high), Some(low)) => format!("{}° / {}°", round_temp(high), round_temp(low)),
        (Some(high), None) => format!("{}°", round_temp(high)),
        _ => "--".to_string(),
    };
    vec![
        Line::from(Span::styled(forecast_day_label(index, day.date), muted_style())),
        Line::from(Span::styled(icon, strong_style())),
        Line::from(Span::styled(temps, text_style())),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::sample_bundle;

    fn plain(lines: &[Line]) -> Vec<String> {
        lines.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn first_column_is_today() {
        let bundle = sample_bundle(3);
        let lines = day_lines(0, &bundle.daily[0]);
        assert_eq!(plain(&lines), vec!["TODAY", "☁", "22° / 11°"]);
    }

    #[test]
    fn later_columns_use_weekday_names() {
        let bundle = sample_bundle(71);
        let lines = day_lines(1, &bundle.daily[1]);
        assert_eq!(plain(&lines)[0], "THU");
        assert_eq!(plain(&lines)[1], "☂");
    }

    #[test]
    fn missing_values_degrade_gracefully() {
        let mut day = sample_bundle(0).daily[0].clone();
        day.weather_code = None;
        day.temperature_max_c = None;
        assert_eq!(plain(&day_lines(2, &day))[1..], ["·", "--"]);
    }
}
