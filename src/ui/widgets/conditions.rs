use chrono::NaiveDateTime;
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::{
    app::state::{AppMode, AppState},
    domain::weather::{
        ClockFormat, ForecastBundle, cardinal_direction, format_date, format_short_time,
        round_temp, weather_icon, weather_label,
    },
    resilience::freshness::FreshnessState,
    ui::widgets::{WARNING, muted_style, strong_style, text_style},
};

pub fn render(frame: &mut Frame, area: Rect, state: &AppState, now: NaiveDateTime) {
    let mut lines = vec![Line::from(vec![
        Span::styled(format_date(&now.date()), text_style()),
        Span::styled(format!(" · {}", state.location().name), muted_style()),
    ])];

    let mut headline = vec![Span::styled(condition_line(state), strong_style())];
    if let Some(marker) = freshness_marker(state) {
        headline.push(Span::styled(
            format!("  {marker}"),
            Style::default().fg(WARNING),
        ));
    }
    lines.push(Line::from(headline));

    if let Some(bundle) = &state.weather {
        lines.push(Line::from(Span::styled(
            detail_line(bundle, now, state.settings.clock_format),
            muted_style(),
        )));
    }

    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
}

/// Icon, label and temperatures, or a placeholder while nothing is known.
#[must_use]
pub fn condition_line(state: &AppState) -> String {
    let Some(bundle) = &state.weather else {
        return if state.mode == AppMode::Error {
            "Offline".to_string()
        } else {
            "Loading…".to_string()
        };
    };
    let code = bundle.current_weather_code();
    let mut line = format!(
        "{} {}  {}°",
        weather_icon(code, bundle.current.is_day),
        weather_label(code),
        bundle.current_temp()
    );
    if let Some((high, low)) = bundle.high_low_today() {
        line.push_str(&format!("  H {high}° L {low}°"));
    }
    line
}

#[must_use]
pub fn detail_line(bundle: &ForecastBundle, now: NaiveDateTime, format: ClockFormat) -> String {
    let current = &bundle.current;
    let mut parts = vec![
        format!(
            "Wind {} km/h {}",
            round_temp(current.wind_speed_10m),
            cardinal_direction(current.wind_direction_10m)
        ),
        format!("Precip {:.1} mm", current.precipitation_mm),
    ];
    if let Some((label, at)) = next_sun_event(bundle, now) {
        parts.push(format!("{label} {}", format_short_time(&at, format)));
    }
    parts.join(" · ")
}

/// Tonight's sunset until it has passed, then tomorrow's sunrise.
#[must_use]
pub fn next_sun_event(
    bundle: &ForecastBundle,
    now: NaiveDateTime,
) -> Option<(&'static str, NaiveDateTime)> {
    match bundle.sunset_today() {
        Some(sunset) if now < sunset => Some(("Sunset", sunset)),
        _ => bundle.sunrise_next().map(|sunrise| ("Sunrise", sunrise)),
    }
}

fn freshness_marker(state: &AppState) -> Option<&'static str> {
    state.weather.as_ref()?;
    match state.refresh_meta.state {
        FreshnessState::Fresh => None,
        FreshnessState::Stale => Some("⚠ stale"),
        FreshnessState::Offline => Some("⚠ offline"),
    }
}
