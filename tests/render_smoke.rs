mod common;

use ambient_sky::{
    app::state::{AppMode, AppState},
    domain::weather::ClockFormat,
    resilience::freshness::FreshnessState,
    ui,
};
use common::{fixed_time, fixture_bundle, quiet_cli, ready_state_with_weather};
use ratatui::{Terminal, backend::TestBackend, buffer::Buffer, style::Color};

fn draw(width: u16, height: u16, state: &mut AppState, at: &str) -> Buffer {
    let backend = TestBackend::new(width, height);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal
        .draw(|frame| ui::render_at(frame, state, fixed_time(at)))
        .expect("draw");
    terminal.backend().buffer().clone()
}

fn text(buffer: &Buffer) -> String {
    let area = buffer.area;
    (0..area.height)
        .map(|y| {
            (0..area.width)
                .map(|x| buffer[(x, y)].symbol())
                .collect::<String>()
                .trim_end()
                .to_string()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn full_layout_shows_clock_conditions_and_forecast() {
    let cli = quiet_cli();
    let mut state = ready_state_with_weather(&cli, fixture_bundle(3));
    let screen = text(&draw(80, 24, &mut state, "2026-01-21T14:30"));

    assert!(screen.contains('█'), "big clock missing:\n{screen}");
    assert!(screen.contains("PM"));
    assert!(screen.contains("Wednesday, 21 January · Christchurch"));
    assert!(screen.contains("Overcast  18°  H 21° L 10°"));
    assert!(screen.contains("Sunset 09:06 PM"));
    assert!(screen.contains("TODAY"));
    assert!(screen.contains("THU"));
}

#[test]
fn twenty_four_hour_clock_drops_the_meridiem() {
    let cli = quiet_cli();
    let mut state = ready_state_with_weather(&cli, fixture_bundle(0));
    state.settings.clock_format = ClockFormat::TwentyFourHour;
    let screen = text(&draw(80, 24, &mut state, "2026-01-21T14:30"));
    assert!(!screen.contains("PM"));
}

#[test]
fn sky_background_is_painted_behind_everything() {
    let cli = quiet_cli();
    let mut state = ready_state_with_weather(&cli, fixture_bundle(61));
    let buffer = draw(80, 24, &mut state, "2026-01-21T09:00");

    assert!(
        buffer
            .content()
            .iter()
            .all(|cell| matches!(cell.bg, Color::Rgb(..))),
        "every cell should carry a sky colour"
    );
    assert!(buffer.content().iter().any(|cell| cell.symbol() == "│"));
    assert_eq!(state.sky.field().len(), 800);
}

#[test]
fn tiny_terminal_falls_back_to_the_clock() {
    let cli = quiet_cli();
    let mut state = ready_state_with_weather(&cli, fixture_bundle(0));
    let screen = text(&draw(20, 6, &mut state, "2026-01-21T07:05"));
    assert!(screen.contains("07:05 AM"), "{screen}");
    assert!(!screen.contains("TODAY"));
}

#[test]
fn offline_without_data_says_so() {
    let cli = quiet_cli();
    let mut state = AppState::new(&cli);
    state.mode = AppMode::Error;
    state.refresh_meta.state = FreshnessState::Offline;
    let screen = text(&draw(80, 24, &mut state, "2026-01-21T22:00"));
    assert!(screen.contains("Offline"));
    assert!(!screen.contains("TODAY"));
}

#[test]
fn stale_data_is_flagged() {
    let cli = quiet_cli();
    let mut state = ready_state_with_weather(&cli, fixture_bundle(45));
    state.refresh_meta.state = FreshnessState::Stale;
    let screen = text(&draw(80, 24, &mut state, "2026-01-21T10:00"));
    assert!(screen.contains("⚠ stale"));
}

#[test]
fn zero_sized_terminal_does_not_panic() {
    let cli = quiet_cli();
    let mut state = ready_state_with_weather(&cli, fixture_bundle(73));
    let _ = draw(0, 0, &mut state, "2026-01-21T10:00");
    assert!(state.sky.viewport().is_empty());
}
