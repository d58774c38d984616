pub mod surface;
pub mod widgets;

use chrono::{Local, NaiveDateTime};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
};

use crate::{app::state::AppState, ui::surface::TerminalSurface};
use widgets::{clock::CLOCK_ROWS, forecast::FORECAST_ROWS};

/// Below this only the compact clock is shown over the sky.
pub const MIN_WIDTH: u16 = 40;
pub const MIN_HEIGHT: u16 = 14;
const CONDITION_ROWS: u16 = 3;

pub fn render(frame: &mut Frame, state: &mut AppState) {
    render_at(frame, state, Local::now().naive_local());
}

/// Sky first, then the clock, conditions and forecast on top of it.
pub fn render_at(frame: &mut Frame, state: &mut AppState, now: NaiveDateTime) {
    let area = frame.area();
    let time = now.time();
    state.sync_viewport(area.width, area.height, &time);
    let dt = state.take_frame_delta();
    state
        .sky
        .render_frame(&time, dt, &mut TerminalSurface::new(frame.buffer_mut(), area));

    if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
        widgets::clock::render_compact(frame, area, state, now);
        return;
    }

    let [_, clock, _, conditions, _, forecast, _] = Layout::vertical([
        Constraint::Fill(2),
        Constraint::Length(CLOCK_ROWS),
        Constraint::Length(1),
        Constraint::Length(CONDITION_ROWS),
        Constraint::Fill(1),
        Constraint::Length(FORECAST_ROWS),
        Constraint::Length(1),
    ])
    .areas(area);

    widgets::clock::render(frame, clock, state, now);
    widgets::conditions::render(frame, conditions, state, now);
    widgets::forecast::render(frame, inset(forecast, 2), state);
}

fn inset(area: Rect, horizontal: u16) -> Rect {
    let margin = horizontal.min(area.width / 2);
    Rect {
        x: area.x + margin,
        width: area.width - margin * 2,
        ..area
    }
}
