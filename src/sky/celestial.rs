#![allow(clippy::cast_precision_loss)]

use std::f32::consts::PI;

use chrono::Timelike;

use crate::sky::Viewport;

pub const DAY_START_HOUR: f32 = 6.0;
pub const DAY_END_HOUR: f32 = 18.0;
const HALF_CYCLE_HOURS: f32 = 12.0;
/// Vertical extent of the arc as fractions of the viewport height.
pub const HORIZON_FRACTION: f32 = 0.8;
pub const ZENITH_FRACTION: f32 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyKind {
    Sun,
    Moon,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CelestialBody {
    pub x: f32,
    pub y: f32,
    pub kind: BodyKind,
    pub visible: bool,
}

pub fn fractional_hour<T: Timelike>(now: &T) -> f32 {
    now.hour() as f32 + now.minute() as f32 / 60.0 + now.second() as f32 / 3600.0
}

pub fn compute_position<T: Timelike>(now: &T, viewport: Viewport) -> CelestialBody {
    compute_position_at_hour(fractional_hour(now), viewport)
}

/// Place the sun or moon on a sinusoidal arc that rises on the right edge
/// and sets on the left. Day covers `[6, 18]`, night the rest of the clock
/// wrapping through midnight.
#[must_use]
pub fn compute_position_at_hour(hour: f32, viewport: Viewport) -> CelestialBody {
    let hour = if hour.is_finite() {
        hour.rem_euclid(24.0)
    } else {
        0.0
    };
    let is_day = (DAY_START_HOUR..=DAY_END_HOUR).contains(&hour);
    let progress = arc_progress(hour, is_day);

    let horizon = viewport.height * HORIZON_FRACTION;
    let zenith = viewport.height * ZENITH_FRACTION;

    CelestialBody {
        x: viewport.width - progress * viewport.width,
        y: horizon - (progress * PI).sin() * (horizon - zenith),
        kind: if is_day { BodyKind::Sun } else { BodyKind::Moon },
        visible: !viewport.is_empty(),
    }
}

/// Fraction of the current half-cycle already elapsed, always in `[0, 1]`.
#[must_use]
pub fn arc_progress(hour: f32, is_day: bool) -> f32 {
    let raw = if is_day {
        (hour - DAY_START_HOUR) / HALF_CYCLE_HOURS
    } else {
        let adjusted = if hour < DAY_START_HOUR {
            hour + 24.0
        } else {
            hour
        };
        (adjusted - DAY_END_HOUR) / HALF_CYCLE_HOURS
    };
    if raw.is_nan() {
        0.0
    } else {
        raw.clamp(0.0, 1.0)
    }
}
