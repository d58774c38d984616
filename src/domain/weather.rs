use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, Timelike, Utc};
use serde::{Deserialize, Serialize};

use crate::resilience::freshness::{FreshnessState, evaluate_freshness};

mod conditions;

pub use conditions::{
    ParticleKind, ParticleSpec, SkyCategory, classify, particle_spec, weather_icon, weather_label,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ClockFormat {
    #[default]
    TwelveHour,
    TwentyFourHour,
}

impl ClockFormat {
    #[must_use]
    pub fn toggle(self) -> Self {
        match self {
            ClockFormat::TwelveHour => ClockFormat::TwentyFourHour,
            ClockFormat::TwentyFourHour => ClockFormat::TwelveHour,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl Location {
    pub fn from_coords(lat: f64, lon: f64) -> Self {
        Self {
            name: format!("{lat:.4}, {lon:.4}"),
            latitude: lat,
            longitude: lon,
        }
    }

    pub fn christchurch() -> Self {
        Self {
            name: "Christchurch".to_string(),
            latitude: -43.5321,
            longitude: 172.6362,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CurrentConditions {
    pub temperature_2m_c: f32,
    pub weather_code: i32,
    pub wind_speed_10m: f32,
    pub wind_direction_10m: f32,
    pub is_day: bool,
    pub precipitation_mm: f32,
}

#[derive(Debug, Clone)]
pub struct DailyForecast {
    pub date: NaiveDate,
    pub weather_code: Option<i32>,
    pub temperature_max_c: Option<f32>,
    pub temperature_min_c: Option<f32>,
    pub sunrise: Option<NaiveDateTime>,
    pub sunset: Option<NaiveDateTime>,
}

#[derive(Debug, Clone)]
pub struct ForecastBundle {
    pub location: Location,
    pub current: CurrentConditions,
    pub daily: Vec<DailyForecast>,
    pub fetched_at: DateTime<Utc>,
}

impl ForecastBundle {
    pub fn current_weather_code(&self) -> i32 {
        self.current.weather_code
    }

    pub fn current_temp(&self) -> i32 {
        round_temp(self.current.temperature_2m_c)
    }

    pub fn high_low_today(&self) -> Option<(i32, i32)> {
        let today = self.daily.first()?;
        Some((
            round_temp(today.temperature_max_c?),
            round_temp(today.temperature_min_c?),
        ))
    }

    /// Tonight's sunset comes from today's entry, the next sunrise from
    /// tomorrow's.
    pub fn sunset_today(&self) -> Option<NaiveDateTime> {
        self.daily.first().and_then(|day| day.sunset)
    }

    pub fn sunrise_next(&self) -> Option<NaiveDateTime> {
        self.daily.get(1).and_then(|day| day.sunrise)
    }
}

#[derive(Debug, Clone)]
pub struct RefreshMetadata {
    pub last_success: Option<DateTime<Utc>>,
    pub last_attempt: Option<DateTime<Utc>>,
    pub state: FreshnessState,
    pub consecutive_failures: u32,
}

impl Default for RefreshMetadata {
    fn default() -> Self {
        Self {
            last_success: None,
            last_attempt: None,
            state: FreshnessState::Stale,
            consecutive_failures: 0,
        }
    }
}

impl RefreshMetadata {
    pub fn mark_success(&mut self) {
        let now = Utc::now();
        self.last_attempt = Some(now);
        self.last_success = Some(now);
        self.consecutive_failures = 0;
        self.state = FreshnessState::Fresh;
    }

    pub fn mark_failure(&mut self) {
        self.last_attempt = Some(Utc::now());
        self.consecutive_failures = self.consecutive_failures.saturating_add(1);
        self.refresh_state(Utc::now());
    }

    /// Re-evaluate against the clock so data can age into `Stale` between
    /// fetches.
    pub fn refresh_state(&mut self, now: DateTime<Utc>) {
        self.state = evaluate_freshness(self.last_success, self.consecutive_failures, now);
    }
}

#[allow(clippy::cast_possible_truncation)]
pub fn round_temp(value: f32) -> i32 {
    value.round() as i32
}

/// Eight-point compass name for a bearing in degrees.
#[allow(clippy::cast_possible_truncation)]
pub fn cardinal_direction(degrees: f32) -> &'static str {
    const DIRECTIONS: [&str; 8] = ["N", "NE", "E", "SE", "S", "SW", "W", "NW"];
    if !degrees.is_finite() {
        return DIRECTIONS[0];
    }
    let index = ((degrees / 45.0).round() as i64).rem_euclid(8);
    DIRECTIONS[usize::try_from(index).unwrap_or(0)]
}

/// Returns the clock digits and, for the 12-hour format, the meridiem.
pub fn format_clock<T: Timelike>(time: &T, format: ClockFormat) -> (String, Option<&'static str>) {
    let minute = time.minute();
    match format {
        ClockFormat::TwentyFourHour => (format!("{:02}:{minute:02}", time.hour()), None),
        ClockFormat::TwelveHour => {
            let (is_pm, hour) = time.hour12();
            (
                format!("{hour:02}:{minute:02}"),
                Some(if is_pm { "PM" } else { "AM" }),
            )
        }
    }
}

pub fn format_short_time(value: &NaiveDateTime, format: ClockFormat) -> String {
    match format_clock(value, format) {
        (digits, Some(meridiem)) => format!("{digits} {meridiem}"),
        (digits, None) => digits,
    }
}

pub fn format_date<T: Datelike>(date: &T) -> String {
    format!(
        "{}, {} {}",
        weekday_name(date.weekday()),
        date.day(),
        month_name(date.month())
    )
}

pub fn forecast_day_label(index: usize, date: NaiveDate) -> String {
    if index == 0 {
        "TODAY".to_string()
    } else {
        date.format("%a").to_string().to_uppercase()
    }
}

fn weekday_name(weekday: chrono::Weekday) -> &'static str {
    match weekday {
        chrono::Weekday::Mon => "Monday",
        chrono::Weekday::Tue => "Tuesday",
        chrono::Weekday::Wed => "Wednesday",
        chrono::Weekday::Thu => "Thursday",
        chrono::Weekday::Fri => "Friday",
        chrono::Weekday::Sat => "Saturday",
        chrono::Weekday::Sun => "Sunday",
    }
}

fn month_name(month: u32) -> &'static str {
    const MONTHS: [&str; 12] = [
        "January",
        "February",
        "March",
        "April",
        "May",
        "June",
        "July",
        "August",
        "September",
        "October",
        "November",
        "December",
    ];
    month
        .checked_sub(1)
        .and_then(|idx| MONTHS.get(idx as usize))
        .copied()
        .unwrap_or("")
}

pub fn parse_datetime(value: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M").ok()
}

pub fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()
}
