#![allow(clippy::cast_precision_loss)]

use chrono::{NaiveDate, NaiveDateTime, Utc};

use crate::{
    cli::Cli,
    domain::weather::{CurrentConditions, DailyForecast, ForecastBundle, Location},
};

fn parse_time(value: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M").expect("valid time fixture")
}

pub(crate) fn test_cli() -> Cli {
    Cli {
        lat: None,
        lon: None,
        city_label: None,
        fps: 30,
        refresh_interval: None,
        clock: None,
        no_animation: false,
        forecast_url: None,
        log_file: None,
        seed: Some(7),
        no_config: true,
    }
}

pub(crate) fn sample_bundle(weather_code: i32) -> ForecastBundle {
    let base_date = NaiveDate::from_ymd_opt(2026, 1, 21).expect("valid date fixture");
    let daily = (0..7)
        .map(|idx| {
            let date = base_date + chrono::Duration::days(idx);
            let stamp = date.format("%Y-%m-%d");
            DailyForecast {
                date,
                weather_code: Some(weather_code),
                temperature_max_c: Some(22.0 + idx as f32),
                temperature_min_c: Some(11.0),
                sunrise: Some(parse_time(&format!("{stamp}T06:05"))),
                sunset: Some(parse_time(&format!("{stamp}T21:06"))),
            }
        })
        .collect();

    ForecastBundle {
        location: Location::christchurch(),
        current: CurrentConditions {
            temperature_2m_c: 18.4,
            weather_code,
            wind_speed_10m: 14.0,
            wind_direction_10m: 225.0,
            is_day: true,
            precipitation_mm: 0.2,
        },
        daily,
        fetched_at: Utc::now(),
    }
}
