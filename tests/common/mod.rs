#![allow(clippy::cast_precision_loss)]
#![allow(dead_code)]

use ambient_sky::{
    app::state::AppState,
    cli::Cli,
    domain::weather::{CurrentConditions, DailyForecast, ForecastBundle, Location},
};
use chrono::{NaiveDate, NaiveDateTime, Utc};

pub fn quiet_cli() -> Cli {
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
        seed: Some(2026),
        no_config: true,
    }
}

pub fn fixed_time(value: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M").expect("valid fixed time")
}

pub fn fixture_bundle(weather_code: i32) -> ForecastBundle {
    let base_date = NaiveDate::from_ymd_opt(2026, 1, 21).expect("valid fixed date");
    let daily = (0..7)
        .map(|idx| {
            let date = base_date + chrono::Duration::days(idx);
            let stamp = date.format("%Y-%m-%d");
            DailyForecast {
                date,
                weather_code: Some(weather_code),
                temperature_max_c: Some(21.0 + idx as f32),
                temperature_min_c: Some(10.0),
                sunrise: Some(fixed_time(&format!("{stamp}T06:05"))),
                sunset: Some(fixed_time(&format!("{stamp}T21:06"))),
            }
        })
        .collect();

    ForecastBundle {
        location: Location::christchurch(),
        current: CurrentConditions {
            temperature_2m_c: 17.6,
            weather_code,
            wind_speed_10m: 9.0,
            wind_direction_10m: 0.0,
            is_day: true,
            precipitation_mm: 0.0,
        },
        daily,
        fetched_at: Utc::now(),
    }
}

pub fn ready_state_with_weather(cli: &Cli, bundle: ForecastBundle) -> AppState {
    let mut state = AppState::new(cli);
    state.resize(80, 24, &fixed_time("2026-01-21T09:00").time());
    state.sky.on_weather_update(bundle.current_weather_code());
    state.weather = Some(bundle);
    state.refresh_meta.mark_success();
    state.mode = ambient_sky::app::state::AppMode::Ready;
    state
}

pub fn mock_forecast_payload(weather_code: i32) -> serde_json::Value {
    serde_json::json!({
        "current": {
            "temperature_2m": 17.6,
            "weather_code": weather_code,
            "wind_speed_10m": 9.0,
            "wind_direction_10m": 180.0,
            "is_day": 1,
            "precipitation": 0.4
        },
        "daily": {
            "time": ["2026-01-21", "2026-01-22", "2026-01-23"],
            "weather_code": [weather_code, 3, null],
            "temperature_2m_max": [21.0, 19.5, 18.0],
            "temperature_2m_min": [10.0, 9.5, null],
            "sunrise": ["2026-01-21T06:05", "2026-01-22T06:07", "2026-01-23T06:08"],
            "sunset": ["2026-01-21T21:06", "2026-01-22T21:05", "2026-01-23T21:04"]
        }
    })
}
