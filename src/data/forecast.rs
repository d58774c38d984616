use std::time::Duration;

use chrono::Utc;
use log::debug;
use reqwest::{Client, StatusCode};
use serde::Deserialize;

use crate::domain::weather::{
    CurrentConditions, DailyForecast, ForecastBundle, Location, parse_date, parse_datetime,
};

pub const FORECAST_URL: &str = "https://api.open-meteo.com/v1/forecast";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("forecast request failed: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("forecast request returned {0}")]
    Status(StatusCode),

    #[error("failed to parse forecast payload: {0}")]
    Decode(#[source] reqwest::Error),
}

#[derive(Debug, Clone)]
pub struct ForecastClient {
    client: Client,
    base_url: String,
}

impl ForecastClient {
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(FetchError::Client)?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    pub async fn fetch(&self, location: Location) -> Result<ForecastBundle, FetchError> {
        debug!(
            "fetching forecast for {} ({}, {})",
            location.name, location.latitude, location.longitude
        );
        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("latitude", location.latitude.to_string()),
                ("longitude", location.longitude.to_string()),
                (
                    "current",
                    "temperature_2m,weather_code,wind_speed_10m,wind_direction_10m,is_day,precipitation"
                        .to_string(),
                ),
                (
                    "daily",
                    "weather_code,temperature_2m_max,temperature_2m_min,sunrise,sunset".to_string(),
                ),
                ("timezone", "auto".to_string()),
                ("forecast_days", "7".to_string()),
            ])
            .send()
            .await
            .map_err(FetchError::Transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }

        let payload: ForecastResponse = response.json().await.map_err(FetchError::Decode)?;

        Ok(ForecastBundle {
            location,
            current: CurrentConditions {
                temperature_2m_c: payload.current.temperature_2m,
                weather_code: payload.current.weather_code,
                wind_speed_10m: payload.current.wind_speed_10m,
                wind_direction_10m: payload.current.wind_direction_10m,
                is_day: payload.current.is_day == 1,
                precipitation_mm: payload.current.precipitation,
            },
            daily: parse_daily(&payload.daily),
            fetched_at: Utc::now(),
        })
    }
}

fn parse_daily(daily: &DailyBlock) -> Vec<DailyForecast> {
    daily
        .time
        .iter()
        .enumerate()
        .filter_map(|(idx, day)| {
            Some(DailyForecast {
                date: parse_date(day)?,
                weather_code: daily.weather_code.get(idx).copied().flatten(),
                temperature_max_c: daily.temperature_2m_max.get(idx).copied().flatten(),
                temperature_min_c: daily.temperature_2m_min.get(idx).copied().flatten(),
                sunrise: daily
                    .sunrise
                    .get(idx)
                    .and_then(Option::as_deref)
                    .and_then(parse_datetime),
                sunset: daily
                    .sunset
                    .get(idx)
                    .and_then(Option::as_deref)
                    .and_then(parse_datetime),
            })
        })
        .collect()
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    current: CurrentBlock,
    #[serde(default)]
    daily: DailyBlock,
}

#[derive(Debug, Deserialize)]
struct CurrentBlock {
    temperature_2m: f32,
    weather_code: i32,
    wind_speed_10m: f32,
    wind_direction_10m: f32,
    is_day: u8,
    #[serde(default)]
    precipitation: f32,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct DailyBlock {
    time: Vec<String>,
    weather_code: Vec<Option<i32>>,
    temperature_2m_max: Vec<Option<f32>>,
    temperature_2m_min: Vec<Option<f32>>,
    sunrise: Vec<Option<String>>,
    sunset: Vec<Option<String>>,
}
