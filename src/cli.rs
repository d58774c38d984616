#![allow(clippy::missing_errors_doc)]

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::domain::weather::{ClockFormat, Location};

pub const DEFAULT_REFRESH_SECS: u64 = 900;

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum ClockArg {
    #[value(name = "12h")]
    TwelveHour,
    #[value(name = "24h")]
    TwentyFourHour,
}

impl From<ClockArg> for ClockFormat {
    fn from(value: ClockArg) -> Self {
        match value {
            ClockArg::TwelveHour => ClockFormat::TwelveHour,
            ClockArg::TwentyFourHour => ClockFormat::TwentyFourHour,
        }
    }
}

#[derive(Debug, Parser, Clone)]
#[command(
    name = "ambient-sky",
    version,
    about = "Ambient terminal clock with a live weather sky"
)]
pub struct Cli {
    /// Latitude (requires --lon, default: Christchurch)
    #[arg(long, allow_negative_numbers = true)]
    pub lat: Option<f64>,

    /// Longitude (requires --lat)
    #[arg(long, allow_negative_numbers = true)]
    pub lon: Option<f64>,

    /// Name shown for the location
    #[arg(long)]
    pub city_label: Option<String>,

    /// Target FPS (15..60)
    #[arg(long, default_value_t = 30, value_parser = clap::value_parser!(u8).range(15..=60))]
    pub fps: u8,

    /// Refresh interval in seconds [default: 900, or the saved value]
    #[arg(long)]
    pub refresh_interval: Option<u64>,

    /// Clock format
    #[arg(long, value_enum)]
    pub clock: Option<ClockArg>,

    /// Freeze the sky (the clock still updates)
    #[arg(long)]
    pub no_animation: bool,

    /// Forecast endpoint override
    #[arg(long)]
    pub forecast_url: Option<String>,

    /// Write logs to this file
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Seed for the particle randomness
    #[arg(long)]
    pub seed: Option<u64>,

    /// Neither read nor write the settings file
    #[arg(long)]
    pub no_config: bool,
}

impl Cli {
    pub fn validate(&self) -> anyhow::Result<()> {
        match (self.lat, self.lon) {
            (Some(_), None) | (None, Some(_)) => {
                anyhow::bail!("--lat and --lon must be provided together")
            }
            (Some(lat), Some(lon)) => {
                if !(-90.0..=90.0).contains(&lat) {
                    anyhow::bail!("--lat must be within -90..=90, got {lat}");
                }
                if !(-180.0..=180.0).contains(&lon) {
                    anyhow::bail!("--lon must be within -180..=180, got {lon}");
                }
                Ok(())
            }
            (None, None) => Ok(()),
        }
    }

    /// Location given on the command line, if any.
    #[must_use]
    pub fn location(&self) -> Option<Location> {
        let (lat, lon) = (self.lat?, self.lon?);
        let mut location = Location::from_coords(lat, lon);
        if let Some(label) = &self.city_label {
            location.name.clone_from(label);
        }
        Some(location)
    }
}
