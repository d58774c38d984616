use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::Context;
use log::warn;
use serde::{Deserialize, Serialize};

use crate::{
    cli::{Cli, DEFAULT_REFRESH_SECS},
    domain::weather::{ClockFormat, Location},
};

pub const CONFIG_DIR_ENV: &str = "AMBIENT_SKY_CONFIG_DIR";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum MotionSetting {
    #[default]
    Full,
    Off,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeSettings {
    pub location: Location,
    pub clock_format: ClockFormat,
    /// Per-launch only; `--no-animation` is never remembered.
    #[serde(skip)]
    pub motion: MotionSetting,
    pub refresh_interval_secs: u64,
}

impl Default for RuntimeSettings {
    fn default() -> Self {
        Self {
            location: Location::christchurch(),
            clock_format: ClockFormat::default(),
            motion: MotionSetting::default(),
            refresh_interval_secs: DEFAULT_REFRESH_SECS,
        }
    }
}

impl RuntimeSettings {
    pub fn from_cli_defaults(cli: &Cli) -> Self {
        let mut settings = Self::default();
        apply_cli_overrides(&mut settings, cli);
        settings
    }
}

pub fn load_runtime_settings(cli: &Cli) -> (RuntimeSettings, Option<PathBuf>) {
    if cli.no_config {
        return (RuntimeSettings::from_cli_defaults(cli), None);
    }
    let Some(path) = settings_path() else {
        return (RuntimeSettings::from_cli_defaults(cli), None);
    };
    let settings = load_from_path(cli, &path);
    (settings, Some(path))
}

/// Saved values first, then whatever the command line sets explicitly.
pub fn load_from_path(cli: &Cli, path: &Path) -> RuntimeSettings {
    let mut settings = match fs::read_to_string(path) {
        Ok(content) => serde_json::from_str::<RuntimeSettings>(&content).unwrap_or_else(|err| {
            warn!("ignoring unreadable settings at {}: {err}", path.display());
            RuntimeSettings::default()
        }),
        Err(_) => RuntimeSettings::default(),
    };
    apply_cli_overrides(&mut settings, cli);
    settings
}

fn apply_cli_overrides(settings: &mut RuntimeSettings, cli: &Cli) {
    if let Some(location) = cli.location() {
        settings.location = location;
    } else if let Some(label) = &cli.city_label {
        settings.location.name.clone_from(label);
    }
    if let Some(clock) = cli.clock {
        settings.clock_format = clock.into();
    }
    if cli.no_animation {
        settings.motion = MotionSetting::Off;
    }
    if let Some(secs) = cli.refresh_interval {
        settings.refresh_interval_secs = secs;
    }
}

pub fn save_runtime_settings(path: &Path, settings: &RuntimeSettings) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("creating settings directory failed")?;
    }
    let payload =
        serde_json::to_string_pretty(settings).context("serializing settings payload failed")?;
    fs::write(path, payload).context("writing settings file failed")
}

/// `$AMBIENT_SKY_CONFIG_DIR`, else `~/.config/ambient-sky`.
#[must_use]
pub fn config_dir() -> Option<PathBuf> {
    if let Some(base) = std::env::var_os(CONFIG_DIR_ENV) {
        return Some(PathBuf::from(base));
    }

    let home = std::env::var_os("HOME")?;
    Some(PathBuf::from(home).join(".config").join("ambient-sky"))
}

fn settings_path() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("settings.json"))
}
