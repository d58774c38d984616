use std::{
    fs::{self, OpenOptions},
    path::PathBuf,
};

use anyhow::{Context, Result};
use env_logger::{Env, Target};

use crate::{app::settings::config_dir, cli::Cli};

pub const LOG_FILE_NAME: &str = "ambient-sky.log";

/// Where logs go: `--log-file`, else the config dir when `RUST_LOG` is set.
/// The terminal is in raw mode, so stderr is never an option.
#[must_use]
pub fn log_path(cli: &Cli, rust_log_set: bool) -> Option<PathBuf> {
    match &cli.log_file {
        Some(path) => Some(path.clone()),
        None if rust_log_set => config_dir().map(|dir| dir.join(LOG_FILE_NAME)),
        None => None,
    }
}

pub fn init(cli: &Cli) -> Result<Option<PathBuf>> {
    let Some(path) = log_path(cli, std::env::var_os("RUST_LOG").is_some()) else {
        return Ok(None);
    };
    if let Some(parent) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating log directory {}", parent.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("opening log file {}", path.display()))?;

    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .target(Target::Pipe(Box::new(file)))
        .format_timestamp_millis()
        .try_init()
        .context("initialising logger")?;
    Ok(Some(path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::test_cli;

    #[test]
    fn explicit_log_file_wins() {
        let mut cli = test_cli();
        cli.log_file = Some(PathBuf::from("/tmp/sky.log"));
        assert_eq!(log_path(&cli, false), Some(PathBuf::from("/tmp/sky.log")));
        assert_eq!(log_path(&cli, true), Some(PathBuf::from("/tmp/sky.log")));
    }

    #[test]
    fn logging_stays_off_without_a_request() {
        assert_eq!(log_path(&test_cli(), false), None);
    }

    #[test]
    fn rust_log_falls_back_to_the_config_dir() {
        let path = log_path(&test_cli(), true);
        if let Some(path) = path {
            assert!(path.ends_with(LOG_FILE_NAME));
        }
    }
}
