use std::{env, path::PathBuf, str::FromStr};

use log::LevelFilter;

pub const DATA_DIR_ENV_VAR: &str = "WORKOUT_DIARY_DATA_DIR";
pub const LOG_LEVEL_ENV_VAR: &str = "WORKOUT_DIARY_LOG";

const APP_DIR: &str = "workout-diary";

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum Error {
    #[error("Could not determine data directory")]
    CannotDetermineDataDir,
    #[error("Invalid log level: {0}")]
    InvalidLogLevel(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub data_dir: PathBuf,
    pub log_level: LevelFilter,
}

impl Config {
    #[must_use]
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            log_level: LevelFilter::Info,
        }
    }

    /// Reads the configuration from the environment.
    ///
    /// Without `WORKOUT_DIARY_DATA_DIR` the platform data directory is used.
    ///
    /// # Errors
    ///
    /// Returns an error if no data directory can be determined or the log level is invalid.
    pub fn from_env() -> Result<Self, Error> {
        Self::from_values(
            env::var_os(DATA_DIR_ENV_VAR).map(PathBuf::from),
            env::var(LOG_LEVEL_ENV_VAR).ok().as_deref(),
        )
    }

    fn from_values(data_dir: Option<PathBuf>, log_level: Option<&str>) -> Result<Self, Error> {
        let data_dir = match data_dir {
            Some(data_dir) => data_dir,
            None => dirs::data_dir()
                .ok_or(Error::CannotDetermineDataDir)?
                .join(APP_DIR),
        };
        let log_level = match log_level.map(str::trim).filter(|l| !l.is_empty()) {
            Some(log_level) => LevelFilter::from_str(log_level)
                .map_err(|_| Error::InvalidLogLevel(log_level.to_string()))?,
            None => LevelFilter::Info,
        };
        Ok(Self {
            data_dir,
            log_level,
        })
    }
}
