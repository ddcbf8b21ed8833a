//! Server configuration from the environment.

use std::path::PathBuf;

use study_core::DisplayDelays;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{var} must be a non-negative integer, got {value:?}")]
    Invalid { var: &'static str, value: String },
}

/// Runtime settings.
///
/// Env vars (all optional):
/// - HOST, PORT: listen address (default 0.0.0.0:3000)
/// - STUDY_DATA_PATH: library file (default study-quest.json)
/// - MATCH_HIT_DELAY_MS, MATCH_MISS_DELAY_MS, QUIZ_ADVANCE_DELAY_MS,
///   TYPING_ADVANCE_DELAY_MS: display delays
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub data_path: PathBuf,
    pub delays: DisplayDelays,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            data_path: PathBuf::from("study-quest.json"),
            delays: DisplayDelays::default(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; missing keys keep their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let number = |var: &'static str, default: u64| -> Result<u64, ConfigError> {
            match lookup(var) {
                Some(value) => value
                    .trim()
                    .parse()
                    .map_err(|_| ConfigError::Invalid { var, value }),
                None => Ok(default),
            }
        };

        let port = number("PORT", u64::from(defaults.port))?;
        let port = u16::try_from(port).map_err(|_| ConfigError::Invalid {
            var: "PORT",
            value: port.to_string(),
        })?;

        Ok(Self {
            host: lookup("HOST").unwrap_or(defaults.host),
            port,
            data_path: lookup("STUDY_DATA_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.data_path),
            delays: DisplayDelays {
                match_hit_ms: number("MATCH_HIT_DELAY_MS", defaults.delays.match_hit_ms)?,
                match_miss_ms: number("MATCH_MISS_DELAY_MS", defaults.delays.match_miss_ms)?,
                quiz_advance_ms: number("QUIZ_ADVANCE_DELAY_MS", defaults.delays.quiz_advance_ms)?,
                typing_advance_ms: number(
                    "TYPING_ADVANCE_DELAY_MS",
                    defaults.delays.typing_advance_ms,
                )?,
            },
        })
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
