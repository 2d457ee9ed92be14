//! Application-level configuration loading, including match registry limits.

use std::{env, fs, io::ErrorKind, path::PathBuf};

use serde::Deserialize;
use tracing::{info, warn};

/// Default location on disk where the server looks for the JSON configuration.
const DEFAULT_CONFIG_PATH: &str = "config/app.json";
/// Environment variable that overrides [`DEFAULT_CONFIG_PATH`].
const CONFIG_PATH_ENV: &str = "BULLSEYE_BACK_CONFIG_PATH";
/// Seats allowed in one match unless configured otherwise.
const DEFAULT_MAX_PLAYERS: usize = 8;
/// Matches the registry holds at once unless configured otherwise.
const DEFAULT_MAX_OPEN_MATCHES: usize = 256;

#[derive(Debug, Clone)]
/// Immutable runtime configuration shared across the application.
pub struct AppConfig {
    max_players_per_match: usize,
    max_open_matches: usize,
}

impl AppConfig {
    /// Load the application configuration from disk, falling back to the
    /// baked-in limits.
    pub fn load() -> Self {
        let path = resolve_config_path();
        match fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str::<RawConfig>(&contents) {
                Ok(raw) => {
                    let app_config: Self = raw.into();
                    info!(
                        path = %path.display(),
                        max_players = app_config.max_players_per_match,
                        max_matches = app_config.max_open_matches,
                        "loaded configuration"
                    );
                    app_config
                }
                Err(err) => {
                    warn!(
                        path = %path.display(),
                        error = %err,
                        "failed to parse config; falling back to defaults"
                    );
                    Self::default()
                }
            },
            Err(err) if err.kind() == ErrorKind::NotFound => {
                info!(
                    path = %path.display(),
                    "config file not found; using built-in defaults"
                );
                Self::default()
            }
            Err(err) => {
                warn!(
                    path = %path.display(),
                    error = %err,
                    "failed to read config; falling back to defaults"
                );
                Self::default()
            }
        }
    }

    /// Seats allowed in one match.
    pub fn max_players_per_match(&self) -> usize {
        self.max_players_per_match
    }

    /// Matches the registry may hold at once.
    pub fn max_open_matches(&self) -> usize {
        self.max_open_matches
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            max_players_per_match: DEFAULT_MAX_PLAYERS,
            max_open_matches: DEFAULT_MAX_OPEN_MATCHES,
        }
    }
}

#[derive(Debug, Deserialize)]
/// JSON representation of the configuration file located at [`DEFAULT_CONFIG_PATH`].
struct RawConfig {
    max_players_per_match: Option<usize>,
    max_open_matches: Option<usize>,
}

impl From<RawConfig> for AppConfig {
    fn from(value: RawConfig) -> Self {
        let defaults = AppConfig::default();
        Self {
            max_players_per_match: value
                .max_players_per_match
                .unwrap_or(defaults.max_players_per_match),
            max_open_matches: value.max_open_matches.unwrap_or(defaults.max_open_matches),
        }
    }
}

/// Resolve the configuration path taking the environment override into account.
fn resolve_config_path() -> PathBuf {
    env::var_os(CONFIG_PATH_ENV)
        .map(PathBuf::from)
        .filter(|path| !path.as_os_str().is_empty())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
}
