//! CLI settings: where the remote service lives and how chatty logging is.
//!
//! Resolution order is built-in defaults, then `.learnsync/settings.toml`, then
//! `LEARNSYNC_*` environment variables. These settings are separate from the
//! credential record in `config.json`.

use crate::core::error::LearnsyncError;
use crate::core::store::Store;
use serde::Deserialize;
use std::fs;
use std::io::ErrorKind;
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "http://localhost:8000";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_LOG_LEVEL: &str = "warn";

pub const ENV_API_URL: &str = "LEARNSYNC_API_URL";
pub const ENV_TIMEOUT_SECS: &str = "LEARNSYNC_TIMEOUT_SECS";
pub const ENV_LOG: &str = "LEARNSYNC_LOG";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub api_url: String,
    pub timeout_secs: u64,
    pub log_level: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct SettingsFile {
    api_url: Option<String>,
    timeout_secs: Option<u64>,
    log_level: Option<String>,
}

impl Settings {
    pub fn load(store: &Store) -> Result<Self, LearnsyncError> {
        Self::resolve(store, |key| std::env::var(key).ok())
    }

    /// Resolve settings with an injectable environment lookup.
    pub fn resolve(
        store: &Store,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, LearnsyncError> {
        let mut settings = Settings::default();

        let path = store.settings_path();
        match fs::read_to_string(&path) {
            Ok(raw) => {
                let file: SettingsFile = toml::from_str(&raw).map_err(|e| {
                    LearnsyncError::SettingsError(format!("{}: {}", path.display(), e))
                })?;
                if let Some(url) = file.api_url {
                    settings.api_url = url;
                }
                if let Some(secs) = file.timeout_secs {
                    settings.timeout_secs = secs;
                }
                if let Some(level) = file.log_level {
                    settings.log_level = level;
                }
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => return Err(LearnsyncError::IoError(e)),
        }

        let env = |key: &str| env(key).filter(|v| !v.trim().is_empty());
        if let Some(url) = env(ENV_API_URL) {
            settings.api_url = url;
        }
        if let Some(raw) = env(ENV_TIMEOUT_SECS) {
            settings.timeout_secs = raw.trim().parse().map_err(|_| {
                LearnsyncError::SettingsError(format!(
                    "{} must be a whole number of seconds, got '{}'",
                    ENV_TIMEOUT_SECS, raw
                ))
            })?;
        }
        if let Some(level) = env(ENV_LOG) {
            settings.log_level = level;
        }

        settings.api_url = settings.api_url.trim().trim_end_matches('/').to_string();
        if !(settings.api_url.starts_with("http://") || settings.api_url.starts_with("https://"))
        {
            return Err(LearnsyncError::SettingsError(format!(
                "api_url must start with http:// or https://, got '{}'",
                settings.api_url
            )));
        }
        if settings.timeout_secs == 0 {
            return Err(LearnsyncError::SettingsError(
                "timeout_secs must be greater than zero".to_string(),
            ));
        }

        Ok(settings)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
