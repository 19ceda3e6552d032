use std::env;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

pub const DEFAULT_API_URL: &str = "http://localhost:8000/api";
pub const DEFAULT_SEARCH_DEBOUNCE_MS: u64 = 300;
pub const API_URL_ENV: &str = "TICKETBOX_API_URL";

const CONFIG_DIR_NAME: &str = "ticketbox";
const CONFIG_FILE_NAME: &str = "config.json";

/// Effective settings for one run.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api_base_url: String,
    pub search_debounce: Duration,
    pub request_timeout: Option<Duration>,
    pub log_level: Option<String>,
}

impl AppConfig {
    pub fn load(api_url_override: Option<String>) -> AppResult<Self> {
        let stored = StoredConfig::load()?;
        Ok(Self::resolve(stored, api_url_override, env::var(API_URL_ENV).ok()))
    }

    /// Flag beats environment beats file beats default.
    fn resolve(stored: StoredConfig, flag: Option<String>, env_url: Option<String>) -> Self {
        let api_base_url = [flag, env_url, stored.api_base_url]
            .into_iter()
            .flatten()
            .map(|url| url.trim().to_string())
            .find(|url| !url.is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        Self {
            api_base_url,
            search_debounce: Duration::from_millis(
                stored
                    .search_debounce_ms
                    .unwrap_or(DEFAULT_SEARCH_DEBOUNCE_MS),
            ),
            request_timeout: stored
                .request_timeout_secs
                .filter(|secs| *secs > 0)
                .map(Duration::from_secs),
            log_level: stored.log_level.filter(|level| !level.trim().is_empty()),
        }
    }
}

/// What `ticketbox config init` writes to disk.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoredConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_base_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search_debounce_ms: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_timeout_secs: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_level: Option<String>,
}

impl StoredConfig {
    pub fn load() -> AppResult<Self> {
        let path = config_file_path()?;
        match fs::read_to_string(&path) {
            Ok(contents) => serde_json::from_str(&contents).map_err(|err| {
                AppError::Configuration(format!("invalid config file {}: {err}", path.display()))
            }),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(AppError::Io(err)),
        }
    }

    pub fn save(&self) -> AppResult<()> {
        let path = config_file_path()?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }
}

pub fn config_directory() -> AppResult<PathBuf> {
    let base = match env::var_os("XDG_CONFIG_HOME").filter(|dir| !dir.is_empty()) {
        Some(dir) => PathBuf::from(dir),
        None => env::var_os("HOME")
            .filter(|home| !home.is_empty())
            .map(|home| PathBuf::from(home).join(".config"))
            .ok_or_else(|| {
                AppError::Configuration("neither XDG_CONFIG_HOME nor HOME is set".to_string())
            })?,
    };
    Ok(base.join(CONFIG_DIR_NAME))
}

pub fn config_file_path() -> AppResult<PathBuf> {
    Ok(config_directory()?.join(CONFIG_FILE_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_when_nothing_is_configured() {
        let config = AppConfig::resolve(StoredConfig::default(), None, None);
        assert_eq!(config.api_base_url, DEFAULT_API_URL);
        assert_eq!(config.search_debounce, Duration::from_millis(300));
        assert_eq!(config.request_timeout, None);
        assert_eq!(config.log_level, None);
    }

    #[test]
    fn flag_overrides_env_and_file() {
        let stored = StoredConfig {
            api_base_url: Some("http://file".to_string()),
            ..StoredConfig::default()
        };
        let config = AppConfig::resolve(
            stored.clone(),
            Some("http://flag".to_string()),
            Some("http://env".to_string()),
        );
        assert_eq!(config.api_base_url, "http://flag");

        let config = AppConfig::resolve(stored.clone(), None, Some("http://env".to_string()));
        assert_eq!(config.api_base_url, "http://env");

        let config = AppConfig::resolve(stored, Some("  ".to_string()), None);
        assert_eq!(config.api_base_url, "http://file");
    }

    #[test]
    fn reads_tuning_from_file() {
        let stored: StoredConfig = serde_json::from_str(
            r#"{"search_debounce_ms":150,"request_timeout_secs":30,"log_level":"debug"}"#,
        )
        .unwrap();
        let config = AppConfig::resolve(stored, None, None);
        assert_eq!(config.search_debounce, Duration::from_millis(150));
        assert_eq!(config.request_timeout, Some(Duration::from_secs(30)));
        assert_eq!(config.log_level.as_deref(), Some("debug"));
    }

    #[test]
    fn zero_timeout_means_none() {
        let stored = StoredConfig {
            request_timeout_secs: Some(0),
            ..StoredConfig::default()
        };
        assert_eq!(AppConfig::resolve(stored, None, None).request_timeout, None);
    }
}
