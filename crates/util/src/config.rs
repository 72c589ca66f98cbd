//! Runtime configuration for the Verdant CLI/TUI.
//!
//! Values are layered, later layers winning:
//!
//! 1. built-in defaults
//! 2. a JSON file (`VERDANT_CONFIG_PATH`, or `~/.config/verdant/config.json`
//!    on most platforms); a missing file is not an error
//! 3. environment variables (`VERDANT_API_BASE`, `VERDANT_API_TOKEN`)
//! 4. explicit overrides, usually command-line flags

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use dirs_next::config_dir;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::expand_tilde;

/// Environment variable allowing callers to override the config file path.
pub const CONFIG_PATH_ENV: &str = "VERDANT_CONFIG_PATH";
/// Environment variable overriding the backend base URL.
pub const API_BASE_ENV: &str = "VERDANT_API_BASE";
/// Environment variable carrying the bearer token.
pub const API_TOKEN_ENV: &str = "VERDANT_API_TOKEN";

/// Default filename for the JSON payload.
pub const CONFIG_FILE_NAME: &str = "config.json";
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:3000";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Error surfaced when reading the config file fails.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("config file {path} is not valid JSON: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// On-disk shape. Every field is optional so partial files are fine.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct ConfigFile {
    base_url: Option<String>,
    auth_token: Option<String>,
    theme: Option<String>,
    request_timeout_secs: Option<u64>,
}

/// Values supplied on the command line.
#[derive(Debug, Default, Clone)]
pub struct ConfigOverrides {
    pub base_url: Option<String>,
    pub auth_token: Option<String>,
    pub theme: Option<String>,
}

/// Fully resolved configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub base_url: String,
    pub auth_token: Option<String>,
    /// Preferred theme id; `TUI_THEME` still takes precedence at theme load time.
    pub theme: Option<String>,
    pub request_timeout_secs: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            auth_token: None,
            theme: None,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

impl AppConfig {
    /// Resolve configuration from the default file location and the environment.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&default_config_path())
    }

    /// Resolve configuration from `path` and the environment.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        if let Some(file) = read_config_file(path)? {
            debug!(path = %path.display(), "loaded config file");
            config.apply_file(file);
        }
        config.apply_env();
        Ok(config)
    }

    /// Apply explicit overrides on top of the resolved values.
    pub fn with_overrides(mut self, overrides: ConfigOverrides) -> Self {
        if let Some(base_url) = non_empty(overrides.base_url) {
            self.base_url = base_url;
        }
        if let Some(token) = non_empty(overrides.auth_token) {
            self.auth_token = Some(token);
        }
        if let Some(theme) = non_empty(overrides.theme) {
            self.theme = Some(theme);
        }
        self
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    fn apply_file(&mut self, file: ConfigFile) {
        if let Some(base_url) = non_empty(file.base_url) {
            self.base_url = base_url;
        }
        if let Some(token) = non_empty(file.auth_token) {
            self.auth_token = Some(token);
        }
        if let Some(theme) = non_empty(file.theme) {
            self.theme = Some(theme);
        }
        if let Some(timeout) = file.request_timeout_secs.filter(|secs| *secs > 0) {
            self.request_timeout_secs = timeout;
        }
    }

    fn apply_env(&mut self) {
        if let Some(base_url) = env_value(API_BASE_ENV) {
            self.base_url = base_url;
        }
        if let Some(token) = env_value(API_TOKEN_ENV) {
            self.auth_token = Some(token);
        }
    }
}

/// Location of the config file, honoring `VERDANT_CONFIG_PATH`.
pub fn default_config_path() -> PathBuf {
    if let Some(path) = env_value(CONFIG_PATH_ENV) {
        return expand_tilde(&path);
    }

    config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("verdant")
        .join(CONFIG_FILE_NAME)
}

fn read_config_file(path: &Path) -> Result<Option<ConfigFile>, ConfigError> {
    match fs::read_to_string(path) {
        Ok(data) => serde_json::from_str(&data).map(Some).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        }),
        Err(error) if error.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(source) => Err(ConfigError::Io {
            path: path.to_path_buf(),
            source,
        }),
    }
}

fn env_value(name: &str) -> Option<String> {
    non_empty(env::var(name).ok())
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const CLEAR_ENV: [(&str, Option<&str>); 3] = [(CONFIG_PATH_ENV, None), (API_BASE_ENV, None), (API_TOKEN_ENV, None)];

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempdir().unwrap();
        temp_env::with_vars(CLEAR_ENV, || {
            let config = AppConfig::load_from(&dir.path().join("absent.json")).unwrap();
            assert_eq!(config, AppConfig::default());
            assert_eq!(config.request_timeout(), Duration::from_secs(30));
        });
    }

    #[test]
    fn file_values_override_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(
            &path,
            r#"{ "baseUrl": "http://192.168.0.141:3000", "theme": "nord", "requestTimeoutSecs": 5 }"#,
        )
        .unwrap();

        temp_env::with_vars(CLEAR_ENV, || {
            let config = AppConfig::load_from(&path).unwrap();
            assert_eq!(config.base_url, "http://192.168.0.141:3000");
            assert_eq!(config.theme.as_deref(), Some("nord"));
            assert_eq!(config.request_timeout_secs, 5);
            assert_eq!(config.auth_token, None);
        });
    }

    #[test]
    fn environment_overrides_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&path, r#"{ "baseUrl": "http://file:3000", "authToken": "from-file" }"#).unwrap();

        temp_env::with_vars(
            [
                (CONFIG_PATH_ENV, None),
                (API_BASE_ENV, Some("http://env:3000")),
                (API_TOKEN_ENV, Some("from-env")),
            ],
            || {
                let config = AppConfig::load_from(&path).unwrap();
                assert_eq!(config.base_url, "http://env:3000");
                assert_eq!(config.auth_token.as_deref(), Some("from-env"));
            },
        );
    }

    #[test]
    fn overrides_win_and_blank_values_are_ignored() {
        let config = AppConfig::default().with_overrides(ConfigOverrides {
            base_url: Some("http://cli:4000".into()),
            auth_token: Some("   ".into()),
            theme: None,
        });
        assert_eq!(config.base_url, "http://cli:4000");
        assert_eq!(config.auth_token, None);
    }

    #[test]
    fn invalid_json_is_reported() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "not json").unwrap();

        temp_env::with_vars(CLEAR_ENV, || {
            let error = AppConfig::load_from(&path).unwrap_err();
            assert!(matches!(error, ConfigError::Parse { .. }));
        });
    }

    #[test]
    fn config_path_env_override_is_respected() {
        temp_env::with_var(CONFIG_PATH_ENV, Some("/tmp/verdant-test/config.json"), || {
            assert_eq!(default_config_path(), PathBuf::from("/tmp/verdant-test/config.json"));
        });
    }
}
