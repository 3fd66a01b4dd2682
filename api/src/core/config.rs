use std::path::PathBuf;

use axum::http::HeaderValue;
use prompt_gateway::{GatewayConfig, GatewayError, error_handler::env_opt};
use thiserror::Error;

pub const DEFAULT_API_ADDRESS: &str = "127.0.0.1:8000";
pub const DEFAULT_DATABASE_FILE: &str = "learning_history.db";
pub const DEFAULT_FILES_DIR: &str = "files";
pub const DEFAULT_VIDEO_ID: &str = "bt_i7sQgqEs";
pub const DEFAULT_CORS_ORIGINS: &[&str] = &[
    "http://localhost:3000",
    "http://127.0.0.1:3000",
    "http://192.168.1.100:3000",
];

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(transparent)]
    Gateway(#[from] GatewayError),

    #[error("invalid CORS origin {0:?}")]
    InvalidOrigin(String),
}

/// Process-wide settings, built once in `main` and passed down explicitly.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// `host:port` the HTTP listener binds to (`API_ADDRESS`).
    pub api_address: String,
    /// SQLite file holding the history table (`DATABASE_FILE`).
    pub database_file: PathBuf,
    /// Directory of the flat text files (`FILES_DIR`).
    pub files_dir: PathBuf,
    /// Origins allowed by CORS (`CORS_ORIGINS`, comma separated).
    pub cors_origins: Vec<String>,
    /// Tutorial video served by `/video_id` (`VIDEO_ID`).
    pub video_id: String,
    pub gateway: GatewayConfig,
}

impl AppConfig {
    /// Load shared config from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(env_opt)
    }

    pub fn from_lookup<F>(get: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let cors_origins = match get("CORS_ORIGINS") {
            Some(raw) => raw
                .split(',')
                .map(str::trim)
                .filter(|o| !o.is_empty())
                .map(str::to_string)
                .collect(),
            None => DEFAULT_CORS_ORIGINS.iter().map(|o| o.to_string()).collect(),
        };

        let cfg = Self {
            api_address: get("API_ADDRESS").unwrap_or_else(|| DEFAULT_API_ADDRESS.into()),
            database_file: get("DATABASE_FILE")
                .unwrap_or_else(|| DEFAULT_DATABASE_FILE.into())
                .into(),
            files_dir: get("FILES_DIR")
                .unwrap_or_else(|| DEFAULT_FILES_DIR.into())
                .into(),
            cors_origins,
            video_id: get("VIDEO_ID").unwrap_or_else(|| DEFAULT_VIDEO_ID.into()),
            gateway: GatewayConfig::from_lookup(&get)?,
        };
        cfg.origin_headers()?;
        Ok(cfg)
    }

    /// CORS origins as header values.
    pub fn origin_headers(&self) -> Result<Vec<HeaderValue>, ConfigError> {
        self.cors_origins
            .iter()
            .map(|o| HeaderValue::from_str(o).map_err(|_| ConfigError::InvalidOrigin(o.clone())))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn load(pairs: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let map: HashMap<&str, &str> = pairs.iter().copied().collect();
        AppConfig::from_lookup(|k: &str| map.get(k).map(|v| v.to_string()))
    }

    #[test]
    fn defaults_match_local_dev_setup() {
        let cfg = load(&[]).unwrap();
        assert_eq!(cfg.api_address, DEFAULT_API_ADDRESS);
        assert_eq!(cfg.database_file, PathBuf::from("learning_history.db"));
        assert_eq!(cfg.files_dir, PathBuf::from("files"));
        assert_eq!(cfg.cors_origins.len(), 3);
        assert_eq!(cfg.video_id, DEFAULT_VIDEO_ID);
        assert!(!cfg.gateway.has_api_key());
    }

    #[test]
    fn origins_are_split_and_trimmed() {
        let cfg = load(&[("CORS_ORIGINS", "http://a.test, http://b.test ,")]).unwrap();
        assert_eq!(cfg.cors_origins, vec!["http://a.test", "http://b.test"]);
    }

    #[test]
    fn gateway_settings_are_forwarded() {
        let cfg = load(&[("GEMINI_API_KEY", "k"), ("GEMINI_MODEL", "m")]).unwrap();
        assert!(cfg.gateway.has_api_key());
        assert_eq!(cfg.gateway.model, "m");
    }

    #[test]
    fn invalid_values_fail_at_startup() {
        assert!(matches!(
            load(&[("CORS_ORIGINS", "http://bad\norigin")]),
            Err(ConfigError::InvalidOrigin(_))
        ));
        assert!(matches!(
            load(&[("GEMINI_TIMEOUT_SECS", "abc")]),
            Err(ConfigError::Gateway(_))
        ));
    }
}
