use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Read(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),
}

/// Settings for an application embedding the cookie layer.
///
/// Every field is optional in the file; the accessors supply defaults.
/// Environment variables override file values, and an empty variable
/// counts as unset so a stray `CRUMB_LOG_DIR=` does not wipe a
/// configured path.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Directory for JSONL logs (telemetry + mutation audit).
    /// Default: ./logs
    pub log_dir: Option<PathBuf>,

    pub service_name: Option<String>,

    /// Name of the one-shot flash cookie.
    pub flash_cookie: Option<String>,

    /// Mirror every store operation to the mutation sink.
    pub audit: Option<bool>,
}

impl AppConfig {
    /// Load from a YAML file, then let the environment override it.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        let mut cfg: AppConfig = serde_yaml::from_str(&text)?;
        cfg.apply_env();
        Ok(cfg)
    }

    /// Configuration from the environment alone.
    pub fn from_env() -> Self {
        let mut cfg = AppConfig::default();
        cfg.apply_env();
        cfg
    }

    pub fn apply_env(&mut self) {
        if let Some(v) = env_nonempty("CRUMB_LOG_DIR") {
            self.log_dir = Some(PathBuf::from(v));
        }
        if let Some(v) = env_nonempty("CRUMB_SERVICE_NAME") {
            self.service_name = Some(v);
        }
        if let Some(v) = env_nonempty("CRUMB_FLASH_COOKIE") {
            self.flash_cookie = Some(v);
        }
        if let Some(v) = env_nonempty("CRUMB_AUDIT") {
            self.audit = Some(matches!(v.as_str(), "1" | "true" | "yes"));
        }
    }

    pub fn log_dir_path(&self) -> PathBuf {
        self.log_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from("logs"))
    }

    pub fn service(&self) -> String {
        self.service_name
            .clone()
            .unwrap_or_else(|| "crumb".to_string())
    }

    pub fn flash_cookie_name(&self) -> String {
        self.flash_cookie
            .clone()
            .unwrap_or_else(|| crate::flash::FLASH_COOKIE.to_string())
    }

    pub fn audit_enabled(&self) -> bool {
        self.audit.unwrap_or(false)
    }
}

fn env_nonempty(key: &str) -> Option<String> {
    match std::env::var(key) {
        Ok(v) if !v.is_empty() => Some(v),
        _ => None,
    }
}
