use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::chat::script::{PEER_NAME, REPLY_DELAY_MS, SELF_NAME, default_replies};

pub const DEFAULT_CONFIG_PATH: &str = "config/chat.json";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to access config file: {0}")]
    Io(#[from] io::Error),
    #[error("failed to parse config file: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub self_name: String,
    pub peer_name: String,
    pub reply_delay_ms: u64,
    pub replies: Vec<String>,
    /// Open the window with the sample conversation already in place.
    pub seed_history: bool,
    /// Fixed seed for reply selection; random when absent.
    pub rng_seed: Option<u64>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            self_name: SELF_NAME.to_string(),
            peer_name: PEER_NAME.to_string(),
            reply_delay_ms: REPLY_DELAY_MS,
            replies: default_replies(),
            seed_history: true,
            rng_seed: None,
        }
    }
}

impl AppConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.self_name.trim().is_empty() || self.peer_name.trim().is_empty() {
            return Err(ConfigError::Invalid("names must not be blank".into()));
        }
        if self.replies.is_empty() {
            return Err(ConfigError::Invalid("at least one reply is required".into()));
        }
        if let Some(position) = self.replies.iter().position(|r| r.trim().is_empty()) {
            return Err(ConfigError::Invalid(format!("reply #{position} is blank")));
        }
        Ok(())
    }
}

pub fn try_load_config(path: &str) -> Result<AppConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config = serde_json::from_str::<AppConfig>(&content)?;
    config.validate()?;
    Ok(config)
}

/// Load the config at `path`, falling back to defaults when it is missing
/// or unusable.
pub fn load_config(path: &str) -> AppConfig {
    match try_load_config(path) {
        Ok(config) => {
            log::info!("Loaded config from {path}");
            config
        }
        Err(ConfigError::Io(err)) if err.kind() == io::ErrorKind::NotFound => {
            log::info!("Config file {path} not found; using defaults");
            AppConfig::default()
        }
        Err(err) => {
            log::warn!("Ignoring config file {path}: {err}");
            AppConfig::default()
        }
    }
}

pub fn save_config(path: &str, config: &AppConfig) -> Result<(), ConfigError> {
    if let Some(parent) = Path::new(path).parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let json = serde_json::to_string_pretty(config)?;
    fs::write(path, json)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn path_in(dir: &tempfile::TempDir, name: &str) -> String {
        dir.path().join(name).to_string_lossy().into_owned()
    }

    #[test]
    fn defaults_match_the_demo() {
        let config = AppConfig::default();
        assert_eq!(config.self_name, "Du");
        assert_eq!(config.peer_name, "Anna Schmidt");
        assert_eq!(config.reply_delay_ms, 2000);
        assert_eq!(config.replies.len(), 8);
        assert!(config.seed_history);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let dir = tempdir().unwrap();
        let config = load_config(&path_in(&dir, "absent.json"));
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let dir = tempdir().unwrap();
        let path = path_in(&dir, "chat.json");
        fs::write(&path, r#"{ "peer_name": "Ben", "reply_delay_ms": 500 }"#).unwrap();

        let config = try_load_config(&path).unwrap();
        assert_eq!(config.peer_name, "Ben");
        assert_eq!(config.reply_delay_ms, 500);
        assert_eq!(config.self_name, "Du");
        assert_eq!(config.replies, default_replies());
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let dir = tempdir().unwrap();
        let path = path_in(&dir, "chat.json");
        fs::write(&path, "{ not json").unwrap();

        assert!(matches!(try_load_config(&path), Err(ConfigError::Parse(_))));
        assert_eq!(load_config(&path), AppConfig::default());
    }

    #[test]
    fn empty_reply_list_is_rejected() {
        let dir = tempdir().unwrap();
        let path = path_in(&dir, "chat.json");
        fs::write(&path, r#"{ "replies": [] }"#).unwrap();

        assert!(matches!(try_load_config(&path), Err(ConfigError::Invalid(_))));
        assert_eq!(load_config(&path).replies.len(), 8);
    }

    #[test]
    fn blank_reply_is_rejected() {
        let config = AppConfig {
            replies: vec!["ok".into(), "  ".into()],
            ..AppConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("reply #1"));
    }

    #[test]
    fn save_creates_parent_dirs_and_round_trips() {
        let dir = tempdir().unwrap();
        let path = path_in(&dir, "nested/dir/chat.json");
        let config = AppConfig {
            rng_seed: Some(9),
            seed_history: false,
            ..AppConfig::default()
        };

        save_config(&path, &config).unwrap();
        assert_eq!(try_load_config(&path).unwrap(), config);
    }
}
