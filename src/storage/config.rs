//! JSON Configuration Management
//!
//! Reads the optional memory-bridge.json file. A missing file means defaults.

use std::fs;
use std::path::Path;

use crate::models::settings::BridgeConfig;
use crate::utils::error::{AppError, AppResult};
use crate::utils::paths::config_path;

/// Configuration service for loading bridge settings
#[derive(Debug)]
pub struct ConfigService {
    config: BridgeConfig,
}

impl ConfigService {
    /// Load configuration from the default location
    pub fn load() -> AppResult<Self> {
        Self::load_from(&config_path()?)
    }

    /// Load configuration from `path`, falling back to defaults if it does not exist
    pub fn load_from(path: &Path) -> AppResult<Self> {
        let config = if path.exists() {
            Self::load_from_file(path)?
        } else {
            BridgeConfig::default()
        };

        Ok(Self { config })
    }

    /// Load and validate configuration from a file
    fn load_from_file(path: &Path) -> AppResult<BridgeConfig> {
        let content = fs::read_to_string(path)?;
        let config: BridgeConfig = serde_json::from_str(&content)
            .map_err(|e| AppError::config(format!("{}: {}", path.display(), e)))?;
        config.validate().map_err(AppError::validation)?;
        Ok(config)
    }

    /// Save configuration to a file with pretty formatting
    pub fn save_to_file(path: &Path, config: &BridgeConfig) -> AppResult<()> {
        config.validate().map_err(AppError::validation)?;
        let content = serde_json::to_string_pretty(config)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Get the current configuration
    pub fn get_config(&self) -> &BridgeConfig {
        &self.config
    }

    /// Consume the service, keeping only the configuration
    pub fn into_config(self) -> BridgeConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_uses_defaults() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("memory-bridge.json");

        let service = ConfigService::load_from(&path).unwrap();
        assert_eq!(service.get_config(), &BridgeConfig::default());
        assert!(!path.exists());
    }

    #[test]
    fn test_save_and_reload() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("memory-bridge.json");
        let config = BridgeConfig {
            window_size: 8,
            decision_verbs: vec!["Refactored".into()],
            ..Default::default()
        };

        ConfigService::save_to_file(&path, &config).unwrap();

        let loaded = ConfigService::load_from(&path).unwrap().into_config();
        assert_eq!(loaded.window_size, 8);
        assert_eq!(loaded.decision_verbs, vec!["Refactored".to_string()]);
    }

    #[test]
    fn test_malformed_file_is_config_error() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("memory-bridge.json");
        fs::write(&path, "{ window_size: ").unwrap();

        let err = ConfigService::load_from(&path).unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }

    #[test]
    fn test_invalid_values_rejected() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("memory-bridge.json");
        fs::write(&path, r#"{"window_size": 0}"#).unwrap();

        let err = ConfigService::load_from(&path).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }
}
