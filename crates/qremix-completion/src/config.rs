/// Configuration loading for the completion engine
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::cache::DEFAULT_CACHE_CAPACITY;
use crate::error::{CompletionError, CompletionResult};

/// Engine settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Memoize suggestions; when off every request is resolved afresh
    pub cache_enabled: bool,
    /// Maximum number of cached suggestions
    pub cache_capacity: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            cache_enabled: true,
            cache_capacity: DEFAULT_CACHE_CAPACITY,
        }
    }
}

impl EngineConfig {
    pub fn without_cache() -> Self {
        Self {
            cache_enabled: false,
            ..Self::default()
        }
    }

    pub fn with_cache_capacity(mut self, capacity: usize) -> Self {
        self.cache_capacity = capacity;
        self
    }
}

/// Engine configuration loader
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load engine configuration from a YAML file
    pub fn load_from_yaml(path: &Path) -> CompletionResult<EngineConfig> {
        let content = std::fs::read_to_string(path)?;
        let config: EngineConfig = serde_yaml::from_str(&content)?;
        Self::validate_config(&config)?;
        Ok(config)
    }

    /// Load engine configuration from a JSON file
    pub fn load_from_json(path: &Path) -> CompletionResult<EngineConfig> {
        let content = std::fs::read_to_string(path)?;
        let config: EngineConfig = serde_json::from_str(&content)?;
        Self::validate_config(&config)?;
        Ok(config)
    }

    /// Load engine configuration from a file, picking the format from its extension
    pub fn load_from_path(path: &Path) -> CompletionResult<EngineConfig> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("yaml") | Some("yml") => Self::load_from_yaml(path),
            Some("json") => Self::load_from_json(path),
            _ => Err(CompletionError::Config(format!(
                "Unsupported configuration file: {}",
                path.display()
            ))),
        }
    }

    /// Load engine configuration from a string
    pub fn load_from_string(content: &str, format: ConfigFormat) -> CompletionResult<EngineConfig> {
        let config = match format {
            ConfigFormat::Yaml => serde_yaml::from_str(content)?,
            ConfigFormat::Json => serde_json::from_str(content)?,
        };
        Self::validate_config(&config)?;
        Ok(config)
    }

    /// Validate engine configuration
    pub fn validate_config(config: &EngineConfig) -> CompletionResult<()> {
        if config.cache_enabled && config.cache_capacity == 0 {
            return Err(CompletionError::Config(
                "Cache capacity must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

/// Configuration format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Yaml,
    Json,
}
