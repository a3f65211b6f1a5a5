//! Server configuration
//!
//! Settings are layered, later sources overriding earlier ones:
//!
//! 1. built-in defaults
//! 2. an optional configuration file (TOML, YAML or JSON, by extension)
//! 3. `QREMIX_*` environment variables, nested with `__` (e.g. `QREMIX_ENGINE__CACHE_CAPACITY`)
//! 4. command-line flags

use clap::Parser;
use config::{Config, Environment, File};
use qremix_completion::{ConfigLoader, EngineConfig};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{ServerError, ServerResult};

const ENV_PREFIX: &str = "QREMIX";

/// Complete server configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// trace, debug, info, warn or error
    pub log_level: String,
    /// Verbose log lines with target, thread, file and line
    pub debug: bool,
    /// Allowed CORS origins; empty allows any origin
    pub cors_allowed_origins: Vec<String>,
    pub engine: EngineConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            log_level: "info".to_string(),
            debug: false,
            cors_allowed_origins: Vec::new(),
            engine: EngineConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Socket address to bind
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Validate server configuration
    pub fn validate(&self) -> ServerResult<()> {
        if self.host.is_empty() {
            return Err(ServerError::Validation("Host cannot be empty".to_string()));
        }

        if !matches!(
            self.log_level.to_lowercase().as_str(),
            "trace" | "debug" | "info" | "warn" | "error"
        ) {
            return Err(ServerError::Validation(format!(
                "Unknown log level: {}",
                self.log_level
            )));
        }

        ConfigLoader::validate_config(&self.engine)?;
        Ok(())
    }
}

/// Command-line flags
#[derive(Debug, Clone, Default, Parser)]
#[command(name = "qremix-server", version, about = "Solidity completion server")]
pub struct CliArgs {
    /// Configuration file (toml, yaml or json)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Address to bind
    #[arg(long)]
    pub host: Option<String>,

    /// Port to listen on
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Maximum number of cached suggestions
    #[arg(long)]
    pub cache_capacity: Option<usize>,

    /// Resolve every request afresh
    #[arg(long)]
    pub no_cache: bool,

    /// Enable verbose logging
    #[arg(long)]
    pub debug: bool,
}

impl CliArgs {
    /// Override `config` with any flags given on the command line
    pub fn apply(&self, config: &mut ServerConfig) {
        if let Some(host) = &self.host {
            config.host = host.clone();
        }
        if let Some(port) = self.port {
            config.port = port;
        }
        if let Some(capacity) = self.cache_capacity {
            config.engine.cache_capacity = capacity;
        }
        if self.no_cache {
            config.engine.cache_enabled = false;
        }
        if self.debug {
            config.debug = true;
        }

        match &self.log_level {
            Some(level) => config.log_level = level.clone(),
            None if self.debug => config.log_level = "debug".to_string(),
            None => {}
        }
    }
}

/// Loads [`ServerConfig`] from file and environment
pub struct ConfigManager {
    config_path: Option<PathBuf>,
    env_prefix: String,
}

impl ConfigManager {
    pub fn new() -> Self {
        Self {
            config_path: None,
            env_prefix: ENV_PREFIX.to_string(),
        }
    }

    /// Create with custom config path
    pub fn with_path(path: PathBuf) -> Self {
        Self {
            config_path: Some(path),
            env_prefix: ENV_PREFIX.to_string(),
        }
    }

    pub fn with_env_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    /// Load and validate the layered configuration
    pub fn load_config(&self) -> ServerResult<ServerConfig> {
        let mut builder = Config::builder();

        if let Some(path) = &self.config_path {
            builder = builder.add_source(File::from(path.clone()).required(false));
        }

        let builder = builder.add_source(
            Environment::with_prefix(&self.env_prefix)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true)
                .list_separator(",")
                .with_list_parse_key("cors_allowed_origins"),
        );

        let config: ServerConfig = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Load from file and environment, then apply command-line overrides
    pub fn load_with_args(args: &CliArgs) -> ServerResult<ServerConfig> {
        let manager = match &args.config {
            Some(path) => Self::with_path(path.clone()),
            None => Self::new(),
        };

        let mut config = manager.load_config()?;
        args.apply(&mut config);
        config.validate()?;
        Ok(config)
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn isolated(path: Option<PathBuf>) -> ConfigManager {
        let manager = match path {
            Some(path) => ConfigManager::with_path(path),
            None => ConfigManager::new(),
        };
        manager.with_env_prefix("QREMIX_UNIT_TEST_UNSET")
    }

    #[test]
    fn test_defaults() {
        let config = isolated(None).load_config().unwrap();
        assert_eq!(config, ServerConfig::default());
        assert_eq!(config.bind_address(), "0.0.0.0:8000");
        assert_eq!(config.engine.cache_capacity, 500);
    }

    #[test]
    fn test_load_toml_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "port = 9000").unwrap();
        writeln!(file, "cors_allowed_origins = [\"http://localhost:3000\"]").unwrap();
        writeln!(file, "[engine]").unwrap();
        writeln!(file, "cache_capacity = 32").unwrap();

        let config = isolated(Some(file.path().to_path_buf())).load_config().unwrap();
        assert_eq!(config.port, 9000);
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.cors_allowed_origins, vec!["http://localhost:3000"]);
        assert_eq!(config.engine.cache_capacity, 32);
        assert!(config.engine.cache_enabled);
    }

    #[test]
    fn test_load_yaml_file() {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        writeln!(file, "log_level: debug").unwrap();
        writeln!(file, "engine:").unwrap();
        writeln!(file, "  cache_enabled: false").unwrap();

        let config = isolated(Some(file.path().to_path_buf())).load_config().unwrap();
        assert_eq!(config.log_level, "debug");
        assert!(!config.engine.cache_enabled);
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let config = isolated(Some(PathBuf::from("/nonexistent/qremix.toml")))
            .load_config()
            .unwrap();
        assert_eq!(config, ServerConfig::default());
    }

    #[test]
    fn test_invalid_values_rejected() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[engine]").unwrap();
        writeln!(file, "cache_capacity = 0").unwrap();

        let result = isolated(Some(file.path().to_path_buf())).load_config();
        assert!(matches!(result, Err(ServerError::Engine(_))));
    }

    #[test]
    fn test_unknown_log_level_rejected() {
        let config = ServerConfig {
            log_level: "loud".to_string(),
            ..ServerConfig::default()
        };
        assert!(matches!(config.validate(), Err(ServerError::Validation(_))));
    }

    #[test]
    fn test_cli_overrides() {
        let args = CliArgs::parse_from([
            "qremix-server",
            "--port",
            "9100",
            "--cache-capacity",
            "10",
            "--no-cache",
            "--debug",
        ]);
        let mut config = ServerConfig::default();
        args.apply(&mut config);

        assert_eq!(config.port, 9100);
        assert_eq!(config.engine.cache_capacity, 10);
        assert!(!config.engine.cache_enabled);
        assert!(config.debug);
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    fn test_explicit_log_level_beats_debug() {
        let args = CliArgs::parse_from(["qremix-server", "--debug", "--log-level", "warn"]);
        let mut config = ServerConfig::default();
        args.apply(&mut config);
        assert_eq!(config.log_level, "warn");
    }
}
