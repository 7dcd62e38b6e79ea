//! Configuration types for LitmapEngine

use crate::error::{Result, SdkError};
use litmap_runtime::lists::DEFAULT_ORDER;
use litmap_runtime::PropagationConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main engine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Limits applied to every propagation pass
    pub propagation: PropagationConfig,

    /// Order key used when a caller does not pass one
    pub default_order: String,

    /// Install a tracing subscriber when the engine is built
    pub enable_tracing: bool,

    /// Default filter directive when `RUST_LOG` is not set
    pub log_level: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            propagation: PropagationConfig::default(),
            default_order: DEFAULT_ORDER.to_string(),
            enable_tracing: false,
            log_level: "info".to_string(),
        }
    }
}

impl EngineConfig {
    /// Create a new engine configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from environment variables and config file
    ///
    /// Reads `config/litmap.{yaml,toml,json}` if present, then `LITMAP_*`
    /// variables (nested keys use `__`, e.g. `LITMAP_PROPAGATION__MAX_DEPTH`).
    pub fn load() -> anyhow::Result<Self> {
        // Load .env file if exists
        dotenvy::dotenv().ok();

        let config_result = config::Config::builder()
            .add_source(config::File::with_name("config/litmap").required(false))
            .add_source(
                config::Environment::with_prefix("LITMAP")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build();

        match config_result {
            Ok(cfg) => cfg
                .try_deserialize()
                .map_err(|e| anyhow::anyhow!("Failed to deserialize config: {}", e)),
            Err(e) => {
                tracing::info!("No usable config source ({}), using default configuration", e);
                Ok(Self::default())
            }
        }
    }

    /// Parse configuration from YAML text
    pub fn from_yaml_str(text: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Read configuration from a YAML file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        Self::from_yaml_str(&text)
    }

    pub fn with_propagation(mut self, propagation: PropagationConfig) -> Self {
        self.propagation = propagation;
        self
    }

    pub fn with_default_order(mut self, order: impl Into<String>) -> Self {
        self.default_order = order.into();
        self
    }

    /// Enable or disable tracing
    pub fn enable_tracing(mut self, enable: bool) -> Self {
        self.enable_tracing = enable;
        self
    }

    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    /// Reject limits that would stop every propagation pass before it starts
    pub fn validate(&self) -> Result<()> {
        if self.propagation.max_depth == 0 {
            return Err(SdkError::ConfigError(
                "propagation.max_depth must be at least 1".to_string(),
            ));
        }
        if self.propagation.max_steps == 0 {
            return Err(SdkError::ConfigError(
                "propagation.max_steps must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
