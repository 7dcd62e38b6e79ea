//! Builder pattern for LitmapEngine

use crate::config::EngineConfig;
use crate::engine::LitmapEngine;
use crate::error::Result;
use crate::telemetry;
use litmap_runtime::{Catalog, ListService, OrderKey, PropagationConfig};

/// Builder for LitmapEngine
///
/// # Example
///
/// ```rust,ignore
/// use litmap_sdk::{EngineConfig, LitmapEngineBuilder};
///
/// let engine = LitmapEngineBuilder::new()
///     .with_config(EngineConfig::load()?)
///     .build()?;
/// ```
pub struct LitmapEngineBuilder {
    config: EngineConfig,
    catalog: Option<Catalog>,
}

impl LitmapEngineBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self {
            config: EngineConfig::new(),
            catalog: None,
        }
    }

    /// Replace the whole configuration
    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Start from an existing catalog instead of an empty one
    pub fn with_catalog(mut self, catalog: Catalog) -> Self {
        self.catalog = Some(catalog);
        self
    }

    pub fn with_propagation(mut self, propagation: PropagationConfig) -> Self {
        self.config.propagation = propagation;
        self
    }

    pub fn with_default_order(mut self, order: impl Into<String>) -> Self {
        self.config.default_order = order.into();
        self
    }

    /// Enable tracing
    pub fn enable_tracing(mut self, enable: bool) -> Self {
        self.config.enable_tracing = enable;
        self
    }

    /// Build the engine
    pub fn build(self) -> Result<LitmapEngine> {
        self.config.validate()?;
        self.config.default_order.parse::<OrderKey>()?;

        if self.config.enable_tracing {
            if let Err(e) = telemetry::init_tracing(&self.config.log_level) {
                tracing::debug!("Keeping existing subscriber: {}", e);
            }
        }

        let service = ListService::with_catalog(
            self.catalog.unwrap_or_default(),
            self.config.propagation,
        );
        tracing::debug!(
            "Built litmap engine (max_depth={}, max_steps={}, default_order={})",
            self.config.propagation.max_depth,
            self.config.propagation.max_steps,
            self.config.default_order
        );
        Ok(LitmapEngine::new(service, self.config))
    }
}

impl Default for LitmapEngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}
