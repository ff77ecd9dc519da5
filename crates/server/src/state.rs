use std::sync::Arc;

use dorkforge_core::{
    Config, DorkEngine, DorkGenerator, DorkOptimizer, Engine, SanitizedConfig,
};

/// Shared application state
pub struct AppState {
    config: Config,
    engine: DorkEngine,
    optimizer: DorkOptimizer,
    default_engine: Engine,
    ai: Option<Arc<dyn DorkGenerator>>,
}

impl AppState {
    pub fn new(config: Config, engine: DorkEngine, ai: Option<Arc<dyn DorkGenerator>>) -> Self {
        let optimizer = DorkOptimizer::new(config.optimizer);
        let default_engine = config
            .generation
            .default_engine
            .parse()
            .unwrap_or_default();
        Self {
            config,
            engine,
            optimizer,
            default_engine,
            ai,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn sanitized_config(&self) -> SanitizedConfig {
        SanitizedConfig::from(&self.config)
    }

    pub fn engine(&self) -> &DorkEngine {
        &self.engine
    }

    pub fn optimizer(&self) -> &DorkOptimizer {
        &self.optimizer
    }

    /// Engine used when a request does not name one.
    pub fn default_engine(&self) -> Engine {
        self.default_engine
    }

    pub fn ai(&self) -> Option<&Arc<dyn DorkGenerator>> {
        self.ai.as_ref()
    }
}
