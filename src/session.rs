//! Session: one expression registry plus the host that evaluates its expressions.

use plugin101_core::{EngineError, ExpressionRegistry, Plugin101Config, PluginExpr, PluginLocation};
use plugin101_polars::{KernelLibrary, PluginHost};
use polars::prelude::{DataFrame, Series};

/// Builder for creating a PluginSession with configuration options
#[derive(Clone, Default)]
pub struct PluginSessionBuilder {
    config: Plugin101Config,
    mounts: Vec<(PluginLocation, KernelLibrary)>,
}

impl PluginSessionBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole configuration.
    pub fn with_config(mut self, config: &Plugin101Config) -> Self {
        self.config = config.clone();
        self
    }

    /// Location every call request built by the session points at.
    pub fn location(mut self, location: PluginLocation) -> Self {
        self.config.location = location;
        self
    }

    pub fn case_sensitive(mut self, case_sensitive: bool) -> Self {
        self.config.case_sensitive = case_sensitive;
        self
    }

    /// Mount an extra kernel library on the session's host.
    pub fn mount(mut self, location: PluginLocation, library: KernelLibrary) -> Self {
        self.mounts.push((location, library));
        self
    }

    pub fn build(self) -> Result<PluginSession, EngineError> {
        let host = PluginHost::new();
        for (location, library) in self.mounts {
            host.mount(location, library)?;
        }
        // Fail early instead of on first evaluation.
        host.library(&self.config.location)?;
        tracing::debug!(
            location = %self.config.location,
            case_sensitive = self.config.case_sensitive,
            "created plugin session"
        );
        Ok(PluginSession {
            registry: ExpressionRegistry::from_config(&self.config),
            host,
            config: self.config,
        })
    }
}

/// Main entry point: build plugin expressions with [`registry`](PluginSession::registry)
/// and evaluate them against Polars frames.
#[derive(Clone)]
pub struct PluginSession {
    registry: ExpressionRegistry,
    host: PluginHost,
    config: Plugin101Config,
}

impl Default for PluginSession {
    fn default() -> Self {
        Self {
            registry: ExpressionRegistry::new(),
            host: PluginHost::new(),
            config: Plugin101Config::default(),
        }
    }
}

impl PluginSession {
    /// Session over the builtin kernels with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builder() -> PluginSessionBuilder {
        PluginSessionBuilder::new()
    }

    pub fn from_config(config: &Plugin101Config) -> Result<Self, EngineError> {
        Self::builder().with_config(config).build()
    }

    pub fn config(&self) -> &Plugin101Config {
        &self.config
    }

    pub fn registry(&self) -> &ExpressionRegistry {
        &self.registry
    }

    /// Mutable registry, for declaring custom functions.
    pub fn registry_mut(&mut self) -> &mut ExpressionRegistry {
        &mut self.registry
    }

    pub fn host(&self) -> &PluginHost {
        &self.host
    }

    /// Append `(name, expression)` columns to `df`.
    pub fn with_columns(
        &self,
        df: &DataFrame,
        exprs: &[(&str, PluginExpr)],
    ) -> Result<DataFrame, EngineError> {
        self.host.with_columns(df, exprs)
    }

    /// Evaluate a single expression against `df`.
    pub fn evaluate(&self, df: &DataFrame, expr: &PluginExpr) -> Result<Series, EngineError> {
        self.host.evaluate(df, expr)
    }
}
