//! Configuration for plugin101 registries.
//!
//! Build a [`Plugin101Config`] from code, JSON or environment variables and
//! hand it to [`ExpressionRegistry::from_config`](crate::ExpressionRegistry::from_config).
//! The plugin location is always injected here; nothing is derived from the
//! file-system layout of an installed package.

use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::expr::PluginLocation;

pub const ENV_LOCATION: &str = "PLUGIN101_LOCATION";
pub const ENV_CASE_SENSITIVE: &str = "PLUGIN101_CASE_SENSITIVE";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Plugin101Config {
    /// Kernel library every call request points at.
    pub location: PluginLocation,
    /// Whether function names are matched case-sensitively.
    pub case_sensitive: bool,
}

impl Default for Plugin101Config {
    fn default() -> Self {
        Self {
            location: PluginLocation::Builtin,
            case_sensitive: true,
        }
    }
}

impl Plugin101Config {
    pub fn with_location(mut self, location: PluginLocation) -> Self {
        self.location = location;
        self
    }

    pub fn with_case_sensitive(mut self, case_sensitive: bool) -> Self {
        self.case_sensitive = case_sensitive;
        self
    }

    /// Read `PLUGIN101_LOCATION` and `PLUGIN101_CASE_SENSITIVE`; unset variables keep defaults.
    pub fn from_env() -> Result<Self, EngineError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, EngineError> {
        let mut config = Self::default();
        if let Some(loc) = lookup(ENV_LOCATION) {
            config.location = PluginLocation::parse(&loc);
        }
        if let Some(raw) = lookup(ENV_CASE_SENSITIVE) {
            config.case_sensitive = parse_bool(&raw).ok_or_else(|| {
                EngineError::Config(format!("{ENV_CASE_SENSITIVE} must be a boolean, got '{raw}'"))
            })?;
        }
        Ok(config)
    }

    pub fn from_json(s: &str) -> Result<Self, EngineError> {
        Ok(serde_json::from_str(s)?)
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
