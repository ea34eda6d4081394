//! One-stop prelude for application code.
//!
//! Use `use plugin101::prelude::*` to get the most common types.

pub use crate::session::{PluginSession, PluginSessionBuilder};
pub use plugin101_core::{
    col, CumulativeJoinOptions, EngineError, ExpressionRegistry, Plugin101Config, PluginExpr,
    PluginLocation, PairJoinOptions,
};
pub use plugin101_polars::{KernelLibrary, OutputType};
