//! plugin101 core: declarations, expression IR, options, config and error (no Polars dependency).

pub mod config;
pub mod declaration;
pub mod error;
pub mod expr;
pub mod options;
pub mod registry;

pub use config::Plugin101Config;
pub use declaration::{Arity, FunctionDeclaration, OptionKind, OptionSpec};
pub use error::EngineError;
pub use expr::{col, CallRequest, Kwargs, OptionValue, PluginExpr, PluginLocation};
pub use options::{CumulativeJoinOptions, PairJoinOptions};
pub use registry::ExpressionRegistry;
