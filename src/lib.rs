//! plugin101 - string and numeric transforms as Polars expression plugins
//!
//! Declare calls through an [`ExpressionRegistry`] (capitalize, to_fahrenheit,
//! larger, largest, cumulative_join, cumulative_join_pairs), then evaluate the
//! resulting [`PluginExpr`] trees on Polars frames through a [`PluginSession`].
//!
//! ```no_run
//! use plugin101::prelude::*;
//! use polars::prelude::df;
//!
//! let session = PluginSession::new();
//! let frame = df!["attendees" => &["john", "mary"]].unwrap();
//! let names = session.registry().capitalize("attendees").unwrap();
//! let out = session.with_columns(&frame, &[("names", names)]).unwrap();
//! println!("{out}");
//! ```

pub mod prelude;
pub mod session;

pub use plugin101_core::{
    col, declaration, Arity, CallRequest, CumulativeJoinOptions, EngineError, ExpressionRegistry,
    FunctionDeclaration, Kwargs, OptionKind, OptionSpec, OptionValue, PairJoinOptions,
    Plugin101Config, PluginExpr, PluginLocation,
};
pub use plugin101_polars::{
    kernels, polars_to_core_error, Kernel, KernelEntry, KernelLibrary, OutputType, PluginHost,
};
pub use session::{PluginSession, PluginSessionBuilder};
