//! plugin101 Polars backend: native kernels, kernel libraries and the host that
//! lowers plugin expressions into Polars (the only crate that depends on Polars).

pub mod error;
pub mod host;
pub mod kernels;
pub mod library;

/// Re-export for callers that evaluate frames.
pub use polars::prelude::DataFrame as PlDataFrame;
pub use polars::prelude::Series;

pub use error::{polars_to_core_error, EngineError};
pub use host::PluginHost;
pub use library::{Kernel, KernelEntry, KernelLibrary, OutputType};
