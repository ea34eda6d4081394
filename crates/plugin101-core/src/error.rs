//! Engine error type for embedders.
//!
//! Declaration-time failures (arity, options, unknown names) are raised by the
//! registry before anything reaches Polars. [`EngineError::EvaluationType`] is
//! the only variant produced lazily, when the host engine runs a kernel.
//!
//! Note: `From<PolarsError>` for `EngineError` lives in `plugin101-polars`,
//! which has the Polars dependency.

use thiserror::Error;

/// Unified error type for plugin101 operations.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Wrong number of positional inputs for the function's arity.
    #[error("invalid arity for '{function}': expected {expected}, got {got}")]
    InvalidArity {
        function: String,
        expected: String,
        got: usize,
    },
    /// Function name not declared in the registry (or no kernel for it).
    #[error("unknown function: {0}")]
    UnknownFunction(String),
    /// Keyword option not accepted by the target function.
    #[error("unknown option '{option}' for '{function}'")]
    UnknownOption { function: String, option: String },
    /// Required keyword option absent.
    #[error("missing required option '{option}' for '{function}'")]
    MissingOption { function: String, option: String },
    /// Keyword option present with the wrong scalar kind.
    #[error("option '{option}' for '{function}' must be {expected}")]
    InvalidOptionValue {
        function: String,
        option: String,
        expected: String,
    },
    /// Caller's elementwise flag disagrees with the declaration.
    #[error("'{function}' is declared elementwise={declared}, request claims elementwise={claimed}")]
    ElementwiseMismatch {
        function: String,
        declared: bool,
        claimed: bool,
    },
    /// Function name already declared.
    #[error("function already declared: {0}")]
    DuplicateFunction(String),
    /// No kernel library mounted at the requested location.
    #[error("no plugin library mounted at {0}")]
    UnknownLocation(String),
    /// Input column type incompatible with the transform; raised at evaluation time.
    #[error("evaluation type error: {0}")]
    EvaluationType(String),
    /// Column or other resource not found during evaluation.
    #[error("not found: {0}")]
    NotFound(String),
    /// Bad configuration value.
    #[error("config error: {0}")]
    Config(String),
    /// Internal / compute error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl EngineError {
    /// True for errors raised while building an expression, before evaluation.
    pub fn is_declaration_error(&self) -> bool {
        matches!(
            self,
            EngineError::InvalidArity { .. }
                | EngineError::UnknownFunction(_)
                | EngineError::UnknownOption { .. }
                | EngineError::MissingOption { .. }
                | EngineError::InvalidOptionValue { .. }
                | EngineError::ElementwiseMismatch { .. }
                | EngineError::DuplicateFunction(_)
        )
    }
}

impl From<serde_json::Error> for EngineError {
    fn from(e: serde_json::Error) -> Self {
        EngineError::Config(e.to_string())
    }
}
