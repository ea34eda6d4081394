//! Engine error type for embedders (Polars conversion in this crate).

use polars::error::PolarsError;

pub use plugin101_core::EngineError;

/// Map PolarsError to core EngineError. Kernel dtype rejections and failed strict
/// casts come back as `InvalidOperation`/`SchemaMismatch` and become `EvaluationType`.
pub fn polars_to_core_error(e: PolarsError) -> EngineError {
    let msg = e.to_string();
    match e {
        PolarsError::Context { error, .. } => polars_to_core_error(*error),
        PolarsError::ColumnNotFound(_) => EngineError::NotFound(msg),
        PolarsError::InvalidOperation(_) | PolarsError::SchemaMismatch(_) => {
            EngineError::EvaluationType(msg)
        }
        _ => EngineError::Internal(msg),
    }
}
