//! Kernel library: named native kernels a plugin location resolves to.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use plugin101_core::declaration::{
    CAPITALIZE, CUMULATIVE_JOIN, CUMULATIVE_JOIN_PAIRS, LARGER, LARGEST, TO_FAHRENHEIT,
};
use plugin101_core::{CumulativeJoinOptions, EngineError, Kwargs, PairJoinOptions};
use polars::prelude::{DataType, PolarsError, PolarsResult, Series};

use crate::kernels;

/// Native kernel: takes input columns as Series plus resolved options, returns one Series.
pub trait Kernel: Send + Sync {
    fn call(&self, inputs: &[Series], options: &Kwargs) -> PolarsResult<Series>;
}

/// Type-erased wrapper for kernel closures.
struct KernelWrapper<F>
where
    F: Fn(&[Series], &Kwargs) -> PolarsResult<Series> + Send + Sync,
{
    f: F,
}

impl<F> Kernel for KernelWrapper<F>
where
    F: Fn(&[Series], &Kwargs) -> PolarsResult<Series> + Send + Sync,
{
    fn call(&self, inputs: &[Series], options: &Kwargs) -> PolarsResult<Series> {
        (self.f)(inputs, options)
    }
}

/// Output dtype a kernel reports to the planner.
#[derive(Debug, Clone, PartialEq)]
pub enum OutputType {
    /// Same dtype as the first input.
    SameAsFirst,
    /// Supertype of all inputs.
    Supertype,
    Fixed(DataType),
}

/// A kernel with the metadata the host needs to plan it.
#[derive(Clone)]
pub struct KernelEntry {
    elementwise: bool,
    output: OutputType,
    kernel: Arc<dyn Kernel>,
}

impl KernelEntry {
    pub fn is_elementwise(&self) -> bool {
        self.elementwise
    }

    pub fn output(&self) -> &OutputType {
        &self.output
    }

    pub fn call(&self, inputs: &[Series], options: &Kwargs) -> PolarsResult<Series> {
        self.kernel.call(inputs, options)
    }
}

/// Shared, thread-safe map of kernel name -> entry. Cloning shares the same kernels.
#[derive(Clone, Default)]
pub struct KernelLibrary {
    kernels: Arc<RwLock<HashMap<String, KernelEntry>>>,
}

fn options_error(e: EngineError) -> PolarsError {
    PolarsError::ComputeError(e.to_string().into())
}

impl KernelLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Library holding the six builtin kernels.
    pub fn builtin() -> Self {
        let builtins: [(&str, bool, OutputType, fn(&[Series], &Kwargs) -> PolarsResult<Series>); 6] = [
            (CAPITALIZE, true, OutputType::Fixed(DataType::String), |s, _| {
                kernels::capitalize(s)
            }),
            (TO_FAHRENHEIT, true, OutputType::Fixed(DataType::Float64), |s, _| {
                kernels::to_fahrenheit(s)
            }),
            (LARGER, true, OutputType::Supertype, |s, _| kernels::larger(s)),
            (LARGEST, true, OutputType::Supertype, |s, _| kernels::largest(s)),
            (CUMULATIVE_JOIN, false, OutputType::Fixed(DataType::String), |s, kw| {
                let options = CumulativeJoinOptions::from_kwargs(kw).map_err(options_error)?;
                kernels::cumulative_join(s, &options)
            }),
            (CUMULATIVE_JOIN_PAIRS, false, OutputType::Fixed(DataType::String), |s, kw| {
                let options = PairJoinOptions::from_kwargs(kw).map_err(options_error)?;
                kernels::cumulative_join_pairs(s, &options)
            }),
        ];
        let entries: HashMap<String, KernelEntry> = builtins
            .into_iter()
            .map(|(name, elementwise, output, f)| {
                let entry = KernelEntry {
                    elementwise,
                    output,
                    kernel: Arc::new(KernelWrapper { f }),
                };
                (name.to_string(), entry)
            })
            .collect();
        Self {
            kernels: Arc::new(RwLock::new(entries)),
        }
    }

    /// Register (or replace) a kernel under `name`.
    pub fn register_kernel<F>(
        &self,
        name: &str,
        elementwise: bool,
        output: OutputType,
        f: F,
    ) -> Result<(), EngineError>
    where
        F: Fn(&[Series], &Kwargs) -> PolarsResult<Series> + Send + Sync + 'static,
    {
        let entry = KernelEntry {
            elementwise,
            output,
            kernel: Arc::new(KernelWrapper { f }),
        };
        self.kernels
            .write()
            .map_err(|_| EngineError::Internal("kernel library lock poisoned".into()))?
            .insert(name.to_string(), entry);
        tracing::debug!(kernel = name, elementwise, "registered kernel");
        Ok(())
    }

    /// Look up a kernel by exact name.
    /// Returns `Err` if the library lock is poisoned (e.g. a thread panicked while holding it).
    pub fn get(&self, name: &str) -> Result<Option<KernelEntry>, EngineError> {
        let guard = self
            .kernels
            .read()
            .map_err(|_| EngineError::Internal("kernel library lock poisoned".into()))?;
        Ok(guard.get(name).cloned())
    }

    /// Kernel names, sorted.
    pub fn names(&self) -> Result<Vec<String>, EngineError> {
        let guard = self
            .kernels
            .read()
            .map_err(|_| EngineError::Internal("kernel library lock poisoned".into()))?;
        let mut names: Vec<String> = guard.keys().cloned().collect();
        names.sort();
        Ok(names)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use plugin101_core::declaration::builtin_declarations;
    use polars::prelude::NamedFrom;

    #[test]
    fn builtin_matches_declarations() {
        let library = KernelLibrary::builtin();
        for decl in builtin_declarations() {
            let entry = library.get(&decl.name).unwrap().expect("kernel for declaration");
            assert_eq!(entry.is_elementwise(), decl.elementwise, "{}", decl.name);
        }
        assert_eq!(library.names().unwrap().len(), 6);
    }

    #[test]
    fn max_kernels_report_supertype() {
        let library = KernelLibrary::builtin();
        for name in [LARGER, LARGEST] {
            let entry = library.get(name).unwrap().unwrap();
            assert_eq!(entry.output(), &OutputType::Supertype, "{name}");
        }
    }

    #[test]
    fn custom_kernel_roundtrip() {
        let library = KernelLibrary::new();
        library
            .register_kernel("double", true, OutputType::SameAsFirst, |s, _| {
                Ok(&s[0] * 2)
            })
            .unwrap();
        let entry = library.get("double").unwrap().unwrap();
        let out = entry
            .call(&[Series::new("x".into(), &[1i64, 2])], &Kwargs::new())
            .unwrap();
        let values: Vec<Option<i64>> = out.i64().unwrap().into_iter().collect();
        assert_eq!(values, vec![Some(2), Some(4)]);
        assert!(library.get("missing").unwrap().is_none());
    }

    #[test]
    fn clones_share_kernels() {
        let library = KernelLibrary::new();
        let alias = library.clone();
        library
            .register_kernel("noop", true, OutputType::SameAsFirst, |s, _| Ok(s[0].clone()))
            .unwrap();
        assert!(alias.get("noop").unwrap().is_some());
    }
}
