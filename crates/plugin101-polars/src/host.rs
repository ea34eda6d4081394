//! Plugin host: resolves plugin locations to kernel libraries and lowers
//! [`PluginExpr`] trees into Polars `Expr` values that call the kernels.
//!
//! Elementwise calls become `map_multiple` (Polars may evaluate them per chunk);
//! order-dependent calls become `apply_multiple`, which sees the whole column
//! (or whole group) in row order.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use plugin101_core::{CallRequest, EngineError, PluginExpr, PluginLocation};
use polars::prelude::{
    apply_multiple, col, map_multiple, Column, DataFrame, Expr, GetOutput, IntoLazy, PolarsResult,
    Series,
};

use crate::error::polars_to_core_error;
use crate::library::{KernelLibrary, OutputType};

#[derive(Clone)]
pub struct PluginHost {
    libraries: Arc<RwLock<HashMap<PluginLocation, KernelLibrary>>>,
}

impl Default for PluginHost {
    fn default() -> Self {
        let mut libraries = HashMap::new();
        libraries.insert(PluginLocation::Builtin, KernelLibrary::builtin());
        Self {
            libraries: Arc::new(RwLock::new(libraries)),
        }
    }
}

impl PluginHost {
    /// Host with the builtin kernels mounted at [`PluginLocation::Builtin`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Host with nothing mounted.
    pub fn empty() -> Self {
        Self {
            libraries: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Mount (or replace) the library served at `location`.
    pub fn mount(&self, location: PluginLocation, library: KernelLibrary) -> Result<(), EngineError> {
        tracing::debug!(%location, "mounted kernel library");
        self.libraries
            .write()
            .map_err(|_| EngineError::Internal("plugin host lock poisoned".into()))?
            .insert(location, library);
        Ok(())
    }

    pub fn library(&self, location: &PluginLocation) -> Result<KernelLibrary, EngineError> {
        let guard = self
            .libraries
            .read()
            .map_err(|_| EngineError::Internal("plugin host lock poisoned".into()))?;
        guard
            .get(location)
            .cloned()
            .ok_or_else(|| EngineError::UnknownLocation(location.to_string()))
    }

    /// Lower a plugin expression into a Polars expression.
    pub fn to_polars(&self, expr: &PluginExpr) -> Result<Expr, EngineError> {
        match expr {
            PluginExpr::Column(name) => Ok(col(name.as_str())),
            PluginExpr::Call(req) => self.call_to_expr(req),
        }
    }

    fn call_to_expr(&self, req: &CallRequest) -> Result<Expr, EngineError> {
        let library = self.library(req.location())?;
        let entry = library.get(req.function())?.ok_or_else(|| {
            EngineError::UnknownFunction(format!("{} (in {})", req.function(), req.location()))
        })?;
        if entry.is_elementwise() != req.is_elementwise() {
            return Err(EngineError::ElementwiseMismatch {
                function: req.function().to_string(),
                declared: entry.is_elementwise(),
                claimed: req.is_elementwise(),
            });
        }
        let inputs = req
            .inputs()
            .iter()
            .map(|input| self.to_polars(input))
            .collect::<Result<Vec<_>, _>>()?;
        let output = match entry.output() {
            OutputType::SameAsFirst => GetOutput::same_type(),
            OutputType::Supertype => GetOutput::super_type(),
            OutputType::Fixed(dtype) => GetOutput::from_type(dtype.clone()),
        };
        tracing::trace!(
            function = req.function(),
            elementwise = entry.is_elementwise(),
            "lowered plugin call"
        );

        let elementwise = entry.is_elementwise();
        let function = req.function().to_string();
        let options = req.options().clone();
        let udf = move |columns: &mut [Column]| -> PolarsResult<Option<Column>> {
            let series: Vec<Series> = columns
                .iter_mut()
                .map(|c| std::mem::take(c).take_materialized_series())
                .collect();
            tracing::trace!(
                function = %function,
                rows = series.first().map(|s| s.len()).unwrap_or(0),
                "running kernel"
            );
            let out = entry.call(&series, &options)?;
            Ok(Some(Column::from(out)))
        };
        Ok(if elementwise {
            map_multiple(udf, inputs, output)
        } else {
            apply_multiple(udf, inputs, output, false)
        })
    }

    /// Evaluate `(output name, expression)` pairs against `df`, appending the results.
    pub fn with_columns(
        &self,
        df: &DataFrame,
        exprs: &[(&str, PluginExpr)],
    ) -> Result<DataFrame, EngineError> {
        let lowered = exprs
            .iter()
            .map(|(name, expr)| Ok(self.to_polars(expr)?.alias(*name)))
            .collect::<Result<Vec<Expr>, EngineError>>()?;
        df.clone()
            .lazy()
            .with_columns(lowered)
            .collect()
            .map_err(polars_to_core_error)
    }

    /// Evaluate one expression and return its column.
    pub fn evaluate(&self, df: &DataFrame, expr: &PluginExpr) -> Result<Series, EngineError> {
        let out = df
            .clone()
            .lazy()
            .select([self.to_polars(expr)?])
            .collect()
            .map_err(polars_to_core_error)?;
        out.get_columns()
            .first()
            .map(|c| c.as_materialized_series().clone())
            .ok_or_else(|| EngineError::Internal("evaluation produced no column".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use plugin101_core::{Arity, ExpressionRegistry, FunctionDeclaration, Kwargs, Plugin101Config};
    use polars::prelude::{df, DataType};

    #[test]
    fn unknown_location_is_reported() {
        let host = PluginHost::empty();
        let expr = ExpressionRegistry::new().capitalize("a").unwrap();
        let err = host.to_polars(&expr).unwrap_err();
        assert!(matches!(err, EngineError::UnknownLocation(_)));
    }

    #[test]
    fn declared_function_without_kernel_is_unknown() {
        let mut registry = ExpressionRegistry::new();
        registry
            .declare(FunctionDeclaration::new("shout", Arity::Fixed(1), true))
            .unwrap();
        let expr = registry
            .register("shout", vec!["a".into()], true, &Kwargs::new())
            .unwrap();
        let err = PluginHost::new().to_polars(&expr).unwrap_err();
        assert!(matches!(err, EngineError::UnknownFunction(_)));
    }

    #[test]
    fn kernel_flag_must_match_request() {
        // A declaration that lies about being elementwise is caught at lowering.
        let mut registry = ExpressionRegistry::empty(&Plugin101Config::default());
        registry
            .declare(FunctionDeclaration::new("cumulative_join_pairs", Arity::Fixed(2), true))
            .unwrap();
        let expr = registry
            .register("cumulative_join_pairs", vec!["a".into(), "b".into()], true, &Kwargs::new())
            .unwrap();
        let err = PluginHost::new().to_polars(&expr).unwrap_err();
        assert!(matches!(
            err,
            EngineError::ElementwiseMismatch { declared: false, claimed: true, .. }
        ));
    }

    #[test]
    fn named_location_resolves_mounted_library() {
        let host = PluginHost::new();
        let location = PluginLocation::Named("doubling".into());
        let library = KernelLibrary::new();
        library
            .register_kernel("double", true, OutputType::SameAsFirst, |s, _| Ok(&s[0] * 2))
            .unwrap();
        host.mount(location.clone(), library).unwrap();

        let config = Plugin101Config::default().with_location(location);
        let mut registry = ExpressionRegistry::empty(&config);
        registry
            .declare(FunctionDeclaration::new("double", Arity::Fixed(1), true))
            .unwrap();
        let expr = registry
            .register("double", vec!["x".into()], true, &Kwargs::new())
            .unwrap();

        let frame = df!["x" => &[1i64, 2, 3]].unwrap();
        let out = host.evaluate(&frame, &expr).unwrap();
        let values: Vec<Option<i64>> = out.i64().unwrap().into_iter().collect();
        assert_eq!(values, vec![Some(2), Some(4), Some(6)]);
    }

    #[test]
    fn larger_plans_and_evaluates_in_the_supertype() {
        let frame = df!["i" => &[1i64, 2], "f" => &[1.5f64, 2.9]].unwrap();
        let host = PluginHost::new();
        let registry = ExpressionRegistry::new();
        for expr in [
            registry.larger("i", "f").unwrap(),
            registry.larger("f", "i").unwrap(),
        ] {
            let mut plan = frame.clone().lazy().select([host.to_polars(&expr).unwrap()]);
            let schema = plan.collect_schema().unwrap();
            assert_eq!(schema.get_at_index(0).unwrap().1, &DataType::Float64);
            let out = host.evaluate(&frame, &expr).unwrap();
            let values: Vec<Option<f64>> = out.f64().unwrap().into_iter().collect();
            assert_eq!(values, vec![Some(1.5), Some(2.9)]);
        }
    }
}
