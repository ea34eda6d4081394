//! Expression registry: one typed entry point per transform, all funneled
//! through [`ExpressionRegistry::register`], which validates the call shape and
//! packages it as a [`CallRequest`] bound to the registry's plugin location.

use std::collections::HashMap;

use crate::config::Plugin101Config;
use crate::declaration::{
    builtin_declarations, FunctionDeclaration, CAPITALIZE, CUMULATIVE_JOIN,
    CUMULATIVE_JOIN_PAIRS, LARGER, LARGEST, TO_FAHRENHEIT,
};
use crate::error::EngineError;
use crate::expr::{CallRequest, Kwargs, PluginExpr, PluginLocation};
use crate::options::{CumulativeJoinOptions, PairJoinOptions};

#[derive(Debug, Clone)]
pub struct ExpressionRegistry {
    location: PluginLocation,
    case_sensitive: bool,
    declarations: HashMap<String, FunctionDeclaration>,
}

impl Default for ExpressionRegistry {
    fn default() -> Self {
        Self::from_config(&Plugin101Config::default())
    }
}

impl ExpressionRegistry {
    /// Registry with the builtin declarations, pointing at the builtin kernels.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the builtin declarations, pointing at `config.location`.
    pub fn from_config(config: &Plugin101Config) -> Self {
        let mut registry = Self::empty(config);
        for decl in builtin_declarations() {
            registry.declarations.insert(decl.name.clone(), decl);
        }
        registry
    }

    /// Registry without any declarations.
    pub fn empty(config: &Plugin101Config) -> Self {
        Self {
            location: config.location.clone(),
            case_sensitive: config.case_sensitive,
            declarations: HashMap::new(),
        }
    }

    pub fn location(&self) -> &PluginLocation {
        &self.location
    }

    /// Add a declaration. Names are unique under the registry's case rule.
    pub fn declare(&mut self, decl: FunctionDeclaration) -> Result<(), EngineError> {
        if self.declaration(&decl.name).is_some() {
            return Err(EngineError::DuplicateFunction(decl.name));
        }
        tracing::debug!(
            function = %decl.name,
            arity = %decl.arity,
            elementwise = decl.elementwise,
            "declared plugin function"
        );
        self.declarations.insert(decl.name.clone(), decl);
        Ok(())
    }

    /// Look up a declaration. Case sensitivity follows config.
    pub fn declaration(&self, name: &str) -> Option<&FunctionDeclaration> {
        if self.case_sensitive {
            self.declarations.get(name)
        } else {
            let name_lower = name.to_lowercase();
            self.declarations
                .iter()
                .find(|(k, _)| k.to_lowercase() == name_lower)
                .map(|(_, v)| v)
        }
    }

    /// All declarations, sorted by name.
    pub fn declarations(&self) -> Vec<&FunctionDeclaration> {
        let mut out: Vec<_> = self.declarations.values().collect();
        out.sort_by(|a, b| a.name.cmp(&b.name));
        out
    }

    /// Generic registration path: validate against the declaration and build a call.
    ///
    /// `elementwise` must match the declaration; the host engine relies on it to
    /// decide whether the call may be split across chunks.
    pub fn register(
        &self,
        function_name: &str,
        inputs: Vec<PluginExpr>,
        elementwise: bool,
        kwargs: &Kwargs,
    ) -> Result<PluginExpr, EngineError> {
        let decl = self
            .declaration(function_name)
            .ok_or_else(|| EngineError::UnknownFunction(function_name.to_string()))?;
        decl.check_arity(inputs.len())?;
        if decl.elementwise != elementwise {
            tracing::warn!(
                function = %decl.name,
                declared = decl.elementwise,
                claimed = elementwise,
                "rejected call with wrong elementwise flag"
            );
            return Err(EngineError::ElementwiseMismatch {
                function: decl.name.clone(),
                declared: decl.elementwise,
                claimed: elementwise,
            });
        }
        let options = decl.resolve_options(kwargs)?;
        tracing::debug!(
            function = %decl.name,
            inputs = inputs.len(),
            location = %self.location,
            "registered plugin call"
        );
        Ok(PluginExpr::Call(CallRequest::new(
            self.location.clone(),
            decl.name.clone(),
            inputs,
            elementwise,
            options,
        )))
    }

    /// Uppercase the first character of each string.
    pub fn capitalize(&self, expr: impl Into<PluginExpr>) -> Result<PluginExpr, EngineError> {
        self.register(CAPITALIZE, vec![expr.into()], true, &Kwargs::new())
    }

    /// Celsius to Fahrenheit: `c * 9/5 + 32`.
    pub fn to_fahrenheit(&self, expr: impl Into<PluginExpr>) -> Result<PluginExpr, EngineError> {
        self.register(TO_FAHRENHEIT, vec![expr.into()], true, &Kwargs::new())
    }

    /// Row-wise greater of two values.
    pub fn larger(
        &self,
        expr1: impl Into<PluginExpr>,
        expr2: impl Into<PluginExpr>,
    ) -> Result<PluginExpr, EngineError> {
        self.register(LARGER, vec![expr1.into(), expr2.into()], true, &Kwargs::new())
    }

    /// Row-wise maximum across one or more values.
    pub fn largest<I, E>(&self, exprs: I) -> Result<PluginExpr, EngineError>
    where
        I: IntoIterator<Item = E>,
        E: Into<PluginExpr>,
    {
        let inputs = exprs.into_iter().map(Into::into).collect();
        self.register(LARGEST, inputs, true, &Kwargs::new())
    }

    /// Running join of all strings up to each row.
    pub fn cumulative_join(
        &self,
        expr: impl Into<PluginExpr>,
        separator: &str,
        trim: bool,
    ) -> Result<PluginExpr, EngineError> {
        self.cumulative_join_with(expr, &CumulativeJoinOptions::new(separator, trim))
    }

    pub fn cumulative_join_with(
        &self,
        expr: impl Into<PluginExpr>,
        options: &CumulativeJoinOptions,
    ) -> Result<PluginExpr, EngineError> {
        self.register(CUMULATIVE_JOIN, vec![expr.into()], false, &options.to_kwargs())
    }

    /// Running join of `(expr1[j], expr2[j])` pairs up to each row, default separators.
    pub fn cumulative_join_pairs(
        &self,
        expr1: impl Into<PluginExpr>,
        expr2: impl Into<PluginExpr>,
    ) -> Result<PluginExpr, EngineError> {
        self.cumulative_join_pairs_with(expr1, expr2, &PairJoinOptions::default())
    }

    pub fn cumulative_join_pairs_with(
        &self,
        expr1: impl Into<PluginExpr>,
        expr2: impl Into<PluginExpr>,
        options: &PairJoinOptions,
    ) -> Result<PluginExpr, EngineError> {
        self.register(
            CUMULATIVE_JOIN_PAIRS,
            vec![expr1.into(), expr2.into()],
            false,
            &options.to_kwargs(),
        )
    }
}
