//! Engine-agnostic expression IR. The Polars backend lowers this into its native `Expr`.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Scalar value of a keyword option.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OptionValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
}

impl OptionValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            OptionValue::Str(s) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            OptionValue::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

impl From<&str> for OptionValue {
    fn from(s: &str) -> Self {
        OptionValue::Str(s.to_string())
    }
}

impl From<String> for OptionValue {
    fn from(s: String) -> Self {
        OptionValue::Str(s)
    }
}

impl From<bool> for OptionValue {
    fn from(b: bool) -> Self {
        OptionValue::Bool(b)
    }
}

impl From<i64> for OptionValue {
    fn from(n: i64) -> Self {
        OptionValue::Int(n)
    }
}

impl From<f64> for OptionValue {
    fn from(n: f64) -> Self {
        OptionValue::Float(n)
    }
}

/// Flat keyword configuration: option name -> scalar. Ordered so plans serialize stably.
pub type Kwargs = BTreeMap<String, OptionValue>;

/// Where the native kernels for a call are loaded from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PluginLocation {
    /// Kernels compiled into this workspace.
    #[default]
    Builtin,
    /// A library mounted on the host under a name.
    Named(String),
}

impl PluginLocation {
    /// Parse `"builtin"` (any case) or an arbitrary library name.
    pub fn parse(s: &str) -> Self {
        let trimmed = s.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("builtin") {
            PluginLocation::Builtin
        } else {
            PluginLocation::Named(trimmed.to_string())
        }
    }
}

impl fmt::Display for PluginLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PluginLocation::Builtin => write!(f, "builtin"),
            PluginLocation::Named(name) => write!(f, "{name}"),
        }
    }
}

/// One packaged call intent. Immutable once built; only the registry constructs it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallRequest {
    location: PluginLocation,
    function: String,
    inputs: Vec<PluginExpr>,
    elementwise: bool,
    options: Kwargs,
}

impl CallRequest {
    pub(crate) fn new(
        location: PluginLocation,
        function: String,
        inputs: Vec<PluginExpr>,
        elementwise: bool,
        options: Kwargs,
    ) -> Self {
        Self {
            location,
            function,
            inputs,
            elementwise,
            options,
        }
    }

    pub fn location(&self) -> &PluginLocation {
        &self.location
    }

    pub fn function(&self) -> &str {
        &self.function
    }

    pub fn inputs(&self) -> &[PluginExpr] {
        &self.inputs
    }

    pub fn is_elementwise(&self) -> bool {
        self.elementwise
    }

    pub fn options(&self) -> &Kwargs {
        &self.options
    }
}

/// Deferred expression: a source column or a plugin call over other expressions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PluginExpr {
    /// Column reference: `col("name")`
    Column(String),
    /// Plugin function call.
    Call(CallRequest),
}

impl PluginExpr {
    /// True when this node and every call beneath it is elementwise.
    pub fn is_elementwise(&self) -> bool {
        match self {
            PluginExpr::Column(_) => true,
            PluginExpr::Call(req) => {
                req.is_elementwise() && req.inputs().iter().all(PluginExpr::is_elementwise)
            }
        }
    }

    /// Names of all source columns referenced, in first-seen order.
    pub fn source_columns(&self) -> Vec<&str> {
        let mut out = Vec::new();
        self.collect_columns(&mut out);
        out
    }

    fn collect_columns<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            PluginExpr::Column(name) => {
                if !out.contains(&name.as_str()) {
                    out.push(name.as_str());
                }
            }
            PluginExpr::Call(req) => {
                for input in req.inputs() {
                    input.collect_columns(out);
                }
            }
        }
    }

    /// Serialize the tree as JSON (plan dumps, logging).
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn from_json(s: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(s)
    }
}

impl From<&str> for PluginExpr {
    fn from(name: &str) -> Self {
        PluginExpr::Column(name.to_string())
    }
}

impl From<String> for PluginExpr {
    fn from(name: String) -> Self {
        PluginExpr::Column(name)
    }
}

impl From<CallRequest> for PluginExpr {
    fn from(req: CallRequest) -> Self {
        PluginExpr::Call(req)
    }
}

impl fmt::Display for PluginExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PluginExpr::Column(name) => write!(f, "col(\"{name}\")"),
            PluginExpr::Call(req) => {
                write!(f, "{}(", req.function())?;
                for (i, input) in req.inputs().iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{input}")?;
                }
                write!(f, ")")
            }
        }
    }
}

/// Column reference.
pub fn col(name: &str) -> PluginExpr {
    PluginExpr::Column(name.to_string())
}
