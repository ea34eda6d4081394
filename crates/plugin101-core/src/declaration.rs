//! Function declarations: name, arity, elementwise flag and accepted options.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::expr::{Kwargs, OptionValue};

pub const CAPITALIZE: &str = "capitalize";
pub const TO_FAHRENHEIT: &str = "to_fahrenheit";
pub const LARGER: &str = "larger";
pub const LARGEST: &str = "largest";
pub const CUMULATIVE_JOIN: &str = "cumulative_join";
pub const CUMULATIVE_JOIN_PAIRS: &str = "cumulative_join_pairs";

/// Number of positional inputs a function accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Arity {
    Fixed(usize),
    Variadic { min: usize },
}

impl Arity {
    pub fn accepts(&self, n: usize) -> bool {
        match self {
            Arity::Fixed(k) => n == *k,
            Arity::Variadic { min } => n >= *min,
        }
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arity::Fixed(k) => write!(f, "{k}"),
            Arity::Variadic { min } => write!(f, "at least {min}"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OptionKind {
    Str,
    Bool,
    Int,
    Float,
}

impl OptionKind {
    fn matches(&self, value: &OptionValue) -> bool {
        matches!(
            (self, value),
            (OptionKind::Str, OptionValue::Str(_))
                | (OptionKind::Bool, OptionValue::Bool(_))
                | (OptionKind::Int, OptionValue::Int(_))
                | (OptionKind::Float, OptionValue::Float(_))
        )
    }

    fn describe(&self) -> &'static str {
        match self {
            OptionKind::Str => "a string",
            OptionKind::Bool => "a boolean",
            OptionKind::Int => "an integer",
            OptionKind::Float => "a float",
        }
    }
}

/// One accepted keyword option.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionSpec {
    pub name: String,
    pub kind: OptionKind,
    /// Filled in when the caller omits the option. `None` with `required == false`
    /// means the option is simply absent.
    pub default: Option<OptionValue>,
    pub required: bool,
}

impl OptionSpec {
    pub fn required(name: &str, kind: OptionKind) -> Self {
        Self {
            name: name.to_string(),
            kind,
            default: None,
            required: true,
        }
    }

    pub fn with_default(name: &str, kind: OptionKind, default: impl Into<OptionValue>) -> Self {
        Self {
            name: name.to_string(),
            kind,
            default: Some(default.into()),
            required: false,
        }
    }
}

/// Declared shape of a plugin function.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionDeclaration {
    pub name: String,
    pub arity: Arity,
    /// Output row i depends only on input row i. The host engine splits and
    /// reorders elementwise calls, so this must never be claimed falsely.
    pub elementwise: bool,
    pub options: Vec<OptionSpec>,
}

impl FunctionDeclaration {
    pub fn new(name: &str, arity: Arity, elementwise: bool) -> Self {
        Self {
            name: name.to_string(),
            arity,
            elementwise,
            options: Vec::new(),
        }
    }

    pub fn option(mut self, spec: OptionSpec) -> Self {
        self.options.push(spec);
        self
    }

    pub fn check_arity(&self, got: usize) -> Result<(), EngineError> {
        if self.arity.accepts(got) {
            Ok(())
        } else {
            Err(EngineError::InvalidArity {
                function: self.name.clone(),
                expected: self.arity.to_string(),
                got,
            })
        }
    }

    /// Validate caller kwargs against the declared options and fill defaults.
    pub fn resolve_options(&self, kwargs: &Kwargs) -> Result<Kwargs, EngineError> {
        if let Some(unknown) = kwargs
            .keys()
            .find(|k| !self.options.iter().any(|spec| &spec.name == *k))
        {
            return Err(EngineError::UnknownOption {
                function: self.name.clone(),
                option: unknown.clone(),
            });
        }
        let mut resolved = Kwargs::new();
        for spec in &self.options {
            match kwargs.get(&spec.name) {
                Some(value) => {
                    if !spec.kind.matches(value) {
                        return Err(EngineError::InvalidOptionValue {
                            function: self.name.clone(),
                            option: spec.name.clone(),
                            expected: spec.kind.describe().to_string(),
                        });
                    }
                    resolved.insert(spec.name.clone(), value.clone());
                }
                None if spec.required => {
                    return Err(EngineError::MissingOption {
                        function: self.name.clone(),
                        option: spec.name.clone(),
                    });
                }
                None => {
                    if let Some(default) = &spec.default {
                        resolved.insert(spec.name.clone(), default.clone());
                    }
                }
            }
        }
        Ok(resolved)
    }
}

/// Declarations for the six builtin transforms.
pub fn builtin_declarations() -> Vec<FunctionDeclaration> {
    vec![
        FunctionDeclaration::new(CAPITALIZE, Arity::Fixed(1), true),
        FunctionDeclaration::new(TO_FAHRENHEIT, Arity::Fixed(1), true),
        FunctionDeclaration::new(LARGER, Arity::Fixed(2), true),
        FunctionDeclaration::new(LARGEST, Arity::Variadic { min: 1 }, true),
        FunctionDeclaration::new(CUMULATIVE_JOIN, Arity::Fixed(1), false)
            .option(OptionSpec::required("separator", OptionKind::Str))
            .option(OptionSpec::with_default("trim", OptionKind::Bool, false)),
        FunctionDeclaration::new(CUMULATIVE_JOIN_PAIRS, Arity::Fixed(2), false)
            .option(OptionSpec::with_default(
                "pair_separator",
                OptionKind::Str,
                crate::options::DEFAULT_PAIR_SEPARATOR,
            ))
            .option(OptionSpec::with_default(
                "separator",
                OptionKind::Str,
                crate::options::DEFAULT_ROW_SEPARATOR,
            )),
    ]
}
