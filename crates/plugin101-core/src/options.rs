//! Typed configuration for the cumulative transforms and its flat keyword form.

use serde::{Deserialize, Serialize};

use crate::declaration::{CUMULATIVE_JOIN, CUMULATIVE_JOIN_PAIRS};
use crate::error::EngineError;
use crate::expr::{Kwargs, OptionValue};

pub const DEFAULT_PAIR_SEPARATOR: &str = " ";
pub const DEFAULT_ROW_SEPARATOR: &str = "\n";

/// Options for `cumulative_join`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CumulativeJoinOptions {
    pub separator: String,
    /// Strip leading/trailing whitespace of each element before joining.
    pub trim: bool,
}

impl CumulativeJoinOptions {
    pub fn new(separator: impl Into<String>, trim: bool) -> Self {
        Self {
            separator: separator.into(),
            trim,
        }
    }

    pub fn to_kwargs(&self) -> Kwargs {
        let mut kwargs = Kwargs::new();
        kwargs.insert("separator".into(), OptionValue::Str(self.separator.clone()));
        kwargs.insert("trim".into(), OptionValue::Bool(self.trim));
        kwargs
    }

    /// Read back from resolved kwargs (as stored in a call request).
    pub fn from_kwargs(kwargs: &Kwargs) -> Result<Self, EngineError> {
        Ok(Self {
            separator: str_option(kwargs, CUMULATIVE_JOIN, "separator", None)?,
            trim: match kwargs.get("trim") {
                None => false,
                Some(v) => v.as_bool().ok_or_else(|| EngineError::InvalidOptionValue {
                    function: CUMULATIVE_JOIN.into(),
                    option: "trim".into(),
                    expected: "a boolean".into(),
                })?,
            },
        })
    }
}

/// Options for `cumulative_join_pairs`: each row contributes
/// `first + pair_separator + second`; contributions are joined by `separator`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairJoinOptions {
    pub pair_separator: String,
    pub separator: String,
}

impl Default for PairJoinOptions {
    fn default() -> Self {
        Self {
            pair_separator: DEFAULT_PAIR_SEPARATOR.to_string(),
            separator: DEFAULT_ROW_SEPARATOR.to_string(),
        }
    }
}

impl PairJoinOptions {
    pub fn to_kwargs(&self) -> Kwargs {
        let mut kwargs = Kwargs::new();
        kwargs.insert(
            "pair_separator".into(),
            OptionValue::Str(self.pair_separator.clone()),
        );
        kwargs.insert("separator".into(), OptionValue::Str(self.separator.clone()));
        kwargs
    }

    pub fn from_kwargs(kwargs: &Kwargs) -> Result<Self, EngineError> {
        Ok(Self {
            pair_separator: str_option(
                kwargs,
                CUMULATIVE_JOIN_PAIRS,
                "pair_separator",
                Some(DEFAULT_PAIR_SEPARATOR),
            )?,
            separator: str_option(
                kwargs,
                CUMULATIVE_JOIN_PAIRS,
                "separator",
                Some(DEFAULT_ROW_SEPARATOR),
            )?,
        })
    }
}

fn str_option(
    kwargs: &Kwargs,
    function: &str,
    option: &str,
    default: Option<&str>,
) -> Result<String, EngineError> {
    match (kwargs.get(option), default) {
        (Some(v), _) => v
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| EngineError::InvalidOptionValue {
                function: function.into(),
                option: option.into(),
                expected: "a string".into(),
            }),
        (None, Some(d)) => Ok(d.to_string()),
        (None, None) => Err(EngineError::MissingOption {
            function: function.into(),
            option: option.into(),
        }),
    }
}
