//! Loosely typed values that screens put into filter rules.
//!
//! One filter state is shared by every rule of a screen, so the values it
//! holds cannot be typed per rule. [`FilterValue`] keeps them in a closed sum
//! type and predicates narrow it explicitly.

use std::fmt;

use serde_json::Value;

use crate::record::number_text;

#[derive(Debug, Clone, PartialEq, Default)]
pub enum FilterValue {
    Text(String),
    Number(f64),
    Bool(bool),
    Null,
    #[default]
    Undefined,
}

impl FilterValue {
    /// Empty text, null and undefined count as "no constraint".
    pub fn is_inactive(&self) -> bool {
        match self {
            Self::Text(s) => s.is_empty(),
            Self::Null | Self::Undefined => true,
            _ => false,
        }
    }
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }
    /// Numbers, and text that parses as a number.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(s) => s.trim().parse().ok(),
            _ => None,
        }
    }
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            Self::Text(s) if s == "true" => Some(true),
            Self::Text(s) if s == "false" => Some(false),
            _ => None,
        }
    }
}

impl fmt::Display for FilterValue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Text(s) => write!(f, "{s}"),
            Self::Number(n) => write!(f, "{}", number_text(*n)),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Null => write!(f, "null"),
            Self::Undefined => write!(f, "undefined"),
        }
    }
}

impl From<&str> for FilterValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}
impl From<String> for FilterValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}
impl From<f64> for FilterValue {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}
impl From<i64> for FilterValue {
    fn from(n: i64) -> Self {
        Self::Number(n as f64)
    }
}
impl From<i32> for FilterValue {
    fn from(n: i32) -> Self {
        Self::Number(n.into())
    }
}
impl From<bool> for FilterValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}
impl<T: Into<FilterValue>> From<Option<T>> for FilterValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}
impl From<Value> for FilterValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(b) => Self::Bool(b),
            Value::Number(n) => Self::Number(n.as_f64().unwrap_or(f64::NAN)),
            Value::String(s) => Self::Text(s),
            other => Self::Text(other.to_string()),
        }
    }
}
