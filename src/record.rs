//! Records and the values found in their fields.
//!
//! Every list in a dashboard screen is a list of records: items with a stable,
//! unique string id and named fields. The engines only ever *read* records, so
//! the [`Record`] trait is two lookups and nothing else. Field names may be
//! dotted paths (`"customer.name"`) which walk into nested values.
//!
//! [`Document`] is the ready made record for JSON shaped data, which is what
//! most screens receive from their data fetching collaborator.

// used to hand out field text without copying it when the record owns it
use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Result, ViewStateError};

// ------------- Record -------------
pub trait Record {
    /// Stable, unique identifier of the record.
    fn id(&self) -> &str;
    /// Resolves a (possibly dotted) field path. Paths that do not resolve
    /// yield [`FieldValue::Undefined`].
    fn field(&self, path: &str) -> FieldValue<'_>;
}

impl<T: Record + ?Sized> Record for &T {
    fn id(&self) -> &str {
        (**self).id()
    }
    fn field(&self, path: &str) -> FieldValue<'_> {
        (**self).field(path)
    }
}

impl<T: Record + ?Sized> Record for Arc<T> {
    fn id(&self) -> &str {
        (**self).id()
    }
    fn field(&self, path: &str) -> FieldValue<'_> {
        (**self).field(path)
    }
}

impl<T: Record + ?Sized> Record for Box<T> {
    fn id(&self) -> &str {
        (**self).id()
    }
    fn field(&self, path: &str) -> FieldValue<'_> {
        (**self).field(path)
    }
}

// ------------- FieldValue -------------
/// The value found at a field path.
///
/// `Other` holds the textual form of composite values (objects, arrays) so
/// that they can still take part in string ordering.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue<'a> {
    Undefined,
    Null,
    Bool(bool),
    Number(f64),
    Text(Cow<'a, str>),
    Other(Cow<'a, str>),
}

impl<'a> FieldValue<'a> {
    pub fn text(text: impl Into<Cow<'a, str>>) -> Self {
        Self::Text(text.into())
    }
    pub fn from_json(value: &'a Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(b) => Self::Bool(*b),
            Value::Number(n) => Self::Number(n.as_f64().unwrap_or(f64::NAN)),
            Value::String(s) => Self::Text(Cow::Borrowed(s.as_str())),
            other => Self::Other(Cow::Owned(other.to_string())),
        }
    }
    /// Null and undefined are the "missing data" values.
    pub fn is_nullish(&self) -> bool {
        matches!(self, Self::Undefined | Self::Null)
    }
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s.as_ref()),
            _ => None,
        }
    }
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }
    /// String representation used when values of different kinds meet.
    pub fn to_text(&self) -> Cow<'_, str> {
        match self {
            Self::Undefined => Cow::Borrowed("undefined"),
            Self::Null => Cow::Borrowed("null"),
            Self::Bool(true) => Cow::Borrowed("true"),
            Self::Bool(false) => Cow::Borrowed("false"),
            Self::Number(n) => Cow::Owned(number_text(*n)),
            Self::Text(s) | Self::Other(s) => Cow::Borrowed(s.as_ref()),
        }
    }
    pub fn into_owned(self) -> FieldValue<'static> {
        match self {
            Self::Undefined => FieldValue::Undefined,
            Self::Null => FieldValue::Null,
            Self::Bool(b) => FieldValue::Bool(b),
            Self::Number(n) => FieldValue::Number(n),
            Self::Text(s) => FieldValue::Text(Cow::Owned(s.into_owned())),
            Self::Other(s) => FieldValue::Other(Cow::Owned(s.into_owned())),
        }
    }
}

impl fmt::Display for FieldValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.to_text())
    }
}

/// Integral numbers print without a fractional part, the way they read in a table cell.
pub(crate) fn number_text(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n.is_infinite() {
        if n > 0.0 { "Infinity".to_string() } else { "-Infinity".to_string() }
    } else if n == n.trunc() && n.abs() < 1e21 {
        format!("{}", n as i128)
    } else {
        format!("{}", n)
    }
}

/// Walks a dotted path through nested JSON objects (by key) and arrays (by
/// numeric index). A missing intermediate short-circuits to `Undefined`.
pub fn resolve_path<'a>(root: &'a Value, path: &str) -> FieldValue<'a> {
    let mut current = root;
    for segment in path.split('.') {
        let next = match current {
            Value::Object(map) => map.get(segment),
            Value::Array(list) => segment.parse::<usize>().ok().and_then(|i| list.get(i)),
            _ => None,
        };
        match next {
            Some(value) => current = value,
            None => return FieldValue::Undefined,
        }
    }
    FieldValue::from_json(current)
}

// ------------- Document -------------
/// A JSON object with a string `id`, usable as a [`Record`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Value", into = "Value")]
pub struct Document {
    value: Value,
}

impl Document {
    pub fn from_value(value: Value) -> Result<Self> {
        let problem = match &value {
            Value::Object(map) => match map.get("id") {
                Some(Value::String(_)) => None,
                Some(other) => Some(format!("id must be a string, found {other}")),
                None => Some("missing id".to_string()),
            },
            other => Some(format!("expected an object, found {other}")),
        };
        match problem {
            None => Ok(Self { value }),
            Some(message) => Err(ViewStateError::InvalidRecord { message }),
        }
    }
    /// Parses a JSON array of records.
    pub fn parse_list(json: &str) -> Result<Vec<Self>> {
        let values: Vec<Value> = serde_json::from_str(json)?;
        values.into_iter().map(Self::from_value).collect()
    }
    pub fn value(&self) -> &Value {
        &self.value
    }
}

impl Record for Document {
    fn id(&self) -> &str {
        // checked in from_value
        self.value.get("id").and_then(Value::as_str).unwrap_or_default()
    }
    fn field(&self, path: &str) -> FieldValue<'_> {
        resolve_path(&self.value, path)
    }
}

impl TryFrom<Value> for Document {
    type Error = ViewStateError;
    fn try_from(value: Value) -> Result<Self> {
        Self::from_value(value)
    }
}

impl From<Document> for Value {
    fn from(document: Document) -> Value {
        document.value
    }
}
