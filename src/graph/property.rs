//! Property values carried by stored nodes and edges

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Property value stored on an element
///
/// `Null` is a real value: a key mapped to `Null` counts as absent for
/// not-null checks and key constraints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PropertyValue {
    String(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    /// ISO-8601 calendar date, e.g. "2020-01-15"
    Date(String),
    /// Milliseconds since the Unix epoch
    DateTime(i64),
    Array(Vec<PropertyValue>),
    Null,
}

impl PropertyValue {
    pub fn is_null(&self) -> bool {
        matches!(self, PropertyValue::Null)
    }

    pub fn as_string(&self) -> Option<&str> {
        if let PropertyValue::String(s) = self {
            Some(s)
        } else {
            None
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        if let PropertyValue::Integer(i) = self {
            Some(*i)
        } else {
            None
        }
    }

    /// GQL name of the value's type, as used in diagnostics
    pub fn type_name(&self) -> &'static str {
        match self {
            PropertyValue::String(_) => "STRING",
            PropertyValue::Integer(_) => "INTEGER",
            PropertyValue::Float(_) => "FLOAT",
            PropertyValue::Boolean(_) => "BOOLEAN",
            PropertyValue::Date(_) => "DATE",
            PropertyValue::DateTime(_) => "DATETIME",
            PropertyValue::Array(_) => "LIST",
            PropertyValue::Null => "NULL",
        }
    }
}

impl fmt::Display for PropertyValue {
    /// GQL literal syntax: `'Alice'`, `TRUE`, `DATE '2020-01-15'`, `[1, NULL]`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyValue::String(s) => write!(f, "'{}'", s.replace('\'', "''")),
            PropertyValue::Integer(i) => write!(f, "{}", i),
            PropertyValue::Float(x) => write!(f, "{}", x),
            PropertyValue::Boolean(true) => f.write_str("TRUE"),
            PropertyValue::Boolean(false) => f.write_str("FALSE"),
            PropertyValue::Date(d) => write!(f, "DATE '{}'", d),
            PropertyValue::DateTime(ms) => write!(f, "DATETIME {}", ms),
            PropertyValue::Array(items) => {
                let rendered: Vec<String> = items.iter().map(ToString::to_string).collect();
                write!(f, "[{}]", rendered.join(", "))
            }
            PropertyValue::Null => f.write_str("NULL"),
        }
    }
}

impl From<String> for PropertyValue {
    fn from(s: String) -> Self {
        PropertyValue::String(s)
    }
}

impl From<&str> for PropertyValue {
    fn from(s: &str) -> Self {
        PropertyValue::String(s.to_string())
    }
}

impl From<i64> for PropertyValue {
    fn from(i: i64) -> Self {
        PropertyValue::Integer(i)
    }
}

impl From<i32> for PropertyValue {
    fn from(i: i32) -> Self {
        PropertyValue::Integer(i as i64)
    }
}

impl From<f64> for PropertyValue {
    fn from(f: f64) -> Self {
        PropertyValue::Float(f)
    }
}

impl From<bool> for PropertyValue {
    fn from(b: bool) -> Self {
        PropertyValue::Boolean(b)
    }
}

impl<T: Into<PropertyValue>> From<Option<T>> for PropertyValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(PropertyValue::Null, Into::into)
    }
}

/// Properties of one element, by name
pub type PropertyMap = HashMap<String, PropertyValue>;

/// Build a [`PropertyMap`] from `(key, value)` pairs
pub fn property_map<K, V, I>(entries: I) -> PropertyMap
where
    K: Into<String>,
    V: Into<PropertyValue>,
    I: IntoIterator<Item = (K, V)>,
{
    entries
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect()
}
