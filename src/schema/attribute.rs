//! Attribute types: labels and typed properties
//!
//! Labels and properties share one namespace for key matching. A label
//! `Person` and a property `Person` are distinct attribute types, but a key
//! attribute named `Person` is satisfied by either.

use crate::graph::PropertyValue;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Scalar datatype of a property type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ScalarKind {
    String,
    Integer,
    Float,
    Boolean,
    Date,
    DateTime,
    /// Accepts any value
    Any,
}

impl ScalarKind {
    /// GQL keyword for this datatype
    pub fn gql_name(&self) -> &'static str {
        match self {
            ScalarKind::String => "STRING",
            ScalarKind::Integer => "INTEGER",
            ScalarKind::Float => "FLOAT",
            ScalarKind::Boolean => "BOOLEAN",
            ScalarKind::Date => "DATE",
            ScalarKind::DateTime => "DATETIME",
            ScalarKind::Any => "ANY",
        }
    }

    /// Whether a stored value is of this datatype. `Null` is accepted by every kind.
    pub fn accepts(&self, value: &PropertyValue) -> bool {
        match (self, value) {
            (_, PropertyValue::Null) | (ScalarKind::Any, _) => true,
            (ScalarKind::String, PropertyValue::String(_)) => true,
            (ScalarKind::Integer, PropertyValue::Integer(_)) => true,
            (ScalarKind::Float, PropertyValue::Float(_) | PropertyValue::Integer(_)) => true,
            (ScalarKind::Boolean, PropertyValue::Boolean(_)) => true,
            (ScalarKind::Date, PropertyValue::Date(_)) => true,
            (ScalarKind::DateTime, PropertyValue::DateTime(_)) => true,
            _ => false,
        }
    }
}

impl fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.gql_name())
    }
}

impl FromStr for ScalarKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "STRING" | "VARCHAR" => Ok(ScalarKind::String),
            "INTEGER" | "INT" | "INT64" => Ok(ScalarKind::Integer),
            "FLOAT" | "DOUBLE" => Ok(ScalarKind::Float),
            "BOOLEAN" | "BOOL" => Ok(ScalarKind::Boolean),
            "DATE" => Ok(ScalarKind::Date),
            "DATETIME" | "TIMESTAMP" => Ok(ScalarKind::DateTime),
            "ANY" => Ok(ScalarKind::Any),
            other => Err(format!("unknown datatype: {}", other)),
        }
    }
}

/// A label attribute
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LabelType {
    pub name: String,
}

impl LabelType {
    pub fn new(name: impl Into<String>) -> Self {
        LabelType { name: name.into() }
    }
}

/// A typed property attribute
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PropertyType {
    pub name: String,
    pub datatype: ScalarKind,
    /// Instances must carry a non-null value
    pub not_null: bool,
}

impl PropertyType {
    pub fn new(name: impl Into<String>, datatype: ScalarKind, not_null: bool) -> Self {
        PropertyType {
            name: name.into(),
            datatype,
            not_null,
        }
    }
}

/// Either kind of attribute
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttributeType {
    Label(LabelType),
    Property(PropertyType),
}

impl AttributeType {
    pub fn name(&self) -> &str {
        match self {
            AttributeType::Label(l) => &l.name,
            AttributeType::Property(p) => &p.name,
        }
    }

    /// Datatype of a property attribute; labels have none
    pub fn datatype(&self) -> Option<ScalarKind> {
        match self {
            AttributeType::Label(_) => None,
            AttributeType::Property(p) => Some(p.datatype),
        }
    }

    /// Labels are never nullable; properties only when declared NOT NULL
    pub fn not_null(&self) -> bool {
        match self {
            AttributeType::Label(_) => true,
            AttributeType::Property(p) => p.not_null,
        }
    }

    pub fn is_label(&self) -> bool {
        matches!(self, AttributeType::Label(_))
    }
}

impl From<LabelType> for AttributeType {
    fn from(l: LabelType) -> Self {
        AttributeType::Label(l)
    }
}

impl From<PropertyType> for AttributeType {
    fn from(p: PropertyType) -> Self {
        AttributeType::Property(p)
    }
}
