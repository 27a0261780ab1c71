//! Content record types
//!
//! A content record type describes the labels and properties an element's
//! data may carry, plus the type identifier used to tell it apart from other
//! content types at resolution time. Built once through
//! [`ContentRecordTypeBuilder`] and immutable afterwards.

use super::attribute::{AttributeType, LabelType, PropertyType, ScalarKind};
use super::error::{SchemaError, SchemaResult};
use crate::graph::ElementData;
use indexmap::IndexMap;
use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Immutable structural type: labels, properties and an optional type identifier
///
/// Equality and hashing are structural and ignore declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContentRecordType {
    label_types: IndexMap<String, LabelType>,
    property_types: IndexMap<String, PropertyType>,
    type_identifier: BTreeSet<String>,
}

impl ContentRecordType {
    pub fn builder() -> ContentRecordTypeBuilder {
        ContentRecordTypeBuilder::default()
    }

    /// Label types in declaration order
    pub fn label_types(&self) -> impl Iterator<Item = &LabelType> {
        self.label_types.values()
    }

    /// Property types in declaration order
    pub fn property_types(&self) -> impl Iterator<Item = &PropertyType> {
        self.property_types.values()
    }

    /// All attributes, labels first
    pub fn attributes(&self) -> impl Iterator<Item = AttributeType> + '_ {
        self.label_types()
            .cloned()
            .map(AttributeType::from)
            .chain(self.property_types().cloned().map(AttributeType::from))
    }

    pub fn label_names(&self) -> impl Iterator<Item = &str> {
        self.label_types.keys().map(String::as_str)
    }

    pub fn has_label(&self, name: &str) -> bool {
        self.label_types.contains_key(name)
    }

    pub fn property(&self, name: &str) -> Option<&PropertyType> {
        self.property_types.get(name)
    }

    /// The key attribute set; may be empty
    pub fn type_identifier(&self) -> &BTreeSet<String> {
        &self.type_identifier
    }

    pub fn is_keyed(&self) -> bool {
        !self.type_identifier.is_empty()
    }

    /// Display name: the identifier member when the identifier is a singleton
    pub fn name(&self) -> Option<&str> {
        if self.type_identifier.len() == 1 {
            self.type_identifier.iter().next().map(String::as_str)
        } else {
            None
        }
    }

    /// Display name, falling back to the first identifier member
    pub fn derived_name(&self) -> SchemaResult<&str> {
        self.name()
            .or_else(|| self.type_identifier.iter().next().map(String::as_str))
            .ok_or(SchemaError::AnonymousType)
    }

    /// Label reported in diagnostics: the derived name, or the full label set
    pub fn describe(&self) -> String {
        match self.derived_name() {
            Ok(name) => name.to_string(),
            Err(_) => format!("{{{}}}", self.label_names().collect::<Vec<_>>().join(", ")),
        }
    }

    /// Property types declared NOT NULL
    pub fn required_properties(&self) -> impl Iterator<Item = &PropertyType> {
        self.property_types.values().filter(|p| p.not_null)
    }

    /// An instance is a structural candidate when every declared label is on
    /// it and every NOT NULL property carries a non-null value. Extra labels
    /// and properties on the instance are allowed.
    pub fn admits(&self, instance: &ElementData) -> bool {
        self.label_names().all(|l| instance.has_label(l))
            && self.required_properties().all(|p| instance.value(&p.name).is_some())
    }

    /// True when the identifier is non-empty and every member is present on
    /// the instance, as a label or as a non-null property.
    pub fn key_matches(&self, instance: &ElementData) -> bool {
        self.is_keyed() && self.type_identifier.iter().all(|k| instance.has_attribute(k))
    }
}

impl Hash for ContentRecordType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        let mut labels: Vec<&String> = self.label_types.keys().collect();
        labels.sort();
        labels.hash(state);

        let mut properties: Vec<&PropertyType> = self.property_types.values().collect();
        properties.sort();
        properties.hash(state);

        self.type_identifier.hash(state);
    }
}

impl fmt::Display for ContentRecordType {
    /// GQL-ish rendering, e.g. `(:Person {name :: STRING NOT NULL, age :: INTEGER})`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for label in self.label_names() {
            write!(f, ":{}", label)?;
        }
        if !self.property_types.is_empty() {
            let props: Vec<String> = self
                .property_types()
                .map(|p| {
                    let null = if p.not_null { " NOT NULL" } else { "" };
                    format!("{} :: {}{}", p.name, p.datatype, null)
                })
                .collect();
            write!(f, " {{{}}}", props.join(", "))?;
        }
        write!(f, ")")
    }
}

/// Incremental, order-independent assembly of a [`ContentRecordType`]
#[derive(Debug, Clone, Default)]
pub struct ContentRecordTypeBuilder {
    label_types: Vec<LabelType>,
    property_types: Vec<PropertyType>,
    type_identifier: BTreeSet<String>,
}

impl ContentRecordTypeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a label. Duplicates are reported by [`build`](Self::build).
    pub fn add_label(mut self, name: impl Into<String>) -> Self {
        self.label_types.push(LabelType::new(name));
        self
    }

    /// Declare a property. Duplicates are reported by [`build`](Self::build).
    pub fn add_property(mut self, name: impl Into<String>, datatype: ScalarKind, not_null: bool) -> Self {
        self.property_types.push(PropertyType::new(name, datatype, not_null));
        self
    }

    /// Key the type on already-declared label or property names
    pub fn set_type_identifier<I, S>(mut self, names: I) -> SchemaResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut identifier = BTreeSet::new();
        for name in names {
            let name = name.into();
            let declared = self.label_types.iter().any(|l| l.name == name)
                || self.property_types.iter().any(|p| p.name == name);
            if !declared {
                return Err(SchemaError::UnknownAttribute(name));
            }
            identifier.insert(name);
        }
        self.type_identifier = identifier;
        Ok(self)
    }

    /// Freeze the type
    pub fn build(self) -> SchemaResult<ContentRecordType> {
        let mut label_types = IndexMap::with_capacity(self.label_types.len());
        for label in self.label_types {
            if label_types.contains_key(&label.name) {
                return Err(SchemaError::DuplicateAttribute(label.name));
            }
            label_types.insert(label.name.clone(), label);
        }

        let mut property_types = IndexMap::with_capacity(self.property_types.len());
        for property in self.property_types {
            if property_types.contains_key(&property.name) {
                return Err(SchemaError::DuplicateAttribute(property.name));
            }
            property_types.insert(property.name.clone(), property);
        }

        Ok(ContentRecordType {
            label_types,
            property_types,
            type_identifier: self.type_identifier,
        })
    }
}
