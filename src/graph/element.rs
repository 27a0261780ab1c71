//! Read-only view of one element's data
//!
//! This is what type resolution and constraint validation consume: the
//! labels and properties of a node or edge, detached from storage.

use super::property::{PropertyMap, PropertyValue};
use super::types::{ElementRef, Label};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Labels and properties of a single node or edge instance
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ElementData {
    /// Storage identity, when the data was read from a graph
    pub id: Option<ElementRef>,

    /// Labels carried by the instance
    pub labels: BTreeSet<Label>,

    /// Property values carried by the instance
    pub properties: PropertyMap,
}

impl ElementData {
    /// Create element data with no storage identity
    pub fn new<L>(labels: impl IntoIterator<Item = L>, properties: PropertyMap) -> Self
    where
        L: Into<Label>,
    {
        ElementData {
            id: None,
            labels: labels.into_iter().map(Into::into).collect(),
            properties,
        }
    }

    /// Attach the storage identity of the element
    pub fn with_id(mut self, id: impl Into<ElementRef>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn has_label(&self, name: &str) -> bool {
        self.labels.contains(name)
    }

    /// Property value, treating an explicit `Null` as absent
    pub fn value(&self, name: &str) -> Option<&PropertyValue> {
        self.properties.get(name).filter(|v| !v.is_null())
    }

    /// True if `name` is a label of the element or a non-null property
    pub fn has_attribute(&self, name: &str) -> bool {
        self.has_label(name) || self.value(name).is_some()
    }

    /// Label names as plain strings
    pub fn label_names(&self) -> impl Iterator<Item = &str> {
        self.labels.iter().map(Label::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::property::property_map;
    use crate::graph::types::NodeId;

    #[test]
    fn test_attribute_lookup() {
        let data = ElementData::new(
            ["Person"],
            property_map([("name", PropertyValue::from("Alice")), ("email", PropertyValue::Null)]),
        );

        assert!(data.has_attribute("Person"));
        assert!(data.has_attribute("name"));
        assert!(!data.has_attribute("email"));
        assert!(!data.has_attribute("age"));
        assert!(data.value("email").is_none());
        assert_eq!(data.id, None);
    }

    #[test]
    fn test_with_id() {
        let data = ElementData::new(["Person"], PropertyMap::new()).with_id(NodeId::new(4));
        assert_eq!(data.id, Some(ElementRef::Node(NodeId::new(4))));
        assert_eq!(data.label_names().collect::<Vec<_>>(), vec!["Person"]);
    }
}
