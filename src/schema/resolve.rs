//! Type key resolution
//!
//! One instance may structurally conform to several declared types at once.
//! Resolution reports every structural candidate and, when exactly one
//! candidate's type identifier is present on the instance, picks it.
//!
//! ```text
//! candidates = { C : C.labels ⊆ L  ∧  C.not_null ⊆ non-null props }
//! keyed      = { C ∈ candidates : C.identifier ≠ ∅ ∧ C.identifier ⊆ attrs }
//! |keyed| = 1  → disambiguated
//! |keyed| > 1  → AmbiguousConformance
//! |keyed| = 0  → candidates reported, nothing picked
//! ```

use super::content::ContentRecordType;
use super::element::{EdgeType, ElementType, NodeType};
use super::error::{SchemaError, SchemaResult};
use crate::graph::ElementData;
use tracing::debug;

/// Anything that is matched through a content record type
pub trait Conformable {
    fn content_type(&self) -> &ContentRecordType;

    /// Name used in ambiguity diagnostics
    fn type_label(&self) -> String {
        self.content_type().describe()
    }
}

impl Conformable for ContentRecordType {
    fn content_type(&self) -> &ContentRecordType {
        self
    }
}

impl Conformable for NodeType {
    fn content_type(&self) -> &ContentRecordType {
        self.identifying_content_type()
    }

    fn type_label(&self) -> String {
        self.name().to_string()
    }
}

impl Conformable for EdgeType {
    fn content_type(&self) -> &ContentRecordType {
        self.identifying_content_type()
    }

    fn type_label(&self) -> String {
        self.name().to_string()
    }
}

impl Conformable for ElementType {
    fn content_type(&self) -> &ContentRecordType {
        self.identifying_content_type()
    }

    fn type_label(&self) -> String {
        self.name().to_string()
    }
}

/// Outcome of resolving one instance
#[derive(Debug)]
pub struct Resolution<'a, T> {
    /// Every structural candidate, in candidate order
    pub matches: Vec<&'a T>,
    /// The single key-matching candidate, if there is one
    pub disambiguated: Option<&'a T>,
}

impl<'a, T> Resolution<'a, T> {
    pub fn is_conforming(&self) -> bool {
        !self.matches.is_empty()
    }

    /// More than one structural candidate and no key to choose between them
    pub fn is_multi_conformant(&self) -> bool {
        self.disambiguated.is_none() && self.matches.len() > 1
    }

    /// The key-matched type, or the sole structural candidate
    pub fn unique(&self) -> Option<&'a T> {
        match (self.disambiguated, self.matches.as_slice()) {
            (Some(t), _) => Some(t),
            (None, [only]) => Some(*only),
            _ => None,
        }
    }
}

// Manual impls: the derive would require `T: Clone`.
impl<'a, T> Clone for Resolution<'a, T> {
    fn clone(&self) -> Self {
        Resolution {
            matches: self.matches.clone(),
            disambiguated: self.disambiguated,
        }
    }
}

/// Resolve an instance against a set of declared types
pub fn resolve_type<'a, T, I>(candidates: I, instance: &ElementData) -> SchemaResult<Resolution<'a, T>>
where
    T: Conformable + 'a,
    I: IntoIterator<Item = &'a T>,
{
    let matches: Vec<&'a T> = candidates
        .into_iter()
        .filter(|c| c.content_type().admits(instance))
        .collect();

    let keyed: Vec<&'a T> = matches
        .iter()
        .copied()
        .filter(|c| c.content_type().key_matches(instance))
        .collect();

    let disambiguated = match keyed.as_slice() {
        [] => None,
        [one] => Some(*one),
        many => {
            let names: Vec<String> = many.iter().map(|c| c.type_label()).collect();
            debug!("Ambiguous conformance for labels {:?}: {:?}", instance.labels, names);
            return Err(SchemaError::AmbiguousConformance(names));
        }
    };

    debug!(
        "Resolved labels {:?}: {} candidate(s), disambiguated={}",
        instance.labels,
        matches.len(),
        disambiguated.is_some()
    );

    Ok(Resolution { matches, disambiguated })
}

/// Resolve against plain content record types. Structurally equal types
/// are interchangeable for matching, so duplicates count once.
pub fn resolve_content_type<'a, I>(
    content_types: I,
    instance: &ElementData,
) -> SchemaResult<Resolution<'a, ContentRecordType>>
where
    I: IntoIterator<Item = &'a ContentRecordType>,
{
    let mut distinct: Vec<&'a ContentRecordType> = Vec::new();
    for c in content_types {
        if !distinct.contains(&c) {
            distinct.push(c);
        }
    }
    resolve_type(distinct, instance)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{property_map, PropertyMap, PropertyValue};
    use crate::schema::attribute::ScalarKind;

    fn person_content() -> ContentRecordType {
        ContentRecordType::builder()
            .add_label("Person")
            .add_property("name", ScalarKind::String, true)
            .add_property("age", ScalarKind::Integer, false)
            .set_type_identifier(["Person"])
            .unwrap()
            .build()
            .unwrap()
    }

    fn unkeyed(label: &str, prop: &str) -> ContentRecordType {
        ContentRecordType::builder()
            .add_label(label)
            .add_property(prop, ScalarKind::String, false)
            .build()
            .unwrap()
    }

    #[test]
    fn test_person_round_trip() {
        let person = person_content();
        let company = ContentRecordType::builder()
            .add_label("Company")
            .set_type_identifier(["Company"])
            .unwrap()
            .build()
            .unwrap();
        let types = vec![person.clone(), company];

        let alice = ElementData::new(
            ["Person"],
            property_map([("name", PropertyValue::from("Alice")), ("age", 30i64.into())]),
        );
        let r = resolve_content_type(&types, &alice).unwrap();
        assert_eq!(r.matches, vec![&person]);
        assert_eq!(r.disambiguated, Some(&person));
        assert_eq!(r.unique(), Some(&person));
    }

    #[test]
    fn test_multi_conformance_is_reported_not_resolved() {
        let a = unkeyed("Person", "email");
        let b = unkeyed("Person", "department");
        let types = vec![a.clone(), b.clone()];
        let instance = ElementData::new(["Person"], PropertyMap::new());

        let r = resolve_content_type(&types, &instance).unwrap();
        assert_eq!(r.matches, vec![&a, &b]);
        assert_eq!(r.disambiguated, None);
        assert_eq!(r.unique(), None);
        assert!(r.is_multi_conformant());
    }

    #[test]
    fn test_structural_duplicates_count_once() {
        let a = unkeyed("Person", "email");
        let types = vec![a.clone(), a.clone()];
        let instance = ElementData::new(["Person"], PropertyMap::new());

        let r = resolve_content_type(&types, &instance).unwrap();
        assert_eq!(r.matches.len(), 1);
        assert_eq!(r.unique(), Some(&a));
    }

    #[test]
    fn test_two_keys_matching_is_an_error() {
        let person = person_content();
        let employee = ContentRecordType::builder()
            .add_label("Employee")
            .set_type_identifier(["Employee"])
            .unwrap()
            .build()
            .unwrap();
        let types = vec![person, employee];
        let instance = ElementData::new(["Person", "Employee"], property_map([("name", "Bob")]));

        let err = resolve_content_type(&types, &instance).unwrap_err();
        assert_eq!(
            err,
            SchemaError::AmbiguousConformance(vec!["Person".into(), "Employee".into()])
        );
    }

    #[test]
    fn test_keyed_type_wins_over_unkeyed_candidate() {
        let person = person_content();
        let loose = unkeyed("Person", "email");
        let types = vec![loose.clone(), person.clone()];
        let instance = ElementData::new(["Person"], property_map([("name", "Carol")]));

        let r = resolve_content_type(&types, &instance).unwrap();
        assert_eq!(r.matches, vec![&loose, &person]);
        assert_eq!(r.disambiguated, Some(&person));
    }

    #[test]
    fn test_no_candidates() {
        let types = vec![person_content()];
        // `name` is NOT NULL in Person
        let instance = ElementData::new(["Person"], property_map([("age", 30i64)]));

        let r = resolve_content_type(&types, &instance).unwrap();
        assert!(!r.is_conforming());
        assert_eq!(r.disambiguated, None);
    }
}
