use grasch::constraint::ConstraintSpecification;
use grasch::graph::{property_map, ElementData, PropertyMap, PropertyValue};
use grasch::schema::{
    resolve_content_type, ContentRecordType, EdgeType, GraphType, NodeType, ScalarKind, SchemaError,
};
use proptest::prelude::*;
use std::collections::BTreeSet;

fn label_set(prefix: &'static str) -> impl Strategy<Value = BTreeSet<String>> {
    prop::collection::btree_set((0u8..4).prop_map(move |i| format!("{}{}", prefix, i)), 1..=3)
}

/// Content type over `labels` and `properties`, keyed on the members selected by `mask`
fn masked_content(labels: &BTreeSet<String>, properties: &BTreeSet<String>, mask: u8) -> ContentRecordType {
    let mut builder = ContentRecordType::builder();
    for label in labels {
        builder = builder.add_label(label.as_str());
    }
    for property in properties {
        builder = builder.add_property(property.as_str(), ScalarKind::Any, false);
    }
    let identifier: Vec<&str> = labels
        .iter()
        .chain(properties.iter())
        .enumerate()
        .filter(|(i, _)| mask & (1 << (i % 8)) != 0)
        .map(|(_, name)| name.as_str())
        .collect();
    builder.set_type_identifier(identifier).unwrap().build().unwrap()
}

fn person_content(identifier: &[&str]) -> ContentRecordType {
    ContentRecordType::builder()
        .add_label("Person")
        .add_property("name", ScalarKind::String, true)
        .add_property("age", ScalarKind::Integer, false)
        .set_type_identifier(identifier.iter().copied())
        .unwrap()
        .build()
        .unwrap()
}

#[test]
fn test_person_round_trip() {
    let person = person_content(&["Person"]);
    let instance = ElementData::new(
        ["Person"],
        property_map([("name", PropertyValue::from("Alice")), ("age", 30i64.into())]),
    );

    let resolution = resolve_content_type([&person], &instance).unwrap();
    assert_eq!(resolution.matches, vec![&person]);
    assert_eq!(resolution.disambiguated, Some(&person));
    assert_eq!(person.to_string(), "(:Person {name :: STRING NOT NULL, age :: INTEGER})");
}

#[test]
fn test_unkeyed_types_stay_multi_conformant() {
    let basic = person_content(&[]);
    let with_email = ContentRecordType::builder()
        .add_label("Person")
        .add_property("name", ScalarKind::String, true)
        .add_property("email", ScalarKind::String, false)
        .build()
        .unwrap();
    let instance = ElementData::new(["Person"], property_map([("name", "John Doe")]));

    let resolution = resolve_content_type([&basic, &with_email], &instance).unwrap();
    assert_eq!(resolution.matches.len(), 2);
    assert_eq!(resolution.disambiguated, None);
    assert!(resolution.is_multi_conformant());
    assert!(resolution.unique().is_none());
}

#[test]
fn test_null_required_property_is_not_conforming() {
    let person = person_content(&["Person"]);
    let instance = ElementData::new(
        ["Person"],
        property_map([("name", PropertyValue::Null), ("age", 30i64.into())]),
    );
    let resolution = resolve_content_type([&person], &instance).unwrap();
    assert!(!resolution.is_conforming());
}

#[test]
fn test_property_keyed_disambiguation() {
    let by_label = ContentRecordType::builder()
        .add_label("Account")
        .build()
        .unwrap();
    let by_property = ContentRecordType::builder()
        .add_label("Account")
        .add_property("iban", ScalarKind::String, false)
        .set_type_identifier(["iban"])
        .unwrap()
        .build()
        .unwrap();

    let plain = ElementData::new(["Account"], PropertyMap::new());
    let banked = ElementData::new(["Account"], property_map([("iban", "DE00 1234")]));

    let plain_res = resolve_content_type([&by_label, &by_property], &plain).unwrap();
    assert_eq!(plain_res.disambiguated, None);
    assert_eq!(plain_res.matches.len(), 2);

    let banked_res = resolve_content_type([&by_label, &by_property], &banked).unwrap();
    assert_eq!(banked_res.disambiguated, Some(&by_property));
}

#[test]
fn test_keyed_overlap_is_ambiguous() {
    let person = person_content(&["Person"]);
    let employee = ContentRecordType::builder()
        .add_label("Employee")
        .set_type_identifier(["Employee"])
        .unwrap()
        .build()
        .unwrap();
    let instance = ElementData::new(["Person", "Employee"], property_map([("name", "Eve")]));

    match resolve_content_type([&person, &employee], &instance) {
        Err(SchemaError::AmbiguousConformance(names)) => assert_eq!(names.len(), 2),
        other => panic!("expected ambiguity, got {:?}", other),
    }
}

#[test]
fn test_resolution_is_per_kind() {
    let mut graph_type = GraphType::new("Social", false);
    let person = NodeType::new(graph_type.ids(), person_content(&["Person"])).unwrap();
    graph_type.add_node_type(person.clone()).unwrap();

    let knows = ContentRecordType::builder()
        .add_label("Person")
        .set_type_identifier(["Person"])
        .unwrap()
        .build()
        .unwrap();
    let ids = graph_type.ids();
    let edge = EdgeType::named(ids, "KNOWS", person.clone(), person, knows, None);
    graph_type.add_edge_type(edge).unwrap();

    // Node and edge types with the same key never compete with each other.
    let instance = ElementData::new(["Person"], property_map([("name", "Ann")]));
    let node = graph_type.resolve_node(&instance).unwrap();
    assert_eq!(node.unique().unwrap().name(), "Person");
    let edge = graph_type.resolve_edge(&instance).unwrap();
    assert_eq!(edge.unique().unwrap().name(), "KNOWS");
}

proptest! {
    #[test]
    fn disjoint_types_never_cross_disambiguate(
        c1_labels in label_set("A"),
        c2_labels in label_set("B"),
        c1_mask in any::<u8>(),
        c2_mask in any::<u8>(),
        extra in prop::collection::btree_set(prop::sample::select(vec!["A0", "A3", "X0", "X1"]), 0..3),
    ) {
        let none = BTreeSet::new();
        let c1 = masked_content(&c1_labels, &none, c1_mask);
        let c2 = masked_content(&c2_labels, &none, c2_mask);

        let labels: BTreeSet<String> = c1_labels
            .iter()
            .cloned()
            .chain(extra.iter().map(|s| s.to_string()))
            .collect();
        let instance = ElementData::new(labels, PropertyMap::new());

        let resolution = resolve_content_type([&c1, &c2], &instance).unwrap();
        prop_assert!(resolution.matches.contains(&&c1));
        prop_assert!(resolution.disambiguated != Some(&c2));
    }

    #[test]
    fn keyed_graph_types_never_ambiguous(
        types in prop::collection::vec(
            (
                prop::collection::btree_set(prop::sample::select(vec!["A", "B", "C", "D"]), 1..=3),
                prop::collection::btree_set(prop::sample::select(vec!["p", "q"]), 0..=2),
                1u8..=255,
            ),
            1..5,
        ),
        pick in any::<prop::sample::Index>(),
    ) {
        let declared: Vec<(BTreeSet<String>, BTreeSet<String>, u8)> = types
            .iter()
            .map(|(labels, props, mask)| {
                (
                    labels.iter().map(|s| s.to_string()).collect(),
                    props.iter().map(|s| s.to_string()).collect(),
                    *mask,
                )
            })
            .collect();

        let mut builder = GraphType::builder("Generated", true);
        for (i, (labels, props, mask)) in declared.iter().enumerate() {
            let content = masked_content(labels, props, *mask);
            if !content.is_keyed() {
                return Ok(());
            }
            let name = format!("T{}", i);
            let key: Vec<String> = content.type_identifier().iter().cloned().collect();
            builder.named_node_type(name.clone(), content);
            builder.constraint(ConstraintSpecification::key(name, key));
        }

        // Only graph types that pass the keyed invariant are of interest.
        let Ok(graph_type) = builder.build() else {
            return Ok(());
        };

        let (labels, props, _) = &declared[pick.index(declared.len())];
        let instance = ElementData::new(
            labels.iter().cloned(),
            property_map(props.iter().map(|p| (p.clone(), "v"))),
        );
        match graph_type.resolve_node(&instance) {
            Ok(resolution) => prop_assert!(resolution.disambiguated.is_some()),
            Err(e) => prop_assert!(false, "unexpected resolution error: {}", e),
        }
    }
}
