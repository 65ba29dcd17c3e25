//! Property-based testing strategies for generating test data
//!
//! This module provides proptest strategies for generating random models,
//! specifications and value specs for property testing.

#![cfg(test)]

use crate::spec::{Entry, Specification, ValueSpec};
use proptest::collection::{btree_set, hash_map, vec};
use proptest::prelude::*;
use serde_json::{Map, Value};

/// Strategy for generating property names
pub fn property_name_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z_][a-zA-Z0-9_]{0,20}"
}

/// Strategy for generating arbitrary JSON values
pub fn json_value_strategy() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(|n| Value::Number(n.into())),
        "[a-zA-Z0-9 ]{0,50}".prop_map(Value::String),
    ];

    leaf.prop_recursive(
        3,  // max depth
        10, // max size
        5,  // items per collection
        |inner| {
            prop_oneof![
                vec(inner.clone(), 0..5).prop_map(Value::Array),
                hash_map(property_name_strategy(), inner, 0..5)
                    .prop_map(|m| Value::Object(m.into_iter().collect())),
            ]
        },
    )
}

/// Strategy for generating non-null JSON values usable as model entries
pub fn present_value_strategy() -> impl Strategy<Value = Value> {
    json_value_strategy().prop_filter("model values must be present", |v| !v.is_null())
}

/// Strategy for generating a JSON object model with the given names
pub fn model_strategy(names: Vec<String>) -> impl Strategy<Value = Value> {
    let len = names.len();
    vec(present_value_strategy(), len).prop_map(move |values| {
        let map: Map<String, Value> = names.iter().cloned().zip(values).collect();
        Value::Object(map)
    })
}

/// Strategy for generating distinct property names in random order
pub fn distinct_names_strategy() -> impl Strategy<Value = Vec<String>> {
    btree_set(property_name_strategy(), 1..10)
        .prop_map(|set| set.into_iter().collect::<Vec<_>>())
        .prop_shuffle()
}

/// Strategy for generating literal value specs
pub fn literal_strategy() -> impl Strategy<Value = ValueSpec> {
    json_value_strategy().prop_map(ValueSpec::Literal)
}

/// Strategy for generating template text that contains no placeholder
pub fn plain_template_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 .,!?{}:]{0,80}".prop_filter("no placeholder", |s| !s.contains("{{"))
}

/// Strategy for generating a specification mixing properties and literals
pub fn specification_strategy() -> impl Strategy<Value = Specification> {
    distinct_names_strategy().prop_flat_map(|names| {
        let len = names.len();
        (Just(names), vec(prop::option::of(json_value_strategy()), len)).prop_map(
            |(names, literals)| {
                names
                    .into_iter()
                    .zip(literals)
                    .map(|(name, literal)| match literal {
                        Some(value) => Entry::Field(name, ValueSpec::Literal(value)),
                        None => Entry::Property(name),
                    })
                    .collect()
            },
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pattern::GetterPattern;
    use crate::transmogrifier::Transmogrifier;

    proptest! {
        #[test]
        fn test_distinct_names_are_unique(names in distinct_names_strategy()) {
            let unique: std::collections::HashSet<_> = names.iter().collect();
            prop_assert_eq!(unique.len(), names.len());
        }

        #[test]
        fn test_model_strategy_has_every_name(
            (names, model) in distinct_names_strategy()
                .prop_flat_map(|names| (Just(names.clone()), model_strategy(names)))
        ) {
            let object = model.as_object().unwrap();
            for name in &names {
                prop_assert!(object.contains_key(name));
            }
        }

        #[test]
        fn test_plain_template_has_no_placeholder(template in plain_template_strategy()) {
            prop_assert!(!template.contains("{{"));
        }

        #[test]
        fn test_specification_strategy_generates_entries(spec in specification_strategy()) {
            prop_assert!(!spec.is_empty());
        }

        #[test]
        fn test_literal_strategy_passes_through(value in literal_strategy()) {
            let pattern = GetterPattern::default();
            let out = Transmogrifier::new(&pattern)
                .transmogrify_value(&Value::Null, &value)
                .unwrap();
            if let ValueSpec::Literal(expected) = value {
                prop_assert_eq!(out, expected);
            }
        }

        #[test]
        fn test_generated_specification_keeps_key_order(spec in specification_strategy()) {
            let pattern = GetterPattern::default();
            let out = Transmogrifier::new(&pattern)
                .transmogrify(&Value::Object(Map::new()), &spec)
                .unwrap();
            let keys: Vec<&str> = out.as_object().unwrap().keys().map(String::as_str).collect();
            let expected: Vec<&str> = spec.iter().map(Entry::key).collect();
            prop_assert_eq!(keys, expected);
        }
    }
}
