//! Property-based tests for combinators and validation

use assertree::predicate::*;
use assertree::{DeclarativeNode, Validator};
use proptest::prelude::*;
use serde_json::{json, Map, Value};

fn booleans() -> impl Strategy<Value = Vec<bool>> {
    prop::collection::vec(any::<bool>(), 0..8)
}

fn constants(values: &[bool]) -> Vec<Box<dyn Assertion>> {
    values
        .iter()
        .map(|&v| Box::new(from_fn(move || v)) as Box<dyn Assertion>)
        .collect()
}

fn small_value() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::from),
        any::<i32>().prop_map(Value::from),
        "[a-z0-9 ]{0,6}".prop_map(Value::from),
    ]
}

/// Raw configurations mixing valid and invalid shapes.
fn config() -> impl Strategy<Value = Map<String, Value>> {
    let selector = prop_oneof![
        Just(json!("equals")),
        Just(json!("isInt")),
        Just(json!("inRange")),
        Just(json!("sortOf")),
        Just(json!(7)),
    ];
    let key = prop_oneof![
        Just("type"),
        Just("checkValue"),
        Just("properties"),
        Just("success"),
        Just("bogus"),
    ];
    let property = prop_oneof![Just("value"), Just("strict"), Just("min"), Just("nope")];
    (
        prop::option::of(selector),
        prop::option::of(small_value()),
        prop::collection::btree_map(property, small_value(), 0..3),
        prop::collection::vec(key, 0..3),
        any::<bool>(),
    )
        .prop_map(|(selector, check, properties, extra, with_child)| {
            let mut raw = Map::new();
            if let Some(selector) = selector {
                raw.insert("type".into(), selector);
            }
            if let Some(check) = check {
                raw.insert("checkValue".into(), check);
            }
            if !properties.is_empty() {
                let properties: Map<String, Value> = properties
                    .into_iter()
                    .map(|(k, v)| (k.to_string(), v))
                    .collect();
                raw.insert("properties".into(), Value::Object(properties));
            }
            for key in extra {
                raw.entry(key.to_string()).or_insert(json!({}));
            }
            if with_child {
                raw.insert(
                    "children".into(),
                    json!({"type": "isNull", "checkValue": null, "success": {"leaf": true}}),
                );
            }
            raw
        })
}

proptest! {
    #[test]
    fn prop_all_of_holds_iff_every_member_holds(values in booleans()) {
        let expected = values.iter().all(|&v| v);
        prop_assert_eq!(all_of(constants(&values)).evaluate(), expected);
    }

    #[test]
    fn prop_any_of_holds_iff_some_member_holds(values in booleans()) {
        let expected = values.iter().any(|&v| v);
        prop_assert_eq!(any_of(constants(&values)).evaluate(), expected);
    }

    #[test]
    fn prop_singleton_combinators_match_member(v in any::<bool>()) {
        prop_assert_eq!(all_of(constants(&[v])).evaluate(), v);
        prop_assert_eq!(any_of(constants(&[v])).evaluate(), v);
    }

    #[test]
    fn prop_double_negation(left in any::<i32>(), right in any::<i32>()) {
        let direct = greater_than(json!(left), json!(right)).evaluate();
        let twice = not(not(greater_than(json!(left), json!(right))));
        prop_assert_eq!(twice.evaluate(), direct);
    }

    #[test]
    fn prop_validation_is_idempotent(raw in config()) {
        let validator = Validator::default();
        let first = validator.validate(&raw);
        let second = validator.validate(&raw);
        prop_assert_eq!(&first, &second);
        if let Ok(node) = first {
            prop_assert_eq!(node.raw(), &raw);
        }
    }

    #[test]
    fn prop_validate_reports_first_inspected_violation(raw in config()) {
        let validator = Validator::default();
        let fast = validator.validate(&raw);
        let all = validator.inspect(&raw).into_result();
        match (fast, all) {
            (Ok(a), Ok(b)) => prop_assert_eq!(a, b),
            (Err(first), Err(violations)) => prop_assert_eq!(&first, violations.first()),
            (fast, all) => prop_assert!(false, "disagreement: {:?} vs {:?}", fast, all),
        }
    }

    #[test]
    fn prop_accepted_nodes_run_deterministically(raw in config()) {
        if let Ok(node) = DeclarativeNode::new(raw) {
            let first = node.run();
            let second = node.run();
            prop_assert_eq!(first, second);
        }
    }
}

#[test]
fn test_empty_combinators() {
    assert!(all_of(Vec::new()).evaluate());
    assert!(!any_of(Vec::new()).evaluate());
}
