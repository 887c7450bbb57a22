//! Property-based tests for loading and lookup.
//!
//! Generated sources exercise the index with many keys per section, so
//! collisions and displaced entries are routine.

use koml::{from_str, Value};
use proptest::prelude::*;
use std::collections::BTreeMap;

fn name() -> impl Strategy<Value = String> {
    "[a-z_][a-z0-9_-]{0,8}"
}

fn value() -> impl Strategy<Value = Value> {
    prop_oneof![
        any::<i32>().prop_map(Value::Int),
        (-1.0e6f32..1.0e6f32).prop_map(Value::Float),
        "[ -~]{0,12}".prop_map(Value::String),
        any::<bool>().prop_map(Value::Bool),
    ]
}

/// Renders a value the way it would be written in a source file.
fn literal(value: &Value) -> String {
    match value {
        Value::Float(x) => format!("{:?}", x),
        other => other.to_string(),
    }
}

/// Sections -> keys -> values, rendered to source in section order.
fn render(doc: &BTreeMap<String, BTreeMap<String, Value>>) -> String {
    let mut src = String::new();
    for (section, entries) in doc {
        src.push_str(&format!("[{}]\n", section));
        for (key, value) in entries {
            src.push_str(&format!("{} = {}\n", key, literal(value)));
        }
    }
    src
}

fn document() -> impl Strategy<Value = BTreeMap<String, BTreeMap<String, Value>>> {
    prop::collection::btree_map(
        "[a-z]{1,4}(\\.[a-z]{1,4})?",
        prop::collection::btree_map(name(), value(), 1..40),
        1..8,
    )
}

proptest! {
    #[test]
    fn prop_every_key_resolves(doc in document()) {
        let table = from_str(&render(&doc)).unwrap();
        let mut count = 0;
        for (section, entries) in &doc {
            for (key, value) in entries {
                let qualified = format!("{}:{}", section, key);
                prop_assert_eq!(table.get(&qualified), Some(value));
                count += 1;
            }
        }
        prop_assert_eq!(table.len(), count);
    }

    #[test]
    fn prop_loading_is_deterministic(doc in document()) {
        let src = render(&doc);
        let first = from_str(&src).unwrap();
        let second = from_str(&src).unwrap();
        prop_assert_eq!(first.len(), second.len());
        for symbol in &first {
            prop_assert_eq!(second.get(symbol.key()), Some(symbol.value()));
        }
    }

    #[test]
    fn prop_undefined_keys_are_not_found(doc in document(), probe in "[a-z:._-]{0,12}") {
        let table = from_str(&render(&doc)).unwrap();
        let defined = doc.iter().any(|(section, entries)| {
            entries.keys().any(|key| format!("{}:{}", section, key) == probe)
        });
        prop_assert_eq!(table.get(&probe).is_some(), defined);
    }

    #[test]
    fn prop_bare_keys_unaffected_by_sections(key in name(), n in any::<i32>()) {
        let src = format!("{} = {}\n[section]\n{} = 0\n", key, n, key);
        let table = from_str(&src).unwrap();
        prop_assert_eq!(table.get_i32(&key).unwrap(), n);
        prop_assert_eq!(table.get_i32(&format!("section:{}", key)).unwrap(), 0);
    }

    #[test]
    fn prop_arbitrary_input_never_panics(src in "(?s).{0,64}") {
        let _ = from_str(&src);
    }

    #[test]
    fn prop_near_miss_input_never_panics(
        src in "[\\[\\]a-z0-9 =\"@.:#\n\r\t\\\\+eE_uxé€😀-]{0,64}"
    ) {
        let _ = from_str(&src);
    }
}
