#![allow(clippy::unwrap_used, clippy::expect_used)]

use chrono::{TimeZone, Utc};
use docmock_core::{
    create_snapshot, extract_refs, restore_refs, CollectionReference, DocumentReference,
    DocumentSnapshot, Fields, HasId, Key, Value,
};
use proptest::prelude::*;

// No '.' in keys: dotted paths stay unambiguous
const KEY: &str = "[a-z]{1,4}";

fn reference_strategy() -> impl Strategy<Value = DocumentReference> {
    ("[a-z]{1,6}", "[a-z0-9]{1,8}")
        .prop_map(|(c, k)| CollectionReference::new(c).unwrap().doc(k.as_str()).unwrap())
}

fn value_strategy(allow_refs: bool) -> impl Strategy<Value = Value> {
    let scalar = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::Integer),
        (-1.0e9f64..1.0e9).prop_map(Value::Double),
        "[a-z ]{0,8}".prop_map(Value::String),
        (0i64..4_000_000_000).prop_map(|s| Value::Timestamp(Utc.timestamp_opt(s, 0).unwrap())),
    ];
    let leaf = if allow_refs {
        prop_oneof![scalar, reference_strategy().prop_map(Value::Reference)].boxed()
    } else {
        scalar.boxed()
    };

    leaf.prop_recursive(4, 48, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..6).prop_map(Value::Array),
            prop::collection::btree_map(KEY, inner, 0..6).prop_map(Value::Map),
        ]
    })
}

fn fields_strategy(allow_refs: bool) -> impl Strategy<Value = Fields> {
    prop::collection::btree_map(KEY, value_strategy(allow_refs), 0..6)
}

fn count(value: &Value, pred: &dyn Fn(&Value) -> bool) -> usize {
    let nested = match value {
        Value::Array(items) => items.iter().map(|v| count(v, pred)).sum(),
        Value::Map(fields) => fields.values().map(|v| count(v, pred)).sum(),
        _ => 0,
    };
    nested + usize::from(pred(value))
}

proptest! {
    #[test]
    fn prop_no_refs_is_identity(data in fields_strategy(false)) {
        let (sanitized, refs) = extract_refs(&data);
        prop_assert_eq!(sanitized, data);
        prop_assert!(refs.is_empty());
    }

    #[test]
    fn prop_every_reference_recorded_once_per_path(data in fields_strategy(true)) {
        let original = Value::Map(data.clone());
        let (sanitized, refs) = extract_refs(&data);
        let sanitized = Value::Map(sanitized);

        let is_ref = |v: &Value| matches!(v, Value::Reference(_));
        prop_assert_eq!(refs.len(), count(&original, &is_ref));
        prop_assert_eq!(count(&sanitized, &is_ref), 0);

        for (path, reference) in &refs {
            prop_assert_eq!(original.lookup(path), Some(&Value::Reference(reference.clone())));
            prop_assert_eq!(sanitized.lookup(path), Some(&Value::String(reference.path())));
        }
    }

    #[test]
    fn prop_timestamps_survive_extraction(data in fields_strategy(true)) {
        let (sanitized, _) = extract_refs(&data);

        let is_ts = |v: &Value| matches!(v, Value::Timestamp(_));
        prop_assert_eq!(
            count(&Value::Map(sanitized), &is_ts),
            count(&Value::Map(data), &is_ts)
        );
    }

    #[test]
    fn prop_restore_inverts_extract(data in fields_strategy(true)) {
        let (sanitized, refs) = extract_refs(&data);
        prop_assert_eq!(restore_refs(&sanitized, &refs).unwrap(), data);
    }

    #[test]
    fn prop_snapshot_id_and_fields(key in "[a-zA-Z0-9]{1,12}", data in fields_strategy(true)) {
        let doc = DocumentSnapshot::new(Key::from(key.as_str()), data.clone());
        let snapshot = create_snapshot(&doc).unwrap();

        prop_assert_eq!(snapshot.id(), key.as_str());
        prop_assert_eq!(snapshot.fields(), &data);
        prop_assert_eq!(snapshot.contains_key("id"), data.contains_key("id"));
    }
}
