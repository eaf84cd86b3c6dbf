use super::{join_path, PATH_SEPARATOR};
use crate::errors::{DocMockError, Result};
use crate::model::{Fields, Value, ValueClass};

/// Verify that every reference in `data` gets a dotted path of its own
///
/// A map key containing `.` makes the joined path of the references below
/// it ambiguous: it can collide with a nested path, and restoration would
/// walk the nested fields instead. Such keys are accepted only when no
/// reference sits beneath them.
///
/// # Errors
///
/// Returns `InvalidFieldPath` naming the first dotted key that holds a
/// reference.
pub fn check_ref_paths(data: &Fields) -> Result<()> {
    check_fields(data, None)
}

fn check_fields(data: &Fields, prefix: Option<&str>) -> Result<()> {
    for (key, value) in data {
        let path = join_path(prefix, key);
        if key.contains(PATH_SEPARATOR) && holds_reference(value) {
            return Err(DocMockError::InvalidFieldPath {
                path,
                reason: format!(
                    "key '{}' contains '{}' and holds a reference",
                    key, PATH_SEPARATOR
                ),
            });
        }
        check_value(value, &path)?;
    }
    Ok(())
}

fn check_value(value: &Value, path: &str) -> Result<()> {
    match value.classify() {
        ValueClass::Array(items) => items
            .iter()
            .enumerate()
            .try_for_each(|(index, item)| {
                check_value(item, &join_path(Some(path), &index.to_string()))
            }),
        ValueClass::Map(fields) => check_fields(fields, Some(path)),
        ValueClass::Reference(_) | ValueClass::Timestamp(_) | ValueClass::Primitive(_) => Ok(()),
    }
}

fn holds_reference(value: &Value) -> bool {
    match value.classify() {
        ValueClass::Reference(_) => true,
        ValueClass::Array(items) => items.iter().any(holds_reference),
        ValueClass::Map(fields) => fields.values().any(holds_reference),
        ValueClass::Timestamp(_) | ValueClass::Primitive(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CollectionReference, DocumentReference};

    fn reference() -> DocumentReference {
        CollectionReference::new("collection").unwrap().doc("1").unwrap()
    }

    fn map<const N: usize>(entries: [(&str, Value); N]) -> Fields {
        entries
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect()
    }

    #[test]
    fn test_plain_keys_pass() {
        let data = map([
            ("ref", Value::Reference(reference())),
            ("arr", Value::Array(vec![Value::Map(map([("r", Value::Reference(reference()))]))])),
        ]);
        assert!(check_ref_paths(&data).is_ok());
    }

    #[test]
    fn test_dotted_key_without_reference_passes() {
        let data = map([("a.b", Value::Map(map([("n", Value::Integer(1))])))]);
        assert!(check_ref_paths(&data).is_ok());
    }

    #[test]
    fn test_dotted_key_over_reference_is_rejected() {
        let data = map([(
            "outer",
            Value::Array(vec![Value::Map(map([(
                "x.y",
                Value::Map(map([("r", Value::Reference(reference()))])),
            )]))]),
        )]);

        let err = check_ref_paths(&data).unwrap_err();
        assert!(matches!(
            err,
            DocMockError::InvalidFieldPath { ref path, .. } if path == "outer.0.x.y"
        ));
    }
}
