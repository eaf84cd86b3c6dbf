use super::{RefMap, PATH_SEPARATOR};
use crate::errors::{DocMockError, Result};
use crate::model::{Fields, Value};

/// Put extracted references back into a sanitized field tree
///
/// Inverse of [`extract_refs`](super::extract_refs): every `(path, reference)`
/// pair replaces the path string stored at `path` with the reference.
///
/// Only data that passes [`check_ref_paths`](super::check_ref_paths)
/// restores to exactly what was extracted: a dotted key holding a reference
/// can share its path with a nested field, and the nested one wins.
///
/// # Errors
///
/// Returns `InvalidFieldPath` if a path does not resolve (missing key, bad
/// or out-of-range index, scalar in the middle of the path) or if the slot
/// does not hold the reference's path string.
pub fn restore_refs(sanitized: &Fields, refs: &RefMap) -> Result<Fields> {
    let mut restored = sanitized.clone();

    for (path, reference) in refs {
        let slot = slot_mut(&mut restored, path)?;
        let expected = reference.path();
        if slot.as_str() != Some(expected.as_str()) {
            return Err(DocMockError::InvalidFieldPath {
                path: path.clone(),
                reason: format!("slot does not hold reference path '{}'", expected),
            });
        }
        *slot = Value::Reference(reference.clone());
    }

    Ok(restored)
}

fn slot_mut<'a>(fields: &'a mut Fields, path: &str) -> Result<&'a mut Value> {
    let invalid = |reason: String| DocMockError::InvalidFieldPath {
        path: path.to_string(),
        reason,
    };

    let mut segments = path.split(PATH_SEPARATOR);
    let head = segments.next().unwrap_or(path);
    let mut current = fields
        .get_mut(head)
        .ok_or_else(|| invalid(format!("no field '{}'", head)))?;

    for segment in segments {
        current = match current {
            Value::Map(map) => map
                .get_mut(segment)
                .ok_or_else(|| invalid(format!("no field '{}'", segment)))?,
            Value::Array(items) => {
                let len = items.len();
                let index: usize = segment
                    .parse()
                    .map_err(|_| invalid(format!("'{}' is not an array index", segment)))?;
                items
                    .get_mut(index)
                    .ok_or_else(|| invalid(format!("index {} out of bounds ({})", index, len)))?
            }
            _ => return Err(invalid(format!("cannot descend into '{}'", segment))),
        };
    }

    Ok(current)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CollectionReference, DocumentReference};
    use crate::refs::extract_refs;

    fn reference(key: &str) -> DocumentReference {
        CollectionReference::new("collection").unwrap().doc(key).unwrap()
    }

    #[test]
    fn test_restore_inverts_extract() {
        let r1 = reference("1");
        let r2 = reference("2");
        let data = Fields::from([
            ("n".to_string(), Value::Integer(42)),
            (
                "arr".to_string(),
                Value::Array(vec![
                    Value::Reference(r1.clone()),
                    Value::Reference(r2),
                    Value::Reference(r1),
                ]),
            ),
            (
                "obj".to_string(),
                Value::Map(Fields::from([(
                    "nested".to_string(),
                    Value::Map(Fields::from([(
                        "ref".to_string(),
                        Value::Reference(reference("3")),
                    )])),
                )])),
            ),
        ]);

        let (sanitized, refs) = extract_refs(&data);
        let restored = restore_refs(&sanitized, &refs).unwrap();

        assert_eq!(restored, data);
    }

    #[test]
    fn test_restore_with_no_refs_is_identity() {
        let data = Fields::from([("a".to_string(), Value::from("collection/1"))]);
        assert_eq!(restore_refs(&data, &RefMap::new()).unwrap(), data);
    }

    #[test]
    fn test_missing_field_is_rejected() {
        let refs = RefMap::from([("gone".to_string(), reference("1"))]);
        let err = restore_refs(&Fields::new(), &refs).unwrap_err();
        assert!(matches!(err, DocMockError::InvalidFieldPath { ref path, .. } if path == "gone"));
    }

    #[test]
    fn test_bad_index_is_rejected() {
        let data = Fields::from([(
            "arr".to_string(),
            Value::Array(vec![Value::from("collection/1")]),
        )]);

        for path in ["arr.x", "arr.1"] {
            let refs = RefMap::from([(path.to_string(), reference("1"))]);
            assert!(matches!(
                restore_refs(&data, &refs),
                Err(DocMockError::InvalidFieldPath { .. })
            ));
        }
    }

    #[test]
    fn test_descending_into_scalar_is_rejected() {
        let data = Fields::from([("n".to_string(), Value::Integer(1))]);
        let refs = RefMap::from([("n.ref".to_string(), reference("1"))]);
        assert!(restore_refs(&data, &refs).is_err());
    }

    #[test]
    fn test_slot_must_hold_reference_path() {
        let data = Fields::from([("ref".to_string(), Value::from("collection/other"))]);
        let refs = RefMap::from([("ref".to_string(), reference("1"))]);
        assert!(restore_refs(&data, &refs).is_err());
    }

    #[test]
    fn test_dotted_key_cannot_be_restored() {
        let r = reference("1");
        let data = Fields::from([("a.b".to_string(), Value::Reference(r))]);

        let (sanitized, refs) = extract_refs(&data);
        assert!(refs.contains_key("a.b"));

        let err = restore_refs(&sanitized, &refs).unwrap_err();
        assert!(matches!(err, DocMockError::InvalidFieldPath { .. }));
    }
}
