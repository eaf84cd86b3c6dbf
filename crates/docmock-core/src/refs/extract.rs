use super::{join_path, RefMap};
use crate::model::{Fields, Value, ValueClass};

/// Split a field tree into inline data and references
///
/// Returns a copy of `data` in which every reference is replaced by its
/// path string, together with the extracted references keyed by dotted
/// field path. Timestamps and primitives are copied unchanged; maps and
/// arrays are walked depth-first.
///
/// The same reference stored at several paths is recorded once per path.
///
/// # Example
///
/// ```
/// use docmock_core::{extract_refs, CollectionReference, Fields, Value};
///
/// let r = CollectionReference::new("collection").unwrap().doc("42").unwrap();
/// let data = Fields::from([("ref".to_string(), Value::Reference(r.clone()))]);
///
/// let (sanitized, refs) = extract_refs(&data);
/// assert_eq!(sanitized["ref"], Value::from("collection/42"));
/// assert_eq!(refs["ref"], r);
/// ```
pub fn extract_refs(data: &Fields) -> (Fields, RefMap) {
    let mut refs = RefMap::new();
    let sanitized = extract_refs_into(data, None, &mut refs);
    (sanitized, refs)
}

/// [`extract_refs`] for an arbitrary value, e.g. a top-level array
///
/// Top-level array elements are addressed by bare index (`0`, `1`, ...).
pub fn extract_value_refs(value: &Value) -> (Value, RefMap) {
    let mut refs = RefMap::new();
    let sanitized = sanitize(value, None, &mut refs);
    (sanitized, refs)
}

/// Recursive form of [`extract_refs`]
///
/// Paths are built under `prefix` (`None` at the document root) and
/// references are appended to `refs`, overwriting any entry already
/// recorded under the same path.
pub fn extract_refs_into(data: &Fields, prefix: Option<&str>, refs: &mut RefMap) -> Fields {
    data.iter()
        .map(|(key, value)| {
            let path = join_path(prefix, key);
            (key.clone(), sanitize(value, Some(&path), refs))
        })
        .collect()
}

fn sanitize(value: &Value, path: Option<&str>, refs: &mut RefMap) -> Value {
    match value.classify() {
        ValueClass::Reference(reference) => {
            let doc_path = reference.path();
            // A bare reference has no field path; record it under ""
            let field_path = path.unwrap_or_default();
            tracing::trace!(field_path, doc_path = %doc_path, "reference extracted");
            refs.insert(field_path.to_string(), reference.clone());
            Value::String(doc_path)
        }
        ValueClass::Timestamp(_) | ValueClass::Primitive(_) => value.clone(),
        ValueClass::Array(items) => Value::Array(
            items
                .iter()
                .enumerate()
                .map(|(index, item)| {
                    let item_path = join_path(path, &index.to_string());
                    sanitize(item, Some(&item_path), refs)
                })
                .collect(),
        ),
        ValueClass::Map(fields) => Value::Map(extract_refs_into(fields, path, refs)),
    }
}
