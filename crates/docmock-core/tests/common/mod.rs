use docmock_core::{CollectionReference, DocumentReference, DocumentSnapshot, Fields, Key, Value};

/// Build a `Fields` map from literal entries
#[allow(dead_code)]
pub fn fields<const N: usize>(entries: [(&str, Value); N]) -> Fields {
    entries
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect()
}

/// Build a map value from literal entries
#[allow(dead_code)]
pub fn map<const N: usize>(entries: [(&str, Value); N]) -> Value {
    Value::Map(fields(entries))
}

/// A collection with a unique generated name
///
/// Mirrors a mock database handing out anonymous collections.
#[allow(dead_code)]
pub fn collection() -> CollectionReference {
    CollectionReference::new(format!("collection-{}", Key::new())).unwrap()
}

/// A reference to a fresh document in a fresh collection
#[allow(dead_code)]
pub fn doc_ref() -> DocumentReference {
    collection().new_doc()
}

/// The canonical test document: `{n: 42, is: true, items: [{text: 'foo'}], ref}`
#[allow(dead_code)]
pub fn sample_fields(reference: &DocumentReference) -> Fields {
    fields([
        ("n", Value::Integer(42)),
        ("is", Value::Bool(true)),
        ("items", Value::Array(vec![map([("text", Value::from("foo"))])])),
        ("ref", Value::Reference(reference.clone())),
    ])
}

/// A detached document handle holding `sample_fields`
#[allow(dead_code)]
pub fn sample_doc(reference: &DocumentReference) -> DocumentSnapshot {
    DocumentSnapshot::new(Key::new(), sample_fields(reference))
}
