use std::ops::Deref;

use serde::{Serialize, Serializer};

use super::DocumentHandle;
use crate::errors::Result;
use crate::model::Fields;

/// Capability of carrying an identifier outside the visible fields
pub trait HasId {
    fn id(&self) -> &str;
}

/// Point-in-time view of a document: visible fields plus a hidden identifier
///
/// Only the fields are visible: `keys()`, equality and serialization never
/// see the identifier. Read it through [`HasId::id`].
#[derive(Debug, Clone)]
pub struct Snapshot {
    id: String,
    fields: Fields,
}

impl Snapshot {
    pub fn new(id: impl Into<String>, fields: Fields) -> Self {
        Self {
            id: id.into(),
            fields,
        }
    }

    /// Visible fields
    pub fn fields(&self) -> &Fields {
        &self.fields
    }

    /// Consume the snapshot, keeping only the visible fields
    pub fn into_fields(self) -> Fields {
        self.fields
    }
}

impl HasId for Snapshot {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Deref for Snapshot {
    type Target = Fields;

    fn deref(&self) -> &Fields {
        &self.fields
    }
}

impl PartialEq for Snapshot {
    fn eq(&self, other: &Self) -> bool {
        self.fields == other.fields
    }
}

impl PartialEq<Fields> for Snapshot {
    fn eq(&self, other: &Fields) -> bool {
        &self.fields == other
    }
}

impl PartialEq<Snapshot> for Fields {
    fn eq(&self, other: &Snapshot) -> bool {
        self == &other.fields
    }
}

impl Serialize for Snapshot {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.fields.serialize(serializer)
    }
}

/// Build a snapshot from a document handle
///
/// The snapshot's fields are exactly `doc.data()`; its identifier is the
/// string form of `doc.id()`.
///
/// # Errors
///
/// Propagates the error of `doc.data()` unchanged.
///
/// # Example
///
/// ```
/// use docmock_core::{create_snapshot, DocumentSnapshot, Fields, HasId, Key, Value};
///
/// let doc = DocumentSnapshot::new(
///     Key::from("7"),
///     Fields::from([("n".to_string(), Value::Integer(42))]),
/// );
/// let snapshot = create_snapshot(&doc).unwrap();
///
/// assert_eq!(snapshot.id(), "7");
/// assert!(!snapshot.contains_key("id"));
/// assert_eq!(snapshot, *doc.fields());
/// ```
pub fn create_snapshot<D: DocumentHandle>(doc: &D) -> Result<Snapshot> {
    let fields = doc.data()?;
    Ok(Snapshot::new(doc.id().to_string(), fields))
}
