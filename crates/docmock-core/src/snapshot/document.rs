use docmock_core_types::Key;

use super::DocumentHandle;
use crate::errors::Result;
use crate::model::{DocumentReference, Fields, Value};

/// Document handle as returned by the store: key, fields and, when the
/// document was read from a collection, its reference
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentSnapshot {
    key: Key,
    reference: Option<DocumentReference>,
    fields: Fields,
}

impl DocumentSnapshot {
    /// Create a detached document (no owning collection)
    pub fn new(key: Key, fields: Fields) -> Self {
        Self {
            key,
            reference: None,
            fields,
        }
    }

    /// Create a document addressed by `reference`
    pub fn at(reference: DocumentReference, fields: Fields) -> Self {
        Self {
            key: reference.key().clone(),
            reference: Some(reference),
            fields,
        }
    }

    pub fn key(&self) -> &Key {
        &self.key
    }

    pub fn reference(&self) -> Option<&DocumentReference> {
        self.reference.as_ref()
    }

    pub fn fields(&self) -> &Fields {
        &self.fields
    }

    /// Field value by dotted path, e.g. `items.0.text`
    pub fn get(&self, path: &str) -> Option<&Value> {
        let (head, rest) = match path.split_once('.') {
            Some((head, rest)) => (head, Some(rest)),
            None => (path, None),
        };
        let value = self.fields.get(head)?;
        match rest {
            Some(rest) => value.lookup(rest),
            None => Some(value),
        }
    }
}

impl DocumentHandle for DocumentSnapshot {
    type Id = Key;

    fn id(&self) -> &Key {
        &self.key
    }

    fn data(&self) -> Result<Fields> {
        Ok(self.fields.clone())
    }
}
