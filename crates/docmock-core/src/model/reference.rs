use std::fmt;

use docmock_core_types::Key;

use crate::errors::{DocMockError, Result};

const SEPARATOR: char = '/';

fn segments(path: &str) -> std::str::Split<'_, char> {
    path.split(SEPARATOR)
}

fn has_empty_segment(path: &str) -> bool {
    segments(path).any(str::is_empty)
}

/// Address of a collection, e.g. `users` or `users/u1/posts`
///
/// A collection path has an odd number of non-empty segments: top-level
/// collections have one, sub-collections alternate document keys and
/// collection names.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CollectionReference {
    path: String,
}

impl CollectionReference {
    /// Create a collection reference from its path
    ///
    /// # Errors
    ///
    /// Returns `InvalidCollectionPath` if the path is empty, contains an
    /// empty segment, or has an even number of segments (a document path).
    pub fn new(path: impl Into<String>) -> Result<Self> {
        let path = path.into();
        let invalid = |reason: &str| DocMockError::InvalidCollectionPath {
            path: path.clone(),
            reason: reason.to_string(),
        };

        if path.is_empty() {
            return Err(invalid("path cannot be empty"));
        }
        if has_empty_segment(&path) {
            return Err(invalid("path contains an empty segment"));
        }
        if segments(&path).count() % 2 == 0 {
            return Err(invalid("path names a document, not a collection"));
        }

        Ok(Self { path })
    }

    /// Full slash-separated path
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Last segment of the path
    pub fn id(&self) -> &str {
        segments(&self.path).next_back().unwrap_or(&self.path)
    }

    /// Document owning this collection, `None` for top-level collections
    pub fn parent(&self) -> Option<DocumentReference> {
        let (parent, _) = self.path.rsplit_once(SEPARATOR)?;
        DocumentReference::from_path(parent).ok()
    }

    /// Reference to the document with the given key in this collection
    ///
    /// # Errors
    ///
    /// Returns `InvalidReferencePath` if the key is empty or contains `/`.
    pub fn doc(&self, key: impl Into<Key>) -> Result<DocumentReference> {
        DocumentReference::new(self.clone(), key.into())
    }

    /// Reference to a document under a freshly generated key
    pub fn new_doc(&self) -> DocumentReference {
        DocumentReference {
            collection: self.clone(),
            key: Key::new(),
        }
    }
}

impl fmt::Display for CollectionReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path)
    }
}

/// Pointer to a document: the owning collection plus the document key
///
/// This is the "reference value" stored inside document fields. Its
/// [`path`](Self::path) is what replaces it when references are extracted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DocumentReference {
    collection: CollectionReference,
    key: Key,
}

impl DocumentReference {
    /// Create a reference from its collection and key
    ///
    /// The key must be a single path segment so that [`path`](Self::path)
    /// parses back to the same reference.
    ///
    /// # Errors
    ///
    /// Returns `InvalidReferencePath` if the key is empty or contains `/`.
    pub fn new(collection: CollectionReference, key: Key) -> Result<Self> {
        let reason = if key.as_str().is_empty() {
            Some("key cannot be empty")
        } else if key.as_str().contains(SEPARATOR) {
            Some("key contains a path separator")
        } else {
            None
        };
        if let Some(reason) = reason {
            return Err(DocMockError::InvalidReferencePath {
                path: format!("{}{}{}", collection.path(), SEPARATOR, key),
                reason: reason.to_string(),
            });
        }

        Ok(Self { collection, key })
    }

    /// Parse a `<collection path>/<key>` document path
    ///
    /// # Errors
    ///
    /// Returns `InvalidReferencePath` if the path does not consist of an even
    /// number of non-empty segments.
    pub fn from_path(path: &str) -> Result<Self> {
        let invalid = |reason: &str| DocMockError::InvalidReferencePath {
            path: path.to_string(),
            reason: reason.to_string(),
        };

        if has_empty_segment(path) {
            return Err(invalid("path contains an empty segment"));
        }
        let Some((collection, key)) = path.rsplit_once(SEPARATOR) else {
            return Err(invalid("path has no collection segment"));
        };
        let collection = CollectionReference::new(collection)
            .map_err(|_| invalid("path names a collection, not a document"))?;

        Self::new(collection, Key::from(key))
    }

    /// Full slash-separated document path, e.g. `collection/42`
    pub fn path(&self) -> String {
        format!("{}{}{}", self.collection.path(), SEPARATOR, self.key)
    }

    /// Document key
    pub fn key(&self) -> &Key {
        &self.key
    }

    /// Collection containing the document
    pub fn parent(&self) -> &CollectionReference {
        &self.collection
    }

    /// Sub-collection of this document
    pub fn collection(&self, id: &str) -> Result<CollectionReference> {
        CollectionReference::new(format!("{}{}{}", self.path(), SEPARATOR, id))
    }
}

impl fmt::Display for DocumentReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.collection, SEPARATOR, self.key)
    }
}
