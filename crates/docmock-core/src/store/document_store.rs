use std::collections::{BTreeMap, HashMap};
use std::time::Instant;

use docmock_core_types::Key;

use crate::errors::{DocMockError, Result};
use crate::model::{CollectionReference, DocumentReference, Fields};
use crate::refs::{check_ref_paths, extract_refs, restore_refs, RefMap};
use crate::snapshot::DocumentSnapshot;
use crate::{log_op_end, log_op_error, log_op_start};

/// A document as held by the store: inline data with references replaced
/// by their paths, plus the references themselves
#[derive(Debug, Clone, PartialEq)]
pub struct StoredDocument {
    fields: Fields,
    refs: RefMap,
}

impl StoredDocument {
    /// Split `data` into inline fields and references
    ///
    /// # Errors
    ///
    /// Returns `InvalidFieldPath` if a key containing `.` holds a reference,
    /// since the split form could not be reassembled into `data`.
    pub fn from_data(data: &Fields) -> Result<Self> {
        check_ref_paths(data)?;
        let (fields, refs) = extract_refs(data);
        Ok(Self { fields, refs })
    }

    /// Inline data; references appear as path strings
    pub fn fields(&self) -> &Fields {
        &self.fields
    }

    /// References keyed by dotted field path
    pub fn refs(&self) -> &RefMap {
        &self.refs
    }

    /// Reassemble the document data with references in place
    ///
    /// # Errors
    ///
    /// Returns `InvalidFieldPath` if a reference path no longer resolves.
    pub fn to_data(&self) -> Result<Fields> {
        restore_refs(&self.fields, &self.refs)
    }
}

/// In-memory store of documents grouped by collection path
#[derive(Debug, Clone, Default)]
pub struct Store {
    /// Collection path -> document key -> stored document
    collections: HashMap<String, BTreeMap<Key, StoredDocument>>,
}

fn elapsed_ms(start: Instant) -> u64 {
    start.elapsed().as_millis() as u64
}

impl Store {
    /// Create a new empty Store
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of documents across all collections
    pub fn document_count(&self) -> usize {
        self.collections.values().map(BTreeMap::len).sum()
    }

    /// Write `data` at `reference`, replacing any existing document
    ///
    /// # Errors
    ///
    /// Returns `InvalidFieldPath` if `data` could not be read back intact;
    /// nothing is written in that case.
    pub fn set(&mut self, reference: &DocumentReference, data: Fields) -> Result<()> {
        let doc_path = reference.path();
        log_op_start!("store_set", doc_path = %doc_path);
        let start = Instant::now();

        let stored = StoredDocument::from_data(&data).map_err(|e| {
            log_op_error!(
                "store_set",
                e.clone(),
                duration_ms = elapsed_ms(start),
                doc_path = %doc_path
            );
            e
        })?;
        let ref_count = stored.refs().len();
        self.collections
            .entry(reference.parent().path().to_string())
            .or_default()
            .insert(reference.key().clone(), stored);

        log_op_end!(
            "store_set",
            duration_ms = elapsed_ms(start),
            doc_path = %doc_path,
            ref_count = ref_count
        );
        Ok(())
    }

    /// Write `data` under a freshly generated key in `collection`
    ///
    /// # Errors
    ///
    /// Same as [`set`](Self::set).
    pub fn add(
        &mut self,
        collection: &CollectionReference,
        data: Fields,
    ) -> Result<DocumentReference> {
        let reference = collection.new_doc();
        self.set(&reference, data)?;
        Ok(reference)
    }

    /// Stored (split) form of the document at `reference`
    ///
    /// # Errors
    ///
    /// Returns `DocumentNotFound` if nothing is stored at `reference`.
    pub fn stored(&self, reference: &DocumentReference) -> Result<&StoredDocument> {
        self.collections
            .get(reference.parent().path())
            .and_then(|docs| docs.get(reference.key()))
            .ok_or_else(|| DocMockError::DocumentNotFound {
                path: reference.path(),
            })
    }

    /// Read the document at `reference` with its references restored
    ///
    /// # Errors
    ///
    /// Returns `DocumentNotFound` if nothing is stored at `reference`, or
    /// `InvalidFieldPath` if its references cannot be restored.
    pub fn get(&self, reference: &DocumentReference) -> Result<DocumentSnapshot> {
        let doc_path = reference.path();
        log_op_start!("store_get", doc_path = %doc_path);
        let start = Instant::now();

        let doc = self
            .stored(reference)
            .and_then(StoredDocument::to_data)
            .map(|fields| DocumentSnapshot::at(reference.clone(), fields))
            .map_err(|e| {
                log_op_error!(
                    "store_get",
                    e.clone(),
                    duration_ms = elapsed_ms(start),
                    doc_path = %doc_path
                );
                e
            })?;

        log_op_end!(
            "store_get",
            duration_ms = elapsed_ms(start),
            doc_path = %doc_path
        );

        Ok(doc)
    }

    /// Remove the document at `reference`
    ///
    /// # Errors
    ///
    /// Returns `DocumentNotFound` if nothing is stored at `reference`.
    pub fn delete(&mut self, reference: &DocumentReference) -> Result<()> {
        let doc_path = reference.path();
        log_op_start!("store_delete", doc_path = %doc_path);
        let start = Instant::now();

        let removed = self
            .collections
            .get_mut(reference.parent().path())
            .and_then(|docs| docs.remove(reference.key()));

        if removed.is_none() {
            let err = DocMockError::DocumentNotFound {
                path: doc_path.clone(),
            };
            log_op_error!(
                "store_delete",
                err.clone(),
                duration_ms = elapsed_ms(start),
                doc_path = %doc_path
            );
            return Err(err);
        }

        log_op_end!(
            "store_delete",
            duration_ms = elapsed_ms(start),
            doc_path = %doc_path
        );
        Ok(())
    }

    /// All documents of `collection`, ordered by key
    ///
    /// An unknown collection is empty, not an error.
    ///
    /// # Errors
    ///
    /// Returns `InvalidFieldPath` if a document's references cannot be restored.
    pub fn list(&self, collection: &CollectionReference) -> Result<Vec<DocumentSnapshot>> {
        log_op_start!("store_list", collection = collection.path());
        let start = Instant::now();

        let docs = self
            .collections
            .get(collection.path())
            .into_iter()
            .flatten()
            .map(|(key, stored)| {
                let fields = stored.to_data()?;
                Ok(DocumentSnapshot::at(collection.doc(key.clone())?, fields))
            })
            .collect::<Result<Vec<_>>>()
            .map_err(|e| {
                log_op_error!(
                    "store_list",
                    e.clone(),
                    duration_ms = elapsed_ms(start),
                    collection = collection.path()
                );
                e
            })?;

        log_op_end!(
            "store_list",
            duration_ms = elapsed_ms(start),
            collection = collection.path(),
            doc_count = docs.len()
        );

        Ok(docs)
    }
}
