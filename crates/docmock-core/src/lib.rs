//! docmock Core - in-memory document model utilities
//!
//! This crate provides the data-transformation layer of the document-store
//! mock, including:
//! - A closed, tagged `Value` model for document fields (timestamps and
//!   references are distinct variants, never duck-typed maps)
//! - Snapshot construction with an identifier kept apart from the visible fields
//! - Reference extraction (and its inverse) keyed by dotted field path
//! - A minimal in-memory `Store` that persists references separately from data
//! - Error and logging facilities shared by all of the above

pub mod errors;
pub mod logging_facility;
pub mod model;
pub mod refs;
pub mod snapshot;
pub mod store;

pub use docmock_core_types::{schema, Key};

// Re-export commonly used types
pub use errors::{DocMockError, ExError, ExErrorKind, Result};
pub use model::{CollectionReference, DocumentReference, Fields, Value};
pub use refs::{check_ref_paths, extract_refs, restore_refs, RefMap};
pub use snapshot::{create_snapshot, DocumentHandle, DocumentSnapshot, HasId, Snapshot};
pub use store::{StoredDocument, Store};
