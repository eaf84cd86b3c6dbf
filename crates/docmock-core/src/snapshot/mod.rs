//! Document snapshots.
//!
//! A [`Snapshot`] is the materialized view handed back to callers: the
//! document's fields plus its identifier. The identifier is held apart
//! from the fields.
//!
//! ## Responsibilities
//!
//! - Define the document handle capability ([`DocumentHandle`])
//! - Build snapshots from handles ([`create_snapshot`])
//! - Keep the identifier out of field enumeration, equality and serialization
//!
//! ## Non-Responsibilities
//!
//! - Storing documents (handled by [`crate::store`])
//! - Resolving references (handled by [`crate::refs`])

pub mod builder;
pub mod document;

pub use builder::{create_snapshot, HasId, Snapshot};
pub use document::DocumentSnapshot;

use crate::errors::Result;
use crate::model::Fields;

/// Anything that has an identifier and can produce a document's fields
pub trait DocumentHandle {
    /// Opaque identifier; only its string form is observed
    type Id: std::fmt::Display;

    /// Identifier of the document
    fn id(&self) -> &Self::Id;

    /// Produce the document's fields
    ///
    /// # Errors
    ///
    /// Implementation-defined; callers propagate it unchanged.
    fn data(&self) -> Result<Fields>;
}

impl<D: DocumentHandle + ?Sized> DocumentHandle for &D {
    type Id = D::Id;

    fn id(&self) -> &Self::Id {
        (**self).id()
    }

    fn data(&self) -> Result<Fields> {
        (**self).data()
    }
}
