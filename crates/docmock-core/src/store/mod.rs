//! In-memory document store.
//!
//! Writes split each document into inline data and references (see
//! [`crate::refs`]) and keep both; reads put the references back and hand
//! out [`DocumentSnapshot`](crate::DocumentSnapshot) handles.
//!
//! Not thread-safe (no Arc/RwLock); wrap it if it must be shared.

mod document_store;

pub use document_store::{Store, StoredDocument};
