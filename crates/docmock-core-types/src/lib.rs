//! Core types shared across docmock facilities
//!
//! This crate provides foundational types used by the document model,
//! the error facility and the logging facility:
//!
//! - **Keys**: `Key`, the opaque stringifiable document identifier
//! - **Schema constants**: Canonical field keys and event names

pub mod key;
pub mod schema;

pub use key::Key;
