//! Canonical schema constants for structured logging and events
//!
//! These constants ensure consistency across all logging and error reporting.

// Canonical field keys for structured logging
pub const FIELD_COMPONENT: &str = "component";
pub const FIELD_OP: &str = "op";
pub const FIELD_EVENT: &str = "event";
pub const FIELD_DURATION_MS: &str = "duration_ms";

// Document addressing
pub const FIELD_COLLECTION: &str = "collection";
pub const FIELD_DOC_PATH: &str = "doc_path";
pub const FIELD_FIELD_PATH: &str = "field_path";

// Collection sizes
pub const FIELD_REF_COUNT: &str = "ref_count";
pub const FIELD_DOC_COUNT: &str = "doc_count";

// Error fields
pub const FIELD_ERR_KIND: &str = "err.kind";
pub const FIELD_ERR_CODE: &str = "err.code";

// Canonical event names
pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";
