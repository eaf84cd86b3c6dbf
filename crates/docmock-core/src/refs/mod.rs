//! Reference extraction and restoration.
//!
//! Documents may embed [`DocumentReference`]s anywhere in their field tree.
//! The store keeps such references out of the inline data: extraction swaps
//! each reference for its path string and records it under its dotted field
//! path; restoration puts the references back.
//!
//! ## Dotted paths
//!
//! Paths join map keys and array indices with `.` (`arr.0`, `obj.nested.ref`).
//! Keys are not escaped, so a key containing `.` yields a path that may
//! collide with a nested one. Extraction records such paths as-is;
//! [`check_ref_paths`] rejects dotted keys holding references, and
//! restoration rejects paths it cannot resolve.

pub mod check;
pub mod extract;
pub mod restore;

use std::collections::BTreeMap;

use crate::model::DocumentReference;

pub use check::check_ref_paths;
pub use extract::{extract_refs, extract_refs_into, extract_value_refs};
pub use restore::restore_refs;

/// Extracted references keyed by dotted field path
pub type RefMap = BTreeMap<String, DocumentReference>;

pub(crate) const PATH_SEPARATOR: char = '.';

/// Extend `prefix` by one segment; the top level has no prefix
pub(crate) fn join_path(prefix: Option<&str>, segment: &str) -> String {
    match prefix {
        Some(prefix) => format!("{}{}{}", prefix, PATH_SEPARATOR, segment),
        None => segment.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_path() {
        assert_eq!(join_path(None, "ref"), "ref");
        assert_eq!(join_path(Some("obj"), "ref"), "obj.ref");
        assert_eq!(join_path(Some("arr"), "0"), "arr.0");
        // Keys are not escaped
        assert_eq!(join_path(Some("a"), "b.c"), "a.b.c");
    }
}
