// Moderation domain models - data structures for cleanup sweeps.
//
// These are pure domain types with no storage dependencies.
// The api layer turns a SweepReport into a response body.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which entries a sweep looks at, and therefore which vocabulary it uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SweepScope {
    /// Every entry of every blog.
    Global,
    /// Only the entries of one blog.
    Blog(u64),
}

impl fmt::Display for SweepScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SweepScope::Global => write!(f, "all blogs"),
            SweepScope::Blog(id) => write!(f, "blog {}", id),
        }
    }
}

/// Something the sweep could not finish. Never stops the rest of the sweep.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", rename_all_fields = "camelCase", tag = "kind")]
pub enum SweepFailure {
    /// Listing this blog's entries failed, so none of them were scanned.
    ListEntries { blog_id: u64, reason: String },
    /// The entry matched but could not be deleted.
    DeleteEntry { entry_id: u64, reason: String },
}

/// Outcome of one sweep.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SweepReport {
    pub scope: SweepScope,
    /// How many entries were checked against the vocabulary.
    pub scanned: usize,
    /// Ids actually deleted, in deletion order.
    pub deleted: Vec<u64>,
    pub failed: Vec<SweepFailure>,
}

impl SweepReport {
    pub fn empty(scope: SweepScope) -> Self {
        Self {
            scope,
            scanned: 0,
            deleted: Vec::new(),
            failed: Vec::new(),
        }
    }

    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn failures_serialize_in_camel_case() {
        let failures = vec![
            SweepFailure::ListEntries {
                blog_id: 2,
                reason: "gone".to_string(),
            },
            SweepFailure::DeleteEntry {
                entry_id: 9,
                reason: "locked".to_string(),
            },
        ];

        assert_eq!(
            serde_json::to_value(&failures).unwrap(),
            json!([
                { "kind": "listEntries", "blogId": 2, "reason": "gone" },
                { "kind": "deleteEntry", "entryId": 9, "reason": "locked" },
            ])
        );
    }

    #[test]
    fn report_scope_serializes_by_variant() {
        let report = SweepReport::empty(SweepScope::Blog(4));
        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["scope"], json!({ "blog": 4 }));
        assert_eq!(value["deleted"], json!([]));
    }
}
