// Sweep selection - which entries a cleanup run must purge.
//
// Pure decision over a slice of entries. Loading and deleting is done by
// the moderation service through the store.

use super::lexicon::{first_marker_in, GLOBAL_CLEANUP_MARKERS, SCOPED_CLEANUP_MARKERS};
use super::moderation_models::SweepScope;
use crate::core::blogs::Entry;

impl SweepScope {
    /// The cleanup vocabulary for this scope.
    pub fn markers(&self) -> &'static [&'static str] {
        match self {
            SweepScope::Global => GLOBAL_CLEANUP_MARKERS,
            SweepScope::Blog(_) => SCOPED_CLEANUP_MARKERS,
        }
    }
}

/// Does this entry hit the scope's vocabulary? Content is checked before title.
pub fn matches_scope(scope: SweepScope, entry: &Entry) -> bool {
    let markers = scope.markers();
    first_marker_in(&entry.content, markers).is_some()
        || first_marker_in(&entry.title, markers).is_some()
}

/// Ids of the entries to purge, in the order the entries were given.
///
/// Unsaved entries (no id) cannot be deleted and are skipped.
pub fn select_for_purge(scope: SweepScope, entries: &[Entry]) -> Vec<u64> {
    entries
        .iter()
        .filter(|entry| matches_scope(scope, entry))
        .filter_map(|entry| entry.id)
        .collect()
}
