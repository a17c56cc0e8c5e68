// Moderation service - runs cleanup sweeps against the store.
//
// This service handles:
// - Global cleanup (every blog, global vocabulary)
// - Per-blog cleanup (one blog, scoped vocabulary)
//
// Which entries go is decided by the sweeper; this file only loads
// candidates and issues deletes. Each delete runs under the same per-entry
// lock as validated writes, and the entry is re-read under that lock so an
// edit that landed after the listing is judged on its new text. A failed
// delete is recorded and the sweep carries on with the next entry.

use super::moderation_models::{SweepFailure, SweepReport, SweepScope};
use super::sweeper::select_for_purge;
use crate::core::blogs::{BlogStore, Entry, EntryLocks, StoreError};
use std::sync::Arc;
use thiserror::Error;

// ============================================================================
// ERRORS
// ============================================================================

#[derive(Debug, Error)]
pub enum ModerationError {
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

// ============================================================================
// CORE SERVICE
// ============================================================================

/// Cleanup sweeps over blog entries.
pub struct ModerationService<S: BlogStore> {
    store: S,
    entry_locks: Arc<EntryLocks>,
}

impl<S: BlogStore> ModerationService<S> {
    /// `entry_locks` must be the ones the validated write path takes.
    pub fn new(store: S, entry_locks: Arc<EntryLocks>) -> Self {
        Self { store, entry_locks }
    }

    /// Purge entries containing global-cleanup words from every blog.
    ///
    /// Fails only if the blog list itself cannot be read. A blog whose
    /// entries cannot be listed is skipped and noted in the report.
    pub async fn clean_all(&self) -> Result<SweepReport, ModerationError> {
        let scope = SweepScope::Global;
        let mut report = SweepReport::empty(scope);

        for blog in self.store.list_all_blogs().await? {
            let Some(blog_id) = blog.id else { continue };

            match self.store.list_entries_by_blog(blog_id).await {
                Ok(entries) => self.purge(scope, &entries, &mut report).await,
                Err(e) => {
                    tracing::warn!(blog_id, error = %e, "Skipping blog in global sweep");
                    report.failed.push(SweepFailure::ListEntries {
                        blog_id,
                        reason: e.to_string(),
                    });
                }
            }
        }

        tracing::info!(
            scanned = report.scanned,
            deleted = report.deleted.len(),
            failed = report.failed.len(),
            "Global sweep finished"
        );
        Ok(report)
    }

    /// Purge entries containing scoped-cleanup words from one blog.
    ///
    /// An unknown blog id simply has no entries to scan.
    pub async fn clean_blog(&self, blog_id: u64) -> Result<SweepReport, ModerationError> {
        let scope = SweepScope::Blog(blog_id);
        let mut report = SweepReport::empty(scope);

        let entries = self.store.list_entries_by_blog(blog_id).await?;
        self.purge(scope, &entries, &mut report).await;

        tracing::info!(
            blog_id,
            scanned = report.scanned,
            deleted = report.deleted.len(),
            failed = report.failed.len(),
            "Blog sweep finished"
        );
        Ok(report)
    }

    /// Delete every selected entry, one at a time, in candidate order.
    async fn purge(&self, scope: SweepScope, entries: &[Entry], report: &mut SweepReport) {
        report.scanned += entries.len();

        for entry_id in select_for_purge(scope, entries) {
            match self.purge_one(scope, entry_id).await {
                Ok(true) => {
                    tracing::debug!(entry_id, %scope, "Purged entry");
                    report.deleted.push(entry_id);
                }
                Ok(false) => {}
                Err(e) => {
                    tracing::warn!(entry_id, error = %e, "Failed to purge entry");
                    report.failed.push(SweepFailure::DeleteEntry {
                        entry_id,
                        reason: e.to_string(),
                    });
                }
            }
        }
    }

    /// `Ok(false)` if the entry is gone or was edited clean since the listing.
    async fn purge_one(&self, scope: SweepScope, entry_id: u64) -> Result<bool, StoreError> {
        let _guard = self.entry_locks.lock(entry_id).await;

        let Some(current) = self.store.get_entry(entry_id).await? else {
            return Ok(false);
        };
        if select_for_purge(scope, std::slice::from_ref(&current)).is_empty() {
            tracing::debug!(entry_id, %scope, "Entry no longer matches, keeping it");
            return Ok(false);
        }
        self.store.delete_entry(entry_id).await
    }
}

// ============================================================================
// TESTS
// ============================================================================
