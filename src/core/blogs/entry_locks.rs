// Per-entry write locks shared by every service that writes entries.
//
// A lock exists in the map only while someone holds or waits on it. The
// guard removes the slot on drop once it is the last user, so ids that are
// never seen again (unknown ids, purged entries) leave nothing behind.

use dashmap::DashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};

#[derive(Default)]
pub struct EntryLocks {
    locks: DashMap<u64, Arc<Mutex<()>>>,
}

impl EntryLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait for exclusive access to entry `id`.
    pub async fn lock(&self, id: u64) -> EntryGuard<'_> {
        let slot = self
            .locks
            .entry(id)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();

        EntryGuard {
            locks: self,
            id,
            guard: Some(slot.lock_owned().await),
        }
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.locks.len()
    }
}

/// Held for the duration of one validated write or delete.
pub struct EntryGuard<'a> {
    locks: &'a EntryLocks,
    id: u64,
    guard: Option<OwnedMutexGuard<()>>,
}

impl Drop for EntryGuard<'_> {
    fn drop(&mut self) {
        // Release first so our own handle no longer counts.
        self.guard.take();
        // Slot clones are only taken under the shard lock, so a count of 1
        // means no one else holds or waits on it.
        self.locks
            .locks
            .remove_if(&self.id, |_, slot| Arc::strong_count(slot) == 1);
    }
}
