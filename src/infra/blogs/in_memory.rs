// In-memory implementation of BlogStore.
//
// Used by the tests and anywhere a throwaway store is good enough.
// Ids come from a counter per table, so they start at 1 and are never reused.

use crate::core::blogs::{Blog, BlogStore, Entry, StoreError};
use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};

/// Blogs and entries kept in two concurrent maps.
///
/// **DashMap:**
/// A concurrent HashMap that's safe to share across async tasks without a
/// Mutex. Listings are sorted by id on the way out, since DashMap iteration
/// order is arbitrary.
#[allow(dead_code)]
pub struct InMemoryBlogStore {
    blogs: DashMap<u64, Blog>,
    entries: DashMap<u64, Entry>,
    next_blog_id: AtomicU64,
    next_entry_id: AtomicU64,
}

#[allow(dead_code)]
impl InMemoryBlogStore {
    pub fn new() -> Self {
        Self {
            blogs: DashMap::new(),
            entries: DashMap::new(),
            next_blog_id: AtomicU64::new(1),
            next_entry_id: AtomicU64::new(1),
        }
    }

    fn sorted_entries(&self, keep: impl Fn(&Entry) -> bool) -> Vec<Entry> {
        let mut entries: Vec<Entry> = self
            .entries
            .iter()
            .filter(|item| keep(item.value()))
            .map(|item| item.value().clone())
            .collect();
        entries.sort_by_key(|entry| entry.id);
        entries
    }
}

#[async_trait]
impl BlogStore for InMemoryBlogStore {
    async fn get_blog(&self, id: u64) -> Result<Option<Blog>, StoreError> {
        Ok(self.blogs.get(&id).map(|blog| blog.clone()))
    }

    async fn list_all_blogs(&self) -> Result<Vec<Blog>, StoreError> {
        let mut blogs: Vec<Blog> = self.blogs.iter().map(|item| item.value().clone()).collect();
        blogs.sort_by_key(|blog| blog.id);
        Ok(blogs)
    }

    async fn save_blog(&self, mut blog: Blog) -> Result<Blog, StoreError> {
        let id = match blog.id {
            Some(id) => id,
            None => self.next_blog_id.fetch_add(1, Ordering::SeqCst),
        };
        blog.id = Some(id);
        self.blogs.insert(id, blog.clone());
        Ok(blog)
    }

    async fn delete_blog(&self, id: u64) -> Result<bool, StoreError> {
        let removed = self.blogs.remove(&id).is_some();
        if removed {
            self.entries.retain(|_, entry| entry.blog_id != id);
        }
        Ok(removed)
    }

    async fn get_entry(&self, id: u64) -> Result<Option<Entry>, StoreError> {
        Ok(self.entries.get(&id).map(|entry| entry.clone()))
    }

    async fn list_all_entries(&self) -> Result<Vec<Entry>, StoreError> {
        Ok(self.sorted_entries(|_| true))
    }

    async fn list_entries_by_blog(&self, blog_id: u64) -> Result<Vec<Entry>, StoreError> {
        Ok(self.sorted_entries(|entry| entry.blog_id == blog_id))
    }

    async fn save_entry(&self, mut entry: Entry) -> Result<Entry, StoreError> {
        let id = match entry.id {
            Some(id) => id,
            None => self.next_entry_id.fetch_add(1, Ordering::SeqCst),
        };
        entry.id = Some(id);
        self.entries.insert(id, entry.clone());
        Ok(entry)
    }

    async fn delete_entry(&self, id: u64) -> Result<bool, StoreError> {
        Ok(self.entries.remove(&id).is_some())
    }
}

impl Default for InMemoryBlogStore {
    fn default() -> Self {
        Self::new()
    }
}
