// Storage port for blogs and entries.
//
// The core only ever talks to storage through this trait. Both the blog
// service (validated writes) and the moderation service (sweeps) share one
// implementation of it.

use super::blog_models::{Blog, Entry};
use async_trait::async_trait;
use std::sync::Arc;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Storage error: {0}")]
    StorageError(String),
}

/// Access façade over blog and entry records.
///
/// Listings come back in ascending id order so sweeps are deterministic.
#[async_trait]
pub trait BlogStore: Send + Sync {
    /// Look up one blog. `None` when no blog has this id.
    async fn get_blog(&self, id: u64) -> Result<Option<Blog>, StoreError>;

    async fn list_all_blogs(&self) -> Result<Vec<Blog>, StoreError>;

    /// Insert when `blog.id` is `None`, overwrite otherwise. Returns the stored blog.
    async fn save_blog(&self, blog: Blog) -> Result<Blog, StoreError>;

    /// Remove a blog together with its entries. `false` if it did not exist.
    async fn delete_blog(&self, id: u64) -> Result<bool, StoreError>;

    async fn get_entry(&self, id: u64) -> Result<Option<Entry>, StoreError>;

    async fn list_all_entries(&self) -> Result<Vec<Entry>, StoreError>;

    async fn list_entries_by_blog(&self, blog_id: u64) -> Result<Vec<Entry>, StoreError>;

    /// Insert when `entry.id` is `None`, overwrite otherwise.
    /// Callers must have run polarity validation first.
    async fn save_entry(&self, entry: Entry) -> Result<Entry, StoreError>;

    /// Idempotent: deleting a missing id returns `Ok(false)`.
    async fn delete_entry(&self, id: u64) -> Result<bool, StoreError>;
}

// Lets both services hold the same `Arc<dyn BlogStore>`.
#[async_trait]
impl<T: BlogStore + ?Sized> BlogStore for Arc<T> {
    async fn get_blog(&self, id: u64) -> Result<Option<Blog>, StoreError> {
        (**self).get_blog(id).await
    }

    async fn list_all_blogs(&self) -> Result<Vec<Blog>, StoreError> {
        (**self).list_all_blogs().await
    }

    async fn save_blog(&self, blog: Blog) -> Result<Blog, StoreError> {
        (**self).save_blog(blog).await
    }

    async fn delete_blog(&self, id: u64) -> Result<bool, StoreError> {
        (**self).delete_blog(id).await
    }

    async fn get_entry(&self, id: u64) -> Result<Option<Entry>, StoreError> {
        (**self).get_entry(id).await
    }

    async fn list_all_entries(&self) -> Result<Vec<Entry>, StoreError> {
        (**self).list_all_entries().await
    }

    async fn list_entries_by_blog(&self, blog_id: u64) -> Result<Vec<Entry>, StoreError> {
        (**self).list_entries_by_blog(blog_id).await
    }

    async fn save_entry(&self, entry: Entry) -> Result<Entry, StoreError> {
        (**self).save_entry(entry).await
    }

    async fn delete_entry(&self, id: u64) -> Result<bool, StoreError> {
        (**self).delete_entry(id).await
    }
}
