// This is the blogs module - CRUD for blogs and entries.
//
// Entry writes are the interesting part: every create and update resolves
// the parent blog fresh from the store and runs polarity validation before
// anything is saved. A rejected entry is never written, not even partially.

use super::blog_models::{Blog, Entry};
use super::blog_store::{BlogStore, StoreError};
use super::entry_locks::EntryLocks;
use crate::core::moderation::{validate, ValidationError};
use std::sync::Arc;
use thiserror::Error;

pub const BLOG_ENTITY: &str = "blog";
pub const ENTRY_ENTITY: &str = "entry";

// ============================================================================
// ERRORS
// ============================================================================

#[derive(Debug, Error)]
pub enum BlogError {
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("No {entity} with id {id}")]
    NotFound { entity: &'static str, id: u64 },

    #[error("A new {entity} cannot already have an ID")]
    IdExists { entity: &'static str },

    #[error("Invalid id")]
    IdNull { entity: &'static str },

    #[error(transparent)]
    Rejected(#[from] ValidationError),
}

// ============================================================================
// CORE SERVICE
// ============================================================================

/// Blog and entry management with the validated entry write path.
pub struct BlogService<S: BlogStore> {
    store: S,
    /// Held from the existence check until the save returns. Shared with
    /// anything else that deletes entries.
    entry_locks: Arc<EntryLocks>,
}

impl<S: BlogStore> BlogService<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            entry_locks: Arc::new(EntryLocks::new()),
        }
    }

    /// Locks held by entry writes. Hand these to anything else that deletes entries.
    pub fn entry_locks(&self) -> Arc<EntryLocks> {
        self.entry_locks.clone()
    }

    // ------------------------------------------------------------------------
    // Blogs
    // ------------------------------------------------------------------------

    pub async fn create_blog(&self, blog: Blog) -> Result<Blog, BlogError> {
        if blog.id.is_some() {
            return Err(BlogError::IdExists {
                entity: BLOG_ENTITY,
            });
        }
        let saved = self.store.save_blog(blog).await?;
        tracing::info!(blog_id = ?saved.id, polarity = %saved.polarity, "Created blog");
        Ok(saved)
    }

    pub async fn update_blog(&self, blog: Blog) -> Result<Blog, BlogError> {
        let id = blog.id.ok_or(BlogError::IdNull {
            entity: BLOG_ENTITY,
        })?;
        if self.store.get_blog(id).await?.is_none() {
            return Err(BlogError::NotFound {
                entity: BLOG_ENTITY,
                id,
            });
        }
        Ok(self.store.save_blog(blog).await?)
    }

    pub async fn get_blog(&self, id: u64) -> Result<Option<Blog>, BlogError> {
        Ok(self.store.get_blog(id).await?)
    }

    pub async fn list_blogs(&self) -> Result<Vec<Blog>, BlogError> {
        Ok(self.store.list_all_blogs().await?)
    }

    /// Deletes the blog and all of its entries. `false` if there was no such blog.
    pub async fn delete_blog(&self, id: u64) -> Result<bool, BlogError> {
        Ok(self.store.delete_blog(id).await?)
    }

    // ------------------------------------------------------------------------
    // Entries
    // ------------------------------------------------------------------------

    pub async fn create_entry(&self, entry: Entry) -> Result<Entry, BlogError> {
        if entry.id.is_some() {
            return Err(BlogError::IdExists {
                entity: ENTRY_ENTITY,
            });
        }
        let saved = self.validate_and_save(entry).await?;
        tracing::info!(entry_id = ?saved.id, blog_id = saved.blog_id, "Created entry");
        Ok(saved)
    }

    /// Re-validates against the entry's (possibly new) parent blog.
    pub async fn update_entry(&self, entry: Entry) -> Result<Entry, BlogError> {
        let id = entry.id.ok_or(BlogError::IdNull {
            entity: ENTRY_ENTITY,
        })?;

        let _guard = self.entry_locks.lock(id).await;

        if self.store.get_entry(id).await?.is_none() {
            return Err(BlogError::NotFound {
                entity: ENTRY_ENTITY,
                id,
            });
        }
        self.validate_and_save(entry).await
    }

    pub async fn get_entry(&self, id: u64) -> Result<Option<Entry>, BlogError> {
        Ok(self.store.get_entry(id).await?)
    }

    pub async fn list_entries(&self) -> Result<Vec<Entry>, BlogError> {
        Ok(self.store.list_all_entries().await?)
    }

    pub async fn list_entries_by_blog(&self, blog_id: u64) -> Result<Vec<Entry>, BlogError> {
        Ok(self.store.list_entries_by_blog(blog_id).await?)
    }

    /// `false` if there was no such entry.
    pub async fn delete_entry(&self, id: u64) -> Result<bool, BlogError> {
        let _guard = self.entry_locks.lock(id).await;
        Ok(self.store.delete_entry(id).await?)
    }

    async fn validate_and_save(&self, entry: Entry) -> Result<Entry, BlogError> {
        let parent = self.store.get_blog(entry.blog_id).await?;
        if let Err(rejection) = validate(&entry, parent.as_ref()) {
            tracing::warn!(
                entry_id = ?entry.id,
                blog_id = entry.blog_id,
                reason = rejection.reason_code(),
                "Rejected entry write"
            );
            return Err(rejection.into());
        }
        Ok(self.store.save_entry(entry).await?)
    }
}

// ============================================================================
// TESTS
// ============================================================================
