pub mod blog_models;
pub mod blog_service;
pub mod blog_store;
pub mod entry_locks;

pub use blog_models::{Blog, Emoji, Entry, Polarity};
pub use blog_service::{BlogError, BlogService, BLOG_ENTITY, ENTRY_ENTITY};
pub use blog_store::{BlogStore, StoreError};
pub use entry_locks::EntryLocks;
