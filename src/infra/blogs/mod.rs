// Implementations of the blog store.

pub mod in_memory;
pub mod sqlite_store;

// Re-export for convenience
#[allow(unused_imports)]
pub use in_memory::InMemoryBlogStore;
pub use sqlite_store::SqliteBlogStore;
