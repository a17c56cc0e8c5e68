// Shared state handed to every resource handler.

use super::alerts::Alerts;
use crate::core::blogs::{BlogService, BlogStore};
use crate::core::moderation::ModerationService;
use std::sync::Arc;

/// One store instance shared by both services.
pub type SharedStore = Arc<dyn BlogStore>;

pub struct AppState {
    pub alerts: Alerts,
    pub blogs: Arc<BlogService<SharedStore>>,
    pub moderation: Arc<ModerationService<SharedStore>>,
}

impl AppState {
    /// Wire both services onto `store`. `app_name` only shows up in alert headers.
    ///
    /// Both services take the same per-entry locks, so a sweep's delete
    /// never lands between an update's validation and its save.
    pub fn new(app_name: impl Into<String>, store: SharedStore) -> Self {
        let blogs = BlogService::new(store.clone());
        let moderation = ModerationService::new(store, blogs.entry_locks());
        Self {
            alerts: Alerts::new(app_name),
            blogs: Arc::new(blogs),
            moderation: Arc::new(moderation),
        }
    }
}
