// The core module contains all business logic.
// Each feature gets its own submodule.

#[path = "blogs/mod.rs"]
pub mod blogs;

#[path = "moderation/mod.rs"]
pub mod moderation;
