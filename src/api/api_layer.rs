// API layer - resource handlers and the response types they produce.
//
// No transport here: handlers take the shared state plus plain domain
// values and return an ApiResponse or an ApiError. The CLI in main.rs is
// the only caller today.

pub mod alerts;
pub mod app_state;
pub mod blog_resource;
pub mod entry_resource;
pub mod errors;
pub mod response;

// Re-export the types callers need most
pub use app_state::AppState;
pub use errors::ApiError;
pub use response::ApiResponse;
