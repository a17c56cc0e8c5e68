// Entry resource handlers.
//
// Create and update go through the validated write path in the blog
// service; a rejection comes back as a 400 and nothing is stored.

use super::app_state::AppState;
use super::errors::ApiError;
use super::response::ApiResponse;
use crate::core::blogs::{Entry, ENTRY_ENTITY};

/// `POST entries`
pub async fn create_entry(state: &AppState, entry: Entry) -> Result<ApiResponse<Entry>, ApiError> {
    tracing::debug!(?entry, "Request to save Entry");
    let result = state.blogs.create_entry(entry).await?;
    let id = result.id.map(|id| id.to_string()).unwrap_or_default();

    Ok(ApiResponse::created(result).headers(state.alerts.entity_creation_alert(ENTRY_ENTITY, &id)))
}

/// `PUT entries`
pub async fn update_entry(state: &AppState, entry: Entry) -> Result<ApiResponse<Entry>, ApiError> {
    tracing::debug!(?entry, "Request to update Entry");
    let result = state.blogs.update_entry(entry).await?;
    let id = result.id.map(|id| id.to_string()).unwrap_or_default();

    Ok(ApiResponse::ok(result).headers(state.alerts.entity_update_alert(ENTRY_ENTITY, &id)))
}

/// `GET entries`, optionally narrowed to one blog.
pub async fn get_all_entries(
    state: &AppState,
    blog_id: Option<u64>,
) -> Result<ApiResponse<Vec<Entry>>, ApiError> {
    tracing::debug!(?blog_id, "Request to get Entries");
    let entries = match blog_id {
        Some(blog_id) => state.blogs.list_entries_by_blog(blog_id).await?,
        None => state.blogs.list_entries().await?,
    };
    Ok(ApiResponse::ok(entries))
}

/// `GET entries/{id}`
pub async fn get_entry(state: &AppState, id: u64) -> Result<ApiResponse<Entry>, ApiError> {
    tracing::debug!(id, "Request to get Entry");
    state
        .blogs
        .get_entry(id)
        .await?
        .map(ApiResponse::ok)
        .ok_or(ApiError::NotFound {
            entity: ENTRY_ENTITY,
            id,
        })
}

/// `DELETE entries/{id}`
pub async fn delete_entry(state: &AppState, id: u64) -> Result<ApiResponse<()>, ApiError> {
    tracing::debug!(id, "Request to delete Entry");
    if !state.blogs.delete_entry(id).await? {
        return Err(ApiError::NotFound {
            entity: ENTRY_ENTITY,
            id,
        });
    }
    Ok(ApiResponse::no_content()
        .headers(state.alerts.entity_deletion_alert(ENTRY_ENTITY, &id.to_string())))
}
