// Blog resource handlers, including the two cleanup sweeps.
//
// **Notice the pattern:**
// 1. Check the request shape
// 2. Call core service
// 3. Wrap the result with status and alert headers
//
// This layer is THIN - no business logic, just translation.

use super::app_state::AppState;
use super::errors::ApiError;
use super::response::ApiResponse;
use crate::core::blogs::{Blog, BLOG_ENTITY};
use crate::core::moderation::SweepReport;

/// `POST blogs`
pub async fn create_blog(state: &AppState, blog: Blog) -> Result<ApiResponse<Blog>, ApiError> {
    tracing::debug!(?blog, "Request to save Blog");
    let result = state.blogs.create_blog(blog).await?;
    let id = result.id.map(|id| id.to_string()).unwrap_or_default();

    Ok(ApiResponse::created(result).headers(state.alerts.entity_creation_alert(BLOG_ENTITY, &id)))
}

/// `PUT blogs`
pub async fn update_blog(state: &AppState, blog: Blog) -> Result<ApiResponse<Blog>, ApiError> {
    tracing::debug!(?blog, "Request to update Blog");
    let result = state.blogs.update_blog(blog).await?;
    let id = result.id.map(|id| id.to_string()).unwrap_or_default();

    Ok(ApiResponse::ok(result).headers(state.alerts.entity_update_alert(BLOG_ENTITY, &id)))
}

/// `GET blogs`
pub async fn get_all_blogs(state: &AppState) -> Result<ApiResponse<Vec<Blog>>, ApiError> {
    tracing::debug!("Request to get all Blogs");
    Ok(ApiResponse::ok(state.blogs.list_blogs().await?))
}

/// `GET blogs/{id}`
pub async fn get_blog(state: &AppState, id: u64) -> Result<ApiResponse<Blog>, ApiError> {
    tracing::debug!(id, "Request to get Blog");
    state
        .blogs
        .get_blog(id)
        .await?
        .map(ApiResponse::ok)
        .ok_or(ApiError::NotFound {
            entity: BLOG_ENTITY,
            id,
        })
}

/// `DELETE blogs/{id}`
pub async fn delete_blog(state: &AppState, id: u64) -> Result<ApiResponse<()>, ApiError> {
    tracing::debug!(id, "Request to delete Blog");
    if !state.blogs.delete_blog(id).await? {
        return Err(ApiError::NotFound {
            entity: BLOG_ENTITY,
            id,
        });
    }
    Ok(ApiResponse::no_content()
        .headers(state.alerts.entity_deletion_alert(BLOG_ENTITY, &id.to_string())))
}

/// `DELETE blogs/clean` - global sweep over every blog.
pub async fn clean_blogs(state: &AppState) -> Result<ApiResponse<SweepReport>, ApiError> {
    tracing::debug!("Request to clean Blogs");
    let report = state.moderation.clean_all().await?;
    if !report.is_clean() {
        tracing::warn!(failures = report.failed.len(), "Global sweep left work undone");
    }
    Ok(ApiResponse::ok(report).headers(state.alerts.entity_deletion_alert(BLOG_ENTITY, "")))
}

/// `DELETE blogs/{id}/clean` - scoped sweep over one blog.
pub async fn clean_blog(state: &AppState, id: u64) -> Result<ApiResponse<SweepReport>, ApiError> {
    tracing::debug!(id, "Request to clean Blog");
    let report = state.moderation.clean_blog(id).await?;
    if !report.is_clean() {
        tracing::warn!(id, failures = report.failed.len(), "Blog sweep left work undone");
    }
    Ok(ApiResponse::ok(report)
        .headers(state.alerts.entity_deletion_alert(BLOG_ENTITY, &id.to_string())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::entry_resource::create_entry;
    use crate::core::blogs::{Emoji, Entry, Polarity};
    use crate::infra::blogs::InMemoryBlogStore;
    use std::sync::Arc;

    fn state() -> AppState {
        AppState::new("blogApp", Arc::new(InMemoryBlogStore::new()))
    }

    async fn new_blog(state: &AppState, polarity: Polarity) -> u64 {
        create_blog(state, Blog::new("b", "b", polarity))
            .await
            .unwrap()
            .body
            .unwrap()
            .id
            .unwrap()
    }

    #[tokio::test]
    async fn test_create_blog_returns_created_with_alert() {
        let state = state();
        let response = create_blog(&state, Blog::new("Sunny", "sunny", Polarity::Positive))
            .await
            .unwrap();

        assert_eq!(response.status, 201);
        assert_eq!(
            response.headers.get("X-blogApp-alert").map(String::as_str),
            Some("A new blog is created with identifier 1")
        );
        assert_eq!(response.body.unwrap().polarity, Polarity::Positive);
    }

    #[tokio::test]
    async fn test_create_blog_with_id_is_bad_request() {
        let state = state();
        let mut blog = Blog::new("x", "x", Polarity::Unset);
        blog.id = Some(3);

        let err = create_blog(&state, blog).await.unwrap_err();
        assert!(matches!(err, ApiError::BadRequest { error_key: "idexists", .. }));
    }

    #[tokio::test]
    async fn test_get_and_delete_unknown_blog_are_not_found() {
        let state = state();
        assert_eq!(get_blog(&state, 8).await.unwrap_err().status(), 404);
        assert_eq!(delete_blog(&state, 8).await.unwrap_err().status(), 404);
    }

    #[tokio::test]
    async fn test_delete_blog_is_no_content() {
        let state = state();
        let id = new_blog(&state, Polarity::Unset).await;

        let response = delete_blog(&state, id).await.unwrap();
        assert_eq!(response.status, 204);
        assert!(response.body.is_none());
        assert!(get_all_blogs(&state).await.unwrap().body.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_clean_endpoints_use_their_own_vocabulary() {
        let state = state();
        let id = new_blog(&state, Polarity::Unset).await;
        for (title, content) in [("", "this is rubbish"), ("lol", ""), ("", "fine")] {
            create_entry(&state, Entry::new(id, title, content, Emoji::Like))
                .await
                .unwrap();
        }

        let global = clean_blogs(&state).await.unwrap();
        assert_eq!(global.status, 200);
        assert_eq!(global.body.unwrap().deleted, vec![1]);

        let scoped = clean_blog(&state, id).await.unwrap();
        assert_eq!(
            scoped.headers.get("X-blogApp-params").map(String::as_str),
            Some("1")
        );
        assert_eq!(scoped.body.unwrap().deleted, vec![2]);
    }
}
