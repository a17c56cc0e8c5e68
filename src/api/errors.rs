// Client-facing errors.
//
// Core errors are converted here, at the boundary. Validation rejections
// become 400s carrying the entity name and reason key; unknown ids become
// 404s; storage trouble becomes a 500.

use super::alerts::Alerts;
use super::response::{ApiResponse, BAD_REQUEST, INTERNAL_SERVER_ERROR, NOT_FOUND};
use crate::core::blogs::{BlogError, ENTRY_ENTITY};
use crate::core::moderation::ModerationError;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{message}")]
    BadRequest {
        message: String,
        entity_name: &'static str,
        error_key: &'static str,
    },

    #[error("No {entity} with id {id}")]
    NotFound { entity: &'static str, id: u64 },

    #[error("Internal error: {0}")]
    Internal(String),
}

/// JSON body sent back with an error response.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    pub title: String,
    pub status: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_key: Option<String>,
}

impl ApiError {
    pub fn bad_request(
        message: impl Into<String>,
        entity_name: &'static str,
        error_key: &'static str,
    ) -> Self {
        ApiError::BadRequest {
            message: message.into(),
            entity_name,
            error_key,
        }
    }

    pub fn status(&self) -> u16 {
        match self {
            ApiError::BadRequest { .. } => BAD_REQUEST,
            ApiError::NotFound { .. } => NOT_FOUND,
            ApiError::Internal(_) => INTERNAL_SERVER_ERROR,
        }
    }

    /// Render as a response. Bad requests get failure-alert headers.
    pub fn to_response(&self, alerts: &Alerts) -> ApiResponse<ErrorBody> {
        let (entity_name, error_key) = match self {
            ApiError::BadRequest {
                entity_name,
                error_key,
                ..
            } => (Some(*entity_name), Some(*error_key)),
            ApiError::NotFound { entity, .. } => (Some(*entity), None),
            ApiError::Internal(_) => (None, None),
        };

        let body = ErrorBody {
            title: self.to_string(),
            status: self.status(),
            entity_name: entity_name.map(str::to_string),
            error_key: error_key.map(str::to_string),
        };

        let response = ApiResponse::with_status(self.status(), Some(body));
        match (entity_name, error_key) {
            (Some(entity), Some(key)) => response.headers(alerts.failure_alert(entity, key)),
            _ => response,
        }
    }
}

impl From<BlogError> for ApiError {
    fn from(err: BlogError) -> Self {
        let message = err.to_string();
        match err {
            BlogError::Rejected(rejection) => {
                ApiError::bad_request(message, ENTRY_ENTITY, rejection.reason_code())
            }
            BlogError::IdExists { entity } => ApiError::bad_request(message, entity, "idexists"),
            BlogError::IdNull { entity } => ApiError::bad_request(message, entity, "idnull"),
            BlogError::NotFound { entity, id } => ApiError::NotFound { entity, id },
            BlogError::Store(e) => ApiError::Internal(e.to_string()),
        }
    }
}

impl From<ModerationError> for ApiError {
    fn from(err: ModerationError) -> Self {
        ApiError::Internal(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::blogs::{Emoji, StoreError};
    use crate::core::moderation::ValidationError;

    #[test]
    fn invalid_emoji_becomes_bad_request_for_entry() {
        let err = ApiError::from(BlogError::Rejected(ValidationError::InvalidEmoji(Emoji::Sad)));
        let response = err.to_response(&Alerts::new("blogApp"));

        assert_eq!(response.status, 400);
        assert_eq!(
            response.headers.get("X-blogApp-error").map(String::as_str),
            Some("error.invalidEmoji")
        );
        let body = response.body.unwrap();
        assert_eq!(body.title, "Invalid Emoji");
        assert_eq!(body.entity_name.as_deref(), Some("entry"));
        assert_eq!(body.error_key.as_deref(), Some("invalidEmoji"));
    }

    #[test]
    fn invalid_content_keeps_its_key() {
        let err = ApiError::from(BlogError::Rejected(ValidationError::InvalidContent {
            marker: "FEAR",
        }));
        assert!(matches!(
            err,
            ApiError::BadRequest {
                error_key: "invalidContent",
                entity_name: "entry",
                ..
            }
        ));
    }

    #[test]
    fn id_checks_map_to_their_keys() {
        let exists = ApiError::from(BlogError::IdExists { entity: "blog" });
        assert!(matches!(
            exists,
            ApiError::BadRequest {
                error_key: "idexists",
                entity_name: "blog",
                ..
            }
        ));
        assert_eq!(exists.to_string(), "A new blog cannot already have an ID");

        let null = ApiError::from(BlogError::IdNull { entity: "entry" });
        assert!(matches!(null, ApiError::BadRequest { error_key: "idnull", .. }));
    }

    #[test]
    fn not_found_and_storage_errors_have_statuses() {
        let missing = ApiError::from(BlogError::NotFound {
            entity: "entry",
            id: 4,
        });
        assert_eq!(missing.status(), 404);
        assert!(missing.to_response(&Alerts::new("a")).headers.is_empty());

        let broken = ApiError::from(BlogError::Store(StoreError::StorageError("boom".into())));
        assert_eq!(broken.status(), 500);
    }
}
