// Transport-agnostic response: a status code, headers and an optional body.

use super::alerts::Headers;
use serde::Serialize;

pub const OK: u16 = 200;
pub const CREATED: u16 = 201;
pub const NO_CONTENT: u16 = 204;
pub const BAD_REQUEST: u16 = 400;
pub const NOT_FOUND: u16 = 404;
pub const INTERNAL_SERVER_ERROR: u16 = 500;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApiResponse<T> {
    pub status: u16,
    #[serde(skip_serializing_if = "Headers::is_empty")]
    pub headers: Headers,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn with_status(status: u16, body: Option<T>) -> Self {
        Self {
            status,
            headers: Headers::new(),
            body,
        }
    }

    pub fn ok(body: T) -> Self {
        Self::with_status(OK, Some(body))
    }

    pub fn created(body: T) -> Self {
        Self::with_status(CREATED, Some(body))
    }

    pub fn no_content() -> Self {
        Self::with_status(NO_CONTENT, None)
    }

    /// Add headers, keeping any already present.
    pub fn headers(mut self, headers: Headers) -> Self {
        self.headers.extend(headers);
        self
    }
}
