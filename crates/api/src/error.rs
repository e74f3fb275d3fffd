use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_with::skip_serializing_none;

/// JSON error body: `{"error": ..., "error_description": ...}`. `error` is a fixed short phrase per
/// failure kind; the description carries the specifics.
#[skip_serializing_none]
#[derive(Serialize, Debug)]
pub struct ApiError {
    pub error: &'static str,
    #[serde(rename = "error_description")]
    pub description: Option<String>,
    #[serde(skip_serializing)]
    pub status_code: StatusCode,
}

impl ApiError {
    pub fn new(status_code: StatusCode, error: &'static str) -> Self {
        ApiError {
            error,
            description: None,
            status_code,
        }
    }

    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status_code, Json(self)).into_response()
    }
}
