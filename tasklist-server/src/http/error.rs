//! API error types with IntoResponse
//!
//! Errors are converted to JSON responses with appropriate status codes.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::error::{ConfigError, StoreError};
use crate::models::ValidationError;

/// API error type with automatic HTTP status mapping
#[derive(Debug)]
pub enum ApiError {
    /// Validation failed (400)
    Validation(ValidationError),

    /// Request body could not be decoded (status from the rejection)
    InvalidBody(JsonRejection),

    /// Resource not found (404)
    NotFound { resource: &'static str, id: String },

    /// Connection string missing or unusable (500, logged)
    Configuration(ConfigError),

    /// Database or network failure (500, logged)
    Database(sqlx::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            Self::Validation(e) => (
                StatusCode::BAD_REQUEST,
                json!({
                    "error": "validation_error",
                    "message": e.to_string()
                }),
            ),
            Self::InvalidBody(rejection) => (
                rejection.status(),
                json!({
                    "error": "invalid_body",
                    "message": rejection.body_text()
                }),
            ),
            Self::NotFound { resource, id } => (
                StatusCode::NOT_FOUND,
                json!({
                    "error": "not_found",
                    "message": format!("{} '{}' not found", resource, id)
                }),
            ),
            Self::Configuration(e) => {
                tracing::error!("Configuration error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({
                        "error": "configuration_error",
                        "message": e.to_string()
                    }),
                )
            }
            Self::Database(e) => {
                tracing::error!("Database error: {}", e);
                let mut body = json!({
                    "error": "database_error",
                    "message": e.to_string()
                });
                if cfg!(debug_assertions) {
                    body["trace"] = json!(format!("{:?}", e));
                }
                (StatusCode::INTERNAL_SERVER_ERROR, body)
            }
        };

        (status, Json(body)).into_response()
    }
}

impl From<ValidationError> for ApiError {
    fn from(e: ValidationError) -> Self {
        Self::Validation(e)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(e: JsonRejection) -> Self {
        Self::InvalidBody(e)
    }
}

impl From<ConfigError> for ApiError {
    fn from(e: ConfigError) -> Self {
        Self::Configuration(e)
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(e: sqlx::Error) -> Self {
        Self::Database(e)
    }
}

impl From<StoreError> for ApiError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound { id } => Self::NotFound {
                resource: "task",
                id: id.to_string(),
            },
            StoreError::Config(e) => Self::Configuration(e),
            StoreError::Connectivity(e) => Self::Database(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn validation_error_is_400() {
        let err = ApiError::Validation(ValidationError::Empty { field: "title" });
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn missing_task_is_404_with_message() {
        let err: ApiError = StoreError::NotFound { id: 999 }.into();
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = body_json(response).await;
        assert_eq!(body["error"], "not_found");
        assert_eq!(body["message"], "task '999' not found");
    }

    #[tokio::test]
    async fn configuration_error_is_500_with_detail() {
        let err: ApiError = StoreError::Config(ConfigError::MissingConnectionString {
            names: "DATABASE_URL, POSTGRES_URL".into(),
        })
        .into();
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_json(response).await;
        assert_eq!(body["error"], "configuration_error");
        assert!(body["message"].as_str().unwrap().contains("DATABASE_URL"));
    }

    #[tokio::test]
    async fn database_error_is_500_with_message() {
        let err: ApiError = StoreError::Connectivity(sqlx::Error::PoolTimedOut).into();
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_json(response).await;
        assert_eq!(body["error"], "database_error");
        assert!(body["message"].as_str().unwrap().contains("pool timed out"));
        assert_eq!(body.get("trace").is_some(), cfg!(debug_assertions));
    }
}
