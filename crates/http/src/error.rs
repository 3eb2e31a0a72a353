//! Error handling for the HTTP layer
//!
//! Every error leaves the server in the same envelope:
//! `{ "error": { "name": "...", "message": "..." } }`.

use axum::{
    http::{HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

/// Header carrying the id that ties an error response to its log line
pub const ERROR_ID_HEADER: &str = "x-error-id";

/// Standard error envelope for all HTTP errors
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub name: String,
    pub message: String,
}

/// Application error types that map to HTTP responses
#[derive(Error, Debug)]
pub enum AppError {
    /// A domain operation was rejected (validation, missing record, store failure)
    #[error("{name}: {message}")]
    Unprocessable { name: String, message: String },

    #[error("not found: {message}")]
    NotFound { message: String },

    #[error("bad request: {message}")]
    BadRequest { message: String },

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Create an unprocessable-entity error carrying the failure's own name
    pub fn unprocessable(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Unprocessable {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Create a not found error
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    /// Create a bad request error
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest {
            message: message.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Unprocessable { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let error_id = Uuid::new_v4();
        let status = self.status();

        let (name, message) = match self {
            AppError::Unprocessable { name, message } => (name, message),
            AppError::NotFound { message } => ("NotFoundError".to_string(), message),
            AppError::BadRequest { message } => ("BadRequestError".to_string(), message),
            AppError::Internal(e) => ("InternalServerError".to_string(), format!("{:#}", e)),
        };

        tracing::error!(
            error_id = %error_id,
            error_name = %name,
            status_code = %status.as_u16(),
            message = %message,
            "Request error"
        );

        // Internal details stay in the log for release builds
        let message = if cfg!(not(debug_assertions)) && status == StatusCode::INTERNAL_SERVER_ERROR
        {
            "An internal server error occurred".to_string()
        } else {
            message
        };

        let body = ErrorResponse {
            error: ErrorBody { name, message },
        };

        let mut response = (status, Json(body)).into_response();
        if let Ok(value) = HeaderValue::from_str(&error_id.to_string()) {
            response.headers_mut().insert(ERROR_ID_HEADER, value);
        }
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use serde_json::{json, Value};

    async fn body_json(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_unprocessable_keeps_failure_name() {
        let response =
            AppError::unprocessable("ValidationError", "price is required").into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert!(response.headers().contains_key(ERROR_ID_HEADER));
        assert_eq!(
            body_json(response).await,
            json!({"error": {"name": "ValidationError", "message": "price is required"}})
        );
    }

    #[tokio::test]
    async fn test_bad_request_mapping() {
        let response = AppError::bad_request("page must be at least 1").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await,
            json!({"error": {"name": "BadRequestError", "message": "page must be at least 1"}})
        );
    }

    #[test]
    fn test_error_response_mapping() {
        let error = AppError::not_found("Resource not found");
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_internal_error_mapping() {
        let internal_error = anyhow::anyhow!("store connection failed");
        let error = AppError::Internal(internal_error);
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_json(response).await;
        assert_eq!(body["error"]["name"], "InternalServerError");
        if cfg!(debug_assertions) {
            assert_eq!(body["error"]["message"], "store connection failed");
        }
    }
}
