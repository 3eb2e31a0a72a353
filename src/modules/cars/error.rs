use rental_http::error::AppError;
use thiserror::Error;

/// A rejected car operation, surfaced to clients by name and message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{name}: {message}")]
pub struct OperationFailure {
    pub name: String,
    pub message: String,
}

impl OperationFailure {
    pub fn new(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::new("ValidationError", message)
    }

    pub fn not_found(id: &str) -> Self {
        Self::new("NotFoundError", format!("car with id '{}' not found", id))
    }
}

impl From<OperationFailure> for AppError {
    fn from(failure: OperationFailure) -> Self {
        AppError::unprocessable(failure.name, failure.message)
    }
}
