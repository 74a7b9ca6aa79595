use lambda_http::http::StatusCode;
use lambda_http::{Body, Response};
use thiserror::Error;
use tracing::error;

use crate::response;

/// Request faults, mapped to HTTP status codes at the router boundary.
///
/// Storage detail is logged but never returned to the caller.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    NotFound(String),
    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

impl ApiError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn into_response(self, allow_methods: &str) -> Response<Body> {
        let message = match &self {
            Self::Storage(err) => {
                error!("storage operation failed: {err:#}");
                "internal server error".to_string()
            }
            other => other.to_string(),
        };
        response::error(self.status(), allow_methods, &message)
    }
}
