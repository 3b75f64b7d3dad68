//! HTTP boundary errors and their status mapping.

use actix_web::{HttpResponse, ResponseError};
use thiserror::Error;

use footfall_core::StorageError;

/// Request-level errors surfaced as HTTP responses.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Data not found for the given parameters")]
    NoData,

    #[error("Invalid or missing Authorization header")]
    Unauthorized,

    #[error("Invalid token")]
    Forbidden,

    #[error("Only 'json' format is supported, got '{0}'")]
    UnsupportedFormat(String),

    #[error("Summary file not found")]
    SummaryMissing,

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Blocking worker canceled")]
    WorkerCanceled,
}

#[derive(serde::Serialize)]
struct ErrorResponse {
    error: String,
    code: &'static str,
}

impl ResponseError for ApiError {
    fn error_response(&self) -> HttpResponse {
        match self {
            ApiError::NoData => HttpResponse::NotFound().json(ErrorResponse {
                error: self.to_string(),
                code: "NO_DATA",
            }),
            ApiError::SummaryMissing => HttpResponse::NotFound().json(ErrorResponse {
                error: self.to_string(),
                code: "SUMMARY_MISSING",
            }),
            ApiError::UnsupportedFormat(_) => HttpResponse::BadRequest().json(ErrorResponse {
                error: self.to_string(),
                code: "UNSUPPORTED_FORMAT",
            }),
            ApiError::Unauthorized => HttpResponse::Unauthorized().json(ErrorResponse {
                error: self.to_string(),
                code: "UNAUTHORIZED",
            }),
            ApiError::Forbidden => HttpResponse::Forbidden().json(ErrorResponse {
                error: self.to_string(),
                code: "FORBIDDEN",
            }),
            ApiError::Storage(_) | ApiError::WorkerCanceled => {
                HttpResponse::InternalServerError().json(ErrorResponse {
                    error: "Internal server error".to_string(),
                    code: "INTERNAL_ERROR",
                })
            }
        }
    }
}

/// Result type alias for handler functions.
pub type ApiResult<T> = Result<T, ApiError>;
