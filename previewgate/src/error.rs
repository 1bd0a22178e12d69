//! Startup and transport-level errors — distinct from
//! [`previewgate_core::PipelineError`], which covers per-request outcomes.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use previewgate_core::PipelineError;

/// A thin local wrapper so the dispatcher can implement
/// [`ResponseError`] for a foreign type (§10.4 "sole translation site").
#[derive(Debug, thiserror::Error)]
#[error(transparent)]
pub struct ApiError(#[from] pub PipelineError);

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.0.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).body(self.0.to_string())
    }
}

#[derive(thiserror::Error, Debug)]
pub enum BootError {
    #[error("failed to read or parse configuration: {0}")]
    ConfigError(#[from] config::ConfigError),

    #[error("configured minimum_resolution must be a positive integer, got {0}")]
    InvalidMinimumResolution(u32),

    #[error("configured log_path '{0}' does not exist")]
    LogPathMissing(String),

    #[error("unable to bind to {1}: {0}")]
    BindingError(#[source] std::io::Error, String),

    #[error(transparent)]
    WebError(#[from] actix_web::Error),

    #[error(transparent)]
    IoError(#[from] std::io::Error),
}

pub type BootResult<T> = Result<T, BootError>;
