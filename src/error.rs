use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use thiserror::Error;

use crate::models::ErrorResponse;

/// Failures talking to the upstream provider. These never reach a caller: the client
/// logs them and answers with an empty result set.
#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("network error: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("upstream returned status {0}")]
    Status(reqwest::StatusCode),
    #[error("undecodable upstream payload: {0}")]
    Decode(#[source] reqwest::Error),
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    NotFound(String),
    #[error("storage failure: {0:#}")]
    Storage(#[from] anyhow::Error),
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let body = match self {
            AppError::Validation(details) => {
                ErrorResponse::with_details("Invalid request", details.clone())
            }
            AppError::NotFound(details) => ErrorResponse::new(details.clone()),
            // Internal details stay in the logs.
            AppError::Storage(_) => ErrorResponse::new(
                "An unexpected error occurred. Please check the logs.",
            ),
        };
        HttpResponse::build(self.status_code()).json(body)
    }
}
