use axum::extract::rejection::StringRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use margin_core::ShareError;
use thiserror::Error;
use tracing::error;

use crate::model::ErrorResponse;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Share(#[from] ShareError),
    #[error("unreadable request body: {0}")]
    Body(#[from] StringRejection),
    #[error("route not found")]
    RouteNotFound,
}

impl AppError {
    fn parts(&self) -> (StatusCode, &'static str, String) {
        match self {
            AppError::Share(ShareError::EmptyDocument) => (
                StatusCode::BAD_REQUEST,
                "invalid_request",
                "Markdown content is required".to_string(),
            ),
            AppError::Share(ShareError::InvalidCode(reason)) => (
                StatusCode::BAD_REQUEST,
                "invalid_code",
                format!("Invalid share code: {reason}"),
            ),
            AppError::Share(ShareError::NotFound) => (
                StatusCode::NOT_FOUND,
                "not_found",
                "Share not found or has expired".to_string(),
            ),
            AppError::Share(ShareError::CollisionExhausted { attempts }) => {
                error!(attempts, "share code space exhausted for this request");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "service_unavailable",
                    "Could not allocate a share code, please try again".to_string(),
                )
            }
            AppError::Share(ShareError::Storage(source)) => {
                error!(error = %source, "share storage failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "storage_error",
                    "Failed to access share storage".to_string(),
                )
            }
            AppError::Body(rejection) => {
                (rejection.status(), "invalid_request", rejection.body_text())
            }
            AppError::RouteNotFound => (
                StatusCode::NOT_FOUND,
                "not_found",
                "Route not found".to_string(),
            ),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, message) = self.parts();
        let body = ErrorResponse {
            error: error.to_string(),
            message,
        };
        (status, Json(body)).into_response()
    }
}
