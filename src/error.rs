//! Error handling for the application

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::pricing::responses::PricingErrorResponse;
use crate::pricing::PricingError;

/// Application error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error(transparent)]
    Pricing(#[from] PricingError),
}

impl AppError {
    fn status_and_type(&self) -> (StatusCode, &'static str) {
        match self {
            AppError::Database(_) => (StatusCode::INTERNAL_SERVER_ERROR, "database_error"),
            AppError::Validation(_) => (StatusCode::UNPROCESSABLE_ENTITY, "validation_error"),
            AppError::Pricing(PricingError::UnknownRoute { .. })
            | AppError::Pricing(PricingError::UnknownBus { .. }) => {
                (StatusCode::NOT_FOUND, "unknown_reference")
            }
            AppError::Pricing(PricingError::ReferenceLookup { .. }) => {
                (StatusCode::SERVICE_UNAVAILABLE, "reference_lookup_failed")
            }
            AppError::Pricing(PricingError::ConfigurationError { .. }) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "configuration_error")
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_type) = self.status_and_type();

        let (message, details) = match &self {
            AppError::Database(e) => {
                tracing::error!("Database error: {}", e);
                ("Database error".to_string(), None)
            }
            AppError::Pricing(err @ PricingError::ConfigurationError { errors, .. }) => {
                tracing::error!("Pricing configuration error: {}", err);
                (err.to_string(), Some(serde_json::json!({ "errors": errors })))
            }
            AppError::Pricing(err @ PricingError::ReferenceLookup { .. }) => {
                tracing::warn!("Reference lookup failed: {}", err);
                (err.to_string(), None)
            }
            other => (other.to_string(), None),
        };

        let body = PricingErrorResponse {
            error_type: error_type.to_string(),
            message,
            details,
        };

        (status, Json(body)).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
