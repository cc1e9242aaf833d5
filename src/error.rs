//! Typed errors and HTTP mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::response::{error_body, errors_body};

/// Generic marker returned when association validation fails (the itemized list is only logged).
pub const COLLAPSED_VALIDATION_MESSAGE: &str = "validation errors";

/// Message returned when a menu entry already exists for a (pizza, restaurant) pair.
pub const DUPLICATE_RESTAURANT_PIZZA: &str = "RestaurantPizza already exists for this pizza and restaurant.";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid value for {var}: '{value}'")]
    Invalid { var: &'static str, value: String },
    #[error("invalid DATABASE_URL: {0}")]
    DatabaseUrl(String),
}

/// Rules enforced when a menu entry is constructed, independently of request validation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Price must be an integer.")]
    PriceNotInteger,
    #[error("Price must be between 1 and 30.")]
    PriceOutOfRange,
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("validation: {}", .0.join("; "))]
    Validation(Vec<String>),
    #[error("database: {0}")]
    Db(#[from] sqlx::Error),
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("payload too large: {0}")]
    PayloadTooLarge(String),
}

impl AppError {
    pub fn validation(message: impl Into<String>) -> Self {
        AppError::Validation(vec![message.into()])
    }

    /// The association endpoint reports every validation failure as a single generic marker.
    pub fn collapsed_validation() -> Self {
        AppError::validation(COLLAPSED_VALIDATION_MESSAGE)
    }

    pub fn duplicate_restaurant_pizza() -> Self {
        AppError::Conflict(DUPLICATE_RESTAURANT_PIZZA.to_string())
    }
}

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        AppError::validation(err.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::NotFound(message) => (StatusCode::NOT_FOUND, Json(error_body(message))).into_response(),
            AppError::Validation(errors) => (StatusCode::BAD_REQUEST, Json(errors_body(errors))).into_response(),
            AppError::Conflict(message) | AppError::BadRequest(message) => {
                (StatusCode::BAD_REQUEST, Json(errors_body(vec![message]))).into_response()
            }
            AppError::PayloadTooLarge(message) => {
                (StatusCode::PAYLOAD_TOO_LARGE, Json(errors_body(vec![message]))).into_response()
            }
            AppError::Db(e) => {
                tracing::error!(error = %e, "database error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(error_body("internal server error".into())),
                )
                    .into_response()
            }
            AppError::Config(e) => {
                tracing::error!(error = %e, "configuration error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(error_body("internal server error".into())),
                )
                    .into_response()
            }
        }
    }
}
