//! HTTP handlers for restaurants, pizzas and menu entries.

pub mod pizza;
pub mod restaurant;
pub mod restaurant_pizza;

use crate::error::AppError;
use crate::model::RecordId;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::Json;
use serde_json::Value;

/// Ids are integers; anything else cannot name a record, so it is reported as not found.
pub(crate) fn parse_id(id_str: &str, not_found: &str) -> Result<RecordId, AppError> {
    id_str
        .parse::<RecordId>()
        .map_err(|_| AppError::NotFound(not_found.to_string()))
}

/// Turns a JSON extractor rejection into an `errors` body: 413 when the body hit the size limit
/// while being buffered, 400 for everything else (bad syntax, wrong content type).
pub(crate) fn json_body(payload: Result<Json<Value>, JsonRejection>) -> Result<Value, AppError> {
    payload.map(|Json(v)| v).map_err(|rejection| {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            AppError::PayloadTooLarge(rejection.body_text())
        } else {
            AppError::BadRequest(rejection.body_text())
        }
    })
}
