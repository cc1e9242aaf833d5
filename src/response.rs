//! Response helpers. Bodies are returned bare (no envelope) to stay wire-compatible with existing clients.

use axum::{http::StatusCode, Json};
use serde::Serialize;

#[derive(Serialize, Debug)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Serialize, Debug)]
pub struct ErrorsBody {
    pub errors: Vec<String>,
}

pub fn created<T: Serialize>(data: T) -> (StatusCode, Json<T>) {
    (StatusCode::CREATED, Json(data))
}

pub fn ok<T: Serialize>(data: T) -> (StatusCode, Json<T>) {
    (StatusCode::OK, Json(data))
}

pub fn error_body(message: String) -> ErrorBody {
    ErrorBody { error: message }
}

pub fn errors_body(errors: Vec<String>) -> ErrorsBody {
    ErrorsBody { errors }
}
