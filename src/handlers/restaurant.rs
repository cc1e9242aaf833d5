//! /restaurants handlers.

use super::{json_body, parse_id};
use crate::error::AppError;
use crate::response::{created, ok};
use crate::service::{body_to_map, RestaurantService, RESTAURANT_NOT_FOUND};
use crate::state::AppState;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::Value;

pub async fn list(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let rows = RestaurantService::list(state.store.as_ref()).await?;
    Ok(ok(rows))
}

pub async fn read(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str, RESTAURANT_NOT_FOUND)?;
    let detail = RestaurantService::read(state.store.as_ref(), id).await?;
    Ok(ok(detail))
}

pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let body = body_to_map(json_body(payload)?)?;
    let row = RestaurantService::create(state.store.as_ref(), &body).await?;
    Ok(created(row))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str, RESTAURANT_NOT_FOUND)?;
    // unknown id wins over a bad payload
    let current = RestaurantService::find(state.store.as_ref(), id).await?;
    let body = body_to_map(json_body(payload)?)?;
    let row = RestaurantService::update(state.store.as_ref(), current, &body).await?;
    Ok(ok(row))
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str, RESTAURANT_NOT_FOUND)?;
    RestaurantService::delete(state.store.as_ref(), id).await?;
    Ok(StatusCode::NO_CONTENT)
}
