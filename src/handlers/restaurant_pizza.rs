//! /restaurant_pizzas handler.

use super::json_body;
use crate::error::AppError;
use crate::response::created;
use crate::service::{body_to_map, RestaurantPizzaService};
use crate::state::AppState;
use axum::{
    extract::{rejection::JsonRejection, State},
    response::IntoResponse,
    Json,
};
use serde_json::Value;

pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let body = body_to_map(json_body(payload)?)?;
    let entry = RestaurantPizzaService::create(state.store.as_ref(), &body).await?;
    Ok(created(entry))
}
