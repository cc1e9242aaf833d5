//! Resource routes for restaurants, pizzas and menu entries.

use crate::handlers::{pizza, restaurant, restaurant_pizza};
use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};

pub fn api_routes(state: AppState) -> Router {
    Router::new()
        .route("/restaurants", get(restaurant::list).post(restaurant::create))
        .route(
            "/restaurants/:id",
            get(restaurant::read).put(restaurant::update).delete(restaurant::delete),
        )
        .route("/pizzas", get(pizza::list).post(pizza::create))
        .route(
            "/pizzas/:id",
            get(pizza::read).put(pizza::update).delete(pizza::delete),
        )
        .route("/restaurant_pizzas", post(restaurant_pizza::create))
        .with_state(state)
}
