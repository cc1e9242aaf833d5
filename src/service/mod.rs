//! Services: validate payloads, call the store and shape views.

mod pizzas;
mod restaurant_pizzas;
mod restaurants;
pub mod validation;

pub use pizzas::{PizzaService, PIZZA_NOT_FOUND};
pub use restaurant_pizzas::RestaurantPizzaService;
pub use restaurants::{RestaurantService, RESTAURANT_NOT_FOUND};
pub use validation::RequestValidator;

use crate::error::AppError;
use serde_json::{Map, Value};

/// Request bodies must be JSON objects.
pub fn body_to_map(value: Value) -> Result<Map<String, Value>, AppError> {
    match value {
        Value::Object(m) => Ok(m),
        _ => Err(AppError::BadRequest("Request body must be a JSON object.".into())),
    }
}
