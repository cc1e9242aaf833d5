//! Creating menu entries (a restaurant selling a pizza at a price).

use super::validation::RequestValidator;
use crate::error::AppError;
use crate::model::NewRestaurantPizza;
use crate::store::Store;
use crate::views::RestaurantPizzaDetail;
use serde_json::{Map, Value};

pub struct RestaurantPizzaService;

impl RestaurantPizzaService {
    /// Checks run in a fixed order: presence (itemized errors), then price and references
    /// (collapsed into one generic error), then uniqueness (left to the store's unique key).
    pub async fn create(store: &dyn Store, body: &Map<String, Value>) -> Result<RestaurantPizzaDetail, AppError> {
        let request = RequestValidator::restaurant_pizza_request(body)?;

        let pizza = match request.pizza_id {
            Some(id) => store.pizza(id).await?,
            None => None,
        };
        let restaurant = match request.restaurant_id {
            Some(id) => store.restaurant(id).await?,
            None => None,
        };

        let errors = RequestValidator::restaurant_pizza_errors(&request.price, pizza.is_some(), restaurant.is_some());
        let (pizza, restaurant) = match (pizza, restaurant) {
            (Some(p), Some(r)) if errors.is_empty() => (p, r),
            _ => {
                tracing::warn!(?errors, "restaurant pizza rejected");
                return Err(AppError::collapsed_validation());
            }
        };

        let new = NewRestaurantPizza::new(&request.price, pizza.id, restaurant.id)?;
        let entry = store.insert_restaurant_pizza(&new).await?;
        tracing::info!(id = entry.id, pizza_id = pizza.id, restaurant_id = restaurant.id, "restaurant pizza created");
        Ok(RestaurantPizzaDetail::new(entry, pizza, &restaurant))
    }
}
