//! Restaurant CRUD.

use super::validation::{RequestValidator, RESTAURANT_FIELDS};
use crate::error::AppError;
use crate::model::{NewRestaurant, RecordId, Restaurant};
use crate::store::Store;
use crate::views::{RestaurantDetail, RestaurantSummary};
use serde_json::{Map, Value};

pub const RESTAURANT_NOT_FOUND: &str = "Restaurant not found";

pub struct RestaurantService;

impl RestaurantService {
    pub async fn list(store: &dyn Store) -> Result<Vec<RestaurantSummary>, AppError> {
        let rows = store.list_restaurants().await?;
        Ok(rows.into_iter().map(RestaurantSummary::from).collect())
    }

    /// Restaurant with its menu entries, each carrying pizza and restaurant summaries.
    pub async fn read(store: &dyn Store, id: RecordId) -> Result<RestaurantDetail, AppError> {
        let restaurant = Self::find(store, id).await?;
        let entries = store.restaurant_pizzas_for(id).await?;
        Ok(RestaurantDetail::new(restaurant, entries))
    }

    pub async fn create(store: &dyn Store, body: &Map<String, Value>) -> Result<RestaurantSummary, AppError> {
        let [name, address] = RequestValidator::validate_create(body, &RESTAURANT_FIELDS)?;
        let row = store.insert_restaurant(&NewRestaurant { name, address }).await?;
        tracing::info!(id = row.id, "restaurant created");
        Ok(row.into())
    }

    /// Partial update of a row already loaded with [`RestaurantService::find`], so an unknown id
    /// is reported before the payload is even parsed.
    pub async fn update(
        store: &dyn Store,
        current: Restaurant,
        body: &Map<String, Value>,
    ) -> Result<RestaurantSummary, AppError> {
        let id = current.id;
        let [name, address] =
            RequestValidator::validate_update(body, &RESTAURANT_FIELDS, [current.name.as_str(), current.address.as_str()])?;
        let row = store
            .update_restaurant(&Restaurant { id, name, address })
            .await?
            .ok_or_else(not_found)?;
        Ok(row.into())
    }

    pub async fn delete(store: &dyn Store, id: RecordId) -> Result<(), AppError> {
        if !store.delete_restaurant(id).await? {
            return Err(not_found());
        }
        tracing::info!(id, "restaurant deleted");
        Ok(())
    }

    pub async fn find(store: &dyn Store, id: RecordId) -> Result<Restaurant, AppError> {
        store.restaurant(id).await?.ok_or_else(not_found)
    }
}

fn not_found() -> AppError {
    AppError::NotFound(RESTAURANT_NOT_FOUND.into())
}
