//! Persistence seam. Handlers receive a `Store` through `AppState`; there is no global connection.

mod postgres;

pub use postgres::{ensure_database_exists, PgStore};

use crate::error::AppError;
use crate::model::{NewPizza, NewRestaurant, NewRestaurantPizza, Pizza, RecordId, Restaurant, RestaurantPizza};
use async_trait::async_trait;

/// Record storage. Each write is atomic: it either commits fully or leaves the store unchanged.
///
/// Deleting a restaurant or a pizza must also remove its menu entries.
/// `insert_restaurant_pizza` must reject a second entry for the same (pizza, restaurant) pair
/// with [`AppError::duplicate_restaurant_pizza`].
#[async_trait]
pub trait Store: Send + Sync {
    /// Cheap liveness probe used by `/ready`.
    async fn ping(&self) -> Result<(), AppError>;

    async fn list_restaurants(&self) -> Result<Vec<Restaurant>, AppError>;
    async fn restaurant(&self, id: RecordId) -> Result<Option<Restaurant>, AppError>;
    /// Menu entries of a restaurant with their pizza, ordered by entry id.
    async fn restaurant_pizzas_for(&self, restaurant_id: RecordId) -> Result<Vec<(RestaurantPizza, Pizza)>, AppError>;
    async fn insert_restaurant(&self, new: &NewRestaurant) -> Result<Restaurant, AppError>;
    /// Overwrites name and address. Returns None if the row no longer exists.
    async fn update_restaurant(&self, restaurant: &Restaurant) -> Result<Option<Restaurant>, AppError>;
    /// Returns false if nothing was deleted.
    async fn delete_restaurant(&self, id: RecordId) -> Result<bool, AppError>;

    async fn list_pizzas(&self) -> Result<Vec<Pizza>, AppError>;
    async fn pizza(&self, id: RecordId) -> Result<Option<Pizza>, AppError>;
    async fn insert_pizza(&self, new: &NewPizza) -> Result<Pizza, AppError>;
    async fn update_pizza(&self, pizza: &Pizza) -> Result<Option<Pizza>, AppError>;
    async fn delete_pizza(&self, id: RecordId) -> Result<bool, AppError>;

    async fn insert_restaurant_pizza(&self, new: &NewRestaurantPizza) -> Result<RestaurantPizza, AppError>;
}
