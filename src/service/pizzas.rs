//! Pizza CRUD. Reads never include menu entries.

use super::validation::{RequestValidator, PIZZA_FIELDS};
use crate::error::AppError;
use crate::model::{NewPizza, Pizza, RecordId};
use crate::store::Store;
use crate::views::PizzaSummary;
use serde_json::{Map, Value};

pub const PIZZA_NOT_FOUND: &str = "Pizza not found";

pub struct PizzaService;

impl PizzaService {
    pub async fn list(store: &dyn Store) -> Result<Vec<PizzaSummary>, AppError> {
        let rows = store.list_pizzas().await?;
        Ok(rows.into_iter().map(PizzaSummary::from).collect())
    }

    pub async fn read(store: &dyn Store, id: RecordId) -> Result<PizzaSummary, AppError> {
        Self::find(store, id).await.map(PizzaSummary::from)
    }

    pub async fn create(store: &dyn Store, body: &Map<String, Value>) -> Result<PizzaSummary, AppError> {
        let [name, ingredients] = RequestValidator::validate_create(body, &PIZZA_FIELDS)?;
        let row = store.insert_pizza(&NewPizza { name, ingredients }).await?;
        tracing::info!(id = row.id, "pizza created");
        Ok(row.into())
    }

    pub async fn find(store: &dyn Store, id: RecordId) -> Result<Pizza, AppError> {
        store.pizza(id).await?.ok_or_else(not_found)
    }

    /// Partial update of a row loaded with [`PizzaService::find`].
    pub async fn update(store: &dyn Store, current: Pizza, body: &Map<String, Value>) -> Result<PizzaSummary, AppError> {
        let id = current.id;
        let [name, ingredients] =
            RequestValidator::validate_update(body, &PIZZA_FIELDS, [current.name.as_str(), current.ingredients.as_str()])?;
        let row = store
            .update_pizza(&Pizza { id, name, ingredients })
            .await?
            .ok_or_else(not_found)?;
        Ok(row.into())
    }

    pub async fn delete(store: &dyn Store, id: RecordId) -> Result<(), AppError> {
        if !store.delete_pizza(id).await? {
            return Err(not_found());
        }
        tracing::info!(id, "pizza deleted");
        Ok(())
    }
}

fn not_found() -> AppError {
    AppError::NotFound(PIZZA_NOT_FOUND.into())
}
