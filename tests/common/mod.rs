//! In-memory `Store` and request helpers for router tests.

#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use pizza_api::error::AppError;
use pizza_api::model::{NewPizza, NewRestaurant, NewRestaurantPizza, Pizza, RecordId, Restaurant, RestaurantPizza};
use pizza_api::{app, AppState, Store};
use serde_json::Value;
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

#[derive(Default)]
struct Tables {
    restaurants: Vec<Restaurant>,
    pizzas: Vec<Pizza>,
    restaurant_pizzas: Vec<RestaurantPizza>,
    // per-table sequences, like BIGSERIAL
    restaurant_seq: RecordId,
    pizza_seq: RecordId,
    restaurant_pizza_seq: RecordId,
}

fn next(seq: &mut RecordId) -> RecordId {
    *seq += 1;
    *seq
}

/// Mirrors the PostgreSQL schema: cascading deletes, foreign keys and the (pizza, restaurant) unique key.
#[derive(Clone, Default)]
pub struct MemoryStore {
    tables: Arc<Mutex<Tables>>,
    unavailable: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose every call fails like a lost connection.
    pub fn unavailable() -> Self {
        MemoryStore {
            unavailable: true,
            ..Self::default()
        }
    }

    pub fn restaurant_pizza_count(&self) -> usize {
        self.tables.lock().unwrap().restaurant_pizzas.len()
    }

    fn tables(&self) -> Result<std::sync::MutexGuard<'_, Tables>, AppError> {
        if self.unavailable {
            return Err(AppError::Db(sqlx::Error::PoolTimedOut));
        }
        Ok(self.tables.lock().unwrap())
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn ping(&self) -> Result<(), AppError> {
        self.tables().map(|_| ())
    }

    async fn list_restaurants(&self) -> Result<Vec<Restaurant>, AppError> {
        Ok(self.tables()?.restaurants.clone())
    }

    async fn restaurant(&self, id: RecordId) -> Result<Option<Restaurant>, AppError> {
        Ok(self.tables()?.restaurants.iter().find(|r| r.id == id).cloned())
    }

    async fn restaurant_pizzas_for(&self, restaurant_id: RecordId) -> Result<Vec<(RestaurantPizza, Pizza)>, AppError> {
        let t = self.tables()?;
        Ok(t.restaurant_pizzas
            .iter()
            .filter(|rp| rp.restaurant_id == restaurant_id)
            .filter_map(|rp| {
                t.pizzas
                    .iter()
                    .find(|p| p.id == rp.pizza_id)
                    .map(|p| (rp.clone(), p.clone()))
            })
            .collect())
    }

    async fn insert_restaurant(&self, new: &NewRestaurant) -> Result<Restaurant, AppError> {
        let mut t = self.tables()?;
        let row = Restaurant {
            id: next(&mut t.restaurant_seq),
            name: new.name.clone(),
            address: new.address.clone(),
        };
        t.restaurants.push(row.clone());
        Ok(row)
    }

    async fn update_restaurant(&self, restaurant: &Restaurant) -> Result<Option<Restaurant>, AppError> {
        let mut t = self.tables()?;
        Ok(t.restaurants.iter_mut().find(|r| r.id == restaurant.id).map(|r| {
            *r = restaurant.clone();
            r.clone()
        }))
    }

    async fn delete_restaurant(&self, id: RecordId) -> Result<bool, AppError> {
        let mut t = self.tables()?;
        let before = t.restaurants.len();
        t.restaurants.retain(|r| r.id != id);
        t.restaurant_pizzas.retain(|rp| rp.restaurant_id != id);
        Ok(t.restaurants.len() != before)
    }

    async fn list_pizzas(&self) -> Result<Vec<Pizza>, AppError> {
        Ok(self.tables()?.pizzas.clone())
    }

    async fn pizza(&self, id: RecordId) -> Result<Option<Pizza>, AppError> {
        Ok(self.tables()?.pizzas.iter().find(|p| p.id == id).cloned())
    }

    async fn insert_pizza(&self, new: &NewPizza) -> Result<Pizza, AppError> {
        let mut t = self.tables()?;
        let row = Pizza {
            id: next(&mut t.pizza_seq),
            name: new.name.clone(),
            ingredients: new.ingredients.clone(),
        };
        t.pizzas.push(row.clone());
        Ok(row)
    }

    async fn update_pizza(&self, pizza: &Pizza) -> Result<Option<Pizza>, AppError> {
        let mut t = self.tables()?;
        Ok(t.pizzas.iter_mut().find(|p| p.id == pizza.id).map(|p| {
            *p = pizza.clone();
            p.clone()
        }))
    }

    async fn delete_pizza(&self, id: RecordId) -> Result<bool, AppError> {
        let mut t = self.tables()?;
        let before = t.pizzas.len();
        t.pizzas.retain(|p| p.id != id);
        t.restaurant_pizzas.retain(|rp| rp.pizza_id != id);
        Ok(t.pizzas.len() != before)
    }

    async fn insert_restaurant_pizza(&self, new: &NewRestaurantPizza) -> Result<RestaurantPizza, AppError> {
        let mut t = self.tables()?;
        if !t.pizzas.iter().any(|p| p.id == new.pizza_id) || !t.restaurants.iter().any(|r| r.id == new.restaurant_id) {
            return Err(AppError::collapsed_validation());
        }
        if t
            .restaurant_pizzas
            .iter()
            .any(|rp| rp.pizza_id == new.pizza_id && rp.restaurant_id == new.restaurant_id)
        {
            return Err(AppError::duplicate_restaurant_pizza());
        }
        let row = RestaurantPizza {
            id: next(&mut t.restaurant_pizza_seq),
            price: new.price.get(),
            pizza_id: new.pizza_id,
            restaurant_id: new.restaurant_id,
        };
        t.restaurant_pizzas.push(row.clone());
        Ok(row)
    }
}

pub struct TestApp {
    pub router: Router,
    pub store: MemoryStore,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_store(MemoryStore::new())
    }

    pub fn with_store(store: MemoryStore) -> Self {
        let router = app(AppState::new(store.clone()), 64 * 1024);
        TestApp { router, store }
    }

    /// Sends a request and returns the status with the body parsed as JSON (`Null` when empty).
    pub async fn send(&self, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let (status, bytes) = self.send_raw(method, uri, body.map(|b| b.to_string())).await;
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
        };
        (status, json)
    }

    pub async fn send_raw(&self, method: Method, uri: &str, body: Option<String>) -> (StatusCode, Vec<u8>) {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(b) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(b)
            }
            None => Body::empty(),
        };
        let resp = self.router.clone().oneshot(builder.body(body).unwrap()).await.unwrap();
        let status = resp.status();
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        (status, bytes.to_vec())
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.send(Method::GET, uri, None).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.send(Method::POST, uri, Some(body)).await
    }

    pub async fn put(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.send(Method::PUT, uri, Some(body)).await
    }

    pub async fn delete(&self, uri: &str) -> (StatusCode, Value) {
        self.send(Method::DELETE, uri, None).await
    }

    pub async fn create_restaurant(&self, name: &str, address: &str) -> RecordId {
        let (status, body) = self
            .post("/restaurants", serde_json::json!({ "name": name, "address": address }))
            .await;
        assert_eq!(status, StatusCode::CREATED, "{}", body);
        body["id"].as_i64().unwrap()
    }

    pub async fn create_pizza(&self, name: &str, ingredients: &str) -> RecordId {
        let (status, body) = self
            .post("/pizzas", serde_json::json!({ "name": name, "ingredients": ingredients }))
            .await;
        assert_eq!(status, StatusCode::CREATED, "{}", body);
        body["id"].as_i64().unwrap()
    }
}
