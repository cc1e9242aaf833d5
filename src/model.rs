//! Persistent records and the values needed to create them.

use crate::error::DomainError;
use serde_json::Value;

pub type RecordId = i64;

pub const MIN_PRICE: i64 = 1;
pub const MAX_PRICE: i64 = 30;

#[derive(Clone, Debug, PartialEq, Eq, sqlx::FromRow)]
pub struct Restaurant {
    pub id: RecordId,
    pub name: String,
    pub address: String,
}

#[derive(Clone, Debug, PartialEq, Eq, sqlx::FromRow)]
pub struct Pizza {
    pub id: RecordId,
    pub name: String,
    pub ingredients: String,
}

#[derive(Clone, Debug, PartialEq, Eq, sqlx::FromRow)]
pub struct RestaurantPizza {
    pub id: RecordId,
    pub price: i32,
    pub pizza_id: RecordId,
    pub restaurant_id: RecordId,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewRestaurant {
    pub name: String,
    pub address: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewPizza {
    pub name: String,
    pub ingredients: String,
}

/// An integer price within [`MIN_PRICE`, `MAX_PRICE`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Price(i32);

impl Price {
    /// Accepts JSON integers only; floats (even `10.0`), strings, booleans and null are rejected.
    pub fn from_json(value: &Value) -> Result<Self, DomainError> {
        match value {
            Value::Number(n) if n.is_i64() => Price::try_from(n.as_i64().unwrap_or_default()),
            Value::Number(n) if n.is_u64() => Err(DomainError::PriceOutOfRange),
            _ => Err(DomainError::PriceNotInteger),
        }
    }

    pub fn get(self) -> i32 {
        self.0
    }
}

impl TryFrom<i64> for Price {
    type Error = DomainError;

    fn try_from(n: i64) -> Result<Self, Self::Error> {
        if (MIN_PRICE..=MAX_PRICE).contains(&n) {
            Ok(Price(n as i32))
        } else {
            Err(DomainError::PriceOutOfRange)
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewRestaurantPizza {
    pub price: Price,
    pub pizza_id: RecordId,
    pub restaurant_id: RecordId,
}

impl NewRestaurantPizza {
    /// Re-checks the raw price even if the request was validated upstream.
    pub fn new(price: &Value, pizza_id: RecordId, restaurant_id: RecordId) -> Result<Self, DomainError> {
        Ok(NewRestaurantPizza {
            price: Price::from_json(price)?,
            pizza_id,
            restaurant_id,
        })
    }
}
