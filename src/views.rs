//! Response shapes, one struct per (entity, detail level).

use crate::model::{Pizza, RecordId, Restaurant, RestaurantPizza};
use serde::Serialize;

#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct RestaurantSummary {
    pub id: RecordId,
    pub name: String,
    pub address: String,
}

/// Restaurant with its menu entries; only served by `GET /restaurants/{id}`.
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct RestaurantDetail {
    pub id: RecordId,
    pub name: String,
    pub address: String,
    pub restaurant_pizzas: Vec<RestaurantPizzaDetail>,
}

#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct PizzaSummary {
    pub id: RecordId,
    pub name: String,
    pub ingredients: String,
}

#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct RestaurantPizzaDetail {
    pub id: RecordId,
    pub price: i32,
    pub pizza_id: RecordId,
    pub restaurant_id: RecordId,
    pub pizza: PizzaSummary,
    pub restaurant: RestaurantSummary,
}

impl From<&Restaurant> for RestaurantSummary {
    fn from(r: &Restaurant) -> Self {
        RestaurantSummary {
            id: r.id,
            name: r.name.clone(),
            address: r.address.clone(),
        }
    }
}

impl From<Restaurant> for RestaurantSummary {
    fn from(r: Restaurant) -> Self {
        RestaurantSummary {
            id: r.id,
            name: r.name,
            address: r.address,
        }
    }
}

impl From<Pizza> for PizzaSummary {
    fn from(p: Pizza) -> Self {
        PizzaSummary {
            id: p.id,
            name: p.name,
            ingredients: p.ingredients,
        }
    }
}

impl RestaurantPizzaDetail {
    pub fn new(entry: RestaurantPizza, pizza: Pizza, restaurant: &Restaurant) -> Self {
        RestaurantPizzaDetail {
            id: entry.id,
            price: entry.price,
            pizza_id: entry.pizza_id,
            restaurant_id: entry.restaurant_id,
            pizza: pizza.into(),
            restaurant: restaurant.into(),
        }
    }
}

impl RestaurantDetail {
    pub fn new(restaurant: Restaurant, entries: Vec<(RestaurantPizza, Pizza)>) -> Self {
        let restaurant_pizzas = entries
            .into_iter()
            .map(|(entry, pizza)| RestaurantPizzaDetail::new(entry, pizza, &restaurant))
            .collect();
        RestaurantDetail {
            id: restaurant.id,
            name: restaurant.name,
            address: restaurant.address,
            restaurant_pizzas,
        }
    }
}
