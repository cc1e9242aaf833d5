//! Request payload validation.

use crate::error::AppError;
use crate::model::{Price, RecordId};
use serde_json::{Map, Value};

/// The two required text columns of an entity and the messages used when they are blank.
pub struct TextFields {
    pub names: [&'static str; 2],
    pub required_message: &'static str,
    pub not_empty_message: &'static str,
}

pub const RESTAURANT_FIELDS: TextFields = TextFields {
    names: ["name", "address"],
    required_message: "Name and address are required.",
    not_empty_message: "Name and address cannot be empty.",
};

pub const PIZZA_FIELDS: TextFields = TextFields {
    names: ["name", "ingredients"],
    required_message: "Name and ingredients are required.",
    not_empty_message: "Name and ingredients cannot be empty.",
};

pub const RESTAURANT_PIZZA_FIELDS: [&str; 3] = ["price", "pizza_id", "restaurant_id"];

pub const UNKNOWN_PIZZA: &str = "Pizza not found.";
pub const UNKNOWN_RESTAURANT: &str = "Restaurant not found.";

/// Raw association request after the presence check. Ids that are not JSON integers are kept
/// as `None` and later reported as not found.
#[derive(Debug, Clone, PartialEq)]
pub struct RestaurantPizzaRequest {
    pub price: Value,
    pub pizza_id: Option<RecordId>,
    pub restaurant_id: Option<RecordId>,
}

pub struct RequestValidator;

impl RequestValidator {
    /// One `Missing field: <name>` message per absent key. A key holding `null` counts as present.
    pub fn missing_fields(body: &Map<String, Value>, names: &[&str]) -> Vec<String> {
        names
            .iter()
            .filter(|name| !body.contains_key(**name))
            .map(|name| format!("Missing field: {}", name))
            .collect()
    }

    /// Both text fields must be present and non-empty strings.
    pub fn validate_create(body: &Map<String, Value>, fields: &TextFields) -> Result<[String; 2], AppError> {
        let missing = Self::missing_fields(body, &fields.names);
        if !missing.is_empty() {
            return Err(AppError::Validation(missing));
        }
        let [a, b] = fields.names;
        match (non_empty_text(body.get(a)), non_empty_text(body.get(b))) {
            (Some(x), Some(y)) => Ok([x, y]),
            _ => Err(AppError::validation(fields.required_message)),
        }
    }

    /// Absent fields keep `current`; supplied ones must be non-empty strings.
    pub fn validate_update(
        body: &Map<String, Value>,
        fields: &TextFields,
        current: [&str; 2],
    ) -> Result<[String; 2], AppError> {
        let mut out = [current[0].to_string(), current[1].to_string()];
        for (slot, name) in out.iter_mut().zip(fields.names) {
            if let Some(v) = body.get(name) {
                *slot = non_empty_text(Some(v)).ok_or_else(|| AppError::validation(fields.not_empty_message))?;
            }
        }
        if out.iter().any(|s| s.is_empty()) {
            return Err(AppError::validation(fields.not_empty_message));
        }
        Ok(out)
    }

    /// Presence check for the association payload; missing fields are itemized.
    pub fn restaurant_pizza_request(body: &Map<String, Value>) -> Result<RestaurantPizzaRequest, AppError> {
        let missing = Self::missing_fields(body, &RESTAURANT_PIZZA_FIELDS);
        if !missing.is_empty() {
            return Err(AppError::Validation(missing));
        }
        Ok(RestaurantPizzaRequest {
            price: body.get("price").cloned().unwrap_or(Value::Null),
            pizza_id: body.get("pizza_id").and_then(Value::as_i64),
            restaurant_id: body.get("restaurant_id").and_then(Value::as_i64),
        })
    }

    /// Price and reference checks, in order. An empty result means the request may proceed.
    pub fn restaurant_pizza_errors(price: &Value, pizza_found: bool, restaurant_found: bool) -> Vec<String> {
        let mut errors = Vec::new();
        if let Err(e) = Price::from_json(price) {
            errors.push(e.to_string());
        }
        if !pizza_found {
            errors.push(UNKNOWN_PIZZA.to_string());
        }
        if !restaurant_found {
            errors.push(UNKNOWN_RESTAURANT.to_string());
        }
        errors
    }
}

/// `null`, non-strings and `""` all count as blank.
fn non_empty_text(v: Option<&Value>) -> Option<String> {
    v.and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}
