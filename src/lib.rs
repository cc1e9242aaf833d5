//! Pizza API: restaurants, pizzas and the price-linked menu entries between them.

pub mod config;
pub mod error;
pub mod handlers;
pub mod migration;
pub mod model;
pub mod response;
pub mod routes;
pub mod service;
pub mod state;
pub mod store;
pub mod views;

pub use config::ServerConfig;
pub use error::{AppError, ConfigError, DomainError};
pub use migration::ensure_tables;
pub use routes::{api_routes, app, common_routes};
pub use state::AppState;
pub use store::{ensure_database_exists, PgStore, Store};
