//! PostgreSQL implementation of [`Store`](super::Store) on a sqlx pool.

use super::Store;
use crate::error::{AppError, ConfigError};
use crate::model::{NewPizza, NewRestaurant, NewRestaurantPizza, Pizza, RecordId, Restaurant, RestaurantPizza};
use async_trait::async_trait;
use sqlx::{ConnectOptions, PgPool};
use std::str::FromStr;

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        PgStore { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

/// Menu entry joined with its pizza.
#[derive(sqlx::FromRow)]
struct MenuRow {
    id: RecordId,
    price: i32,
    pizza_id: RecordId,
    restaurant_id: RecordId,
    pizza_name: String,
    pizza_ingredients: String,
}

impl MenuRow {
    fn into_parts(self) -> (RestaurantPizza, Pizza) {
        (
            RestaurantPizza {
                id: self.id,
                price: self.price,
                pizza_id: self.pizza_id,
                restaurant_id: self.restaurant_id,
            },
            Pizza {
                id: self.pizza_id,
                name: self.pizza_name,
                ingredients: self.pizza_ingredients,
            },
        )
    }
}

const SELECT_RESTAURANT: &str = "SELECT id, name, address FROM restaurants";
const SELECT_PIZZA: &str = "SELECT id, name, ingredients FROM pizzas";

const SELECT_MENU: &str = r#"
    SELECT rp.id, rp.price, rp.pizza_id, rp.restaurant_id,
           p.name AS pizza_name, p.ingredients AS pizza_ingredients
    FROM restaurant_pizzas rp
    JOIN pizzas p ON p.id = rp.pizza_id
    WHERE rp.restaurant_id = $1
    ORDER BY rp.id
"#;

/// Unique violation on (pizza_id, restaurant_id) is the duplicate-entry path; a foreign key
/// violation means a referenced row vanished after validation.
fn map_restaurant_pizza_error(err: sqlx::Error) -> AppError {
    if let sqlx::Error::Database(db) = &err {
        if db.is_unique_violation() {
            return AppError::duplicate_restaurant_pizza();
        }
        if db.is_foreign_key_violation() {
            return AppError::collapsed_validation();
        }
    }
    AppError::Db(err)
}

#[async_trait]
impl Store for PgStore {
    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").fetch_optional(&self.pool).await?;
        Ok(())
    }

    async fn list_restaurants(&self) -> Result<Vec<Restaurant>, AppError> {
        let sql = format!("{} ORDER BY id", SELECT_RESTAURANT);
        tracing::debug!(sql = %sql, "query");
        Ok(sqlx::query_as::<_, Restaurant>(&sql).fetch_all(&self.pool).await?)
    }

    async fn restaurant(&self, id: RecordId) -> Result<Option<Restaurant>, AppError> {
        let sql = format!("{} WHERE id = $1", SELECT_RESTAURANT);
        tracing::debug!(sql = %sql, id, "query");
        Ok(sqlx::query_as::<_, Restaurant>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn restaurant_pizzas_for(&self, restaurant_id: RecordId) -> Result<Vec<(RestaurantPizza, Pizza)>, AppError> {
        tracing::debug!(sql = %SELECT_MENU, restaurant_id, "query");
        let rows = sqlx::query_as::<_, MenuRow>(SELECT_MENU)
            .bind(restaurant_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(MenuRow::into_parts).collect())
    }

    async fn insert_restaurant(&self, new: &NewRestaurant) -> Result<Restaurant, AppError> {
        let sql = "INSERT INTO restaurants (name, address) VALUES ($1, $2) RETURNING id, name, address";
        tracing::debug!(sql = %sql, "query (tx)");
        let mut tx = self.pool.begin().await?;
        let row = sqlx::query_as::<_, Restaurant>(sql)
            .bind(&new.name)
            .bind(&new.address)
            .fetch_one(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(row)
    }

    async fn update_restaurant(&self, restaurant: &Restaurant) -> Result<Option<Restaurant>, AppError> {
        let sql = "UPDATE restaurants SET name = $2, address = $3 WHERE id = $1 RETURNING id, name, address";
        tracing::debug!(sql = %sql, id = restaurant.id, "query (tx)");
        let mut tx = self.pool.begin().await?;
        let row = sqlx::query_as::<_, Restaurant>(sql)
            .bind(restaurant.id)
            .bind(&restaurant.name)
            .bind(&restaurant.address)
            .fetch_optional(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(row)
    }

    async fn delete_restaurant(&self, id: RecordId) -> Result<bool, AppError> {
        // restaurant_pizzas rows go with it through ON DELETE CASCADE
        let sql = "DELETE FROM restaurants WHERE id = $1 RETURNING id";
        tracing::debug!(sql = %sql, id, "query (tx)");
        let mut tx = self.pool.begin().await?;
        let deleted: Option<(RecordId,)> = sqlx::query_as(sql).bind(id).fetch_optional(&mut *tx).await?;
        tx.commit().await?;
        Ok(deleted.is_some())
    }

    async fn list_pizzas(&self) -> Result<Vec<Pizza>, AppError> {
        let sql = format!("{} ORDER BY id", SELECT_PIZZA);
        tracing::debug!(sql = %sql, "query");
        Ok(sqlx::query_as::<_, Pizza>(&sql).fetch_all(&self.pool).await?)
    }

    async fn pizza(&self, id: RecordId) -> Result<Option<Pizza>, AppError> {
        let sql = format!("{} WHERE id = $1", SELECT_PIZZA);
        tracing::debug!(sql = %sql, id, "query");
        Ok(sqlx::query_as::<_, Pizza>(&sql).bind(id).fetch_optional(&self.pool).await?)
    }

    async fn insert_pizza(&self, new: &NewPizza) -> Result<Pizza, AppError> {
        let sql = "INSERT INTO pizzas (name, ingredients) VALUES ($1, $2) RETURNING id, name, ingredients";
        tracing::debug!(sql = %sql, "query (tx)");
        let mut tx = self.pool.begin().await?;
        let row = sqlx::query_as::<_, Pizza>(sql)
            .bind(&new.name)
            .bind(&new.ingredients)
            .fetch_one(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(row)
    }

    async fn update_pizza(&self, pizza: &Pizza) -> Result<Option<Pizza>, AppError> {
        let sql = "UPDATE pizzas SET name = $2, ingredients = $3 WHERE id = $1 RETURNING id, name, ingredients";
        tracing::debug!(sql = %sql, id = pizza.id, "query (tx)");
        let mut tx = self.pool.begin().await?;
        let row = sqlx::query_as::<_, Pizza>(sql)
            .bind(pizza.id)
            .bind(&pizza.name)
            .bind(&pizza.ingredients)
            .fetch_optional(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(row)
    }

    async fn delete_pizza(&self, id: RecordId) -> Result<bool, AppError> {
        let sql = "DELETE FROM pizzas WHERE id = $1 RETURNING id";
        tracing::debug!(sql = %sql, id, "query (tx)");
        let mut tx = self.pool.begin().await?;
        let deleted: Option<(RecordId,)> = sqlx::query_as(sql).bind(id).fetch_optional(&mut *tx).await?;
        tx.commit().await?;
        Ok(deleted.is_some())
    }

    async fn insert_restaurant_pizza(&self, new: &NewRestaurantPizza) -> Result<RestaurantPizza, AppError> {
        let sql = r#"
            INSERT INTO restaurant_pizzas (price, pizza_id, restaurant_id)
            VALUES ($1, $2, $3)
            RETURNING id, price, pizza_id, restaurant_id
        "#;
        tracing::debug!(sql = %sql, pizza_id = new.pizza_id, restaurant_id = new.restaurant_id, "query (tx)");
        let mut tx = self.pool.begin().await?;
        let row = sqlx::query_as::<_, RestaurantPizza>(sql)
            .bind(new.price.get())
            .bind(new.pizza_id)
            .bind(new.restaurant_id)
            .fetch_one(&mut *tx)
            .await
            .map_err(map_restaurant_pizza_error)?;
        tx.commit().await?;
        Ok(row)
    }
}

/// Ensure the database in `database_url` exists; create it if not. Connects to the
/// default `postgres` database to run CREATE DATABASE. Call before creating the main pool.
pub async fn ensure_database_exists(database_url: &str) -> Result<(), AppError> {
    let (admin_url, db_name) = parse_db_name_from_url(database_url)?;
    if db_name.is_empty() || db_name == "postgres" {
        return Ok(());
    }
    let opts = sqlx::postgres::PgConnectOptions::from_str(&admin_url)
        .map_err(|e| ConfigError::DatabaseUrl(e.to_string()))?;
    let mut conn: sqlx::PgConnection = opts.connect().await?;
    let exists: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
        .bind(&db_name)
        .fetch_one(&mut conn)
        .await?;
    if !exists.0 {
        tracing::info!(database = %db_name, "creating database");
        sqlx::query(&format!("CREATE DATABASE {}", quote_ident(&db_name)))
            .execute(&mut conn)
            .await?;
    }
    Ok(())
}

fn parse_db_name_from_url(url: &str) -> Result<(String, String), ConfigError> {
    let scheme_end = url.find("://").map(|i| i + 3).unwrap_or(0);
    let path_start = url
        .get(scheme_end..)
        .and_then(|rest| rest.find('/'))
        .map(|i| scheme_end + i + 1)
        .ok_or_else(|| ConfigError::DatabaseUrl("no database path".into()))?;
    let path_and_query = url.get(path_start..).unwrap_or("");
    let mut parts = path_and_query.splitn(2, '?');
    let db_name = parts.next().unwrap_or("").trim();
    let query = parts.next().map(|q| format!("?{}", q)).unwrap_or_default();
    let base = url.get(..path_start).unwrap_or(url);
    Ok((format!("{}postgres{}", base, query), db_name.to_string()))
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_url_targets_postgres_database() {
        let (admin, db) = parse_db_name_from_url("postgres://u:p@localhost:5432/pizza").unwrap();
        assert_eq!(admin, "postgres://u:p@localhost:5432/postgres");
        assert_eq!(db, "pizza");
    }

    #[test]
    fn admin_url_keeps_query_string() {
        let (admin, db) = parse_db_name_from_url("postgres://localhost/pizza?sslmode=disable").unwrap();
        assert_eq!(admin, "postgres://localhost/postgres?sslmode=disable");
        assert_eq!(db, "pizza");
    }

    #[test]
    fn url_without_path_is_rejected() {
        assert!(parse_db_name_from_url("postgres://localhost").is_err());
    }

    #[test]
    fn identifiers_are_quoted() {
        assert_eq!(quote_ident(r#"we"ird"#), r#""we""ird""#);
    }
}
