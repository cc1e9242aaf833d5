//! Bootstrap DDL for the three tables. Idempotent (`IF NOT EXISTS`); run at startup before serving.
//! Order follows foreign key dependencies.

use crate::error::AppError;
use sqlx::PgPool;

const TABLES: &[(&str, &str)] = &[
    (
        "restaurants",
        r#"
        CREATE TABLE IF NOT EXISTS restaurants (
            id BIGSERIAL PRIMARY KEY,
            name TEXT NOT NULL CHECK (name <> ''),
            address TEXT NOT NULL CHECK (address <> '')
        )
        "#,
    ),
    (
        "pizzas",
        r#"
        CREATE TABLE IF NOT EXISTS pizzas (
            id BIGSERIAL PRIMARY KEY,
            name TEXT NOT NULL CHECK (name <> ''),
            ingredients TEXT NOT NULL CHECK (ingredients <> '')
        )
        "#,
    ),
    (
        "restaurant_pizzas",
        r#"
        CREATE TABLE IF NOT EXISTS restaurant_pizzas (
            id BIGSERIAL PRIMARY KEY,
            price INTEGER NOT NULL CHECK (price BETWEEN 1 AND 30),
            pizza_id BIGINT NOT NULL REFERENCES pizzas (id) ON DELETE CASCADE,
            restaurant_id BIGINT NOT NULL REFERENCES restaurants (id) ON DELETE CASCADE,
            CONSTRAINT restaurant_pizzas_pizza_restaurant_key UNIQUE (pizza_id, restaurant_id)
        )
        "#,
    ),
];

const INDEXES: &[&str] = &[
    "CREATE INDEX IF NOT EXISTS restaurant_pizzas_restaurant_id_idx ON restaurant_pizzas (restaurant_id)",
];

/// Create the tables, constraints and indexes this service needs, all in one transaction.
pub async fn ensure_tables(pool: &PgPool) -> Result<(), AppError> {
    let mut tx = pool.begin().await?;
    for (name, ddl) in TABLES {
        tracing::debug!(table = %name, "ensure table");
        sqlx::query(ddl).execute(&mut *tx).await?;
    }
    for ddl in INDEXES {
        sqlx::query(ddl).execute(&mut *tx).await?;
    }
    tx.commit().await?;
    tracing::info!(tables = TABLES.len(), "schema ready");
    Ok(())
}
