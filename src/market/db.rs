//! SQLite connection and schema bootstrap.

use std::path::Path;

use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

use crate::error::Result;

/// File name of the marketplace database under the storage root.
pub const DB_FILE: &str = "peer_exchange.db";

/// Open (creating if missing) the marketplace database and ensure the schema.
pub async fn connect(path: impl AsRef<Path>) -> Result<SqlitePool> {
    let options = SqliteConnectOptions::new()
        .filename(path.as_ref())
        .create_if_missing(true);

    let pool = SqlitePoolOptions::new().connect_with(options).await?;
    init_schema(&pool).await?;
    Ok(pool)
}

async fn init_schema(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            username TEXT UNIQUE NOT NULL,
            password TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS rental_items (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            owner TEXT NOT NULL,
            name TEXT NOT NULL,
            description TEXT NOT NULL DEFAULT '',
            price REAL NOT NULL DEFAULT 0,
            image_path TEXT DEFAULT NULL,
            contact TEXT NOT NULL DEFAULT '',
            rented_by TEXT DEFAULT NULL,
            borrow_date TEXT DEFAULT NULL,
            return_date TEXT DEFAULT NULL,
            approved TEXT NOT NULL DEFAULT 'pending',
            listing_type TEXT NOT NULL DEFAULT 'item'
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}
