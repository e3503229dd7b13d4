//! SQLite connection pool for a project file.

use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};

use crate::config::DatabaseConfig;
use crate::ports::StoreError;

/// Opens a pool on the project database described by `config`.
///
/// In-memory databases keep their single connection alive for the life of
/// the pool, since closing it would drop the data.
pub async fn connect(config: &DatabaseConfig) -> Result<SqlitePool, StoreError> {
    let options = SqliteConnectOptions::from_str(&config.url)
        .map_err(|e| StoreError::unavailable("database", e))?
        .create_if_missing(config.create_if_missing);

    let mut pool_options = SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(config.acquire_timeout());
    if config.is_in_memory() {
        pool_options = pool_options
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None);
    }

    let pool = pool_options
        .connect_with(options)
        .await
        .map_err(|e| StoreError::unavailable("database", e))?;

    tracing::debug!(url = %config.url, "Opened project database");
    Ok(pool)
}

/// Rejects collection names that are not plain SQL identifiers.
///
/// Table names cannot be bound as query parameters, so every name that ends
/// up in SQL text passes through here first.
pub(crate) fn check_identifier(collection: &str) -> Result<(), StoreError> {
    let mut chars = collection.chars();
    let valid = match chars.next() {
        Some(first) => {
            (first.is_ascii_alphabetic() || first == '_')
                && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        None => false,
    };
    if !valid {
        return Err(StoreError::unavailable(
            collection,
            "collection name must be a plain identifier",
        ));
    }
    if collection.to_ascii_lowercase().starts_with("sqlite_") {
        return Err(StoreError::unavailable(
            collection,
            "collection name is reserved",
        ));
    }
    Ok(())
}
