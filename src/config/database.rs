//! PostgreSQL connection pool initialization.
//!
//! The pool is created once at startup from `DATABASE_URL` and handed to
//! [`crate::state::AppState`]; request handlers receive it as an injected
//! handle rather than reaching for a global.

use sqlx::PgPool;
use std::env;

/// Initializes the connection pool.
///
/// # Panics
///
/// Panics if `DATABASE_URL` is unset or the database is unreachable. Both
/// are startup-fatal conditions.
pub async fn init_db_pool() -> PgPool {
    let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    PgPool::connect(&database_url)
        .await
        .expect("Failed to connect to database")
}
