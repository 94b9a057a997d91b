//! Flatseller Database Crate
//!
//! Connection management, embedded migrations and the repositories backing
//! users, houses and flats.

use flatseller_config::DatabaseConfig;
use sqlx::SqlitePool;

pub mod connection;
pub mod entities;
pub mod migrations;
pub mod repos;
pub mod types;

pub use connection::prepare_database;
pub use migrations::run_migrations;

pub use repos::{FlatRepository, HouseRepository, UserRepository};

pub use entities::{
    CreateFlatRequest, CreateHouseRequest, CreateUserRequest, Flat, FlatStatus, House, Role,
    UnknownVariant, UpdateFlatRequest, User,
};

pub use types::{DatabaseError, DatabaseResult};

/// Open the pool and apply pending migrations
pub async fn initialize_database(config: &DatabaseConfig) -> DatabaseResult<SqlitePool> {
    let pool = prepare_database(config)
        .await
        .map_err(|e| DatabaseError::ConnectionError(format!("{e:#}")))?;

    run_migrations(&pool)
        .await
        .map_err(|e| DatabaseError::MigrationError(format!("{e:#}")))?;

    Ok(pool)
}
