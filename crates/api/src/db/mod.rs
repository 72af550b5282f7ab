//! Database operations for the Vitala `PostgreSQL` database.
//!
//! ## Tables
//!
//! - `users` - Accounts, credentials, and profile/biometric fields
//! - `weight_entries` - Weight log, owned by a user
//! - `shipments` / `shipment_items` - Medication shipments and their contents
//! - `medications` - Medication courses
//!
//! # Migrations
//!
//! Migrations are stored in `crates/api/migrations/` and run explicitly via
//! `sqlx migrate run`; they are never applied automatically at startup.

pub mod medications;
pub mod shipments;
pub mod users;
pub mod weights;

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

pub use medications::MedicationRepository;
pub use shipments::ShipmentRepository;
pub use users::UserRepository;
pub use weights::WeightRepository;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// Constraint violation (e.g., unique email).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Arguments
///
/// * `database_url` - `PostgreSQL` connection string (wrapped in `SecretString`)
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}
