//! Data layer for the starter backend: configuration, the Postgres
//! bootstrap sequence (pool, migrations, schema verification), entity
//! declarations, and the generic resource capabilities.
//! Used by the backend and the migration CLI.

#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod bootstrap;
pub mod config;
pub mod entities;
pub mod error;
pub mod repos;
pub mod resource;
pub mod schema_check;
pub mod txn;

// Re-exports for public API
pub use bootstrap::{build_pool, connect_to_postgres, PostgresHandle, MAX_POOL_SIZE};
pub use config::{ConfigSource, EnvSource, PgConfig};
pub use error::{BootstrapError, DataError};
pub use txn::with_txn;
