#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod error;
pub mod health;
pub mod middleware;
pub mod routes;
pub mod state;
pub mod telemetry;

// Re-exports for public API
pub use error::AppError;
pub use middleware::cors::cors_middleware;
pub use state::AppState;
