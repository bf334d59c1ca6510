//! # Scribe Infrastructure
//!
//! Concrete implementations of the ports defined in `scribe-core`.
//! This crate contains persistence, loading and flushing of [`scribe_core::domain::Blog`]
//! graphs, configuration and tracing setup.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All features enabled
//! - `minimal` - No external dependencies, in-memory only
//! - `postgres` - PostgreSQL database support via SeaORM

pub mod blog_store;
pub mod config;
pub mod database;
pub mod repositories;
pub mod telemetry;

pub use blog_store::{BlogStore, StoreError};
pub use config::InfraConfig;
pub use database::DatabaseConfig;
pub use repositories::Repositories;
pub use telemetry::{TelemetryConfig, init_telemetry};

#[cfg(feature = "postgres")]
pub use database::DatabaseConnections;
