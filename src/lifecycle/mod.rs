//! Startup, wiring, configuration and shutdown.

pub mod catalog_system;
pub mod config;
pub mod tracing;

pub use catalog_system::CatalogSystem;
pub use config::{ConfigError, StoreConfig};
pub use self::tracing::setup_tracing;
