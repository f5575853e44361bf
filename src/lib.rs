//! Library Gateway
//!
//! Front door of a library-reservation platform. Composes three independently
//! owned services (reservations, catalog, user rating) into user-facing
//! operations.
//!
//! # Modules
//!
//! - [`config`] - YAML configuration
//! - [`logging`] - tracing subscriber and rolling log file
//! - [`clients`] - typed HTTP clients for the backend services
//! - [`library`] - admission and return policies, aggregator, coordinator
//! - [`gateway`] - axum router, handlers and OpenAPI document

pub mod clients;
pub mod config;
pub mod gateway;
pub mod library;
pub mod logging;

// Convenient re-exports at crate root
pub use config::{AppConfig, ConfigError};
pub use library::{GatewayError, LibraryCoordinator};
