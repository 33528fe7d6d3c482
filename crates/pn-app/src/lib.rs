//! Shared application service layer for pipenet.
//!
//! This crate sits between the interactive session and the core crates:
//! it owns the asset registry and network graph, runs the connection
//! operation, and reports every state change as a `NetworkEvent` for the
//! session to display and log.

pub mod config;
pub mod error;
pub mod events;
pub mod network_service;

// Re-export key types for convenience
pub use config::{AppConfig, DEFAULT_CONFIG_FILE};
pub use error::{AppError, AppResult};
pub use events::NetworkEvent;
pub use network_service::{Connection, PipelineNetwork};
