//! Tenantbill Core Library
//!
//! This crate provides the domain models, error types, configuration, and id
//! generation shared across all tenantbill components.

pub mod config;
pub mod error;
pub mod ids;
pub mod models;

// Re-export commonly used types
pub use config::Config;
pub use error::{AppError, ErrorMetadata, LogLevel};
pub use ids::generate_id;
