//! Tenantbill API Library
//!
//! This crate provides the HTTP API handlers, billing synchronization
//! service, and application setup.

mod api_doc;

pub mod auth;
pub mod error;
pub mod handlers;
pub mod services;
pub mod setup;
pub mod state;
pub mod telemetry;

// Re-exports
pub use error::ErrorResponse;
pub use services::billing::BillingService;
