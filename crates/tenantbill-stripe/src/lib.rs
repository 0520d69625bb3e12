//! Tenantbill Stripe Library
//!
//! Thin client for the payment provider's REST API plus webhook ingestion
//! primitives: signature verification and classification of raw events into
//! the finite set of lifecycle events this service reacts to.

pub mod client;
pub mod error;
pub mod types;
pub mod webhook;

pub use client::{CheckoutSessionParams, StripeClient};
pub use error::StripeError;
pub use types::{
    unix_to_datetime, StripeCheckoutSession, StripeCustomer, StripeEvent, StripeSubscription,
};
pub use webhook::{classify_event, parse_event, verify_signature, BillingEvent};
