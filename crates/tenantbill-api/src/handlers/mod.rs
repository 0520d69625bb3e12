pub mod auth;
pub mod health;
pub mod invoices;
pub mod plans;
pub mod subscriptions;
pub mod tenants;
pub mod webhooks;
