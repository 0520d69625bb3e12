pub mod file;
pub mod subscriptions;
pub mod tenants;
pub mod users;
