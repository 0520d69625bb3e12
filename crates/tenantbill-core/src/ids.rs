//! Record id generation.
//!
//! Ids are `"<entity-prefix>_<random-suffix>"`, e.g. `tenant_4cfa...`. The
//! prefix keeps ids self-describing in the JSON files; the suffix is a
//! UUIDv4 so two creates can never collide regardless of clock resolution.

use uuid::Uuid;

/// Id prefix for user records.
pub const USER_PREFIX: &str = "user";
/// Id prefix for tenant records.
pub const TENANT_PREFIX: &str = "tenant";
/// Id prefix for subscription records.
pub const SUBSCRIPTION_PREFIX: &str = "sub";

/// Generate a fresh record id with the given entity prefix.
pub fn generate_id(prefix: &str) -> String {
    format!("{}_{}", prefix, Uuid::new_v4().simple())
}
