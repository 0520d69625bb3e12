//! Request identity resolution.
//!
//! The only authentication on the user-facing API is an identity that must
//! resolve to an existing stored user; there is no session or token layer.
//! The webhook channel authenticates separately via signature verification.

use crate::state::StoreState;
use tenantbill_core::models::User;
use tenantbill_core::AppError;

/// Resolve a user id (from the request path or identity header) to a stored
/// user. Unknown or empty ids are an authentication failure, not a 404.
pub async fn require_user(store: &StoreState, user_id: &str) -> Result<User, AppError> {
    if user_id.is_empty() {
        return Err(AppError::Unauthorized("User ID required".to_string()));
    }
    store
        .users
        .find_by_id(user_id)
        .await
        .ok_or_else(|| AppError::Unauthorized("Invalid user".to_string()))
}
