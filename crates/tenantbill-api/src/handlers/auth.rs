use crate::error::{ErrorResponse, HttpAppError, ValidatedJson};
use crate::state::AppState;
use axum::{extract::State, response::IntoResponse, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tenantbill_core::models::UserSummary;
use tenantbill_core::AppError;
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "Email and password required"))]
    pub email: String,
    #[validate(length(min = 1, message = "Email and password required"))]
    pub password: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    pub user: UserSummary,
}

#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = "auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 400, description = "Missing email or password", body = ErrorResponse),
        (status = 401, description = "Invalid credentials", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, request), fields(operation = "login"))]
pub async fn login(
    State(state): State<Arc<AppState>>,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> Result<impl IntoResponse, HttpAppError> {
    request.validate().map_err(AppError::from)?;

    let user = state.store.users.find_by_email(&request.email).await;
    // Plaintext comparison, matching the seeded data set. Timing-safe
    // comparison and hashing are deliberately out of scope here.
    match user {
        Some(user) if user.password == request.password => Ok(Json(LoginResponse {
            user: UserSummary::from(&user),
        })),
        _ => Err(AppError::Unauthorized("Invalid credentials".to_string()).into()),
    }
}
