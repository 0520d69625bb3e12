use crate::auth::require_user;
use crate::error::{ErrorResponse, HttpAppError, ValidatedJson};
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use std::sync::Arc;
use tenantbill_core::models::Tenant;
use tenantbill_core::AppError;
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateTenantRequest {
    #[validate(length(min = 1, message = "Tenant name required"))]
    pub name: String,
}

#[utoipa::path(
    get,
    path = "/api/user/{userId}/tenants",
    tag = "tenants",
    params(
        ("userId" = String, Path, description = "Owning user id")
    ),
    responses(
        (status = 200, description = "Tenants owned by the user", body = [Tenant]),
        (status = 401, description = "Unknown user", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state), fields(user_id = %user_id, operation = "list_tenants"))]
pub async fn list_tenants(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> Result<impl IntoResponse, HttpAppError> {
    let user = require_user(&state.store, &user_id).await?;
    let tenants = state.store.tenants.find_by_user_id(&user.id).await;
    Ok(Json(tenants))
}

#[utoipa::path(
    post,
    path = "/api/user/{userId}/tenants",
    tag = "tenants",
    params(
        ("userId" = String, Path, description = "Owning user id")
    ),
    request_body = CreateTenantRequest,
    responses(
        (status = 200, description = "Tenant created", body = Tenant),
        (status = 400, description = "Missing tenant name", body = ErrorResponse),
        (status = 401, description = "Unknown user", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, request), fields(user_id = %user_id, operation = "create_tenant"))]
pub async fn create_tenant(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
    ValidatedJson(request): ValidatedJson<CreateTenantRequest>,
) -> Result<impl IntoResponse, HttpAppError> {
    let user = require_user(&state.store, &user_id).await?;
    request.validate().map_err(AppError::from)?;

    let tenant = state
        .store
        .tenants
        .create(request.name, user.id)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Failed to create tenant");
            e
        })?;
    Ok(Json(tenant))
}
