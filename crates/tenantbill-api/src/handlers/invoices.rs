use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use std::sync::Arc;

/// Provider invoice page size; the list is not paginated further.
const INVOICE_LIST_LIMIT: u32 = 50;

#[utoipa::path(
    get,
    path = "/api/tenant/{tenantId}/invoices",
    tag = "invoices",
    params(
        ("tenantId" = String, Path, description = "Tenant id")
    ),
    responses(
        (status = 200, description = "Provider invoices, verbatim; empty when the tenant has no customer"),
        (status = 500, description = "Provider call failed", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state), fields(tenant_id = %tenant_id, operation = "list_invoices"))]
pub async fn list_invoices(
    State(state): State<Arc<AppState>>,
    Path(tenant_id): Path<String>,
) -> Result<impl IntoResponse, HttpAppError> {
    // Unknown tenant or a tenant that never checked out both yield an empty
    // list rather than an error.
    let customer_id = state
        .store
        .tenants
        .find_by_id(&tenant_id)
        .await
        .and_then(|t| t.stripe_customer_id);

    let Some(customer_id) = customer_id else {
        return Ok(Json(Vec::<serde_json::Value>::new()));
    };

    let invoices = state
        .billing
        .stripe
        .list_invoices(&customer_id, INVOICE_LIST_LIMIT)
        .await?;
    Ok(Json(invoices))
}
