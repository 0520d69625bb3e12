use crate::state::AppState;
use axum::{extract::State, response::IntoResponse, Json};
use std::sync::Arc;
use tenantbill_core::models::Plan;

#[utoipa::path(
    get,
    path = "/api/plans",
    tag = "plans",
    responses(
        (status = 200, description = "Offerable plans", body = [Plan])
    )
)]
pub async fn list_plans(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(state.billing.plans.plans().to_vec())
}
