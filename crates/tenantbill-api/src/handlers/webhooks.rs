use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;
use axum::{
    body::Bytes,
    extract::State,
    http::HeaderMap,
    response::IntoResponse,
    Json,
};
use std::sync::Arc;
use tenantbill_core::AppError;
use tenantbill_stripe::webhook;

/// Provider webhook ingestion.
///
/// Consumes the raw body: the signature covers the exact bytes sent, so this
/// route must not go through JSON extraction. After the signature verifies,
/// the endpoint always acknowledges receipt - including for events that match
/// no local record - so the provider does not retry. Only an unexpected
/// processing failure surfaces as a 500.
#[utoipa::path(
    post,
    path = "/api/webhooks/stripe",
    tag = "webhooks",
    request_body(content = String, description = "Raw webhook payload"),
    responses(
        (status = 200, description = "Event received"),
        (status = 400, description = "Signature verification failed", body = ErrorResponse),
        (status = 500, description = "Event processing failed", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, headers, body), fields(operation = "stripe_webhook"))]
pub async fn stripe_webhook(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<impl IntoResponse, HttpAppError> {
    let signature = headers
        .get("stripe-signature")
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| {
            AppError::InvalidSignature("missing stripe-signature header".to_string())
        })?;

    webhook::verify_signature(&body, signature, &state.config.stripe_webhook_secret)?;
    let event = webhook::parse_event(&body)?;

    tracing::debug!(event_id = %event.id, event_type = %event.event_type, "Webhook event verified");

    // Signature checked out; from here on any failure is a processing error.
    let billing_event =
        webhook::classify_event(&event).map_err(|e| AppError::Stripe(e.to_string()))?;
    state.billing.service.apply_event(billing_event).await?;

    Ok(Json(serde_json::json!({ "received": true })))
}
