//! OpenAPI documentation assembly.

use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Tenantbill API",
        description = "Multi-tenant subscription billing backend"
    ),
    paths(
        crate::handlers::auth::login,
        crate::handlers::tenants::list_tenants,
        crate::handlers::tenants::create_tenant,
        crate::handlers::subscriptions::get_subscription,
        crate::handlers::subscriptions::create_checkout,
        crate::handlers::subscriptions::update_subscription,
        crate::handlers::plans::list_plans,
        crate::handlers::invoices::list_invoices,
        crate::handlers::webhooks::stripe_webhook,
        crate::handlers::health::health_check,
    ),
    components(schemas(
        tenantbill_core::models::Tenant,
        tenantbill_core::models::Subscription,
        tenantbill_core::models::SubscriptionStatus,
        tenantbill_core::models::Plan,
        tenantbill_core::models::BillingInterval,
        tenantbill_core::models::UserSummary,
        crate::handlers::auth::LoginRequest,
        crate::handlers::auth::LoginResponse,
        crate::handlers::tenants::CreateTenantRequest,
        crate::handlers::subscriptions::SubscriptionStatusResponse,
        crate::handlers::subscriptions::CreateCheckoutRequest,
        crate::handlers::subscriptions::CreateCheckoutResponse,
        crate::handlers::subscriptions::SubscriptionAction,
        crate::handlers::subscriptions::UpdateSubscriptionRequest,
        crate::error::ErrorResponse,
    )),
    tags(
        (name = "auth", description = "Login"),
        (name = "tenants", description = "Tenant management"),
        (name = "subscriptions", description = "Subscription lifecycle and checkout"),
        (name = "plans", description = "Plan catalog"),
        (name = "invoices", description = "Provider invoices"),
        (name = "webhooks", description = "Provider webhook ingestion"),
        (name = "health", description = "Probes")
    )
)]
struct ApiDoc;

pub fn get_openapi_spec() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi()
}
