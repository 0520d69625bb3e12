use tenantbill_core::Config;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize the application (telemetry, store, services, routes)
    let (_state, router) = tenantbill_api::setup::initialize_app(config.clone()).await?;

    // Start the server
    tenantbill_api::setup::server::start_server(&config, router).await?;

    Ok(())
}
