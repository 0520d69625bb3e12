//! Configuration module
//!
//! This module provides the application configuration: server, storage
//! directory, CORS, and payment-provider settings. Everything is read from
//! the environment once at startup and passed down explicitly; nothing reads
//! env vars after construction.

use std::env;
use std::path::PathBuf;

// Common constants
const DEFAULT_PORT: u16 = 3001;
const DEFAULT_DATA_DIR: &str = "data";
const DEFAULT_FRONTEND_URL: &str = "http://localhost:5173";
const DEFAULT_STRIPE_API_BASE: &str = "https://api.stripe.com";

/// Application configuration.
#[derive(Clone, Debug)]
pub struct Config {
    pub server_port: u16,
    pub cors_origins: Vec<String>,
    pub environment: String,
    /// Directory holding the JSON collection files.
    pub data_dir: PathBuf,
    pub stripe_secret_key: String,
    pub stripe_webhook_secret: String,
    /// Overridable for tests pointing at a mock provider.
    pub stripe_api_base: String,
    pub frontend_url: String,
}

impl Config {
    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        let env = self.environment.to_lowercase();
        env == "production" || env == "prod"
    }

    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        let environment = env::var("ENVIRONMENT")
            .or_else(|_| env::var("APP_ENV"))
            .unwrap_or_else(|_| "development".to_string());

        let cors_origins_str = env::var("CORS_ORIGINS").unwrap_or_else(|_| "*".to_string());
        let is_production =
            environment.to_lowercase() == "production" || environment.to_lowercase() == "prod";
        if is_production && cors_origins_str.trim() == "*" {
            return Err(anyhow::anyhow!(
                "CORS_ORIGINS cannot be '*' in production. Please specify explicit origins."
            ));
        }

        let cors_origins: Vec<String> = cors_origins_str
            .split(',')
            .map(|s| s.trim().to_string())
            .collect();

        let config = Config {
            server_port: env::var("PORT")
                .unwrap_or_else(|_| DEFAULT_PORT.to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number"))?,
            cors_origins,
            environment,
            data_dir: env::var("DATA_DIR")
                .unwrap_or_else(|_| DEFAULT_DATA_DIR.to_string())
                .into(),
            stripe_secret_key: env::var("STRIPE_SECRET_KEY")
                .map_err(|_| anyhow::anyhow!("STRIPE_SECRET_KEY must be set"))?,
            stripe_webhook_secret: env::var("STRIPE_WEBHOOK_SECRET")
                .map_err(|_| anyhow::anyhow!("STRIPE_WEBHOOK_SECRET must be set"))?,
            stripe_api_base: env::var("STRIPE_API_BASE")
                .unwrap_or_else(|_| DEFAULT_STRIPE_API_BASE.to_string()),
            frontend_url: env::var("FRONTEND_URL")
                .ok()
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| DEFAULT_FRONTEND_URL.to_string()),
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.stripe_secret_key.trim().is_empty() {
            return Err(anyhow::anyhow!("STRIPE_SECRET_KEY cannot be empty"));
        }

        if self.stripe_webhook_secret.trim().is_empty() {
            return Err(anyhow::anyhow!("STRIPE_WEBHOOK_SECRET cannot be empty"));
        }

        if self.data_dir.as_os_str().is_empty() {
            return Err(anyhow::anyhow!("DATA_DIR cannot be empty"));
        }

        if self.stripe_api_base.trim_end_matches('/') != self.stripe_api_base {
            return Err(anyhow::anyhow!(
                "STRIPE_API_BASE must not end with a trailing slash"
            ));
        }

        Ok(())
    }
}
