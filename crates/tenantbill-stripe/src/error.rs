use thiserror::Error;

/// Errors from the provider client and webhook ingestion.
#[derive(Debug, Error)]
pub enum StripeError {
    #[error("webhook signature verification failed: {0}")]
    SignatureInvalid(String),

    #[error("malformed provider payload: {0}")]
    Malformed(String),

    #[error("provider API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("provider request failed: {0}")]
    Http(#[from] reqwest::Error),
}
