pub mod client;

use std::future::Future;
use thiserror::Error;

/// Why a single delivery attempt failed. Every variant is non-fatal and
/// counts toward backoff.
#[derive(Debug, Error)]
pub enum DeliveryError {
    #[error("API returned status {status}: {body}")]
    Rejected { status: u16, body: String },

    #[error("could not reach API at {endpoint}")]
    Connect { endpoint: String },

    #[error("API did not respond in time")]
    Timeout,

    #[error("error sending data: {0}")]
    Transport(String),
}

/// Carries an encoded payload to the ingestion endpoint.
pub trait Transport: Send + Sync {
    fn endpoint(&self) -> &str;

    fn deliver(&self, body: Vec<u8>) -> impl Future<Output = Result<(), DeliveryError>> + Send;
}
