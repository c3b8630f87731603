use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, StatusCode};
use std::time::Duration;
use super::{DeliveryError, Transport};

pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Clone)]
pub struct IngestClient {
    client: Client,
    endpoint: String,
}

impl IngestClient {
    pub fn new(endpoint: impl Into<String>) -> Result<Self, reqwest::Error> {
        Self::with_timeout(endpoint, REQUEST_TIMEOUT)
    }

    pub fn with_timeout(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            endpoint: endpoint.into(),
        })
    }

    fn classify(&self, err: reqwest::Error) -> DeliveryError {
        if err.is_connect() {
            DeliveryError::Connect { endpoint: self.endpoint.clone() }
        } else if err.is_timeout() {
            DeliveryError::Timeout
        } else {
            DeliveryError::Transport(err.to_string())
        }
    }
}

impl Transport for IngestClient {
    fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn deliver(&self, body: Vec<u8>) -> Result<(), DeliveryError> {
        let response = self.client.post(&self.endpoint)
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = response.status();
        if status == StatusCode::OK {
            return Ok(());
        }

        // Body is only read for the log line.
        let body = response.text().await.unwrap_or_default();
        Err(DeliveryError::Rejected { status: status.as_u16(), body })
    }
}
