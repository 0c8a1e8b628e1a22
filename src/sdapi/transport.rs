use crate::error::{DiffusionError, Result};
use async_trait::async_trait;
use serde_json::Value;

#[derive(Debug, Clone)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

impl TransportResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Seam between the generation client and the HTTP layer. Production code
/// goes through `ReqwestTransport`; tests script responses behind the same
/// trait.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn post_json(
        &self,
        url: &str,
        headers: &[(String, String)],
        body: &Value,
    ) -> Result<TransportResponse>;

    async fn get_bytes(&self, _url: &str) -> Result<Vec<u8>> {
        Err(DiffusionError::RequestError(
            "transport does not support GET".into(),
        ))
    }
}

pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new() -> Result<Self> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| DiffusionError::ConfigError(format!("failed to build HTTP client: {}", e)))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn post_json(
        &self,
        url: &str,
        headers: &[(String, String)],
        body: &Value,
    ) -> Result<TransportResponse> {
        let mut request = self.client.post(url).json(body);
        for (name, value) in headers {
            request = request.header(name, value);
        }

        let response = request
            .send()
            .await
            .map_err(|e| DiffusionError::RequestError(format!("HTTP request failed: {}", e)))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| DiffusionError::RequestError(format!("failed to read response: {}", e)))?;

        Ok(TransportResponse { status, body })
    }

    async fn get_bytes(&self, url: &str) -> Result<Vec<u8>> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| DiffusionError::RequestError(format!("HTTP request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(DiffusionError::TransportError(format!(
                "download failed with HTTP {}",
                response.status()
            )));
        }

        response
            .bytes()
            .await
            .map(|b| b.to_vec())
            .map_err(|e| DiffusionError::RequestError(format!("failed to read response: {}", e)))
    }
}
