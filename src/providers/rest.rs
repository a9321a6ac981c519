use std::time::Duration;

use reqwest::{Client, RequestBuilder};
use serde_json::Value;
use tracing::debug;

use crate::error::{ModsysError, Result};

/// JSON-over-HTTP transport shared by every vendor client.
#[derive(Clone)]
pub struct RestClient {
    http_client: Client,
}

impl RestClient {
    pub fn new() -> Self {
        Self {
            http_client: Client::new(),
        }
    }

    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ModsysError::Unavailable(e.to_string()))?;
        Ok(Self { http_client })
    }

    pub fn get(&self, url: &str) -> RequestBuilder {
        self.http_client.get(url)
    }

    pub fn post(&self, url: &str) -> RequestBuilder {
        self.http_client.post(url)
    }

    /// Sends the request and decodes the JSON body, mapping non-2xx statuses to errors.
    pub async fn send_json(&self, request: RequestBuilder) -> Result<Value> {
        let response = request.send().await?;
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| ModsysError::Unavailable(e.to_string()))?;
        parse_http_response(status, &body)
    }
}

impl Default for RestClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse an HTTP response from a vendor, handling non-2xx status codes.
pub fn parse_http_response(status: u16, body: &str) -> Result<Value> {
    if !(200..300).contains(&status) {
        return Err(ModsysError::Http {
            status,
            body: body.to_string(),
        });
    }
    let value: Value = serde_json::from_str(body)?;
    debug!(status, "Parsed provider response");
    Ok(value)
}
