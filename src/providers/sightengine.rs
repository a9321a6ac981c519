use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, warn};

use super::provider::Provider;
use super::rest::RestClient;
use crate::error::{ModsysError, Result};
use crate::types::ProviderKind;

/// Image moderation client.
/// Calls `GET {api_base}/1.0/check.json` with the configured model list.
pub struct SightengineClient {
    rest: RestClient,
    api_base: String,
    models: Vec<String>,
    api_secret: Option<String>,
    api_user: Option<String>,
}

impl SightengineClient {
    pub fn new(
        rest: RestClient,
        api_base: &str,
        models: Vec<String>,
        api_secret: Option<String>,
        api_user: Option<String>,
    ) -> Self {
        Self {
            rest,
            api_base: api_base.trim_end_matches('/').to_string(),
            models,
            api_secret,
            api_user,
        }
    }
}

#[async_trait]
impl Provider for SightengineClient {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Sightengine
    }

    fn name(&self) -> String {
        "Sightengine".to_string()
    }

    fn model(&self) -> String {
        self.models.join(",")
    }

    async fn detect_image(&self, url: &str) -> Result<Value> {
        let endpoint = format!("{}/1.0/check.json", self.api_base);
        let mut query = vec![("url", url.to_string()), ("models", self.models.join(","))];
        if let Some(user) = &self.api_user {
            query.push(("api_user", user.clone()));
        }
        if let Some(secret) = &self.api_secret {
            query.push(("api_secret", secret.clone()));
        }
        debug!(models = %self.model(), "Sending Sightengine check");

        let response = self
            .rest
            .send_json(self.rest.get(&endpoint).query(&query))
            .await?;

        // Sightengine reports failures in the body with a 200 status.
        if response.get("status").and_then(Value::as_str) == Some("failure") {
            let message = response
                .pointer("/error/message")
                .and_then(Value::as_str)
                .unwrap_or("unknown error")
                .to_string();
            warn!(error = %message, "Sightengine rejected the request");
            return Err(ModsysError::Rejected {
                provider: self.name(),
                message,
            });
        }
        Ok(response)
    }
}
