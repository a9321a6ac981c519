use async_trait::async_trait;
use serde_json::{Value, json};
use tracing::debug;

use super::provider::{Provider, TextRequest};
use super::rest::RestClient;
use crate::error::{ModsysError, Result};
use crate::types::ProviderKind;

/// Completion client for `openai:completion`.
/// Calls `POST {api_base}/v1/completions`.
pub struct OpenAIClient {
    rest: RestClient,
    api_base: String,
    api_key: Option<String>,
    model: String,
}

impl OpenAIClient {
    pub fn new(rest: RestClient, api_base: &str, api_key: Option<String>, model: &str) -> Self {
        Self {
            rest,
            api_base: api_base.trim_end_matches('/').to_string(),
            api_key,
            model: model.to_string(),
        }
    }
}

#[async_trait]
impl Provider for OpenAIClient {
    fn kind(&self) -> ProviderKind {
        ProviderKind::OpenAI
    }

    fn name(&self) -> String {
        "OpenAI".to_string()
    }

    fn model(&self) -> String {
        self.model.clone()
    }

    async fn detect_text(&self, request: &TextRequest) -> Result<Value> {
        let prompt = request
            .prompt
            .as_deref()
            .or(request.text.as_deref())
            .ok_or_else(|| ModsysError::missing("OpenAI", "prompt"))?;

        let url = format!("{}/v1/completions", self.api_base);
        debug!(model = %self.model, "Sending OpenAI completion request");

        let mut builder = self.rest.post(&url).json(&json!({
            "model": self.model,
            "prompt": prompt,
        }));
        if let Some(key) = &self.api_key {
            builder = builder.header("Authorization", format!("Bearer {key}"));
        }
        self.rest.send_json(builder).await
    }
}
