use async_trait::async_trait;
use serde_json::{Value, json};
use tracing::debug;

use super::provider::{Provider, TextRequest};
use super::rest::RestClient;
use crate::error::{ModsysError, Result};
use crate::types::ProviderKind;

/// Client for the Apollo rule service, authenticated with a bearer token.
/// Calls `POST {api_base}/v1/rules` with a rule of the form `"{text} {operator} {threshold}"`.
pub struct ApolloClient {
    rest: RestClient,
    api_base: String,
    token: String,
}

impl ApolloClient {
    pub fn new(rest: RestClient, api_base: &str, token: String) -> Self {
        Self {
            rest,
            api_base: api_base.trim_end_matches('/').to_string(),
            token,
        }
    }
}

pub fn build_rule(request: &TextRequest) -> Result<String> {
    let text = request
        .text
        .as_deref()
        .ok_or_else(|| ModsysError::missing("Apollo", "text"))?;
    let operator = request
        .operator
        .as_deref()
        .ok_or_else(|| ModsysError::missing("Apollo", "operator"))?;
    let threshold = request
        .threshold
        .ok_or_else(|| ModsysError::missing("Apollo", "threshold"))?;
    Ok(format!("{text} {operator} {threshold}"))
}

#[async_trait]
impl Provider for ApolloClient {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Apollo
    }

    fn name(&self) -> String {
        "Apollo".to_string()
    }

    fn model(&self) -> String {
        "safety".to_string()
    }

    async fn detect_text(&self, request: &TextRequest) -> Result<Value> {
        let rule = build_rule(request)?;
        debug!(rule = %rule, "Sending Apollo rule");
        let builder = self
            .rest
            .post(&format!("{}/v1/rules", self.api_base))
            .header("Authorization", format!("Bearer {}", self.token))
            .json(&json!({ "rule": rule }));
        self.rest.send_json(builder).await
    }
}
