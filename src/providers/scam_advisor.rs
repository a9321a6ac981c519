use async_trait::async_trait;
use serde_json::Value;

use super::provider::{Provider, TextRequest};
use super::rest::RestClient;
use crate::error::{ModsysError, Result};
use crate::types::ProviderKind;

/// Domain trust lookups. Calls `GET {api_base}/v2/trust/single`.
pub struct ScamAdvisorClient {
    rest: RestClient,
    api_base: String,
    api_key: Option<String>,
}

impl ScamAdvisorClient {
    pub fn new(rest: RestClient, api_base: &str, api_key: Option<String>) -> Self {
        Self {
            rest,
            api_base: api_base.trim_end_matches('/').to_string(),
            api_key,
        }
    }
}

#[async_trait]
impl Provider for ScamAdvisorClient {
    fn kind(&self) -> ProviderKind {
        ProviderKind::ScamAdvisor
    }

    fn name(&self) -> String {
        "Scam Advisor".to_string()
    }

    fn model(&self) -> String {
        "trust".to_string()
    }

    async fn detect_text(&self, request: &TextRequest) -> Result<Value> {
        let domain = request
            .domain
            .as_deref()
            .ok_or_else(|| ModsysError::missing("Scam Advisor", "domain"))?;

        let url = format!("{}/v2/trust/single", self.api_base);
        let mut query = vec![("domain", domain)];
        if let Some(key) = &self.api_key {
            query.push(("apikey", key.as_str()));
        }
        self.rest.send_json(self.rest.get(&url).query(&query)).await
    }
}
