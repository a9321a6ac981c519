use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use modsys_lib::Result;
use modsys_lib::providers::{Provider, ProviderRegistry, RestClient, TextRequest};
use modsys_lib::serde_json::{Value, json};
use modsys_lib::types::{Credentials, Endpoints, ProviderKind};
use wiremock::MockServer;

// ---------------------------------------------------------------------------
// Registry builders
// ---------------------------------------------------------------------------

pub fn registry_for(server: &MockServer) -> ProviderRegistry {
    ProviderRegistry::with_client(Endpoints::all(&server.uri()), RestClient::new())
}

#[allow(dead_code)]
pub fn offline_registry() -> ProviderRegistry {
    ProviderRegistry::with_client(Endpoints::all("http://127.0.0.1:9"), RestClient::new())
}

pub fn test_credentials() -> Credentials {
    Credentials {
        apollo_token: Some("apollo-token".to_string()),
        openai_api_key: Some("sk-test".to_string()),
        google_perspective_api_key: Some("perspective-key".to_string()),
        sightengine_api_key: Some("se-secret".to_string()),
        sightengine_api_user: Some("se-user".to_string()),
        scam_advisor_api_key: Some("sa-key".to_string()),
    }
}

// ---------------------------------------------------------------------------
// Response builders
// ---------------------------------------------------------------------------

#[allow(dead_code)]
pub fn perspective_scores(attribute: &str, value: f64) -> Value {
    json!({
        "attributeScores": {
            attribute: {
                "summaryScore": {"value": value, "type": "PROBABILITY"}
            }
        },
        "languages": ["en"]
    })
}

// ---------------------------------------------------------------------------
// Custom providers
// ---------------------------------------------------------------------------

/// A custom provider that records the requests it receives.
#[derive(Default)]
pub struct RecordingProvider {
    pub requests: Mutex<Vec<TextRequest>>,
    pub response: Value,
}

#[allow(dead_code)]
impl RecordingProvider {
    pub fn returning(response: Value) -> Arc<Self> {
        Arc::new(Self {
            requests: Mutex::new(Vec::new()),
            response,
        })
    }

    pub fn seen(&self) -> Vec<TextRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl Provider for RecordingProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Custom
    }

    fn name(&self) -> String {
        "recording".to_string()
    }

    fn model(&self) -> String {
        "echo".to_string()
    }

    async fn detect_text(&self, request: &TextRequest) -> Result<Value> {
        self.requests.lock().unwrap().push(request.clone());
        Ok(self.response.clone())
    }

    async fn detect_image(&self, _url: &str) -> Result<Value> {
        Ok(self.response.clone())
    }
}
