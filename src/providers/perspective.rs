use async_trait::async_trait;
use serde_json::{Map, Value, json};
use tracing::debug;

use super::provider::{Provider, TextRequest};
use super::rest::RestClient;
use crate::config::constants::DEFAULT_PERSPECTIVE_CATEGORY;
use crate::descriptor::PerspectiveMode;
use crate::error::{ModsysError, Result};
use crate::types::ProviderKind;

const PROVIDER_NAME: &str = "Google Perspective";

/// Client for the Perspective comment analyzer.
///
/// `analyze` calls `POST {api_base}/v1alpha1/comments:analyze` and requests a
/// score for each comma-separated attribute in `category`. `suggest` calls
/// `comments:suggestscore` to submit a corrected score for one attribute.
pub struct PerspectiveClient {
    rest: RestClient,
    api_base: String,
    api_key: Option<String>,
    mode: PerspectiveMode,
}

impl PerspectiveClient {
    pub fn new(
        rest: RestClient,
        api_base: &str,
        mode: PerspectiveMode,
        api_key: Option<String>,
    ) -> Self {
        Self {
            rest,
            api_base: api_base.trim_end_matches('/').to_string(),
            api_key,
            mode,
        }
    }

    fn build_body(&self, request: &TextRequest) -> Result<Value> {
        let text = request
            .prompt
            .as_deref()
            .or(request.text.as_deref())
            .ok_or_else(|| ModsysError::missing(PROVIDER_NAME, "prompt"))?;
        let categories = parse_categories(request.category.as_deref());

        let mut body = json!({ "comment": { "text": text } });
        match self.mode {
            PerspectiveMode::Analyze => {
                let requested: Map<String, Value> = categories
                    .into_iter()
                    .map(|c| (c, json!({})))
                    .collect();
                body["requestedAttributes"] = Value::Object(requested);
                body["languages"] = json!(["en"]);
            }
            PerspectiveMode::Suggest => {
                let score = request
                    .score
                    .ok_or_else(|| ModsysError::missing(PROVIDER_NAME, "score"))?;
                let scores: Map<String, Value> = categories
                    .into_iter()
                    .map(|c| (c, json!({ "summaryScore": { "value": score } })))
                    .collect();
                body["attributeScores"] = Value::Object(scores);
            }
        }
        if let Some(community_id) = &request.community_id {
            body["communityId"] = json!(community_id);
        }
        if let Some(content_id) = &request.content_id {
            body["clientToken"] = json!(content_id);
        }
        Ok(body)
    }
}

fn parse_categories(category: Option<&str>) -> Vec<String> {
    let parsed: Vec<String> = category
        .unwrap_or(DEFAULT_PERSPECTIVE_CATEGORY)
        .split(',')
        .map(|c| c.trim().to_uppercase())
        .filter(|c| !c.is_empty())
        .collect();
    if parsed.is_empty() {
        vec![DEFAULT_PERSPECTIVE_CATEGORY.to_string()]
    } else {
        parsed
    }
}

#[async_trait]
impl Provider for PerspectiveClient {
    fn kind(&self) -> ProviderKind {
        ProviderKind::GooglePerspective
    }

    fn name(&self) -> String {
        PROVIDER_NAME.to_string()
    }

    fn model(&self) -> String {
        self.mode.as_str().to_string()
    }

    async fn detect_text(&self, request: &TextRequest) -> Result<Value> {
        let body = self.build_body(request)?;
        let method = match self.mode {
            PerspectiveMode::Analyze => "analyze",
            PerspectiveMode::Suggest => "suggestscore",
        };
        let url = format!("{}/v1alpha1/comments:{method}", self.api_base);
        debug!(mode = method, "Sending Perspective request");

        let mut builder = self.rest.post(&url).json(&body);
        if let Some(key) = &self.api_key {
            builder = builder.query(&[("key", key)]);
        }
        self.rest.send_json(builder).await
    }
}
