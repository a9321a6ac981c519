use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ModsysError, Result};
use crate::types::ProviderKind;

/// Arguments for a text detection call.
///
/// Each provider reads the subset it understands: Apollo builds a rule from
/// `text`, `operator` and `threshold`; Google Perspective scores `prompt`;
/// ScamAdvisor checks `domain`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TextRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operator: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub threshold: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub community_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
}

impl TextRequest {
    pub fn prompt(prompt: impl Into<String>) -> Self {
        Self {
            prompt: Some(prompt.into()),
            ..Self::default()
        }
    }

    pub fn domain(domain: impl Into<String>) -> Self {
        Self {
            domain: Some(domain.into()),
            ..Self::default()
        }
    }

    pub fn rule(text: impl Into<String>, operator: impl Into<String>, threshold: f64) -> Self {
        Self {
            text: Some(text.into()),
            operator: Some(operator.into()),
            threshold: Some(threshold),
            ..Self::default()
        }
    }
}

/// A connected moderation backend. Capabilities a backend lacks fail with
/// `ModsysError::NotImplemented`.
#[async_trait]
pub trait Provider: Send + Sync {
    fn kind(&self) -> ProviderKind;

    fn name(&self) -> String;

    /// The model (or model list) the client is bound to.
    fn model(&self) -> String;

    async fn detect_text(&self, _request: &TextRequest) -> Result<Value> {
        Err(ModsysError::NotImplemented(format!(
            "{} does not support text detection",
            self.name()
        )))
    }

    async fn detect_image(&self, _url: &str) -> Result<Value> {
        Err(ModsysError::NotImplemented(format!(
            "{} does not support image detection",
            self.name()
        )))
    }
}
