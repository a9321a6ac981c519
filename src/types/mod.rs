use serde::{Deserialize, Serialize};

use crate::config::constants::{
    DEFAULT_APOLLO_BASE, DEFAULT_GOOGLE_PERSPECTIVE_BASE, DEFAULT_OPENAI_BASE,
    DEFAULT_SCAM_ADVISOR_BASE, DEFAULT_SIGHTENGINE_BASE, request_timeout_secs,
};

/// The provider family a session is connected to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderKind {
    Apollo,
    OpenAI,
    GooglePerspective,
    Sightengine,
    ScamAdvisor,
    Custom,
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProviderKind::Apollo => write!(f, "apollo"),
            ProviderKind::OpenAI => write!(f, "openai"),
            ProviderKind::GooglePerspective => write!(f, "google_perspective"),
            ProviderKind::Sightengine => write!(f, "sightengine"),
            ProviderKind::ScamAdvisor => write!(f, "scam_advisor"),
            ProviderKind::Custom => write!(f, "custom"),
        }
    }
}

/// Secrets handed to `Session::use_provider`. Every field is optional; the
/// provider being connected decides which ones it needs.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Credentials {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub apollo_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub openai_api_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub google_perspective_api_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sightengine_api_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sightengine_api_user: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scam_advisor_api_key: Option<String>,
}

fn default_openai_base() -> String {
    DEFAULT_OPENAI_BASE.to_string()
}

fn default_google_perspective_base() -> String {
    DEFAULT_GOOGLE_PERSPECTIVE_BASE.to_string()
}

fn default_sightengine_base() -> String {
    DEFAULT_SIGHTENGINE_BASE.to_string()
}

fn default_scam_advisor_base() -> String {
    DEFAULT_SCAM_ADVISOR_BASE.to_string()
}

fn default_apollo_base() -> String {
    DEFAULT_APOLLO_BASE.to_string()
}

/// Base URLs of the vendor APIs. Overridable so tests can point at a mock server.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Endpoints {
    #[serde(default = "default_openai_base")]
    pub openai: String,
    #[serde(default = "default_google_perspective_base")]
    pub google_perspective: String,
    #[serde(default = "default_sightengine_base")]
    pub sightengine: String,
    #[serde(default = "default_scam_advisor_base")]
    pub scam_advisor: String,
    #[serde(default = "default_apollo_base")]
    pub apollo: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            openai: default_openai_base(),
            google_perspective: default_google_perspective_base(),
            sightengine: default_sightengine_base(),
            scam_advisor: default_scam_advisor_base(),
            apollo: default_apollo_base(),
        }
    }
}

impl Endpoints {
    /// Points every vendor at the same base URL.
    pub fn all(base: &str) -> Self {
        Self {
            openai: base.to_string(),
            google_perspective: base.to_string(),
            sightengine: base.to_string(),
            scam_advisor: base.to_string(),
            apollo: base.to_string(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct General {
    #[serde(default = "request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for General {
    fn default() -> Self {
        Self {
            request_timeout_secs: request_timeout_secs(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct ModsysConfig {
    #[serde(default)]
    pub general: General,
    #[serde(default)]
    pub endpoints: Endpoints,
    #[serde(default)]
    pub credentials: Credentials,
}
