use std::env;

pub const DEFAULT_OPENAI_BASE: &str = "https://api.openai.com";
pub const DEFAULT_GOOGLE_PERSPECTIVE_BASE: &str = "https://commentanalyzer.googleapis.com";
pub const DEFAULT_SIGHTENGINE_BASE: &str = "https://api.sightengine.com";
pub const DEFAULT_SCAM_ADVISOR_BASE: &str = "https://api.scamadviser.cloud";
pub const DEFAULT_APOLLO_BASE: &str = "https://api.modsys.ai";

/// Model every `openai:completion` client is bound to.
pub const OPENAI_COMPLETION_MODEL: &str = "text-davinci-003";

pub const DEFAULT_PERSPECTIVE_CATEGORY: &str = "TOXICITY";

pub const EVALUATION_PROMPT_TEMPLATE: &str = "evaluate: {{item}}";

pub fn request_timeout_secs() -> u64 {
    env::var("MODSYS_REQUEST_TIMEOUT_SECS")
        .unwrap_or_else(|_| "30".to_string())
        .parse()
        .unwrap_or(30)
}

pub fn apollo_sandbox_token() -> String {
    env::var("MODSYS_APOLLO_SANDBOX_TOKEN").unwrap_or_else(|_| "Beta_token123".to_string())
}
