use thiserror::Error;

pub type Result<T> = std::result::Result<T, ModsysError>;

#[derive(Debug, Error)]
pub enum ModsysError {
    #[error("Not implemented: {0}")]
    NotImplemented(String),

    #[error("Unknown {provider} model type: {mode}")]
    UnknownModelType { provider: String, mode: String },

    #[error("No model type set for {0}")]
    NoModelType(String),

    #[error("Malformed descriptor '{descriptor}': {reason}")]
    MalformedDescriptor { descriptor: String, reason: String },

    #[error("Provider {0} not found")]
    ProviderNotFound(String),

    #[error("No provider connected")]
    NoProviderConnected,

    #[error("{provider} requires argument '{argument}'")]
    MissingArgument { provider: String, argument: String },

    #[error("HTTP error {status}: {body}")]
    Http { status: u16, body: String },

    #[error("Timeout: {0}")]
    Timeout(String),

    #[error("Provider unavailable: {0}")]
    Unavailable(String),

    #[error("{provider} rejected the request: {message}")]
    Rejected { provider: String, message: String },

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Invalid report: {0}")]
    InvalidReport(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Execution failed: {0}")]
    Execution(#[source] Box<ModsysError>),
}

impl ModsysError {
    pub fn missing(provider: &str, argument: &str) -> Self {
        ModsysError::MissingArgument {
            provider: provider.to_string(),
            argument: argument.to_string(),
        }
    }

    pub fn malformed(descriptor: &str, reason: impl Into<String>) -> Self {
        ModsysError::MalformedDescriptor {
            descriptor: descriptor.to_string(),
            reason: reason.into(),
        }
    }
}

impl From<reqwest::Error> for ModsysError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            ModsysError::Timeout(e.to_string())
        } else {
            ModsysError::Unavailable(e.to_string())
        }
    }
}

impl From<serde_json::Error> for ModsysError {
    fn from(e: serde_json::Error) -> Self {
        ModsysError::Parse(e.to_string())
    }
}
