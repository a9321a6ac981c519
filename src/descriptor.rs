use std::fmt;
use std::str::FromStr;

use crate::error::{ModsysError, Result};
use crate::types::ProviderKind;

pub const OPENAI_PREFIX: &str = "openai";
pub const GOOGLE_PERSPECTIVE_PREFIX: &str = "google_perspective";
pub const SIGHTENGINE_PREFIX: &str = "sightengine";
pub const APOLLO_NAME: &str = "apollo";
pub const SCAM_ADVISOR_NAME: &str = "scam_advisor";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenAIMode {
    Chat,
    Completion,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PerspectiveMode {
    Analyze,
    Suggest,
}

impl PerspectiveMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            PerspectiveMode::Analyze => "analyze",
            PerspectiveMode::Suggest => "suggest",
        }
    }
}

/// A parsed `"<provider>:<mode>"` string.
///
/// The provider name is matched case-insensitively and everything after the
/// first `:` is the mode payload. Strings that do not name a built-in provider
/// become [`Descriptor::Custom`] and are looked up in the provider registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Descriptor {
    Apollo,
    ScamAdvisor,
    OpenAI(OpenAIMode),
    GooglePerspective(PerspectiveMode),
    Sightengine(Vec<String>),
    Custom(String),
}

impl Descriptor {
    pub fn parse(raw: &str) -> Result<Self> {
        let trimmed = raw.trim();
        let (name, mode) = match trimmed.split_once(':') {
            Some((name, mode)) => (name.to_lowercase(), Some(mode)),
            None => (trimmed.to_lowercase(), None),
        };

        match (name.as_str(), mode) {
            (APOLLO_NAME, None) => Ok(Descriptor::Apollo),
            (SCAM_ADVISOR_NAME, None) => Ok(Descriptor::ScamAdvisor),
            (OPENAI_PREFIX, Some(mode)) => match mode {
                "chat" => Ok(Descriptor::OpenAI(OpenAIMode::Chat)),
                "completion" => Ok(Descriptor::OpenAI(OpenAIMode::Completion)),
                other => Err(ModsysError::UnknownModelType {
                    provider: "OpenAI".to_string(),
                    mode: other.to_string(),
                }),
            },
            (GOOGLE_PERSPECTIVE_PREFIX, Some(mode)) => match mode {
                "analyze" => Ok(Descriptor::GooglePerspective(PerspectiveMode::Analyze)),
                "suggest" => Ok(Descriptor::GooglePerspective(PerspectiveMode::Suggest)),
                other => Err(ModsysError::UnknownModelType {
                    provider: "Google Perspective".to_string(),
                    mode: other.to_string(),
                }),
            },
            (SIGHTENGINE_PREFIX, Some(mode)) => {
                parse_model_list(mode).map(Descriptor::Sightengine).map_err(|reason| {
                    ModsysError::malformed(raw, reason)
                })
            }
            (OPENAI_PREFIX | GOOGLE_PERSPECTIVE_PREFIX | SIGHTENGINE_PREFIX, None) => {
                Err(ModsysError::malformed(raw, "missing mode after provider name"))
            }
            _ if trimmed.is_empty() => Err(ModsysError::malformed(raw, "empty descriptor")),
            _ => Ok(Descriptor::Custom(trimmed.to_string())),
        }
    }

    pub fn kind(&self) -> ProviderKind {
        match self {
            Descriptor::Apollo => ProviderKind::Apollo,
            Descriptor::ScamAdvisor => ProviderKind::ScamAdvisor,
            Descriptor::OpenAI(_) => ProviderKind::OpenAI,
            Descriptor::GooglePerspective(_) => ProviderKind::GooglePerspective,
            Descriptor::Sightengine(_) => ProviderKind::Sightengine,
            Descriptor::Custom(_) => ProviderKind::Custom,
        }
    }
}

impl FromStr for Descriptor {
    type Err = ModsysError;

    fn from_str(s: &str) -> Result<Self> {
        Descriptor::parse(s)
    }
}

impl fmt::Display for Descriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Descriptor::Apollo => write!(f, "{APOLLO_NAME}"),
            Descriptor::ScamAdvisor => write!(f, "{SCAM_ADVISOR_NAME}"),
            Descriptor::OpenAI(OpenAIMode::Chat) => write!(f, "{OPENAI_PREFIX}:chat"),
            Descriptor::OpenAI(OpenAIMode::Completion) => write!(f, "{OPENAI_PREFIX}:completion"),
            Descriptor::GooglePerspective(mode) => {
                write!(f, "{GOOGLE_PERSPECTIVE_PREFIX}:{}", mode.as_str())
            }
            Descriptor::Sightengine(models) => {
                let quoted: Vec<String> = models
                    .iter()
                    .map(|m| format!("'{}'", m.replace('\\', "\\\\").replace('\'', "\\'")))
                    .collect();
                write!(f, "{SIGHTENGINE_PREFIX}:[{}]", quoted.join(","))
            }
            Descriptor::Custom(path) => write!(f, "{path}"),
        }
    }
}

/// Parses a list literal such as `['nudity', "wad"]` into its string items.
fn parse_model_list(input: &str) -> std::result::Result<Vec<String>, String> {
    let mut chars = input.trim().chars().peekable();
    if chars.next() != Some('[') {
        return Err("model list must start with '['".to_string());
    }

    let mut models = Vec::new();
    loop {
        skip_whitespace(&mut chars);
        match chars.next() {
            Some(']') if models.is_empty() => break,
            Some(quote @ ('\'' | '"')) => {
                let mut item = String::new();
                loop {
                    match chars.next() {
                        Some(c) if c == quote => break,
                        Some('\\') => match chars.next() {
                            Some(escaped) => item.push(escaped),
                            None => return Err("unterminated string".to_string()),
                        },
                        Some(c) => item.push(c),
                        None => return Err("unterminated string".to_string()),
                    }
                }
                models.push(item);
            }
            Some(c) => return Err(format!("expected a quoted string, found '{c}'")),
            None => return Err("unterminated list".to_string()),
        }

        skip_whitespace(&mut chars);
        match chars.next() {
            Some(',') => {
                // trailing comma before ']'
                skip_whitespace(&mut chars);
                if chars.peek() == Some(&']') {
                    chars.next();
                    break;
                }
            }
            Some(']') => break,
            Some(c) => return Err(format!("expected ',' or ']', found '{c}'")),
            None => return Err("unterminated list".to_string()),
        }
    }

    skip_whitespace(&mut chars);
    if let Some(c) = chars.next() {
        return Err(format!("unexpected '{c}' after list"));
    }
    Ok(models)
}

fn skip_whitespace(chars: &mut std::iter::Peekable<std::str::Chars<'_>>) {
    while chars.peek().is_some_and(|c| c.is_whitespace()) {
        chars.next();
    }
}
