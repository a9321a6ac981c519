use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use serde::ser::SerializeStruct;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::providers::Provider;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    #[default]
    Higher,
    Lower,
}

impl Trend {
    pub fn accepts(&self, actual: f64, expected: f64) -> bool {
        match self {
            Trend::Higher => actual >= expected,
            Trend::Lower => actual <= expected,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ExpectedScore {
    #[serde(deserialize_with = "number_or_string")]
    pub value: f64,
}

fn number_or_string<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Number(n) => Ok(n),
        Raw::Text(s) => s.trim().parse().map_err(serde::de::Error::custom),
    }
}

/// One evaluation case: the text to score, the expected attribute scores and
/// which direction counts as a pass.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct TestVector {
    pub item: String,
    #[serde(rename = "__expected", default)]
    pub expected: BTreeMap<String, ExpectedScore>,
    #[serde(rename = "__trend", default)]
    pub trend: Trend,
}

#[derive(Clone)]
pub struct EvaluationJob {
    pub prompts: Vec<String>,
    pub vars: Vec<TestVector>,
    pub providers: Vec<Arc<dyn Provider>>,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct EvaluationResult {
    pub prompt: String,
    pub provider: String,
    pub vars: TestVector,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response: Option<serde_json::Value>,
    pub scores: BTreeMap<String, f64>,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EvaluationStats {
    pub successes: usize,
    pub failures: usize,
    pub errors: usize,
}

impl EvaluationStats {
    pub fn total(&self) -> usize {
        self.successes + self.failures + self.errors
    }
}

impl Serialize for EvaluationStats {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("EvaluationStats", 4)?;
        state.serialize_field("successes", &self.successes)?;
        state.serialize_field("failures", &self.failures)?;
        state.serialize_field("errors", &self.errors)?;
        state.serialize_field("total", &self.total())?;
        state.end()
    }
}

impl fmt::Display for EvaluationStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} passed, {} failed, {} errored ({} total)",
            self.successes,
            self.failures,
            self.errors,
            self.total()
        )
    }
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct EvaluationSummary {
    pub stats: EvaluationStats,
    pub results: Vec<EvaluationResult>,
}
