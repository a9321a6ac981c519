use std::path::PathBuf;

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{ModsysError, Result};

/// Inputs for an AVID incident report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportRequest {
    pub provider_name: String,
    pub provider_model: String,
    pub dataset_name: String,
    pub dataset_link: String,
    pub summary: String,
    pub path: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LangValue {
    pub lang: String,
    pub value: String,
}

impl LangValue {
    fn english(value: &str) -> Self {
        Self {
            lang: "eng".to_string(),
            value: value.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Artifact {
    #[serde(rename = "type")]
    pub artifact_type: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Affects {
    pub developer: Vec<String>,
    pub deployer: Vec<String>,
    pub artifacts: Vec<Artifact>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProblemType {
    pub classof: String,
    #[serde(rename = "type")]
    pub problem_type: String,
    pub description: LangValue,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reference {
    #[serde(rename = "type")]
    pub reference_type: String,
    pub label: String,
    pub url: String,
}

/// An AVID report document as written to disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AvidReport {
    pub data_type: String,
    pub affects: Affects,
    pub problemtype: ProblemType,
    pub references: Vec<Reference>,
    pub description: LangValue,
    pub reported_date: NaiveDate,
}

impl AvidReport {
    pub fn from_request(request: &ReportRequest) -> Result<Self> {
        let required = [
            ("provider_name", &request.provider_name),
            ("provider_model", &request.provider_model),
            ("dataset_name", &request.dataset_name),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(ModsysError::InvalidReport(format!("{field} must not be empty")));
            }
        }

        Ok(Self {
            data_type: "AVID".to_string(),
            affects: Affects {
                developer: vec![request.provider_name.clone()],
                deployer: vec![request.provider_name.clone()],
                artifacts: vec![Artifact {
                    artifact_type: "Model".to_string(),
                    name: request.provider_model.clone(),
                }],
            },
            problemtype: ProblemType {
                classof: "LLM Evaluation".to_string(),
                problem_type: "Detection".to_string(),
                description: LangValue::english(&format!(
                    "Evaluation of {} on {}",
                    request.provider_model, request.dataset_name
                )),
            },
            references: vec![Reference {
                reference_type: "source".to_string(),
                label: request.dataset_name.clone(),
                url: request.dataset_link.clone(),
            }],
            description: LangValue::english(&request.summary),
            reported_date: Utc::now().date_naive(),
        })
    }
}

/// Writes AVID reports as pretty-printed JSON files.
#[derive(Debug, Clone, Default)]
pub struct AvidClient;

impl AvidClient {
    pub fn new() -> Self {
        Self
    }

    pub async fn create_report(&self, request: &ReportRequest) -> Result<AvidReport> {
        let report = AvidReport::from_request(request)?;
        let contents = serde_json::to_string_pretty(&report)?;
        tokio::fs::write(&request.path, contents).await?;
        info!(
            path = %request.path.display(),
            provider = %request.provider_name,
            "AVID report written"
        );
        Ok(report)
    }
}
