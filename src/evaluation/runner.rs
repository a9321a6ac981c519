use std::collections::BTreeMap;
use std::sync::Arc;

use futures::future::join_all;
use serde_json::Value;
use tracing::{debug, warn};

use super::types::{
    EvaluationJob, EvaluationResult, EvaluationStats, EvaluationSummary, TestVector,
};
use crate::providers::{Provider, TextRequest};

/// Replace `{{item}}` placeholders with the vector's fields.
pub fn render_prompt(template: &str, vector: &TestVector) -> String {
    template
        .replace("{{item}}", &vector.item)
        .replace("{{ item }}", &vector.item)
}

/// Pulls `attributeScores.<ATTRIBUTE>.summaryScore.value` out of a
/// Perspective-style response. Attribute names are matched in upper case, the
/// same form they are requested in.
pub fn extract_score(response: &Value, attribute: &str) -> Option<f64> {
    response
        .get("attributeScores")?
        .get(attribute.to_uppercase())?
        .pointer("/summaryScore/value")?
        .as_f64()
}

async fn run_case(
    prompt: &str,
    vector: &TestVector,
    provider: &Arc<dyn Provider>,
    community_id: &str,
) -> EvaluationResult {
    let rendered = render_prompt(prompt, vector);
    let category = vector.expected.keys().cloned().collect::<Vec<_>>().join(",");
    let request = TextRequest {
        prompt: Some(vector.item.clone()),
        community_id: Some(community_id.to_string()),
        category: (!category.is_empty()).then_some(category),
        ..TextRequest::default()
    };

    let mut result = EvaluationResult {
        prompt: rendered,
        provider: provider.name(),
        vars: vector.clone(),
        response: None,
        scores: BTreeMap::new(),
        success: false,
        error: None,
    };

    let response = match provider.detect_text(&request).await {
        Ok(response) => response,
        Err(err) => {
            warn!(item = %vector.item, error = %err, "Evaluation case failed");
            result.error = Some(err.to_string());
            return result;
        }
    };

    let mut success = true;
    for (attribute, expected) in &vector.expected {
        match extract_score(&response, attribute) {
            Some(actual) => {
                success &= vector.trend.accepts(actual, expected.value);
                result.scores.insert(attribute.clone(), actual);
            }
            None => {
                result.error = Some(format!("response has no score for {attribute}"));
                success = false;
            }
        }
    }
    debug!(item = %vector.item, success, "Evaluation case complete");

    result.success = success && result.error.is_none();
    result.response = Some(response);
    result
}

/// Runs every prompt against every vector on every provider. Cases run
/// concurrently; results keep the prompt, vector, provider nesting order.
pub async fn run_evaluation(job: &EvaluationJob, community_id: &str) -> EvaluationSummary {
    let futures: Vec<_> = job
        .prompts
        .iter()
        .flat_map(move |prompt| {
            job.vars.iter().flat_map(move |vector| {
                job.providers
                    .iter()
                    .map(move |provider| run_case(prompt, vector, provider, community_id))
            })
        })
        .collect();

    let results = join_all(futures).await;

    let mut stats = EvaluationStats::default();
    for result in &results {
        if result.error.is_some() {
            stats.errors += 1;
        } else if result.success {
            stats.successes += 1;
        } else {
            stats.failures += 1;
        }
    }

    EvaluationSummary { stats, results }
}
