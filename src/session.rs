use std::sync::Arc;

use serde_json::Value;
use tracing::{info, warn};

use crate::config::constants::EVALUATION_PROMPT_TEMPLATE;
use crate::descriptor::Descriptor;
use crate::error::{ModsysError, Result};
use crate::evaluation::{EvaluationJob, EvaluationResult, TestVector, run_evaluation};
use crate::providers::{
    AvidClient, AvidReport, Provider, ProviderRegistry, ReportRequest, TextRequest,
};
use crate::types::{Credentials, ModsysConfig, ProviderKind};

/// The provider a session is currently connected to.
#[derive(Clone)]
pub struct ActiveProvider {
    pub descriptor: Descriptor,
    pub client: Arc<dyn Provider>,
}

impl ActiveProvider {
    pub fn kind(&self) -> ProviderKind {
        self.descriptor.kind()
    }
}

/// Entry point for callers: select a provider with [`Session::use_provider`],
/// then run detections, evaluations and reports against it.
///
/// Sessions are independent values; nothing is shared between them except the
/// registry they were built from.
pub struct Session {
    registry: Arc<ProviderRegistry>,
    avid: AvidClient,
    active: Option<ActiveProvider>,
}

impl Session {
    pub fn new(registry: Arc<ProviderRegistry>) -> Self {
        let avid = registry.avid_client();
        Self {
            registry,
            avid,
            active: None,
        }
    }

    pub fn from_config(config: &ModsysConfig) -> Result<Self> {
        Ok(Self::new(Arc::new(ProviderRegistry::new(config)?)))
    }

    /// Connects to the provider named by `descriptor`.
    ///
    /// On failure the previous connection is kept.
    pub fn use_provider(
        &mut self,
        descriptor: &str,
        credentials: &Credentials,
    ) -> Result<ProviderKind> {
        let (parsed, client) = Descriptor::parse(descriptor)
            .and_then(|parsed| {
                let client = self.registry.resolve_descriptor(&parsed, credentials)?;
                Ok((parsed, client))
            })
            .inspect_err(|err| warn!(descriptor, error = %err, "Failed to connect to provider"))?;
        let kind = parsed.kind();
        info!(
            provider = %client.name(),
            model = %client.model(),
            "Connected to provider"
        );
        self.active = Some(ActiveProvider {
            descriptor: parsed,
            client,
        });
        Ok(kind)
    }

    pub fn current(&self) -> Option<&ActiveProvider> {
        self.active.as_ref()
    }

    pub fn disconnect(&mut self) {
        self.active = None;
    }

    pub async fn detect_text(&self, request: &TextRequest) -> Result<Value> {
        let active = self.active.as_ref().ok_or(ModsysError::NoProviderConnected)?;
        active.client.detect_text(request).await
    }

    pub async fn detect_image(&self, url: &str) -> Result<Value> {
        match &self.active {
            Some(active) if active.kind() == ProviderKind::Sightengine => {
                active.client.detect_image(url).await
            }
            Some(active) => Err(ModsysError::NotImplemented(format!(
                "image detection is not available for {}",
                active.kind()
            ))),
            None => Err(ModsysError::NotImplemented(
                "image detection needs a connected Sightengine provider".to_string(),
            )),
        }
    }

    /// Scores each vector with the connected Google Perspective client and
    /// returns the per-case results.
    pub async fn evaluate(
        &self,
        vars: Vec<TestVector>,
        community_id: &str,
    ) -> Result<Vec<EvaluationResult>> {
        let active = match &self.active {
            Some(active) if active.kind() == ProviderKind::GooglePerspective => active,
            _ => {
                return Err(ModsysError::NotImplemented(
                    "evaluation needs a connected Google Perspective provider".to_string(),
                ));
            }
        };

        let job = EvaluationJob {
            prompts: vec![EVALUATION_PROMPT_TEMPLATE.to_string()],
            vars,
            providers: vec![active.client.clone()],
        };
        let summary = run_evaluation(&job, community_id).await;
        info!(
            successes = summary.stats.successes,
            failures = summary.stats.failures,
            errors = summary.stats.errors,
            "Evaluation complete: {}",
            summary.stats
        );
        Ok(summary.results)
    }

    pub async fn report(&self, request: &ReportRequest) -> Result<AvidReport> {
        self.avid
            .create_report(request)
            .await
            .map_err(|e| ModsysError::Execution(Box::new(e)))
    }
}
