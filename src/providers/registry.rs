use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use super::apollo::ApolloClient;
use super::avid::AvidClient;
use super::openai::OpenAIClient;
use super::perspective::PerspectiveClient;
use super::provider::Provider;
use super::rest::RestClient;
use super::scam_advisor::ScamAdvisorClient;
use super::sightengine::SightengineClient;
use crate::config::constants::{OPENAI_COMPLETION_MODEL, apollo_sandbox_token};
use crate::descriptor::{Descriptor, OpenAIMode, SIGHTENGINE_PREFIX};
use crate::error::{ModsysError, Result};
use crate::types::{Credentials, Endpoints, ModsysConfig, ProviderKind};

/// Builds a provider for a custom descriptor path.
pub type ProviderFactory = Arc<dyn Fn(&Credentials) -> Result<Arc<dyn Provider>> + Send + Sync>;

/// Resolves descriptors into connected clients.
///
/// Built-in provider families are constructed directly; any other descriptor is
/// treated as a path and looked up among the registered factories.
pub struct ProviderRegistry {
    endpoints: Endpoints,
    rest: RestClient,
    factories: HashMap<String, ProviderFactory>,
}

impl ProviderRegistry {
    pub fn new(config: &ModsysConfig) -> Result<Self> {
        let rest =
            RestClient::with_timeout(Duration::from_secs(config.general.request_timeout_secs))?;
        Ok(Self::with_client(config.endpoints.clone(), rest))
    }

    pub fn with_client(endpoints: Endpoints, rest: RestClient) -> Self {
        Self {
            endpoints,
            rest,
            factories: HashMap::new(),
        }
    }

    pub fn register<F>(&mut self, path: impl Into<String>, factory: F)
    where
        F: Fn(&Credentials) -> Result<Arc<dyn Provider>> + Send + Sync + 'static,
    {
        self.factories.insert(path.into(), Arc::new(factory));
    }

    pub fn is_registered(&self, path: &str) -> bool {
        self.factories.contains_key(path)
    }

    pub fn resolve(&self, raw: &str, credentials: &Credentials) -> Result<Arc<dyn Provider>> {
        let descriptor = Descriptor::parse(raw)?;
        self.resolve_descriptor(&descriptor, credentials)
    }

    pub fn resolve_descriptor(
        &self,
        descriptor: &Descriptor,
        credentials: &Credentials,
    ) -> Result<Arc<dyn Provider>> {
        debug!(descriptor = %descriptor, "Resolving provider");
        let provider: Arc<dyn Provider> = match descriptor {
            Descriptor::OpenAI(OpenAIMode::Chat) => {
                return Err(ModsysError::NotImplemented(
                    "OpenAI chat models are not supported".to_string(),
                ));
            }
            Descriptor::OpenAI(OpenAIMode::Completion) => Arc::new(OpenAIClient::new(
                self.rest.clone(),
                &self.endpoints.openai,
                credentials.openai_api_key.clone(),
                OPENAI_COMPLETION_MODEL,
            )),
            Descriptor::GooglePerspective(mode) => Arc::new(PerspectiveClient::new(
                self.rest.clone(),
                &self.endpoints.google_perspective,
                *mode,
                credentials.google_perspective_api_key.clone(),
            )),
            Descriptor::Sightengine(models) => {
                if models.is_empty() {
                    return Err(ModsysError::NoModelType(SIGHTENGINE_PREFIX.to_string()));
                }
                Arc::new(SightengineClient::new(
                    self.rest.clone(),
                    &self.endpoints.sightengine,
                    models.clone(),
                    credentials.sightengine_api_key.clone(),
                    credentials.sightengine_api_user.clone(),
                ))
            }
            Descriptor::Apollo => Arc::new(ApolloClient::new(
                self.rest.clone(),
                &self.endpoints.apollo,
                credentials
                    .apollo_token
                    .clone()
                    .filter(|t| !t.is_empty())
                    .unwrap_or_else(apollo_sandbox_token),
            )),
            Descriptor::ScamAdvisor => {
                self.scam_advisor_client(credentials.scam_advisor_api_key.clone())
            }
            Descriptor::Custom(path) => return self.custom(path, credentials),
        };
        Ok(provider)
    }

    fn custom(&self, path: &str, credentials: &Credentials) -> Result<Arc<dyn Provider>> {
        let factory = self
            .factories
            .get(path)
            .ok_or_else(|| ModsysError::ProviderNotFound(path.to_string()))?;
        factory(credentials)
    }

    /// Resolves `raw` only if it names `kind`; any other descriptor is looked
    /// up as a custom path.
    fn resolve_family(
        &self,
        kind: ProviderKind,
        raw: &str,
        credentials: &Credentials,
    ) -> Result<Arc<dyn Provider>> {
        let descriptor = Descriptor::parse(raw)?;
        if descriptor.kind() == kind {
            self.resolve_descriptor(&descriptor, credentials)
        } else {
            self.custom(raw.trim(), credentials)
        }
    }

    pub fn json_client(&self) -> RestClient {
        self.rest.clone()
    }

    pub fn scam_advisor_client(&self, api_key: Option<String>) -> Arc<dyn Provider> {
        Arc::new(ScamAdvisorClient::new(
            self.rest.clone(),
            &self.endpoints.scam_advisor,
            api_key,
        ))
    }

    pub fn openai_client(&self, raw: &str, credentials: &Credentials) -> Result<Arc<dyn Provider>> {
        self.resolve_family(ProviderKind::OpenAI, raw, credentials)
    }

    pub fn google_client(&self, raw: &str, credentials: &Credentials) -> Result<Arc<dyn Provider>> {
        self.resolve_family(ProviderKind::GooglePerspective, raw, credentials)
    }

    pub fn sightengine_client(
        &self,
        raw: &str,
        credentials: &Credentials,
    ) -> Result<Arc<dyn Provider>> {
        self.resolve_family(ProviderKind::Sightengine, raw, credentials)
    }

    pub fn avid_client(&self) -> AvidClient {
        AvidClient::new()
    }
}
