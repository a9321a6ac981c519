pub mod apollo;
pub mod avid;
pub mod openai;
pub mod perspective;
pub mod provider;
pub mod registry;
pub mod rest;
pub mod scam_advisor;
pub mod sightengine;

pub use apollo::ApolloClient;
pub use avid::{AvidClient, AvidReport, ReportRequest};
pub use openai::OpenAIClient;
pub use perspective::PerspectiveClient;
pub use provider::{Provider, TextRequest};
pub use registry::{ProviderFactory, ProviderRegistry};
pub use rest::RestClient;
pub use scam_advisor::ScamAdvisorClient;
pub use sightengine::SightengineClient;
