//! Model provider trait and the Gemini implementation.

pub mod google;
pub mod http;
pub mod schema;

use async_trait::async_trait;

use crate::config::ForgeConfig;
use crate::error::ForgeError;
use crate::types::{FinishReason, GenerationSettings, ModelMessage, Usage};

/// A request sent to a model provider.
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderRequest {
    pub messages: Vec<ModelMessage>,
    pub settings: GenerationSettings,
}

/// Response from a provider.
///
/// An empty `text` is a valid response at this layer; the generation
/// functions decide whether it is acceptable.
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderResponse {
    pub text: String,
    pub usage: Usage,
    pub finish_reason: Option<FinishReason>,
}

/// Core trait implemented by model providers.
#[async_trait]
pub trait ModelProvider: Send + Sync {
    /// Provider name (e.g., "google").
    fn provider_name(&self) -> &str;
    /// The model ID this provider instance serves.
    fn model_id(&self) -> &str;

    /// Generate a single, complete response.
    async fn generate_text(&self, request: &ProviderRequest)
        -> Result<ProviderResponse, ForgeError>;
}

/// Create the provider described by `config`.
pub fn create_provider(config: &ForgeConfig) -> Result<Box<dyn ModelProvider>, ForgeError> {
    let mut provider = google::GoogleProvider::new(config.model().clone(), config.api_key().to_string())
        .with_request_timeout(config.request_timeout());
    if let Some(url) = config.base_url() {
        provider = provider.with_base_url(url);
    }
    Ok(Box::new(provider))
}
