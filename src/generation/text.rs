//! Plain text generation.

use tracing::debug;

use crate::error::{ForgeError, GenerationFailure};
use crate::provider::{ModelProvider, ProviderRequest};
use crate::types::*;

/// Send `messages` to the provider once and return the text it produced.
///
/// A response with no text (blocked prompt, safety stop, empty candidate)
/// fails with [`GenerationFailure::EmptyOutput`]; callers never see an empty
/// string.
pub async fn generate_text(
    provider: &dyn ModelProvider,
    messages: Vec<ModelMessage>,
    settings: GenerationSettings,
) -> Result<GenerateTextResult, ForgeError> {
    let request = ProviderRequest { messages, settings };

    debug!(
        provider = provider.provider_name(),
        model = provider.model_id(),
        "generate_text: calling provider"
    );
    let response = provider.generate_text(&request).await?;

    if response.text.trim().is_empty() {
        return Err(GenerationFailure::EmptyOutput {
            finish_reason: response.finish_reason,
        }
        .into());
    }

    Ok(GenerateTextResult {
        text: response.text,
        usage: response.usage,
        finish_reason: response.finish_reason,
    })
}
