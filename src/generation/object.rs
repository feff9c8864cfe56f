//! Structured output: generate typed objects from model responses.

use serde::de::DeserializeOwned;
use tracing::warn;

use crate::error::{ForgeError, GenerationFailure};
use crate::provider::ModelProvider;
use crate::types::*;

use super::contract::OutputSchema;

/// Generate a typed object bound to `schema`.
///
/// The schema is sent as the provider's response schema and the reply is
/// validated locally against it before it is deserialized; nothing that
/// fails validation is returned.
pub async fn generate_object<T: DeserializeOwned>(
    provider: &dyn ModelProvider,
    messages: Vec<ModelMessage>,
    mut settings: GenerationSettings,
    schema: &OutputSchema,
) -> Result<GenerateObjectResult<T>, ForgeError> {
    settings.response_schema = Some(ResponseSchema {
        name: schema.name().to_string(),
        schema: schema.schema().clone(),
    });

    let result = super::text::generate_text(provider, messages, settings).await?;

    let raw_text = result.text.trim().to_string();
    let object = parse_validated(&raw_text, schema)?;

    Ok(GenerateObjectResult {
        object,
        raw_text,
        usage: result.usage,
        finish_reason: result.finish_reason,
    })
}

/// Parse model text as JSON, validate it, then deserialize it.
pub(crate) fn parse_validated<T: DeserializeOwned>(
    raw_text: &str,
    schema: &OutputSchema,
) -> Result<T, GenerationFailure> {
    let json_text = strip_code_fences(raw_text);

    let value: serde_json::Value =
        serde_json::from_str(&json_text).map_err(|e| GenerationFailure::MalformedOutput {
            reason: e.to_string(),
            raw: raw_text.to_string(),
        })?;

    if let Err(failure) = schema.check(&value, raw_text) {
        warn!(schema = schema.name(), %failure, "rejecting model output");
        return Err(failure);
    }

    // The schema may be looser than the type (e.g. hand-written schemas).
    serde_json::from_value(value).map_err(|e| GenerationFailure::SchemaViolation {
        errors: vec![e.to_string()],
        raw: raw_text.to_string(),
    })
}

/// Strip markdown code fences from JSON response.
fn strip_code_fences(text: &str) -> String {
    let trimmed = text.trim();
    if trimmed.starts_with("```") {
        let without_opening = if let Some(rest) = trimmed.strip_prefix("```json") {
            rest
        } else if let Some(rest) = trimmed.strip_prefix("```") {
            rest
        } else {
            trimmed
        };
        if let Some(stripped) = without_opening.strip_suffix("```") {
            return stripped.trim().to_string();
        }
        return without_opening.trim().to_string();
    }
    trimmed.to_string()
}
