//! Model selection and parsing.

use std::str::FromStr;

use super::GeminiModel;
use crate::error::ForgeError;

/// Parses user-supplied model selectors.
pub struct ModelSelector;

impl ModelSelector {
    /// Parse a model selector into a [`GeminiModel`].
    ///
    /// Accepts a bare id (`gemini-2.0-flash`), a provider-qualified id
    /// (`google:gemini-2.0-flash`, `gemini:gemini-2.0-flash`) or the REST
    /// resource form (`models/gemini-2.0-flash`).
    pub fn parse(s: &str) -> Result<GeminiModel, ForgeError> {
        let trimmed = s.trim();
        let model_id = match trimmed.split_once(':') {
            Some(("google" | "gemini", id)) => id,
            Some((provider, _)) => {
                return Err(ForgeError::InvalidArgument(format!(
                    "Unsupported provider '{provider}' in model selector '{s}': only google/gemini models are available"
                )))
            }
            None => trimmed,
        };
        let model_id = model_id.strip_prefix("models/").unwrap_or(model_id);

        if model_id.is_empty() {
            return Err(ForgeError::InvalidArgument(format!(
                "Invalid model selector '{s}': missing model id"
            )));
        }

        Ok(GeminiModel::from_str(model_id).unwrap_or(GeminiModel::Custom(model_id.to_string())))
    }
}
