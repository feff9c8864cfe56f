//! Result types returned by the generation functions.

use serde::{Deserialize, Serialize};

use super::{FinishReason, Usage};

/// Result of a plain text generation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GenerateTextResult {
    pub text: String,
    pub usage: Usage,
    pub finish_reason: Option<FinishReason>,
}

/// Result of a schema-bound generation.
#[derive(Debug, Clone)]
pub struct GenerateObjectResult<T> {
    /// The validated, typed object.
    pub object: T,
    /// Model text the object was parsed from.
    pub raw_text: String,
    pub usage: Usage,
    pub finish_reason: Option<FinishReason>,
}
