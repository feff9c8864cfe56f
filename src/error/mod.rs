//! Error types for roadmap-forge.

use thiserror::Error;

use crate::types::FinishReason;

/// Primary error type for all roadmap-forge operations.
#[derive(Error, Debug)]
pub enum ForgeError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Authentication error: {0}")]
    Authentication(String),

    #[error("Rate limited: retry after {retry_after_ms:?}ms")]
    RateLimited { retry_after_ms: Option<u64> },

    #[error("Timeout after {0}ms")]
    Timeout(u64),

    #[error("Generation failed: {0}")]
    Generation(#[from] GenerationFailure),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

/// The remote call completed but produced nothing usable.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GenerationFailure {
    #[error("model returned no output (finish reason: {finish_reason:?})")]
    EmptyOutput { finish_reason: Option<FinishReason> },

    #[error("model output is not valid JSON: {reason}")]
    MalformedOutput { reason: String, raw: String },

    #[error("model output violates schema: {}", errors.join("; "))]
    SchemaViolation { errors: Vec<String>, raw: String },
}

impl GenerationFailure {
    /// Raw model text that was rejected, if any.
    pub fn raw_output(&self) -> Option<&str> {
        match self {
            Self::EmptyOutput { .. } => None,
            Self::MalformedOutput { raw, .. } | Self::SchemaViolation { raw, .. } => Some(raw),
        }
    }
}

/// Broad error category for routing recovery logic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Authentication,
    RateLimit,
    Network,
    Timeout,
    Server,
    Api,
    Configuration,
    Serialization,
    Generation,
    Unknown,
}

impl ForgeError {
    /// Create an API error.
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    /// Classify this error into a category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Authentication(_) => ErrorCategory::Authentication,
            Self::RateLimited { .. } => ErrorCategory::RateLimit,
            Self::Network(_) => ErrorCategory::Network,
            Self::Timeout(_) => ErrorCategory::Timeout,
            Self::Configuration(_) => ErrorCategory::Configuration,
            Self::Serialization(_) => ErrorCategory::Serialization,
            Self::Generation(_) => ErrorCategory::Generation,
            Self::Api { status, .. } => match status {
                401 | 403 => ErrorCategory::Authentication,
                429 => ErrorCategory::RateLimit,
                500..=599 => ErrorCategory::Server,
                _ => ErrorCategory::Api,
            },
            _ => ErrorCategory::Unknown,
        }
    }

    /// True when the remote call succeeded but its output was rejected.
    ///
    /// Transport, auth and server failures return `false`: the model never
    /// had a chance to answer.
    pub fn is_generation_failure(&self) -> bool {
        matches!(self, Self::Generation(_))
    }

    /// Whether this error is potentially transient.
    ///
    /// Nothing in this crate retries; callers embedding the flows in a
    /// service can use this to decide for themselves.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self.category(),
            ErrorCategory::RateLimit
                | ErrorCategory::Network
                | ErrorCategory::Timeout
                | ErrorCategory::Server
        )
    }
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, ForgeError>;
