//! Process configuration, loaded once at startup and passed by reference.

use std::fmt;
use std::time::Duration;

use reqwest::header::HeaderValue;

use crate::error::ForgeError;
use crate::models::{GeminiModel, ModelSelector};

/// Default per-call timeout for remote generation.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// Environment variables holding the API key, in resolution order.
pub const API_KEY_VARS: [&str; 2] = ["GEMINI_API_KEY", "GOOGLE_API_KEY"];
pub const BASE_URL_VAR: &str = "GEMINI_BASE_URL";
pub const MODEL_VAR: &str = "ROADMAP_FORGE_MODEL";
pub const TIMEOUT_VAR: &str = "ROADMAP_FORGE_TIMEOUT_SECS";

/// Configuration for talking to the Gemini API.
///
/// Built with [`ForgeConfig::from_env`] (or [`ForgeConfig::new`] in code) and
/// handed to [`crate::provider::create_provider`]. A missing credential is
/// reported here, before any generation call is attempted.
#[derive(Clone)]
pub struct ForgeConfig {
    api_key: String,
    base_url: Option<String>,
    model: GeminiModel,
    request_timeout: Duration,
}

impl fmt::Debug for ForgeConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ForgeConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

impl ForgeConfig {
    /// Create a config with an explicit API key and defaults for everything else.
    pub fn new(api_key: impl Into<String>) -> Result<Self, ForgeError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(ForgeError::Configuration("API key must not be blank".into()));
        }
        if HeaderValue::from_str(&api_key).is_err() {
            return Err(ForgeError::Configuration(
                "API key contains characters not allowed in an HTTP header".into(),
            ));
        }
        Ok(Self {
            api_key,
            base_url: None,
            model: GeminiModel::default(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        })
    }

    /// Load from the process environment, reading `.env` first if present.
    pub fn from_env() -> Result<Self, ForgeError> {
        let _ = dotenvy::dotenv(); // load .env if present, ignore error
        Self::from_process_env()
    }

    /// Load from the process environment only, without reading `.env`.
    pub fn from_process_env() -> Result<Self, ForgeError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ForgeError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_blank = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let api_key = API_KEY_VARS
            .iter()
            .find_map(|&var| non_blank(var))
            .ok_or_else(|| {
                ForgeError::Configuration(format!(
                    "Missing API key: set {} (or {})",
                    API_KEY_VARS[0], API_KEY_VARS[1]
                ))
            })?;

        let mut config = Self::new(api_key)?;

        if let Some(url) = non_blank(BASE_URL_VAR) {
            config.base_url = Some(url);
        }
        if let Some(model) = non_blank(MODEL_VAR) {
            config.model = ModelSelector::parse(&model)
                .map_err(|e| ForgeError::Configuration(format!("{MODEL_VAR}: {e}")))?;
        }
        if let Some(raw) = non_blank(TIMEOUT_VAR) {
            let secs: u64 = raw.trim().parse().map_err(|_| {
                ForgeError::Configuration(format!(
                    "{TIMEOUT_VAR} must be a whole number of seconds, got '{raw}'"
                ))
            })?;
            if secs == 0 {
                return Err(ForgeError::Configuration(format!("{TIMEOUT_VAR} must be positive")));
            }
            config.request_timeout = Duration::from_secs(secs);
        }

        Ok(config)
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    pub fn with_model(mut self, model: GeminiModel) -> Self {
        self.model = model;
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn base_url(&self) -> Option<&str> {
        self.base_url.as_deref()
    }

    pub fn model(&self) -> &GeminiModel {
        &self.model
    }

    pub fn request_timeout(&self) -> Duration {
        self.request_timeout
    }
}
