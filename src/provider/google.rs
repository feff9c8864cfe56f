//! Google Gemini API provider.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Map, Value};
use tracing::debug;

use crate::config::DEFAULT_REQUEST_TIMEOUT;
use crate::error::ForgeError;
use crate::models::GeminiModel;
use crate::types::*;
use crate::util::timeout::with_timeout;

use super::http::{api_key_headers, shared_client, status_to_error};
use super::schema::normalize_for_gemini;
use super::{ModelProvider, ProviderRequest, ProviderResponse};

const BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

pub struct GoogleProvider {
    model: GeminiModel,
    api_key: String,
    base_url: String,
    request_timeout: Duration,
}

impl GoogleProvider {
    pub fn new(model: GeminiModel, api_key: String) -> Self {
        Self {
            model,
            api_key,
            base_url: BASE_URL.to_string(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    /// Point at a different endpoint root (proxy, emulator, test server).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model.as_str())
    }

    pub(crate) fn build_request_body(&self, request: &ProviderRequest) -> Result<Value, ForgeError> {
        let mut system_parts = Vec::new();
        let mut contents = Vec::new();

        for msg in &request.messages {
            match msg.role {
                Role::System => system_parts.push(json!({"text": msg.text()})),
                Role::User => contents.push(json!({
                    "role": "user",
                    "parts": [{"text": msg.text()}],
                })),
            }
        }

        let mut body = Map::new();
        body.insert("contents".into(), Value::Array(contents));
        if !system_parts.is_empty() {
            body.insert("systemInstruction".into(), json!({ "parts": system_parts }));
        }

        let settings = &request.settings;
        let mut gen_config = Map::new();
        if let Some(max) = settings.max_tokens {
            gen_config.insert("maxOutputTokens".into(), max.into());
        }
        if let Some(temp) = settings.temperature {
            gen_config.insert("temperature".into(), temp.into());
        }
        if let Some(ref response) = settings.response_schema {
            gen_config.insert("responseMimeType".into(), "application/json".into());
            gen_config.insert("responseSchema".into(), normalize_for_gemini(&response.schema)?);
        }
        if !gen_config.is_empty() {
            body.insert("generationConfig".into(), Value::Object(gen_config));
        }

        Ok(Value::Object(body))
    }

    async fn send(&self, request: &ProviderRequest) -> Result<ProviderResponse, ForgeError> {
        let body = self.build_request_body(request)?;

        debug!(model = self.model.as_str(), "Google generate_text");

        let resp = shared_client()
            .post(self.endpoint())
            .headers(api_key_headers(&self.api_key))
            .json(&body)
            .send()
            .await?;

        let status = resp.status().as_u16();
        if status != 200 {
            let body_text = resp.text().await.unwrap_or_default();
            return Err(status_to_error(status, &body_text));
        }

        let data: GeminiResponse = resp.json().await?;
        Ok(data.into_provider_response())
    }
}

#[async_trait]
impl ModelProvider for GoogleProvider {
    fn provider_name(&self) -> &str {
        "google"
    }

    fn model_id(&self) -> &str {
        self.model.as_str()
    }

    async fn generate_text(&self, request: &ProviderRequest) -> Result<ProviderResponse, ForgeError> {
        with_timeout(self.request_timeout, self.send(request)).await
    }
}

// Internal Gemini response types

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
    prompt_feedback: Option<GeminiPromptFeedback>,
    usage_metadata: Option<GeminiUsage>,
}

impl GeminiResponse {
    fn into_provider_response(self) -> ProviderResponse {
        let usage = self
            .usage_metadata
            .map(|u| Usage {
                input_tokens: u.prompt_token_count,
                output_tokens: u.candidates_token_count,
                total_tokens: u.total_token_count,
                cache_read_tokens: u.cached_content_token_count,
                reasoning_tokens: u.thoughts_token_count,
            })
            .unwrap_or_default();

        let Some(candidate) = self.candidates.into_iter().next() else {
            // The whole prompt was blocked; there is no candidate to read.
            let blocked = self
                .prompt_feedback
                .and_then(|f| f.block_reason)
                .is_some();
            return ProviderResponse {
                text: String::new(),
                usage,
                finish_reason: blocked.then_some(FinishReason::Safety),
            };
        };

        let text = candidate
            .content
            .map(|c| {
                c.parts
                    .into_iter()
                    .filter(|p| !p.thought.unwrap_or(false))
                    .filter_map(|p| p.text)
                    .collect::<String>()
            })
            .unwrap_or_default();

        ProviderResponse {
            text,
            usage,
            finish_reason: candidate.finish_reason.as_deref().map(FinishReason::from_gemini),
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiCandidate {
    content: Option<GeminiContent>,
    finish_reason: Option<String>,
}

#[derive(Deserialize)]
struct GeminiContent {
    #[serde(default)]
    parts: Vec<GeminiPart>,
}

#[derive(Deserialize)]
struct GeminiPart {
    text: Option<String>,
    thought: Option<bool>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiPromptFeedback {
    block_reason: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiUsage {
    #[serde(default)]
    prompt_token_count: u32,
    #[serde(default)]
    candidates_token_count: u32,
    #[serde(default)]
    total_token_count: u32,
    cached_content_token_count: Option<u32>,
    thoughts_token_count: Option<u32>,
}
