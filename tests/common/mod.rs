//! Shared test helpers and mock provider.

#![allow(dead_code)]

use async_trait::async_trait;

use roadmap_forge::error::ForgeError;
use roadmap_forge::provider::{ModelProvider, ProviderRequest, ProviderResponse};
use roadmap_forge::types::*;

/// A mock provider that returns canned responses and records requests.
pub struct MockProvider {
    model_id: String,
    responses: std::sync::Mutex<Vec<Result<ProviderResponse, ForgeError>>>,
    requests: std::sync::Mutex<Vec<ProviderRequest>>,
}

impl MockProvider {
    pub fn new(model_id: &str) -> Self {
        Self {
            model_id: model_id.to_string(),
            responses: std::sync::Mutex::new(Vec::new()),
            requests: std::sync::Mutex::new(Vec::new()),
        }
    }

    /// Queue a text response.
    pub fn queue_response(&self, text: &str) {
        self.responses.lock().unwrap().push(Ok(ProviderResponse {
            text: text.to_string(),
            usage: Usage {
                input_tokens: 10,
                output_tokens: 20,
                total_tokens: 30,
                ..Default::default()
            },
            finish_reason: Some(FinishReason::Stop),
        }));
    }

    /// Queue a JSON response.
    pub fn queue_json(&self, value: serde_json::Value) {
        self.queue_response(&value.to_string());
    }

    /// Queue a response with no text, as after a safety block.
    pub fn queue_empty(&self, finish_reason: Option<FinishReason>) {
        self.responses.lock().unwrap().push(Ok(ProviderResponse {
            text: String::new(),
            usage: Usage::default(),
            finish_reason,
        }));
    }

    /// Queue a failed call.
    pub fn queue_error(&self, error: ForgeError) {
        self.responses.lock().unwrap().push(Err(error));
    }

    pub fn requests(&self) -> Vec<ProviderRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn last_request(&self) -> ProviderRequest {
        self.requests
            .lock()
            .unwrap()
            .last()
            .cloned()
            .expect("provider was never called")
    }
}

#[async_trait]
impl ModelProvider for MockProvider {
    fn provider_name(&self) -> &str {
        "mock"
    }

    fn model_id(&self) -> &str {
        &self.model_id
    }

    async fn generate_text(
        &self,
        request: &ProviderRequest,
    ) -> Result<ProviderResponse, ForgeError> {
        self.requests.lock().unwrap().push(request.clone());
        let mut responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            return Ok(ProviderResponse {
                text: "Mock response".to_string(),
                usage: Usage::default(),
                finish_reason: Some(FinishReason::Stop),
            });
        }
        responses.remove(0)
    }
}

/// A fully populated node as JSON.
pub fn node_json(id: &str, topic: &str) -> serde_json::Value {
    serde_json::json!({
        "node_id": id,
        "topic": topic,
        "description": format!("An overview of {topic}"),
        "summary": format!("{topic} in brief"),
        "difficulty": "Intermediate",
        "estimated_time": "3 hours"
    })
}
