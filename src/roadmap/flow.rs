//! The `roadmapFlow` operation: document text in, validated [`Roadmap`] out.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};

use crate::error::ForgeError;
use crate::flow::{Flow, FlowObserver};
use crate::generation::{generate_object, OutputSchema};
use crate::provider::ModelProvider;
use crate::types::{GenerateObjectResult, GenerationSettings, ModelMessage};

use super::Roadmap;

pub const ROADMAP_FLOW_NAME: &str = "roadmapFlow";

pub const ROADMAP_SYSTEM_INSTRUCTION: &str = "You are an AI roadmap generator that creates personalized study plans based on the provided text. Your task is to analyze document content holistically to extract key learning topics and structure an optimal roadmap";

/// Build the per-call prompt. The document is interpolated verbatim.
pub fn roadmap_prompt(text: &str) -> String {
    format!("Create a detailed roadmap for the given text: {text}")
}

/// Turns a block of document text into a schema-validated [`Roadmap`].
///
/// Sampling is pinned to temperature 0. There is no retry and no fallback:
/// either a complete, valid roadmap comes back or the run fails.
pub struct RoadmapFlow {
    provider: Arc<dyn ModelProvider>,
    schema: OutputSchema,
    settings: GenerationSettings,
    observer: Option<Arc<dyn FlowObserver<Roadmap>>>,
}

impl RoadmapFlow {
    pub fn new(provider: Arc<dyn ModelProvider>) -> Result<Self, ForgeError> {
        Ok(Self {
            provider,
            schema: Roadmap::output_schema()?,
            settings: GenerationSettings::deterministic(),
            observer: None,
        })
    }

    /// Cap the response length. Temperature stays at 0.
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.settings.max_tokens = Some(max_tokens);
        self
    }

    /// Report each validated roadmap to `observer` before it is returned.
    pub fn with_observer(mut self, observer: Arc<dyn FlowObserver<Roadmap>>) -> Self {
        self.observer = Some(observer);
        self
    }

    pub fn schema(&self) -> &OutputSchema {
        &self.schema
    }

    /// Like [`Flow::run`] but keeps the raw text, usage and finish reason.
    pub async fn generate(&self, text: &str) -> Result<GenerateObjectResult<Roadmap>, ForgeError> {
        let messages = vec![
            ModelMessage::system(ROADMAP_SYSTEM_INSTRUCTION),
            ModelMessage::user(roadmap_prompt(text)),
        ];

        debug!(flow = ROADMAP_FLOW_NAME, input_chars = text.chars().count(), "running flow");
        let result: GenerateObjectResult<Roadmap> =
            generate_object(self.provider.as_ref(), messages, self.settings.clone(), &self.schema)
                .await?;

        info!(
            flow = ROADMAP_FLOW_NAME,
            nodes = result.object.len(),
            output_tokens = result.usage.output_tokens,
            "roadmap generated"
        );
        if let Some(observer) = &self.observer {
            observer.on_output(ROADMAP_FLOW_NAME, &result.object);
        }
        Ok(result)
    }
}

#[async_trait]
impl Flow for RoadmapFlow {
    type Input = String;
    type Output = Roadmap;

    fn name(&self) -> &str {
        ROADMAP_FLOW_NAME
    }

    async fn run(&self, input: String) -> Result<Roadmap, ForgeError> {
        Ok(self.generate(&input).await?.object)
    }
}
