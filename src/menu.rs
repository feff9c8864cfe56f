//! Free-form generation: invent a menu item.
//!
//! No schema, no parsing. The model's text is returned as-is.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::error::ForgeError;
use crate::flow::Flow;
use crate::generation::generate_text;
use crate::provider::ModelProvider;
use crate::types::{GenerationSettings, ModelMessage};

pub const MENU_ITEM_FLOW_NAME: &str = "menuItemFlow";

pub const DEFAULT_MENU_PROMPT: &str = "Invent a menu item for a pirate themed restaurant.";

/// Send `prompt` as a single user message and return the generated text.
pub async fn invent_menu_item(provider: &dyn ModelProvider, prompt: &str) -> Result<String, ForgeError> {
    let result = generate_text(
        provider,
        vec![ModelMessage::user(prompt)],
        GenerationSettings::default(),
    )
    .await?;
    info!(flow = MENU_ITEM_FLOW_NAME, chars = result.text.len(), "menu item generated");
    Ok(result.text)
}

/// [`invent_menu_item`] as a [`Flow`] over an owned prompt.
pub struct MenuItemFlow {
    provider: Arc<dyn ModelProvider>,
}

impl MenuItemFlow {
    pub fn new(provider: Arc<dyn ModelProvider>) -> Self {
        Self { provider }
    }
}

#[async_trait]
impl Flow for MenuItemFlow {
    type Input = String;
    type Output = String;

    fn name(&self) -> &str {
        MENU_ITEM_FLOW_NAME
    }

    async fn run(&self, prompt: String) -> Result<String, ForgeError> {
        invent_menu_item(self.provider.as_ref(), &prompt).await
    }
}
