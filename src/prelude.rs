//! Convenience re-exports for common use.

pub use crate::config::ForgeConfig;
pub use crate::error::{ForgeError, GenerationFailure, Result};
pub use crate::flow::{Flow, FlowObserver};
pub use crate::generation::OutputSchema;
pub use crate::menu::{invent_menu_item, MenuItemFlow};
pub use crate::models::GeminiModel;
pub use crate::provider::ModelProvider;
pub use crate::roadmap::{Roadmap, RoadmapFlow, RoadmapNode};
pub use crate::types::{FinishReason, GenerationSettings, ModelMessage, Role, Usage};
