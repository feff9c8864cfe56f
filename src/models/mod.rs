//! Model definitions and selection.

pub mod gemini;
pub mod selector;

pub use gemini::GeminiModel;
pub use selector::ModelSelector;
