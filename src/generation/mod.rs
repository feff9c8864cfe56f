//! Text and schema-bound object generation.

pub mod contract;
pub mod object;
pub mod text;

pub use contract::OutputSchema;
pub use object::generate_object;
pub use text::generate_text;
