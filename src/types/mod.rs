//! Core types shared by providers and generation functions.

pub mod message;
pub mod usage;
pub mod generation;
pub mod results;

pub use message::*;
pub use usage::*;
pub use generation::*;
pub use results::*;
