//! roadmap-forge: schema-bound study roadmap generation on Google Gemini.
//!
//! Two independent operations:
//!
//! - [`roadmap::RoadmapFlow`] turns document text into a [`roadmap::Roadmap`].
//!   The roadmap schema is derived from the Rust types, sent to Gemini as the
//!   response schema, and re-checked locally before a value is returned.
//! - [`menu::invent_menu_item`] sends one free-form prompt and returns the text.
//!
//! # Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use roadmap_forge::prelude::*;
//!
//! # async fn example() -> roadmap_forge::error::Result<()> {
//! let config = ForgeConfig::from_env()?;
//! let provider = Arc::from(roadmap_forge::provider::create_provider(&config)?);
//! let flow = RoadmapFlow::new(provider)?;
//! let roadmap = flow.run("Intro to linear algebra: vectors, matrices, ...".into()).await?;
//! for node in &roadmap {
//!     println!("{} ({}, {})", node.topic, node.difficulty, node.estimated_time);
//! }
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod flow;
pub mod generation;
pub mod menu;
pub mod models;
pub mod prelude;
pub mod provider;
pub mod roadmap;
pub mod types;
pub mod util;

#[cfg(feature = "cli")]
pub mod cli;
