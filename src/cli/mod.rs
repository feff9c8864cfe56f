//! Command-line interface for roadmap-forge.

use std::io::Read;
use std::path::{Path, PathBuf};

use clap::{ArgAction, Parser, Subcommand};

use crate::error::ForgeError;
use crate::menu::DEFAULT_MENU_PROMPT;
use crate::roadmap::SAMPLE_DOCUMENT;

/// Env var that overrides the `-v` derived log filter.
pub const LOG_ENV_VAR: &str = "ROADMAP_FORGE_LOG";

/// Generate study roadmaps and other content with Google Gemini
#[derive(Parser, Debug)]
#[command(name = "roadmap-forge", version, about = "Generate study roadmaps with Google Gemini")]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Invent a menu item (free-form text, no schema)
    Menu(MenuArgs),
    /// Turn a document into a structured study roadmap
    Roadmap(RoadmapArgs),
    /// Print the roadmap output schema
    Schema(SchemaArgs),
}

/// Arguments for `roadmap-forge menu`.
#[derive(Parser, Debug)]
pub struct MenuArgs {
    /// Prompt sent to the model
    #[arg(short, long, default_value = DEFAULT_MENU_PROMPT)]
    pub prompt: String,

    /// Model to use (e.g. gemini-2.0-flash, google:gemini-2.5-pro)
    #[arg(short, long)]
    pub model: Option<String>,
}

/// Arguments for `roadmap-forge roadmap`.
#[derive(Parser, Debug)]
pub struct RoadmapArgs {
    /// Document to read; `-` reads standard input
    #[arg(short, long, conflicts_with = "sample")]
    pub input: Option<PathBuf>,

    /// Use the bundled renewable-energy sample document
    #[arg(long)]
    pub sample: bool,

    /// Model to use (e.g. gemini-2.0-flash, google:gemini-2.5-pro)
    #[arg(short, long)]
    pub model: Option<String>,

    /// Max output tokens
    #[arg(long)]
    pub max_tokens: Option<u32>,

    /// Pretty-print the JSON output
    #[arg(long)]
    pub pretty: bool,
}

/// Arguments for `roadmap-forge schema`.
#[derive(Parser, Debug)]
pub struct SchemaArgs {
    /// Print the form sent to Gemini instead of the local validation schema
    #[arg(long)]
    pub gemini: bool,
}

impl RoadmapArgs {
    /// Resolve the document text from `--input`, stdin, or `--sample`.
    pub fn read_document(&self) -> Result<String, ForgeError> {
        match (&self.input, self.sample) {
            (_, true) => Ok(SAMPLE_DOCUMENT.to_string()),
            (Some(path), false) if path == Path::new("-") => {
                let mut text = String::new();
                std::io::stdin().read_to_string(&mut text)?;
                Ok(text)
            }
            (Some(path), false) => std::fs::read_to_string(path).map_err(|e| {
                ForgeError::Io(std::io::Error::new(
                    e.kind(),
                    format!("{}: {e}", path.display()),
                ))
            }),
            (None, false) => Err(ForgeError::InvalidArgument(
                "no document given: pass --input <PATH>, --input - for stdin, or --sample".into(),
            )),
        }
    }
}

/// Install the global `tracing` subscriber, writing to stderr.
pub fn init_tracing(verbose: u8) -> Result<(), ForgeError> {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env(LOG_ENV_VAR)
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| {
            ForgeError::Configuration(format!("failed to initialize tracing subscriber: {error}"))
        })
}
