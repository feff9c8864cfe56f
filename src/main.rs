//! roadmap-forge CLI binary entry point.

use std::sync::Arc;

use clap::Parser;
use roadmap_forge::cli::{Cli, Commands, MenuArgs, RoadmapArgs, SchemaArgs};
use roadmap_forge::config::ForgeConfig;
use roadmap_forge::error::ForgeError;
use roadmap_forge::flow::Flow;
use roadmap_forge::menu::MenuItemFlow;
use roadmap_forge::models::ModelSelector;
use roadmap_forge::provider::{create_provider, schema::normalize_for_gemini, ModelProvider};
use roadmap_forge::roadmap::{Roadmap, RoadmapFlow};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = roadmap_forge::cli::init_tracing(cli.verbose) {
        eprintln!("Warning: {e}");
    }

    let result = match cli.command {
        Commands::Menu(args) => handle_menu(args).await,
        Commands::Roadmap(args) => handle_roadmap(args).await,
        Commands::Schema(args) => handle_schema(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn build_provider(model: Option<&str>) -> Result<Arc<dyn ModelProvider>, ForgeError> {
    let mut config = ForgeConfig::from_env()?;
    if let Some(selector) = model {
        config = config.with_model(ModelSelector::parse(selector)?);
    }
    Ok(Arc::from(create_provider(&config)?))
}

async fn handle_menu(args: MenuArgs) -> Result<(), ForgeError> {
    let provider = build_provider(args.model.as_deref())?;
    let flow = MenuItemFlow::new(provider);
    let text = flow.run(args.prompt).await?;
    println!("{text}");
    Ok(())
}

async fn handle_roadmap(args: RoadmapArgs) -> Result<(), ForgeError> {
    // Read input before touching config so a bad path fails fast.
    let document = args.read_document()?;
    let provider = build_provider(args.model.as_deref())?;

    let mut flow = RoadmapFlow::new(provider)?;
    if let Some(max) = args.max_tokens {
        flow = flow.with_max_tokens(max);
    }

    let roadmap = flow.run(document).await?;
    println!("{}", render(&roadmap, args.pretty)?);
    Ok(())
}

fn handle_schema(args: SchemaArgs) -> Result<(), ForgeError> {
    let schema = Roadmap::output_schema()?;
    let value = if args.gemini {
        normalize_for_gemini(schema.schema())?
    } else {
        schema.schema().clone()
    };
    println!("{}", serde_json::to_string_pretty(&value)?);
    Ok(())
}

fn render(roadmap: &Roadmap, pretty: bool) -> Result<String, ForgeError> {
    Ok(if pretty {
        serde_json::to_string_pretty(roadmap)?
    } else {
        serde_json::to_string(roadmap)?
    })
}
