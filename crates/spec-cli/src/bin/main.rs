//! spec-tools - compile an OpenAPI/Swagger file into tool definitions
//!
//! Logs go to stderr; stdout carries only the rendered output.

use clap::Parser;
use std::path::PathBuf;
use tracing::{debug, warn};

use spec_cli::{compile_file, render, resolve_options, OptionOverrides, OutputMode};
use spec_parser::ParserRegistry;

/// Compile an OpenAPI 2.0/3.x document into callable tool definitions
#[derive(Parser, Debug)]
#[command(name = "spec-tools")]
#[command(version)]
#[command(about = "Compile an OpenAPI/Swagger document into tool definitions")]
struct Args {
    /// Path to the spec (JSON or YAML)
    spec: PathBuf,

    /// Options file (JSON or YAML) with baseUrl, resources and pathPrefix
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the base URL declared by the spec
    #[arg(long, env = "SPEC_TOOLS_BASE_URL")]
    base_url: Option<String>,

    /// Keep only tools whose first path segment matches (repeatable)
    #[arg(long = "resource")]
    resources: Vec<String>,

    /// Prefix stripped from paths before resource matching (e.g. /v1)
    #[arg(long)]
    path_prefix: Option<String>,

    /// Print one tool name per line instead of JSON
    #[arg(long, conflicts_with = "pretty")]
    names_only: bool,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let options = resolve_options(
        args.config.as_deref(),
        OptionOverrides {
            base_url: args.base_url,
            resources: args.resources,
            path_prefix: args.path_prefix,
        },
    )?;

    let registry = ParserRegistry::new();
    debug!("Registered spec formats: {:?}", registry.formats());
    let spec = compile_file(&registry, &args.spec, &options)?;

    for diagnostic in &spec.diagnostics {
        warn!("{}", serde_json::to_string(diagnostic)?);
    }

    let mode = if args.names_only {
        OutputMode::NamesOnly
    } else if args.pretty {
        OutputMode::PrettyJson
    } else {
        OutputMode::Json
    };

    println!("{}", render(&spec, mode)?);
    Ok(())
}
