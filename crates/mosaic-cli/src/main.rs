//! Mosaic CLI - Command-line tool for the mosaic image service
//!
//! Uploads images to a mosaic server and reports where the grayscale copies
//! were written.

mod commands;
mod config;
mod output;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use mosaic_client::MosaicClient;
use std::path::PathBuf;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::Config;
use crate::output::{OutputContext, OutputFormat};

#[derive(Parser)]
#[command(name = "mosaic")]
#[command(author, version, about = "Mosaic grayscale conversion CLI")]
#[command(propagate_version = true)]
struct Cli {
    /// Server URL [default: http://localhost:5000]
    #[arg(short, long, env = "MOSAIC_SERVER")]
    server: Option<String>,

    /// Configuration file path
    #[arg(short, long, env = "MOSAIC_CONFIG")]
    config: Option<PathBuf>,

    /// Output format [default: table]
    #[arg(short, long, value_enum)]
    output: Option<OutputFormat>,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Minimal output (for scripting)
    #[arg(short, long)]
    quiet: bool,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Upload images and convert them to grayscale
    Upload {
        /// Image file(s) to upload
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },

    /// Check that the server is up
    Health,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false))
        .with(filter)
        .init();

    // Load config file
    let config = if let Some(config_path) = &cli.config {
        Config::load_from(config_path)?
    } else {
        Config::load().unwrap_or_else(|e| {
            tracing::warn!(error = %format!("{:#}", e), "Ignoring config file");
            Config::default()
        })
    };

    // Merge CLI args with config
    let merged = config.merge_with_args(cli.server.as_deref(), cli.output, cli.no_color);

    let ctx = OutputContext::new(merged.output, merged.no_color, cli.quiet);
    let client = create_client(&merged.server)?;

    match &cli.command {
        Commands::Upload { files } => {
            commands::upload(&client, files, &ctx).await?;
        }

        Commands::Health => {
            commands::health(&client, &ctx).await?;
        }
    }

    Ok(())
}

fn create_client(server: &str) -> Result<MosaicClient> {
    MosaicClient::new(server).context("Failed to create mosaic client")
}
