//! mosaicd - Mosaic Server Daemon
//!
//! Accepts image uploads over HTTP and writes grayscale copies to disk.
//!
//! Usage:
//!   mosaicd [OPTIONS] [config.toml]
//!
//! Without a config file the daemon listens on 0.0.0.0:5000 and stores files
//! under ./uploads and ./results.

mod config;

use std::path::PathBuf;

use mosaic_api::{create_router, AppState};
use mosaic_core::{ImageStore, NamingPolicy};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{DaemonConfig, Overrides};

/// Parsed command-line arguments
#[derive(Debug, Default, PartialEq, Eq)]
struct Args {
    /// Server config file (TOML)
    config_path: Option<PathBuf>,
    /// Values overriding the config file
    overrides: Overrides,
    /// Print help and exit
    help: bool,
}

fn parse_args(args: impl IntoIterator<Item = String>) -> anyhow::Result<Args> {
    let args: Vec<String> = args.into_iter().collect();
    let mut result = Args::default();

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--port" | "-p" => {
                let value = flag_value(&args, i)?;
                result.overrides.port = Some(value.parse()?);
                i += 2;
            }
            "--upload-dir" => {
                result.overrides.upload_dir = Some(PathBuf::from(flag_value(&args, i)?));
                i += 2;
            }
            "--result-dir" => {
                result.overrides.result_dir = Some(PathBuf::from(flag_value(&args, i)?));
                i += 2;
            }
            "--naming" => {
                result.overrides.naming = Some(match flag_value(&args, i)? {
                    "original" => NamingPolicy::Original,
                    "uuid" => NamingPolicy::Uuid,
                    other => anyhow::bail!("Unknown naming policy: {}", other),
                });
                i += 2;
            }
            "--help" | "-h" => {
                result.help = true;
                i += 1;
            }
            arg if !arg.starts_with('-') => {
                // Positional argument = config file
                result.config_path = Some(PathBuf::from(arg));
                i += 1;
            }
            _ => {
                tracing::warn!("Unknown argument: {}", args[i]);
                i += 1;
            }
        }
    }

    Ok(result)
}

fn flag_value(args: &[String], i: usize) -> anyhow::Result<&str> {
    args.get(i + 1)
        .map(String::as_str)
        .ok_or_else(|| anyhow::anyhow!("Missing argument for {}", args[i]))
}

fn print_help() {
    eprintln!(
        r#"mosaicd - Mosaic Server Daemon

Usage: mosaicd [OPTIONS] [config.toml]

Options:
  -p, --port <PORT>          Listen port (default: 5000)
      --upload-dir <DIR>     Directory for raw uploads (default: uploads)
      --result-dir <DIR>     Directory for grayscale results (default: results)
      --naming <POLICY>      Storage naming: original | uuid (default: original)
  -h, --help                 Print this help message

Examples:
  # Run with defaults
  mosaicd

  # Run with config file
  mosaicd mosaicd.toml

  # Store files elsewhere and never use client filenames on disk
  mosaicd --upload-dir /srv/in --result-dir /srv/out --naming uuid
"#
    );
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "mosaicd=info,mosaic_api=info,mosaic_core=info,tower_http=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = parse_args(std::env::args().skip(1))?;
    if args.help {
        print_help();
        return Ok(());
    }

    tracing::info!("Starting mosaicd (Mosaic Server Daemon)");

    let mut config = match args.config_path {
        Some(ref path) => {
            tracing::info!("Loading config from: {}", path.display());
            DaemonConfig::load(path)?
        }
        None => {
            tracing::info!("No config file provided, using defaults");
            DaemonConfig::default()
        }
    };
    config.apply_overrides(&args.overrides);

    // Create storage directories up front
    let store = ImageStore::open(config.storage.clone())?;
    tracing::info!(
        upload_dir = %config.storage.upload_dir.display(),
        result_dir = %config.storage.result_dir.display(),
        naming = ?config.storage.naming,
        "Storage ready"
    );

    let state = AppState::new(store).with_body_limit(config.server.body_limit);
    let app = create_router(state);

    let addr = config.server.addr();
    tracing::info!("Listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
