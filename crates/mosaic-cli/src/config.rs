//! Settings file for the mosaic CLI
//!
//! `~/.config/mosaic/config.toml` (or `--config`) may name a default server
//! and output format. Flags and environment variables win over the file.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::Deserialize;

use crate::output::OutputFormat;

/// Server used when neither flag, env nor config file names one
pub const DEFAULT_SERVER: &str = "http://localhost:5000";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    pub server: Option<String>,
    /// Format name, checked against [`OutputFormat`] on load
    pub output: Option<String>,
    pub no_color: Option<bool>,
}

impl Config {
    /// Read the per-user file; a missing file means defaults
    pub fn load() -> Result<Self> {
        let path = default_path().context("Could not determine config directory")?;

        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("Invalid config file: {}", path.display()))
    }

    fn parse(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        if let Some(name) = &config.output {
            if OutputFormat::from_name(name).is_none() {
                bail!("unknown output format '{}' (expected table, json or plain)", name);
            }
        }
        Ok(config)
    }

    /// Resolve flags over file values over built-in defaults
    pub fn merge_with_args(
        &self,
        server: Option<&str>,
        output: Option<OutputFormat>,
        no_color: bool,
    ) -> MergedConfig {
        let server = server
            .map(String::from)
            .or_else(|| self.server.clone())
            .unwrap_or_else(|| DEFAULT_SERVER.to_string());

        MergedConfig {
            server: server.trim_end_matches('/').to_string(),
            output: output
                .or_else(|| self.output.as_deref().and_then(OutputFormat::from_name))
                .unwrap_or_default(),
            no_color: no_color || self.no_color.unwrap_or(false),
        }
    }
}

/// Settings after flags have been applied
#[derive(Debug, Clone)]
pub struct MergedConfig {
    pub server: String,
    pub output: OutputFormat,
    pub no_color: bool,
}

/// Location read when `--config` is not given
pub fn default_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("mosaic").join("config.toml"))
}
