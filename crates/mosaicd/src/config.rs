//! Daemon configuration
//!
//! Loaded from an optional TOML file; every key has a default so an empty
//! file (or no file) yields the stock `0.0.0.0:5000`, `uploads/`,
//! `results/` setup.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::{Path, PathBuf};

use anyhow::Context;
use mosaic_core::{NamingPolicy, StorageConfig};
use serde::Deserialize;

/// Default listen port
pub const DEFAULT_PORT: u16 = 5000;

/// `[server]` section
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Interface to bind
    pub host: IpAddr,
    /// Port to bind
    pub port: u16,
    /// Maximum request body in bytes; unlimited when absent
    pub body_limit: Option<usize>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_PORT,
            body_limit: None,
        }
    }
}

impl ServerConfig {
    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

/// Top-level daemon configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DaemonConfig {
    pub server: ServerConfig,
    pub storage: StorageConfig,
}

impl DaemonConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Apply command-line overrides on top of file values
    pub fn apply_overrides(&mut self, overrides: &Overrides) {
        if let Some(port) = overrides.port {
            self.server.port = port;
        }
        if let Some(ref dir) = overrides.upload_dir {
            self.storage.upload_dir = dir.clone();
        }
        if let Some(ref dir) = overrides.result_dir {
            self.storage.result_dir = dir.clone();
        }
        if let Some(naming) = overrides.naming {
            self.storage.naming = naming;
        }
    }
}

/// Values given on the command line that win over the config file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overrides {
    pub port: Option<u16>,
    pub upload_dir: Option<PathBuf>,
    pub result_dir: Option<PathBuf>,
    pub naming: Option<NamingPolicy>,
}
