//! calmirror.toml loading.
//!
//! ```toml
//! source = "work"
//! source_credentials_file = "work-credentials.json"
//! destination = "personal"
//! destination_credentials_file = "personal-credentials.json"
//!
//! [sync]
//! two_way_sync = true
//! redacted_summary = true
//! event_color = "graphite"
//! ```

use anyhow::{Context, Result};
use calmirror_core::state::DEFAULT_STATE_FILE;
use calmirror_core::{SyncError, SyncOptions, VendorPair};
use calmirror_provider_google::GoogleVendor;
use calmirror_provider_google::authenticate::DEFAULT_CALLBACK_PORT;
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_FILE: &str = "calmirror.toml";

#[derive(Debug, Deserialize)]
pub struct Config {
    /// Label of the vendor events are read from
    pub source: String,
    pub source_credentials_file: PathBuf,

    /// Label of the vendor events are written to
    pub destination: String,
    pub destination_credentials_file: PathBuf,

    /// Port of the loopback listener receiving the OAuth redirect
    #[serde(default = "default_callback_port")]
    pub callback_server_port: u16,

    /// Where event fingerprints are kept between runs. Use a distinct file
    /// per vendor pair when syncing several pairs from one directory.
    #[serde(default = "default_state_file")]
    pub state_file: PathBuf,

    /// Directory holding the `<vendor>-token.json` files
    #[serde(default = "default_token_dir")]
    pub token_dir: PathBuf,

    #[serde(default)]
    pub sync: SyncOptions,
}

fn default_callback_port() -> u16 {
    DEFAULT_CALLBACK_PORT
}

fn default_state_file() -> PathBuf {
    PathBuf::from(DEFAULT_STATE_FILE)
}

fn default_token_dir() -> PathBuf {
    PathBuf::from(".")
}

impl Config {
    pub fn vendor_pair(&self) -> VendorPair {
        VendorPair::new(&self.source, &self.destination)
    }

    pub fn source_vendor(&self) -> GoogleVendor {
        self.vendor(&self.source, &self.source_credentials_file)
    }

    pub fn destination_vendor(&self) -> GoogleVendor {
        self.vendor(&self.destination, &self.destination_credentials_file)
    }

    fn vendor(&self, label: &str, credentials_file: &Path) -> GoogleVendor {
        GoogleVendor {
            token_dir: self.token_dir.clone(),
            callback_port: self.callback_server_port,
            ..GoogleVendor::new(label, credentials_file)
        }
    }

    fn validate(&self) -> Result<(), SyncError> {
        if self.source.trim().is_empty() || self.destination.trim().is_empty() {
            return Err(SyncError::Config(
                "`source` and `destination` must not be empty".to_string(),
            ));
        }

        // Identical labels would make the provenance tags indistinguishable
        if self.source == self.destination {
            return Err(SyncError::Config(format!(
                "`source` and `destination` must differ (both are \"{}\")",
                self.source
            )));
        }

        if self.sync.max_results == 0 {
            return Err(SyncError::Config("`sync.max_results` must be at least 1".to_string()));
        }

        Ok(())
    }
}

/// Load and validate the config file.
pub fn load_config(path: &Path) -> Result<Config> {
    if !path.exists() {
        anyhow::bail!(
            "Config file not found at {}\n\n\
            Create it with at least:\n\n\
            source = \"work\"\n\
            source_credentials_file = \"work-credentials.json\"\n\
            destination = \"personal\"\n\
            destination_credentials_file = \"personal-credentials.json\"",
            path.display()
        );
    }

    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Unable to read config file at {}", path.display()))?;

    parse_config(&contents)
        .with_context(|| format!("Unable to load configuration from {}", path.display()))
}

fn parse_config(contents: &str) -> Result<Config> {
    let config: Config = toml::from_str(contents)
        .map_err(|e| SyncError::Config(e.to_string()))?;
    config.validate()?;
    Ok(config)
}
