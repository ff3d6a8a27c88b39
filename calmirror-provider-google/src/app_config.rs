//! OAuth client credentials for the Google provider.
//!
//! Read from the "client secret" JSON downloaded from the Google Cloud
//! console, which nests the values under `installed` (desktop apps) or `web`.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

/// Google OAuth client credentials (user-provided).
#[derive(Debug, Clone, Deserialize)]
pub struct Credentials {
    pub client_id: String,
    pub client_secret: String,
}

#[derive(Deserialize)]
struct ClientSecretFile {
    installed: Option<Credentials>,
    web: Option<Credentials>,
}

pub fn load(path: &Path) -> Result<Credentials> {
    if !path.exists() {
        anyhow::bail!(
            "Google credentials not found at {}\n\n\
            Download an OAuth client secret (Desktop app) from\n\
            https://console.cloud.google.com/apis/credentials and save it there.",
            path.display()
        );
    }

    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Unable to read client secret file {}", path.display()))?;

    parse(&contents)
        .with_context(|| format!("Unable to parse client secret file {}", path.display()))
}

fn parse(contents: &str) -> Result<Credentials> {
    let file: ClientSecretFile = serde_json::from_str(contents)?;

    file.installed
        .or(file.web)
        .context("Expected an \"installed\" or \"web\" section")
}
