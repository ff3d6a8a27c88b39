//! Cached OAuth tokens for one vendor.
//!
//! Tokens live in `<vendor>-token.json` in the configured token directory and are
//! refreshed with the refresh token once they expire.

use anyhow::{Context, Result};
use chrono::{DateTime, Duration, Utc};
use google_calendar::{AccessToken, Client};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::app_config::Credentials;

pub struct Session {
    path: PathBuf,
    data: SessionData,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionData {
    access_token: String,
    refresh_token: String,
    #[serde(default)]
    expires_at: Option<DateTime<Utc>>,
}

impl From<&AccessToken> for SessionData {
    fn from(tokens: &AccessToken) -> Self {
        let expires_at = if tokens.expires_in > 0 {
            Some(Utc::now() + Duration::seconds(tokens.expires_in))
        } else {
            None
        };

        SessionData {
            access_token: tokens.access_token.clone(),
            refresh_token: tokens.refresh_token.clone(),
            expires_at,
        }
    }
}

impl Session {
    pub fn path_for_vendor(dir: &Path, vendor: &str) -> PathBuf {
        let slug = vendor.replace(['/', '\\', ':'], "_");
        dir.join(format!("{}-token.json", slug))
    }

    pub fn new(path: PathBuf, data: SessionData) -> Self {
        Session { path, data }
    }

    /// `Ok(None)` when no token has been cached yet.
    pub fn load(path: &Path) -> Result<Option<Self>> {
        if !path.exists() {
            return Ok(None);
        }

        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read cached token from {}", path.display()))?;

        let data: SessionData = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse cached token from {}", path.display()))?;

        Ok(Some(Session {
            path: path.to_path_buf(),
            data,
        }))
    }

    /// Like [`Session::load`], but an unreadable or corrupt token file counts
    /// as no token, so the caller authorizes again.
    pub fn load_cached(path: &Path) -> Option<Self> {
        match Session::load(path) {
            Ok(session) => session,
            Err(e) => {
                tracing::warn!("Ignoring cached token: {:#}", e);
                None
            }
        }
    }

    pub fn save(&self) -> Result<()> {
        let contents =
            serde_json::to_string_pretty(&self.data).context("Failed to serialize token")?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create directory {}", parent.display())
                })?;
            }
        }

        std::fs::write(&self.path, contents)
            .with_context(|| format!("Failed to write token to {}", self.path.display()))?;

        // Set to owner-only (0600) since file contains OAuth tokens:
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(&self.path, std::fs::Permissions::from_mode(0o600))
                .with_context(|| format!("Failed to set permissions on {}", self.path.display()))?;
        }

        tracing::info!("Saved credential file to {}", self.path.display());
        Ok(())
    }

    pub fn is_expired(&self) -> bool {
        self.data
            .expires_at
            .is_some_and(|expires_at| Utc::now() >= expires_at)
    }

    pub fn client(&self, creds: &Credentials, redirect_uri: &str) -> Client {
        Client::new(
            creds.client_id.clone(),
            creds.client_secret.clone(),
            redirect_uri.to_string(),
            self.data.access_token.clone(),
            self.data.refresh_token.clone(),
        )
    }

    pub async fn refresh(&mut self, creds: &Credentials, redirect_uri: &str) -> Result<()> {
        let mut tokens = self
            .client(creds, redirect_uri)
            .refresh_access_token()
            .await
            .context("Failed to refresh token")?;

        // Google typically doesn't return a new refresh_token on refresh
        if tokens.refresh_token.is_empty() {
            tokens.refresh_token = self.data.refresh_token.clone();
        }

        self.data = (&tokens).into();
        self.save()
    }
}
