//! Google Calendar provider for calmirror.
//!
//! Credentials and tokens are per vendor:
//!   - an OAuth client secret JSON file named in the config
//!   - `<vendor>-token.json` in the token directory (the working directory
//!     by default), created by the first interactive authorization

pub mod app_config;
pub mod authenticate;
pub mod client;
mod google_event;
pub mod session;

use std::path::PathBuf;

use anyhow::Result;
use calmirror_core::error::{SyncError, SyncResult};

pub use client::GoogleCalendarClient;

use crate::app_config::Credentials;
use crate::authenticate::{DEFAULT_CALLBACK_PORT, authorize, redirect_uri};
use crate::session::Session;

/// Everything needed to obtain an authenticated client for one vendor.
#[derive(Debug, Clone)]
pub struct GoogleVendor {
    pub label: String,
    pub credentials_file: PathBuf,
    pub token_dir: PathBuf,
    pub callback_port: u16,
}

impl GoogleVendor {
    pub fn new(label: impl Into<String>, credentials_file: impl Into<PathBuf>) -> Self {
        GoogleVendor {
            label: label.into(),
            credentials_file: credentials_file.into(),
            token_dir: PathBuf::from("."),
            callback_port: DEFAULT_CALLBACK_PORT,
        }
    }

    /// Build a ready client, authorizing interactively if no token is cached
    /// and refreshing an expired one.
    pub async fn connect(&self) -> SyncResult<GoogleCalendarClient> {
        let creds = app_config::load(&self.credentials_file)
            .map_err(|e| SyncError::Config(format!("{:#}", e)))?;

        let session = self.session(&creds).await.map_err(|e| SyncError::Auth {
            vendor: self.label.clone(),
            message: format!("{:#}", e),
        })?;

        let client = session.client(&creds, &redirect_uri(self.callback_port));
        Ok(GoogleCalendarClient::new(client))
    }

    async fn session(&self, creds: &Credentials) -> Result<Session> {
        let path = Session::path_for_vendor(&self.token_dir, &self.label);
        let redirect = redirect_uri(self.callback_port);

        match Session::load_cached(&path) {
            Some(mut session) => {
                if session.is_expired() {
                    tracing::debug!(vendor = %self.label, "access token expired, refreshing");
                    session.refresh(creds, &redirect).await?;
                }
                Ok(session)
            }
            None => {
                let data = authorize(&self.label, creds, self.callback_port).await?;
                let session = Session::new(path, data);
                session.save()?;
                Ok(session)
            }
        }
    }
}
