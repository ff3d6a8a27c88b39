//! Interactive OAuth authorization for a vendor account.
//!
//! The consent page redirects to a loopback listener that accepts exactly
//! one request. The authorization flow blocks on that request; nothing else
//! runs meanwhile.

use anyhow::{Context, Result};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpListener;

use crate::app_config::Credentials;
use crate::session::SessionData;

pub const SCOPES: &[&str] = &["https://www.googleapis.com/auth/calendar"];

pub const DEFAULT_CALLBACK_PORT: u16 = 5000;

pub fn redirect_uri(port: u16) -> String {
    format!("http://localhost:{}/callback", port)
}

/// The `code` and `state` query parameters of the OAuth redirect.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthorizationCode {
    pub code: String,
    pub state: String,
}

/// A bound loopback listener waiting for the OAuth redirect.
///
/// [`CallbackListener::wait`] consumes the listener, so it can only ever
/// complete once.
pub struct CallbackListener {
    listener: TcpListener,
}

impl CallbackListener {
    pub async fn bind(port: u16) -> Result<Self> {
        let listener = TcpListener::bind(("127.0.0.1", port))
            .await
            .with_context(|| format!("Failed to bind OAuth callback listener on port {}", port))?;
        Ok(CallbackListener { listener })
    }

    pub fn port(&self) -> Result<u16> {
        Ok(self.listener.local_addr()?.port())
    }

    /// Accept a single request and extract the authorization code from it.
    pub async fn wait(self) -> Result<AuthorizationCode> {
        let (stream, _) = self
            .listener
            .accept()
            .await
            .context("Failed to accept OAuth callback")?;

        let mut reader = BufReader::new(stream);
        let mut request_line = String::new();
        reader
            .read_line(&mut request_line)
            .await
            .context("Failed to read OAuth callback request line")?;

        // Drain the headers before answering
        let mut header = String::new();
        loop {
            header.clear();
            let read = reader.read_line(&mut header).await?;
            if read == 0 || header.trim().is_empty() {
                break;
            }
        }

        let result = parse_callback(&request_line);

        let body = match &result {
            Ok(_) => "<h1>Authentication successful!</h1>\
                <p>You can close this window and return to the terminal.</p>",
            Err(_) => "<h1>Authentication failed</h1>\
                <p>Return to the terminal for details.</p>",
        };
        let response = format!(
            "HTTP/1.1 200 OK\r\n\
            Content-Type: text/html\r\n\
            Connection: close\r\n\
            \r\n\
            <html><body>{}</body></html>",
            body
        );

        let mut stream = reader.into_inner();
        stream
            .write_all(response.as_bytes())
            .await
            .context("Failed to write OAuth callback response")?;
        stream.flush().await?;

        result
    }
}

/// Parse a request line such as `GET /callback?code=xxx&state=yyy HTTP/1.1`.
fn parse_callback(request_line: &str) -> Result<AuthorizationCode> {
    let url_part = request_line
        .split_whitespace()
        .nth(1)
        .ok_or_else(|| anyhow::anyhow!("Invalid HTTP request"))?;

    let url = url::Url::parse(&format!("http://localhost{}", url_part))?;
    let param = |name: &str| {
        url.query_pairs()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.to_string())
    };

    if let Some(error) = param("error") {
        anyhow::bail!("Authorization was denied: {}", error);
    }

    let code = param("code")
        .filter(|c| !c.is_empty())
        .ok_or_else(|| anyhow::anyhow!("No code in callback. Did you allow access?"))?;
    let state = param("state").unwrap_or_default();

    Ok(AuthorizationCode { code, state })
}

/// Run the browser consent flow for `vendor` and return fresh tokens.
pub async fn authorize(vendor: &str, creds: &Credentials, port: u16) -> Result<SessionData> {
    let listener = CallbackListener::bind(port).await?;

    let mut client = google_calendar::Client::new(
        creds.client_id.clone(),
        creds.client_secret.clone(),
        redirect_uri(port),
        String::new(),
        String::new(),
    );

    let scopes: Vec<String> = SCOPES.iter().map(|s| s.to_string()).collect();
    let auth_url = client.user_consent_url(&scopes);

    tracing::info!(
        "A browser window will open to authorize access to your {} account.",
        vendor
    );
    tracing::info!("If it does not open, visit this URL:\n{}", auth_url);

    if let Err(e) = open::that(&auth_url) {
        tracing::warn!(%e, "Could not open browser automatically");
    }

    tracing::info!("Waiting for OAuth callback on port {}", port);
    let callback = listener.wait().await?;

    tracing::info!("Received authorization code, exchanging for tokens");
    let tokens = client
        .get_access_token(&callback.code, &callback.state)
        .await
        .context("Failed to exchange authorization code for tokens")?;

    Ok((&tokens).into())
}
