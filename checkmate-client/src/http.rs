//! HTTP client for network-based API calls
//!
//! Thin wrapper over `reqwest` that joins paths onto the configured base
//! URL, attaches the bearer token and `userId` identity, and normalizes
//! every failure into [`ClientError`]. The backend signals application
//! failures with `{ success: false, message }` bodies, sometimes under a
//! non-2xx status; both routes end up as [`ClientError::Rejected`].

use crate::session::Session;
use crate::{ClientConfig, ClientError, ClientResult};
use reqwest::Client;
use serde::de::DeserializeOwned;
use shared::client::Ack;
use std::time::Duration;

/// HTTP client for making network requests to the CheckMate backend
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    base_url: String,
    token: Option<String>,
    user_id: Option<String>,
    parse_timeout: Duration,
}

impl HttpClient {
    /// Create a new HTTP client from configuration
    pub fn new(config: &ClientConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: None,
            user_id: None,
            parse_timeout: Duration::from_secs(config.parse_timeout),
        }
    }

    /// Adopt identity from a stored session
    pub fn with_session(mut self, session: &Session) -> Self {
        self.token = session.token.clone();
        self.user_id = if session.is_logged_in {
            Some(session.user_id.clone())
        } else {
            None
        };
        self
    }

    /// Set the authentication token
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Get the current token
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Identity for `userId` query parameters; every authenticated call
    /// fails fast without a session
    pub(crate) fn user_id(&self) -> ClientResult<&str> {
        self.user_id.as_deref().ok_or(ClientError::NotLoggedIn)
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Build authorization header value
    fn auth_header(&self) -> Option<String> {
        self.token.as_ref().map(|t| format!("Bearer {}", t))
    }

    async fn send<T: DeserializeOwned>(
        &self,
        mut request: reqwest::RequestBuilder,
    ) -> ClientResult<T> {
        if let Some(auth) = self.auth_header() {
            request = request.header(reqwest::header::AUTHORIZATION, auth);
        }
        let response = request.send().await?;
        Self::handle_response(response).await
    }

    /// Make a GET request
    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> ClientResult<T> {
        tracing::debug!(path, "GET");
        self.send(self.client.get(self.url(path)).query(query)).await
    }

    /// Make a POST request with JSON body
    pub async fn post<T: DeserializeOwned, B: serde::Serialize + Sync>(
        &self,
        path: &str,
        query: &[(&str, String)],
        body: &B,
    ) -> ClientResult<T> {
        tracing::debug!(path, "POST");
        self.send(self.client.post(self.url(path)).query(query).json(body))
            .await
    }

    /// Make a POST request without body
    pub async fn post_empty<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> ClientResult<T> {
        tracing::debug!(path, "POST");
        self.send(self.client.post(self.url(path)).query(query)).await
    }

    /// Make a DELETE request
    pub async fn delete<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> ClientResult<T> {
        tracing::debug!(path, "DELETE");
        self.send(self.client.delete(self.url(path)).query(query)).await
    }

    /// POST raw bytes (receipt images); uses the long parse timeout
    pub async fn post_bytes<T: DeserializeOwned>(
        &self,
        path: &str,
        bytes: Vec<u8>,
    ) -> ClientResult<T> {
        tracing::debug!(path, len = bytes.len(), "POST (bytes)");
        self.send(
            self.client
                .post(self.url(path))
                .timeout(self.parse_timeout)
                .header(reqwest::header::CONTENT_TYPE, "application/octet-stream")
                .body(bytes),
        )
        .await
    }

    /// Handle the HTTP response
    ///
    /// Non-JSON bodies (a misconfigured server answering with HTML) become
    /// `InvalidResponse` with a short snippet for diagnostics.
    async fn handle_response<T: DeserializeOwned>(response: reqwest::Response) -> ClientResult<T> {
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            if let Ok(ack) = serde_json::from_str::<Ack>(&text) {
                if !ack.success {
                    return Err(ClientError::rejected(ack.message));
                }
            }
            return Err(ClientError::Rejected(format!(
                "Server error: {} {}",
                status.as_u16(),
                snippet(&text)
            )));
        }

        serde_json::from_str(&text)
            .map_err(|_| ClientError::InvalidResponse(snippet(&text).to_string()))
    }
}

fn snippet(text: &str) -> &str {
    let end = text
        .char_indices()
        .nth(200)
        .map(|(i, _)| i)
        .unwrap_or(text.len());
    &text[..end]
}
