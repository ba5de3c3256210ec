//! HTTP POST transport with optional Basic authentication.

use async_trait::async_trait;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use tracing::debug;
use url::Url;

use crate::error::TransportError;
use crate::transport::Transport;

/// Sends each request body as an HTTP POST with
/// `Content-Type: application/json` and returns the response body.
pub struct HttpTransport {
    endpoint: Url,
    client: reqwest::Client,
    auth_header: Option<String>,
}

impl HttpTransport {
    pub fn new(endpoint: &str) -> Result<Self, TransportError> {
        let endpoint = Url::parse(endpoint)
            .map_err(|e| TransportError::ConnectionFailed(format!("invalid URL: {}", e)))?;

        match endpoint.scheme() {
            "http" | "https" => {}
            scheme => {
                return Err(TransportError::Unsupported(format!(
                    "unknown scheme: {}",
                    scheme
                )));
            }
        }

        Ok(Self {
            endpoint,
            client: reqwest::Client::new(),
            auth_header: None,
        })
    }

    /// Set HTTP Basic authentication for all subsequent requests.
    pub fn with_basic_auth(mut self, username: &str, password: &str) -> Self {
        let token = BASE64.encode(format!("{}:{}", username, password));
        self.auth_header = Some(format!("Basic {}", token));
        self
    }

    /// Clear any existing authentication.
    pub fn clear_auth(&mut self) {
        self.auth_header = None;
    }

    pub fn endpoint(&self) -> &str {
        self.endpoint.as_str()
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, body: &[u8]) -> Result<Vec<u8>, TransportError> {
        debug!(endpoint = %self.endpoint, bytes = body.len(), "POST");

        let mut request = self
            .client
            .post(self.endpoint.clone())
            .header(CONTENT_TYPE, "application/json")
            .body(body.to_vec());

        if let Some(ref auth) = self.auth_header {
            request = request.header(AUTHORIZATION, auth.clone());
        }

        let response = request.send().await.map_err(|e| {
            TransportError::ConnectionFailed(format!(
                "unable to connect to {}: {}",
                self.endpoint, e
            ))
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::Http(format!(
                "unexpected status {} from {}",
                status, self.endpoint
            )));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| TransportError::Http(e.to_string()))?;

        Ok(bytes.to_vec())
    }
}
