//! Transport for the Breezy HR API
//!
//! `RemoteApi` is the seam between the API manager and the network: it sends
//! the sign-in form and authenticated GETs and hands back status and body.
//! Caching and JSON interpretation live in the manager.

use async_trait::async_trait;
use reqwest::Client;
use thiserror::Error;

/// Errors raised by the transport itself (no response was received)
#[derive(Debug, Error)]
pub enum TransportError {
    /// Request did not complete in time
    #[error("Request timed out: {0}")]
    Timeout(String),

    /// Connection could not be established
    #[error("Connection failed: {0}")]
    Connect(String),

    /// Any other HTTP client failure
    #[error("HTTP request failed: {0}")]
    Http(String),
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            TransportError::Timeout(err.to_string())
        } else if err.is_connect() {
            TransportError::Connect(err.to_string())
        } else {
            TransportError::Http(err.to_string())
        }
    }
}

/// Status and raw body of a completed request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    /// Creates a response value
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// True for 2xx statuses
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// True for 404
    pub fn is_not_found(&self) -> bool {
        self.status == 404
    }
}

/// The two remote calls the integration needs
#[async_trait]
pub trait RemoteApi: Send + Sync {
    /// POSTs the `email`/`password` form to the sign-in URL
    async fn authenticate(
        &self,
        url: &str,
        email: &str,
        password: &str,
    ) -> Result<HttpResponse, TransportError>;

    /// GETs `url` with the given headers
    async fn get(&self, url: &str, headers: &[(&str, &str)])
        -> Result<HttpResponse, TransportError>;
}

/// `RemoteApi` backed by reqwest
///
/// Timeouts, redirects and connection pooling are whatever the wrapped
/// `reqwest::Client` is configured with.
#[derive(Debug, Clone, Default)]
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    /// Creates a client with reqwest defaults
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }

    /// Wraps a preconfigured reqwest client
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl RemoteApi for HttpClient {
    async fn authenticate(
        &self,
        url: &str,
        email: &str,
        password: &str,
    ) -> Result<HttpResponse, TransportError> {
        let response = self
            .client
            .post(url)
            .form(&[("email", email), ("password", password)])
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.text().await?;
        Ok(HttpResponse { status, body })
    }

    async fn get(
        &self,
        url: &str,
        headers: &[(&str, &str)],
    ) -> Result<HttpResponse, TransportError> {
        let mut request = self.client.get(url);
        for (name, value) in headers {
            request = request.header(*name, *value);
        }

        let response = request.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        Ok(HttpResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_status_helpers() {
        assert!(HttpResponse::new(200, "[]").is_success());
        assert!(HttpResponse::new(204, "").is_success());
        assert!(!HttpResponse::new(401, "").is_success());

        let missing = HttpResponse::new(404, "");
        assert!(missing.is_not_found());
        assert!(!missing.is_success());
    }

    #[tokio::test]
    async fn test_get_unreachable_host_is_transport_error() {
        let client = HttpClient::new();

        let result = client
            .get("http://127.0.0.1:1/company/acme/positions", &[("Accept", "application/json")])
            .await;

        assert!(result.is_err(), "Nothing listens on port 1");
    }
}
