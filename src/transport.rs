//! HTTP transport collaborator: base URL and default auth header.
//!
//! SYSTEM CONTEXT
//! ==============
//! The guard never issues requests itself. It only keeps the transport's
//! target endpoint and `Authorization` header in step with the selected
//! server (see [`crate::sync`]). An empty base URL means no server is
//! selected, and [`HttpTransport::url`] refuses to build request URLs.

use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};

/// Errors produced by transport configuration and requests.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// The base URL is empty, so there is no server to talk to.
    #[error("no server selected")]
    NoServerSelected,
    /// The access token cannot be carried in an HTTP header.
    #[error("invalid header value: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),
    /// The base URL and path do not form a valid URL.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),
    /// The HTTP client failed to build or send.
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),
}

/// Capability the guard needs from the HTTP client.
pub trait Transport {
    /// Current base URL. Empty when no server is selected.
    fn base_url(&self) -> &str;

    /// Point outbound requests at `address`. An empty address disables them.
    fn set_base_url(&mut self, address: &str);

    /// Set or clear the default `Authorization: Bearer` header.
    fn set_bearer_token(&mut self, token: Option<&str>) -> Result<(), TransportError>;
}

/// reqwest-backed transport holding a base URL and default headers.
#[derive(Debug, Clone, Default)]
pub struct HttpTransport {
    base_url: String,
    headers: HeaderMap,
}

impl HttpTransport {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Default headers applied to every request built by [`Self::client`].
    #[must_use]
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Join `path` onto the base URL.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::NoServerSelected`] when the base URL is empty
    /// and [`TransportError::InvalidUrl`] when the result does not parse.
    pub fn url(&self, path: &str) -> Result<String, TransportError> {
        if self.base_url.is_empty() {
            return Err(TransportError::NoServerSelected);
        }
        let url = format!("{}/{}", self.base_url.trim_end_matches('/'), path.trim_start_matches('/'));
        reqwest::Url::parse(&url).map_err(|e| TransportError::InvalidUrl(format!("{url}: {e}")))?;
        Ok(url)
    }

    /// Build a client carrying the current default headers.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Http`] if reqwest cannot build the client.
    pub fn client(&self) -> Result<reqwest::Client, TransportError> {
        let client = reqwest::Client::builder()
            .default_headers(self.headers.clone())
            .build()?;
        Ok(client)
    }

    /// Start a request against the selected server.
    ///
    /// # Errors
    ///
    /// Fails as [`Self::url`] and [`Self::client`] do.
    pub fn request(&self, method: reqwest::Method, path: &str) -> Result<reqwest::RequestBuilder, TransportError> {
        let url = self.url(path)?;
        Ok(self.client()?.request(method, url))
    }
}

impl Transport for HttpTransport {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    fn set_base_url(&mut self, address: &str) {
        address.clone_into(&mut self.base_url);
    }

    fn set_bearer_token(&mut self, token: Option<&str>) -> Result<(), TransportError> {
        match token.filter(|t| !t.is_empty()) {
            Some(token) => {
                let mut value = HeaderValue::from_str(&format!("Bearer {token}"))?;
                value.set_sensitive(true);
                self.headers.insert(AUTHORIZATION, value);
            }
            None => {
                self.headers.remove(AUTHORIZATION);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "transport_test.rs"]
mod tests;
