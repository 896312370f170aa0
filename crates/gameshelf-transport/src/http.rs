//! HTTP transport implementation using `reqwest`.

use std::time::Duration;

use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{Client, Url};

use crate::{Method, Request, Response, Transport, TransportError};

/// Settings for [`ReqwestTransport`].
#[derive(Debug, Clone)]
pub struct TransportConfig {
    /// Base address every request path is appended to.
    pub base_url: String,
    /// Total time allowed per request, connect through body.
    pub timeout: Duration,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            timeout: Duration::from_secs(10),
        }
    }
}

/// A [`Transport`] that talks JSON over HTTP to one backend.
///
/// Every request carries `Content-Type: application/json` and
/// `Accept: application/json` and is bounded by the configured timeout.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
    base_url: Url,
    timeout: Duration,
}

impl ReqwestTransport {
    /// Builds a transport for the given configuration.
    ///
    /// # Errors
    /// Returns [`TransportError::Setup`] if the base URL does not parse or
    /// the HTTP client cannot be constructed.
    pub fn new(config: TransportConfig) -> Result<Self, TransportError> {
        let base_url = Url::parse(&config.base_url).map_err(|e| {
            TransportError::Setup(format!(
                "invalid base url {:?}: {e}",
                config.base_url
            ))
        })?;

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .timeout(config.timeout)
            .default_headers(headers)
            .build()
            .map_err(|e| TransportError::Setup(e.to_string()))?;

        tracing::debug!(base_url = %base_url, timeout = ?config.timeout, "HTTP transport ready");
        Ok(Self {
            client,
            base_url,
            timeout: config.timeout,
        })
    }

    /// Returns the base address requests are sent to.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Joins a request path onto the base address, keeping any path
    /// prefix the base already has (`http://host/api` + `/games`).
    fn url_for(&self, path: &str) -> String {
        let base = self.base_url.as_str().trim_end_matches('/');
        let path = path.trim_start_matches('/');
        format!("{base}/{path}")
    }
}

impl Transport for ReqwestTransport {
    async fn send(&self, request: Request) -> Result<Response, TransportError> {
        let url = self.url_for(&request.path);
        tracing::debug!(method = %request.method, %url, "sending request");

        let mut builder = self.client.request(to_reqwest(request.method), &url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| map_send_error(e, self.timeout))?;
        let status = response.status();

        if !status.is_success() {
            // A body we fail to read is still a server answer.
            let body = response
                .bytes()
                .await
                .map(|b| b.to_vec())
                .unwrap_or_default();
            tracing::debug!(status = status.as_u16(), %url, "request failed");
            return Err(TransportError::status(status.as_u16(), body));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| map_send_error(e, self.timeout))?;
        tracing::debug!(status = status.as_u16(), %url, bytes = body.len(), "request completed");
        Ok(Response::new(status.as_u16(), body.to_vec()))
    }
}

fn to_reqwest(method: Method) -> reqwest::Method {
    match method {
        Method::Get => reqwest::Method::GET,
        Method::Post => reqwest::Method::POST,
        Method::Put => reqwest::Method::PUT,
        Method::Delete => reqwest::Method::DELETE,
    }
}

/// Sorts a `reqwest` failure into the transport taxonomy. Builder errors
/// (bad header, bad URL) mean nothing went out; everything else got as far
/// as the network.
fn map_send_error(error: reqwest::Error, timeout: Duration) -> TransportError {
    if error.is_builder() {
        TransportError::Setup(error.to_string())
    } else if error.is_timeout() {
        TransportError::Network(format!("timed out after {timeout:?}"))
    } else {
        TransportError::Network(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transport(base_url: &str) -> ReqwestTransport {
        ReqwestTransport::new(TransportConfig {
            base_url: base_url.to_string(),
            ..TransportConfig::default()
        })
        .unwrap()
    }

    #[test]
    fn test_default_config_points_at_localhost() {
        let cfg = TransportConfig::default();
        assert_eq!(cfg.base_url, "http://localhost:8080");
        assert_eq!(cfg.timeout, Duration::from_secs(10));
    }

    #[test]
    fn test_new_invalid_base_url_returns_setup_error() {
        let result = ReqwestTransport::new(TransportConfig {
            base_url: "not a url".into(),
            ..TransportConfig::default()
        });
        assert!(matches!(result, Err(TransportError::Setup(_))));
    }

    #[test]
    fn test_base_url_is_parsed_once_at_construction() {
        let t = transport("http://example.test:9000/api");
        assert_eq!(t.base_url().host_str(), Some("example.test"));
        assert_eq!(t.base_url().port(), Some(9000));
        assert_eq!(t.base_url().path(), "/api");
    }

    #[test]
    fn test_url_for_joins_root_base() {
        let t = transport("http://localhost:8080");
        assert_eq!(t.url_for("/games"), "http://localhost:8080/games");
    }

    #[test]
    fn test_url_for_keeps_base_path_prefix() {
        let t = transport("http://example.test/api/");
        assert_eq!(t.url_for("/users/me"), "http://example.test/api/users/me");
    }
}
