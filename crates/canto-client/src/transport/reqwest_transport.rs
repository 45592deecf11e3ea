//! Bundled transport built on reqwest.

use async_trait::async_trait;
use tracing::{debug, info};

use super::{HttpRequest, HttpTransport, TransportError};
use crate::config::HttpClientOptions;
use crate::error::{Error, ErrorKind, Result};
use crate::response::Response;

/// reqwest-backed [`HttpTransport`] with redirects and compression enabled.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    inner: reqwest::Client,
    debug: bool,
}

impl ReqwestTransport {
    /// Build a transport from the client options' HTTP settings.
    pub fn new(options: &HttpClientOptions) -> Result<Self> {
        let inner = reqwest::Client::builder()
            .connect_timeout(options.timeout)
            .user_agent(&options.user_agent)
            .gzip(true)
            .deflate(true)
            .build()
            .map_err(|e| Error::with_source(ErrorKind::Config(e.to_string()), e))?;

        Ok(Self {
            inner,
            debug: options.debug,
        })
    }

    /// Wrap an existing reqwest client.
    pub fn from_client(inner: reqwest::Client) -> Self {
        Self {
            inner,
            debug: false,
        }
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn send(&self, request: HttpRequest) -> std::result::Result<Response, TransportError> {
        if self.debug {
            debug!(method = %request.method, url = %request.url.path(), "Sending request");
        }

        let mut req = self
            .inner
            .request(request.method.to_reqwest(), request.url);

        for (name, value) in &request.headers {
            req = req.header(name.as_str(), value.as_str());
        }

        if let Some(body) = request.body {
            req = req.body(body);
        }

        let response = req.send().await.map_err(transport_error)?;

        let status = response.status().as_u16();
        if self.debug {
            let content_length = response.content_length();
            if response.status().is_success() {
                debug!(status, content_length, "Response received");
            } else {
                info!(status, content_length, "Non-success response");
            }
        }

        let headers: Vec<(String, String)> = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();

        let body = response.bytes().await.map_err(transport_error)?;

        let mut result = Response::new(status, body);
        for (name, value) in headers {
            result = result.with_header(name, value);
        }
        Ok(result)
    }
}

/// Drop the URL from reqwest errors; OAuth URLs carry the app secret in
/// their query string.
fn transport_error(err: reqwest::Error) -> TransportError {
    let err = err.without_url();
    let message = if err.is_timeout() {
        "request timed out".to_string()
    } else if err.is_connect() {
        format!("connection failed: {}", err)
    } else {
        err.to_string()
    };
    TransportError::new(message).with_source(err)
}
