//! Pluggable HTTP transport.
//!
//! The client never talks to the network directly. It hands a fully built
//! [`HttpRequest`] to an [`HttpTransport`] and gets a [`Response`] (any
//! status) or a [`TransportError`] back. A reqwest-based transport is
//! compiled in with the `reqwest` feature; without it, callers must supply
//! their own through [`ClientOptionsBuilder::with_http_client`].
//!
//! [`ClientOptionsBuilder::with_http_client`]: crate::ClientOptionsBuilder::with_http_client

use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use url::Url;

use crate::config::ClientOptions;
use crate::error::Result;
use crate::request::HttpMethod;
use crate::response::Response;

#[cfg(feature = "reqwest")]
mod reqwest_transport;

#[cfg(feature = "reqwest")]
pub use reqwest_transport::ReqwestTransport;

/// Sends built requests.
///
/// Implementations return `Ok` for every response they receive, including
/// non-2xx ones. `Err` is for failures where either no response arrived, or
/// the transport chose to raise on the status; in the latter case the error
/// should carry the response so the dispatcher can classify it.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Send one request.
    async fn send(&self, request: HttpRequest) -> std::result::Result<Response, TransportError>;
}

/// Creates the request object for a method and URL.
pub trait RequestFactory: Send + Sync {
    /// Create a request without headers or body.
    fn create_request(&self, method: HttpMethod, url: Url) -> HttpRequest;
}

/// Factory used when no custom one is configured.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultRequestFactory;

impl RequestFactory for DefaultRequestFactory {
    fn create_request(&self, method: HttpMethod, url: Url) -> HttpRequest {
        HttpRequest::new(method, url)
    }
}

/// A fully assembled HTTP request.
///
/// The Authorization header value is redacted in Debug output.
#[derive(Clone, PartialEq, Eq)]
pub struct HttpRequest {
    /// HTTP method.
    pub method: HttpMethod,
    /// Absolute URL including the query string.
    pub url: Url,
    /// Headers in the order they were set.
    pub headers: Vec<(String, String)>,
    /// Request body.
    pub body: Option<Bytes>,
}

impl std::fmt::Debug for HttpRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let headers: Vec<(&str, &str)> = self
            .headers
            .iter()
            .map(|(name, value)| {
                if name.eq_ignore_ascii_case("authorization") {
                    (name.as_str(), "[REDACTED]")
                } else {
                    (name.as_str(), value.as_str())
                }
            })
            .collect();

        f.debug_struct("HttpRequest")
            .field("method", &self.method)
            .field("url", &self.url.as_str())
            .field("headers", &headers)
            .field("body_len", &self.body.as_ref().map(Bytes::len))
            .finish()
    }
}

impl HttpRequest {
    /// Create a request without headers or body.
    pub fn new(method: HttpMethod, url: Url) -> Self {
        Self {
            method,
            url,
            headers: Vec::new(),
            body: None,
        }
    }

    /// Set a header, replacing any existing value with the same name.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into();
        self.headers.retain(|(n, _)| !n.eq_ignore_ascii_case(&name));
        self.headers.push((name, value.into()));
        self
    }

    /// Set the body.
    pub fn with_body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Get a header value. Lookup is case-insensitive.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Body as UTF-8 text, if present.
    pub fn body_text(&self) -> Option<&str> {
        self.body
            .as_ref()
            .and_then(|body| std::str::from_utf8(body).ok())
    }
}

/// Failure reported by a transport.
#[derive(Debug, thiserror::Error)]
#[error("{message}")]
pub struct TransportError {
    message: String,
    response: Option<Response>,
    #[source]
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl TransportError {
    /// A failure with no response (connection refused, timeout, ...).
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            response: None,
            source: None,
        }
    }

    /// A failure raised on a received response.
    pub fn with_response(message: impl Into<String>, response: Response) -> Self {
        Self {
            message: message.into(),
            response: Some(response),
            source: None,
        }
    }

    /// Attach the underlying cause.
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// The response that triggered the failure, if any.
    pub fn response(&self) -> Option<&Response> {
        self.response.as_ref()
    }

    /// Error message.
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Pick the configured transport, or build the bundled default.
pub(crate) fn resolve_transport(options: &ClientOptions) -> Result<Arc<dyn HttpTransport>> {
    match options.http_client() {
        Some(transport) => Ok(Arc::clone(transport)),
        None => default_transport(options),
    }
}

#[cfg(feature = "reqwest")]
fn default_transport(options: &ClientOptions) -> Result<Arc<dyn HttpTransport>> {
    let transport = ReqwestTransport::new(options.http_client_options())?;
    Ok(Arc::new(transport))
}

#[cfg(not(feature = "reqwest"))]
fn default_transport(_options: &ClientOptions) -> Result<Arc<dyn HttpTransport>> {
    use crate::error::{Error, ErrorKind};

    Err(Error::new(ErrorKind::NoDefaultTransport(
        "HttpTransport; enable the `reqwest` feature or provide one via \
         ClientOptionsBuilder::with_http_client"
            .to_string(),
    )))
}

/// Pick the configured request factory, or the default one.
pub(crate) fn resolve_request_factory(options: &ClientOptions) -> Arc<dyn RequestFactory> {
    match options.request_factory() {
        Some(factory) => Arc::clone(factory),
        None => Arc::new(DefaultRequestFactory),
    }
}
