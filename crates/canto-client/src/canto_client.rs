//! High-level Canto client with authenticated dispatch.
//!
//! `CantoClient` owns the resolved transport, the request factory and the
//! session's access token. Every endpoint call goes through
//! [`CantoClient::send`], which builds the request, attaches the bearer token,
//! sends it and classifies the outcome into a response or a typed error.
//!
//! ## Security
//!
//! - The access token is redacted in Debug output
//! - Request bodies and tokens are skipped in tracing spans

use std::sync::{Arc, PoisonError, RwLock};

use serde::de::DeserializeOwned;
use tracing::{debug, instrument, warn};
use url::Url;

use crate::config::ClientOptions;
use crate::error::{Error, ErrorKind, Result};
use crate::mdc::MdcUrlHelper;
use crate::request::{build_request, ApiRequest, HttpMethod};
use crate::response::Response;
use crate::transport::{self, HttpRequest, HttpTransport, RequestFactory, TransportError};

/// Canto API client.
///
/// Cloning is cheap; clones share the transport and the access token.
/// Token writes are last-write-wins.
///
/// # Example
///
/// ```rust,ignore
/// use canto_saas_client::{CantoClient, ClientOptions};
///
/// let client = CantoClient::new(
///     ClientOptions::builder()
///         .with_canto_name("acme")
///         .with_app_id("app-id")
///         .with_app_secret("app-secret")
///         .build(),
/// )?;
/// client.set_access_token("token-from-elsewhere");
/// let response = client.send(&some_request).await?;
/// ```
#[derive(Clone)]
pub struct CantoClient {
    options: Arc<ClientOptions>,
    transport: Arc<dyn HttpTransport>,
    request_factory: Arc<dyn RequestFactory>,
    access_token: Arc<RwLock<Option<String>>>,
}

impl std::fmt::Debug for CantoClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CantoClient")
            .field("options", &self.options)
            .field(
                "access_token",
                &self.access_token().map(|_| "[REDACTED]"),
            )
            .finish_non_exhaustive()
    }
}

impl CantoClient {
    /// Create a client, resolving the transport and request factory.
    ///
    /// Fails with `NoDefaultTransport` when no transport was configured and
    /// the `reqwest` feature is disabled.
    pub fn new(options: ClientOptions) -> Result<Self> {
        let transport = transport::resolve_transport(&options)?;
        let request_factory = transport::resolve_request_factory(&options);

        Ok(Self {
            options: Arc::new(options),
            transport,
            request_factory,
            access_token: Arc::new(RwLock::new(None)),
        })
    }

    /// Get the client options.
    pub fn options(&self) -> &ClientOptions {
        &self.options
    }

    /// Get the resolved transport.
    pub fn http_client(&self) -> &Arc<dyn HttpTransport> {
        &self.transport
    }

    /// Get the current access token.
    pub fn access_token(&self) -> Option<String> {
        self.access_token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Returns true if a token is held.
    pub fn is_authorized(&self) -> bool {
        self.access_token().is_some()
    }

    /// Set the access token. An empty token is ignored so a valid token is
    /// never overwritten with nothing.
    pub fn set_access_token(&self, token: impl Into<String>) {
        let token = token.into();
        if token.is_empty() {
            debug!("Ignoring empty access token");
            return;
        }
        *self
            .access_token
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Some(token);
    }

    /// Build the tenant API URL for a path.
    pub fn api_url(&self, path: &str) -> Result<String> {
        self.options.api_url(path)
    }

    /// Media-delivery URL helper.
    pub fn mdc(&self) -> MdcUrlHelper<'_> {
        MdcUrlHelper::new(&self.options)
    }

    /// Media-delivery URL for an asset.
    pub fn mdc_url(&self, asset_id: &str, scheme: &str) -> String {
        self.mdc().url(asset_id, scheme)
    }

    /// Create a bare request through the configured request factory.
    pub fn create_request(&self, method: HttpMethod, url: Url) -> HttpRequest {
        self.request_factory.create_request(method, url)
    }

    /// Build the HTTP request for a request model without sending it.
    pub fn build_request<R: ApiRequest + ?Sized>(
        &self,
        request: &R,
        extra_headers: &[(String, String)],
    ) -> Result<HttpRequest> {
        build_request(
            request,
            &self.options,
            self.request_factory.as_ref(),
            extra_headers,
        )
    }

    // =========================================================================
    // Dispatch
    // =========================================================================

    /// Send a request with the bearer token attached (when one is held).
    pub async fn send<R: ApiRequest + ?Sized>(&self, request: &R) -> Result<Response> {
        self.dispatch(request, true).await
    }

    /// Send a request without an Authorization header.
    pub async fn send_unauthenticated<R: ApiRequest + ?Sized>(
        &self,
        request: &R,
    ) -> Result<Response> {
        self.dispatch(request, false).await
    }

    /// Send an authenticated request and decode the JSON response.
    pub async fn send_json<T: DeserializeOwned, R: ApiRequest + ?Sized>(
        &self,
        request: &R,
    ) -> Result<T> {
        self.send(request).await?.json()
    }

    #[instrument(
        skip(self, request),
        fields(method = %request.method(), path = request.api_path())
    )]
    async fn dispatch<R: ApiRequest + ?Sized>(
        &self,
        request: &R,
        authenticated: bool,
    ) -> Result<Response> {
        let mut headers = Vec::new();
        if authenticated {
            if let Some(token) = self.access_token() {
                headers.push(("Authorization".to_string(), format!("Bearer {}", token)));
            }
        }

        let http_request = self.build_request(request, &headers)?;
        let outcome = self.transport.send(http_request).await;
        classify(outcome)
    }
}

/// Map a transport outcome to a 2xx response or one of the typed failures.
fn classify(outcome: std::result::Result<Response, TransportError>) -> Result<Response> {
    match outcome {
        Ok(response) if response.is_success() => {
            debug!(status = response.status(), "Request succeeded");
            Ok(response)
        }
        Ok(response) => Err(status_error(&response)),
        Err(err) => match err.response() {
            Some(response) if !response.is_success() => {
                let kind = status_error(response).kind;
                Err(Error::with_source(kind, err))
            }
            // A 2xx attached to an error means the transport gave up after the
            // status line (e.g. reading the body), so the response is incomplete.
            _ => {
                warn!(error = %err, "HTTP transport failure");
                Err(Error::with_source(
                    ErrorKind::HttpTransportFailure(err.message().to_string()),
                    err,
                ))
            }
        },
    }
}

fn status_error(response: &Response) -> Error {
    let status = response.status();
    warn!(status, "Request rejected");

    if status == 401 {
        Error::new(ErrorKind::NotAuthorized(
            "authorization failed, token invalid or expired".to_string(),
        ))
    } else {
        Error::new(ErrorKind::UnexpectedHttpStatus {
            status,
            body: response.text_lossy(),
        })
    }
}
