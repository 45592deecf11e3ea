//! Client configuration.
//!
//! `ClientOptions` carries the tenant coordinates, the app credentials and
//! optional transport overrides. It is built once and never mutated; the
//! `CantoClient` keeps it behind an `Arc`.

use std::sync::Arc;
use std::time::Duration;

use crate::error::{Error, ErrorKind, Result};
use crate::transport::{HttpTransport, RequestFactory};
use crate::{API_VERSION, DEFAULT_CANTO_DOMAIN};

/// Tuning for the bundled HTTP transport.
///
/// Ignored when a custom transport is supplied through
/// [`ClientOptionsBuilder::with_http_client`].
#[derive(Debug, Clone)]
pub struct HttpClientOptions {
    /// Connect timeout.
    pub timeout: Duration,
    /// Emit request/response lines through `tracing` at debug level.
    pub debug: bool,
    /// User-Agent header value.
    pub user_agent: String,
}

impl Default for HttpClientOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(10),
            debug: false,
            user_agent: crate::USER_AGENT.to_string(),
        }
    }
}

/// Connection parameters for one Canto tenant.
///
/// The app secret is redacted in Debug output.
#[derive(Clone)]
pub struct ClientOptions {
    canto_name: String,
    canto_domain: String,
    app_id: String,
    app_secret: String,
    redirect_uri: String,
    mdc_domain_name: String,
    mdc_aws_account_id: String,
    scheme: String,
    http_client: Option<Arc<dyn HttpTransport>>,
    http_client_options: HttpClientOptions,
    request_factory: Option<Arc<dyn RequestFactory>>,
}

impl std::fmt::Debug for ClientOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientOptions")
            .field("canto_name", &self.canto_name)
            .field("canto_domain", &self.canto_domain)
            .field("app_id", &self.app_id)
            .field("app_secret", &"[REDACTED]")
            .field("redirect_uri", &self.redirect_uri)
            .field("mdc_domain_name", &self.mdc_domain_name)
            .field("mdc_aws_account_id", &self.mdc_aws_account_id)
            .field("scheme", &self.scheme)
            .field("http_client", &self.http_client.as_ref().map(|_| "custom"))
            .field("http_client_options", &self.http_client_options)
            .field(
                "request_factory",
                &self.request_factory.as_ref().map(|_| "custom"),
            )
            .finish()
    }
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            canto_name: String::new(),
            canto_domain: DEFAULT_CANTO_DOMAIN.to_string(),
            app_id: String::new(),
            app_secret: String::new(),
            redirect_uri: String::new(),
            mdc_domain_name: String::new(),
            mdc_aws_account_id: String::new(),
            scheme: "https".to_string(),
            http_client: None,
            http_client_options: HttpClientOptions::default(),
            request_factory: None,
        }
    }
}

impl ClientOptions {
    /// Create a new options builder.
    pub fn builder() -> ClientOptionsBuilder {
        ClientOptionsBuilder::default()
    }

    /// Load options from environment variables.
    ///
    /// Required: `CANTO_NAME`, `CANTO_APP_ID`, `CANTO_APP_SECRET`.
    /// Optional: `CANTO_DOMAIN`, `CANTO_REDIRECT_URI`, `CANTO_MDC_DOMAIN`,
    /// `CANTO_MDC_ACCOUNT_ID`.
    pub fn from_env() -> Result<Self> {
        Ok(ClientOptionsBuilder::from_env()?.build())
    }

    /// Tenant subdomain.
    pub fn canto_name(&self) -> &str {
        &self.canto_name
    }

    /// Base domain, `canto.com` unless overridden.
    pub fn canto_domain(&self) -> &str {
        &self.canto_domain
    }

    /// OAuth app id.
    pub fn app_id(&self) -> &str {
        &self.app_id
    }

    /// OAuth app secret. Never log this value.
    pub fn app_secret(&self) -> &str {
        &self.app_secret
    }

    /// Redirect URI registered with the OAuth app.
    pub fn redirect_uri(&self) -> &str {
        &self.redirect_uri
    }

    /// Media-delivery domain.
    pub fn mdc_domain_name(&self) -> &str {
        &self.mdc_domain_name
    }

    /// Media-delivery account id.
    pub fn mdc_aws_account_id(&self) -> &str {
        &self.mdc_aws_account_id
    }

    /// URL scheme for API and OAuth hosts.
    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    /// Custom transport, if one was configured.
    pub fn http_client(&self) -> Option<&Arc<dyn HttpTransport>> {
        self.http_client.as_ref()
    }

    /// Settings for the bundled transport.
    pub fn http_client_options(&self) -> &HttpClientOptions {
        &self.http_client_options
    }

    /// Custom request factory, if one was configured.
    pub fn request_factory(&self) -> Option<&Arc<dyn RequestFactory>> {
        self.request_factory.as_ref()
    }

    /// Build the tenant API URL for a path.
    ///
    /// Example: `api_url("batch/edit")` -> `https://{name}.{domain}/api/v1/batch/edit`
    pub fn api_url(&self, path: &str) -> Result<String> {
        if self.canto_name.is_empty() {
            return Err(Error::new(ErrorKind::InvalidRequest(
                "canto_name is required to build an API URL".to_string(),
            )));
        }
        Ok(format!(
            "{}://{}.{}/api/{}/{}",
            self.scheme, self.canto_name, self.canto_domain, API_VERSION, path
        ))
    }

    /// Build a URL on the OAuth host.
    ///
    /// Example: `oauth_url("oauth/api/oauth2/token")` -> `https://oauth.{domain}/oauth/api/oauth2/token`
    pub fn oauth_url(&self, path: &str) -> String {
        format!(
            "{}://oauth.{}/{}",
            self.scheme,
            self.canto_domain,
            path.trim_start_matches('/')
        )
    }

    /// Fails with `AuthorizationFailed` unless tenant name, app id and
    /// app secret are all set.
    pub fn ensure_credentials(&self) -> Result<()> {
        let missing: Vec<&str> = [
            ("canto_name", self.canto_name.is_empty()),
            ("app_id", self.app_id.is_empty()),
            ("app_secret", self.app_secret.is_empty()),
        ]
        .into_iter()
        .filter_map(|(name, empty)| empty.then_some(name))
        .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(Error::new(ErrorKind::AuthorizationFailed(format!(
                "missing client options: {}",
                missing.join(", ")
            ))))
        }
    }
}

/// Builder for ClientOptions.
#[derive(Debug, Default)]
pub struct ClientOptionsBuilder {
    options: ClientOptions,
}

impl ClientOptionsBuilder {
    /// Start a builder from environment variables.
    pub fn from_env() -> Result<Self> {
        let optional = |name: &str| std::env::var(name).ok().filter(|v| !v.is_empty());
        let required = |name: &str| {
            optional(name).ok_or_else(|| {
                Error::new(ErrorKind::Config(format!("{} is not set or empty", name)))
            })
        };

        let mut builder = ClientOptions::builder()
            .with_canto_name(required("CANTO_NAME")?)
            .with_app_id(required("CANTO_APP_ID")?)
            .with_app_secret(required("CANTO_APP_SECRET")?);

        if let Some(domain) = optional("CANTO_DOMAIN") {
            builder = builder.with_canto_domain(domain);
        }
        if let Some(uri) = optional("CANTO_REDIRECT_URI") {
            builder = builder.with_redirect_uri(uri);
        }
        if let Some(domain) = optional("CANTO_MDC_DOMAIN") {
            builder = builder.with_mdc_domain_name(domain);
        }
        if let Some(account) = optional("CANTO_MDC_ACCOUNT_ID") {
            builder = builder.with_mdc_aws_account_id(account);
        }

        Ok(builder)
    }

    /// Set the tenant subdomain.
    pub fn with_canto_name(mut self, name: impl Into<String>) -> Self {
        self.options.canto_name = name.into();
        self
    }

    /// Set the base domain.
    pub fn with_canto_domain(mut self, domain: impl Into<String>) -> Self {
        self.options.canto_domain = domain.into();
        self
    }

    /// Set the OAuth app id.
    pub fn with_app_id(mut self, app_id: impl Into<String>) -> Self {
        self.options.app_id = app_id.into();
        self
    }

    /// Set the OAuth app secret.
    pub fn with_app_secret(mut self, secret: impl Into<String>) -> Self {
        self.options.app_secret = secret.into();
        self
    }

    /// Set the OAuth redirect URI.
    pub fn with_redirect_uri(mut self, uri: impl Into<String>) -> Self {
        self.options.redirect_uri = uri.into();
        self
    }

    /// Set the media-delivery domain.
    pub fn with_mdc_domain_name(mut self, domain: impl Into<String>) -> Self {
        self.options.mdc_domain_name = domain.into();
        self
    }

    /// Set the media-delivery account id.
    pub fn with_mdc_aws_account_id(mut self, account_id: impl Into<String>) -> Self {
        self.options.mdc_aws_account_id = account_id.into();
        self
    }

    /// Override the URL scheme (`https` by default).
    pub fn with_scheme(mut self, scheme: impl Into<String>) -> Self {
        self.options.scheme = scheme.into();
        self
    }

    /// Use a custom transport instead of the bundled one.
    pub fn with_http_client(mut self, transport: Arc<dyn HttpTransport>) -> Self {
        self.options.http_client = Some(transport);
        self
    }

    /// Set the bundled transport's settings.
    pub fn with_http_client_options(mut self, options: HttpClientOptions) -> Self {
        self.options.http_client_options = options;
        self
    }

    /// Set the connect timeout of the bundled transport.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.options.http_client_options.timeout = timeout;
        self
    }

    /// Enable or disable request/response debug tracing.
    pub fn with_debug(mut self, enabled: bool) -> Self {
        self.options.http_client_options.debug = enabled;
        self
    }

    /// Set a custom User-Agent.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.options.http_client_options.user_agent = user_agent.into();
        self
    }

    /// Use a custom request factory.
    pub fn with_request_factory(mut self, factory: Arc<dyn RequestFactory>) -> Self {
        self.options.request_factory = Some(factory);
        self
    }

    /// Build the options.
    pub fn build(self) -> ClientOptions {
        self.options
    }
}
