//! OAuth 2.0 token acquisition.
//!
//! Canto issues tokens from one endpoint on the `oauth.{domain}` host. The
//! sub-flow is selected by the parameters sent:
//! - **Client credentials** - app id + secret (optionally on behalf of a user)
//! - **Authorization code** - exchange the code returned to the redirect URI
//! - **Refresh token** - trade a refresh token for a new access token
//!
//! Nothing is retried and tokens are never refreshed automatically. A
//! `NotAuthorized` error from a later call means the flow must be re-run.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use canto_saas_client::{ApiRequest, CantoClient, ClientOptions, HttpMethod};

use crate::{Error, ErrorKind, Result};

/// Token endpoint path on the OAuth host.
pub const TOKEN_PATH: &str = "oauth/api/oauth2/token";

/// User-facing authorization page on the OAuth host.
pub const AUTHORIZE_PATH: &str = "oauth/api/oauth2/authorize";

/// Access level requested for the token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Scope {
    #[default]
    Admin,
    Contributor,
    Consumer,
}

impl Scope {
    /// Wire value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Scope::Admin => "admin",
            Scope::Contributor => "contributor",
            Scope::Consumer => "consumer",
        }
    }
}

impl std::fmt::Display for Scope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// OAuth 2.0 grant type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrantType {
    ClientCredentials,
    AuthorizationCode,
    RefreshToken,
}

impl GrantType {
    /// Wire value.
    pub fn as_str(&self) -> &'static str {
        match self {
            GrantType::ClientCredentials => "client_credentials",
            GrantType::AuthorizationCode => "authorization_code",
            GrantType::RefreshToken => "refresh_token",
        }
    }
}

/// Token request shared by all sub-flows.
///
/// Sensitive fields (app secret, code, refresh token) are redacted in Debug
/// output and skipped in tracing.
#[derive(Clone)]
pub struct OAuth2Request {
    app_id: String,
    app_secret: String,
    redirect_uri: String,
    scope: Scope,
    user_id: Option<String>,
    code: Option<String>,
    refresh_token: Option<String>,
    grant_type: Option<GrantType>,
}

impl std::fmt::Debug for OAuth2Request {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OAuth2Request")
            .field("app_id", &self.app_id)
            .field("app_secret", &"[REDACTED]")
            .field("redirect_uri", &self.redirect_uri)
            .field("scope", &self.scope)
            .field("user_id", &self.user_id)
            .field("code", &self.code.as_ref().map(|_| "[REDACTED]"))
            .field(
                "refresh_token",
                &self.refresh_token.as_ref().map(|_| "[REDACTED]"),
            )
            .field("grant_type", &self.grant_type())
            .finish()
    }
}

impl OAuth2Request {
    /// Create a client-credentials request.
    pub fn new(app_id: impl Into<String>, app_secret: impl Into<String>) -> Self {
        Self {
            app_id: app_id.into(),
            app_secret: app_secret.into(),
            redirect_uri: String::new(),
            scope: Scope::default(),
            user_id: None,
            code: None,
            refresh_token: None,
            grant_type: None,
        }
    }

    /// Create a request from the client's app credentials and redirect URI.
    pub fn from_options(options: &ClientOptions) -> Self {
        Self::new(options.app_id(), options.app_secret()).with_redirect_uri(options.redirect_uri())
    }

    /// Set the redirect URI.
    pub fn with_redirect_uri(mut self, uri: impl Into<String>) -> Self {
        self.redirect_uri = uri.into();
        self
    }

    /// Set the scope.
    pub fn with_scope(mut self, scope: Scope) -> Self {
        self.scope = scope;
        self
    }

    /// Act on behalf of a user (client-credentials flow).
    pub fn with_user_id(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    /// Exchange an authorization code.
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    /// Exchange a refresh token.
    pub fn with_refresh_token(mut self, refresh_token: impl Into<String>) -> Self {
        self.refresh_token = Some(refresh_token.into());
        self
    }

    /// Force a grant type instead of deriving it.
    pub fn with_grant_type(mut self, grant_type: GrantType) -> Self {
        self.grant_type = Some(grant_type);
        self
    }

    /// Grant type sent to the server: the explicit one, else refresh token,
    /// else authorization code, else client credentials.
    pub fn grant_type(&self) -> GrantType {
        if let Some(grant_type) = self.grant_type {
            grant_type
        } else if self.refresh_token.is_some() {
            GrantType::RefreshToken
        } else if self.code.is_some() {
            GrantType::AuthorizationCode
        } else {
            GrantType::ClientCredentials
        }
    }

    /// Requested scope.
    pub fn scope(&self) -> Scope {
        self.scope
    }

    /// User the token is requested for, if any.
    pub fn user_id(&self) -> Option<&str> {
        self.user_id.as_deref()
    }
}

impl ApiRequest for OAuth2Request {
    fn method(&self) -> HttpMethod {
        HttpMethod::Post
    }

    fn api_path(&self) -> &str {
        TOKEN_PATH
    }

    fn query_params(&self) -> Option<Vec<(String, String)>> {
        let mut params = vec![
            ("app_id".to_string(), self.app_id.clone()),
            ("app_secret".to_string(), self.app_secret.clone()),
            ("grant_type".to_string(), self.grant_type().as_str().to_string()),
        ];
        if !self.redirect_uri.is_empty() {
            params.push(("redirect_uri".to_string(), self.redirect_uri.clone()));
        }
        if let Some(ref code) = self.code {
            params.push(("code".to_string(), code.clone()));
        }
        if let Some(ref refresh_token) = self.refresh_token {
            params.push(("refresh_token".to_string(), refresh_token.clone()));
        }
        params.push(("scope".to_string(), self.scope.as_str().to_string()));
        if let Some(ref user_id) = self.user_id {
            params.push(("user_id".to_string(), user_id.clone()));
        }
        Some(params)
    }

    fn base_url(&self, options: &ClientOptions) -> canto_saas_client::Result<String> {
        Ok(options.oauth_url(TOKEN_PATH))
    }
}

/// Token response.
///
/// Tokens are redacted in Debug output.
#[derive(Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OAuth2Response {
    /// Access token for the Authorization header.
    pub access_token: String,
    /// Lifetime of the access token in seconds.
    #[serde(default)]
    pub expires_in: u64,
    /// Token type, usually "Bearer".
    #[serde(default)]
    pub token_type: String,
    /// Refresh token, empty if none was issued.
    #[serde(default)]
    pub refresh_token: String,
}

impl std::fmt::Debug for OAuth2Response {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OAuth2Response")
            .field("access_token", &"[REDACTED]")
            .field("expires_in", &self.expires_in)
            .field("token_type", &self.token_type)
            .field(
                "refresh_token",
                &(!self.refresh_token.is_empty()).then_some("[REDACTED]"),
            )
            .finish()
    }
}

impl OAuth2Response {
    /// Lifetime of the access token.
    pub fn expires_in_duration(&self) -> Duration {
        Duration::from_secs(self.expires_in)
    }

    /// Refresh token, if one was issued.
    pub fn refresh_token(&self) -> Option<&str> {
        (!self.refresh_token.is_empty()).then_some(self.refresh_token.as_str())
    }
}

/// Token endpoint bound to a client.
#[derive(Debug, Clone, Copy)]
pub struct OAuth2<'a> {
    client: &'a CantoClient,
}

impl<'a> OAuth2<'a> {
    /// Create the endpoint for a client.
    pub fn new(client: &'a CantoClient) -> Self {
        Self { client }
    }

    /// Exchange a token request for a token without storing it.
    ///
    /// A 401 becomes `AuthorizationFailed`; any other non-2xx stays
    /// `UnexpectedHttpStatus`.
    #[instrument(skip(self, request), fields(grant_type = request.grant_type().as_str(), scope = %request.scope()))]
    pub async fn obtain_access_token(&self, request: &OAuth2Request) -> Result<OAuth2Response> {
        let response = self
            .client
            .send_unauthenticated(request)
            .await
            .map_err(into_authorization_failed)?;

        let token: OAuth2Response = response.json()?;
        info!(expires_in = token.expires_in, "Access token obtained");
        Ok(token)
    }

    /// Exchange a token request and store the access token on the client.
    ///
    /// An empty access token in the response leaves the held token untouched.
    pub async fn authorize(&self, request: &OAuth2Request) -> Result<OAuth2Response> {
        let token = self.obtain_access_token(request).await?;
        self.client.set_access_token(token.access_token.as_str());
        Ok(token)
    }

    /// URL of the page where a user grants the app access.
    ///
    /// Canto redirects back to the configured redirect URI with a `code`
    /// to pass to [`Authorize::authorize_with_code`].
    pub fn authorization_url(&self, state: Option<&str>) -> Result<String> {
        let options = self.client.options();
        if options.redirect_uri().is_empty() {
            return Err(Error::new(ErrorKind::Config(
                "redirect_uri is required for the authorization code flow".to_string(),
            )));
        }

        let mut url = format!(
            "{}?response_type=code&app_id={}&redirect_uri={}",
            options.oauth_url(AUTHORIZE_PATH),
            urlencoding::encode(options.app_id()),
            urlencoding::encode(options.redirect_uri()),
        );

        if let Some(state) = state {
            url.push_str(&format!("&state={}", urlencoding::encode(state)));
        }

        Ok(url)
    }
}

fn into_authorization_failed(err: Error) -> Error {
    if matches!(err.kind, ErrorKind::NotAuthorized(_)) {
        Error::with_source(
            ErrorKind::AuthorizationFailed("app credentials were rejected".to_string()),
            err,
        )
    } else {
        err
    }
}

/// OAuth 2.0 flows on a [`CantoClient`], storing the obtained token on it.
#[async_trait]
pub trait Authorize {
    /// Client-credentials flow. `user_id` acts on behalf of a user.
    async fn authorize_with_client_credentials(
        &self,
        user_id: Option<&str>,
        scope: Scope,
    ) -> Result<OAuth2Response>;

    /// Authorization-code flow.
    async fn authorize_with_code(&self, code: &str) -> Result<OAuth2Response>;

    /// Refresh-token flow.
    async fn refresh_access_token(&self, refresh_token: &str) -> Result<OAuth2Response>;
}

#[async_trait]
impl Authorize for CantoClient {
    async fn authorize_with_client_credentials(
        &self,
        user_id: Option<&str>,
        scope: Scope,
    ) -> Result<OAuth2Response> {
        self.options().ensure_credentials()?;

        let mut request = OAuth2Request::from_options(self.options()).with_scope(scope);
        if let Some(user_id) = user_id.filter(|id| !id.is_empty()) {
            request = request.with_user_id(user_id);
        }

        OAuth2::new(self).authorize(&request).await
    }

    async fn authorize_with_code(&self, code: &str) -> Result<OAuth2Response> {
        self.options().ensure_credentials()?;

        let request = OAuth2Request::from_options(self.options()).with_code(code);
        OAuth2::new(self).authorize(&request).await
    }

    async fn refresh_access_token(&self, refresh_token: &str) -> Result<OAuth2Response> {
        self.options().ensure_credentials()?;

        let request = OAuth2Request::from_options(self.options()).with_refresh_token(refresh_token);
        OAuth2::new(self).authorize(&request).await
    }
}
