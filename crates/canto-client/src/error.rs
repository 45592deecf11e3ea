//! Error types for canto-client.

/// Result type alias for canto-client operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for canto-client operations.
#[derive(Debug, thiserror::Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional source error.
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl Error {
    /// Create a new error with the given kind.
    pub fn new(kind: ErrorKind) -> Self {
        Self { kind, source: None }
    }

    /// Create a new error with the given kind and source.
    pub fn with_source(
        kind: ErrorKind,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind,
            source: Some(Box::new(source)),
        }
    }

    /// Stable symbolic code of the error kind.
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// Numeric code used by the vendor's reference client, where one exists.
    pub fn numeric_code(&self) -> Option<u32> {
        self.kind.numeric_code()
    }

    /// Returns true if re-running the OAuth2 flow may fix this error.
    pub fn is_auth_error(&self) -> bool {
        matches!(
            self.kind,
            ErrorKind::NotAuthorized(_) | ErrorKind::AuthorizationFailed(_)
        )
    }

    /// Returns true if the failure happened below HTTP (no response received).
    pub fn is_transport_failure(&self) -> bool {
        matches!(self.kind, ErrorKind::HttpTransportFailure(_))
    }

    /// HTTP status attached to the error, if any.
    pub fn status(&self) -> Option<u16> {
        match &self.kind {
            ErrorKind::NotAuthorized(_) => Some(401),
            ErrorKind::UnexpectedHttpStatus { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// The kind of error that occurred.
#[derive(Debug, thiserror::Error)]
pub enum ErrorKind {
    /// The request could not be serialized or its URL could not be built.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Token missing, invalid or expired (HTTP 401).
    #[error("Not authorized: {0}")]
    NotAuthorized(String),

    /// Any other non-2xx response.
    #[error("Unexpected HTTP status: {status}")]
    UnexpectedHttpStatus { status: u16, body: String },

    /// Network failure or timeout with no HTTP response.
    #[error("HTTP transport failure: {0}")]
    HttpTransportFailure(String),

    /// The OAuth2 token exchange was rejected or could not be attempted.
    #[error("Authorization failed: {0}")]
    AuthorizationFailed(String),

    /// No transport override was configured and no default is compiled in.
    #[error("No default implementation of {0} available")]
    NoDefaultTransport(String),

    /// A 2xx response body could not be decoded.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Invalid configuration.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ErrorKind {
    /// Stable symbolic code.
    pub fn code(&self) -> &'static str {
        match self {
            ErrorKind::InvalidRequest(_) => "INVALID_REQUEST",
            ErrorKind::NotAuthorized(_) => "NOT_AUTHORIZED",
            ErrorKind::UnexpectedHttpStatus { .. } => "UNEXPECTED_HTTP_STATUS",
            ErrorKind::HttpTransportFailure(_) => "HTTP_TRANSPORT_FAILURE",
            ErrorKind::AuthorizationFailed(_) => "AUTHORIZATION_FAILED",
            ErrorKind::NoDefaultTransport(_) => "NO_DEFAULT_TRANSPORT",
            ErrorKind::InvalidResponse(_) => "INVALID_RESPONSE",
            ErrorKind::Config(_) => "CONFIG",
        }
    }

    /// Numeric code kept compatible with the vendor's reference client.
    pub fn numeric_code(&self) -> Option<u32> {
        match self {
            ErrorKind::InvalidRequest(_) => Some(1626885024),
            ErrorKind::NotAuthorized(_) => Some(1626717511),
            ErrorKind::UnexpectedHttpStatus { .. } => Some(1627649307),
            ErrorKind::AuthorizationFailed(_) => Some(1626447895),
            _ => None,
        }
    }
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Self {
        Error::with_source(
            ErrorKind::InvalidRequest(format!("Invalid URL: {}", err)),
            err,
        )
    }
}

impl From<serde_urlencoded::ser::Error> for Error {
    fn from(err: serde_urlencoded::ser::Error) -> Self {
        Error::with_source(
            ErrorKind::InvalidRequest(format!("Can not encode query string: {}", err)),
            err,
        )
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::with_source(ErrorKind::InvalidResponse(err.to_string()), err)
    }
}
