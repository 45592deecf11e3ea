//! # canto-client
//!
//! Core HTTP client infrastructure for the Canto SaaS API.
//!
//! This crate provides the pieces every endpoint is built on:
//! - Typed request models ([`ApiRequest`]) and a pure request builder
//! - Authenticated dispatch with total error classification
//! - A pluggable transport ([`HttpTransport`]) with a bundled reqwest default
//! - Media-delivery (MDC) URL construction
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    Application Layer                        │
//! │  (canto-auth: OAuth2, canto-rest: Asset/LibraryTree/Upload) │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      CantoClient                            │
//! │  - Holds options, access token, transport                   │
//! │  - Builds requests from ApiRequest models                   │
//! │  - Adds the bearer token, classifies responses              │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                  dyn HttpTransport                          │
//! │  - ReqwestTransport (feature `reqwest`) or caller-supplied  │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust,ignore
//! use canto_saas_client::{CantoClient, ClientOptions};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), canto_saas_client::Error> {
//!     let client = CantoClient::new(ClientOptions::from_env()?)?;
//!     client.set_access_token(std::env::var("CANTO_TOKEN").unwrap_or_default());
//!
//!     let details: serde_json::Value = client.send_json(&my_request).await?;
//!     println!("{}", client.mdc_url("abc123", "image"));
//!     Ok(())
//! }
//! ```

mod canto_client;
mod config;
mod error;
mod mdc;
mod request;
mod response;
pub mod transport;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use canto_client::CantoClient;
pub use config::{ClientOptions, ClientOptionsBuilder, HttpClientOptions};
pub use error::{Error, ErrorKind, Result};
pub use mdc::{MdcUrlHelper, DEFAULT_MDC_SCHEME};
pub use request::{build_request, build_url, json_body, ApiRequest, HttpMethod};
pub use response::Response;
pub use transport::{
    DefaultRequestFactory, HttpRequest, HttpTransport, RequestFactory, TransportError,
};

#[cfg(feature = "reqwest")]
pub use transport::ReqwestTransport;

/// Canto API version segment.
pub const API_VERSION: &str = "v1";

/// Default Canto base domain.
pub const DEFAULT_CANTO_DOMAIN: &str = "canto.com";

/// User-Agent string for the client
pub const USER_AGENT: &str = concat!("canto-saas-api/", env!("CARGO_PKG_VERSION"));
