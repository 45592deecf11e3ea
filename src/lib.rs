//! # canto-saas-api
//!
//! A Canto SaaS (digital asset management) API client library for Rust.
//!
//! ## Security
//!
//! - App secrets and tokens are redacted in Debug output
//! - Tracing skips credential parameters and request bodies
//! - A failed token request never clears a previously held token
//!
//! ## Crates
//!
//! - **canto-saas-client** - Options, request building, authenticated dispatch, MDC URLs
//! - **canto-saas-auth** - OAuth 2.0 client-credentials, authorization-code and refresh flows
//! - **canto-saas-rest** - Asset, LibraryTree and Upload endpoints
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use canto_saas_api::{CantoRestClient, ClientOptions, ContentScheme, Scope};
//! use canto_saas_api::rest::GetContentDetailsRequest;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = CantoRestClient::new(ClientOptions::from_env()?)?;
//!     client.authorize(None, Scope::Admin).await?;
//!
//!     let details = client
//!         .asset()
//!         .get_content_details(&GetContentDetailsRequest::new("abc123", ContentScheme::Image))
//!         .await?;
//!     println!("{} -> {}", details.name, client.mdc().url(&details.id, "image"));
//!
//!     Ok(())
//! }
//! ```

// Re-export all crates for convenient access
#[cfg(feature = "auth")]
pub use canto_saas_auth as auth;
#[cfg(feature = "client")]
pub use canto_saas_client as client;
#[cfg(feature = "rest")]
pub use canto_saas_rest as rest;

// Re-export commonly used types at the top level
#[cfg(feature = "auth")]
pub use canto_saas_auth::{Authorize, OAuth2, Scope};
#[cfg(feature = "client")]
pub use canto_saas_client::{CantoClient, ClientOptions, Error, ErrorKind, Result};
#[cfg(feature = "rest")]
pub use canto_saas_rest::{CantoRestClient, ContentScheme};
