//! # canto-auth
//!
//! OAuth 2.0 authentication for the Canto SaaS API.
//!
//! ## Security
//!
//! - App secrets, codes and tokens are redacted in Debug output
//! - Tracing records grant type and scope only, never credential parameters
//! - A rejected token request never clears a previously held access token
//!
//! ## Supported Flows
//!
//! - **Client credentials** - server-to-server, optionally on behalf of a user
//! - **Authorization code** - user grants access through the Canto login page
//! - **Refresh token** - exchange a refresh token for a new access token
//!
//! ## Example
//!
//! ```rust,ignore
//! use canto_saas_auth::{Authorize, Scope};
//! use canto_saas_client::{CantoClient, ClientOptions};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), canto_saas_auth::Error> {
//!     let client = CantoClient::new(ClientOptions::from_env()?)?;
//!
//!     let token = client
//!         .authorize_with_client_credentials(Some("user@example.com"), Scope::Admin)
//!         .await?;
//!     println!("token expires in {}s", token.expires_in);
//!
//!     Ok(())
//! }
//! ```

mod oauth;

pub use canto_saas_client::{Error, ErrorKind, Result};
pub use oauth::{
    Authorize, GrantType, OAuth2, OAuth2Request, OAuth2Response, Scope, AUTHORIZE_PATH,
    TOKEN_PATH,
};
