//! # canto-rest
//!
//! Canto SaaS REST endpoints.
//!
//! ## Features
//!
//! - **Asset** - Batch property updates, content details, library search
//! - **LibraryTree** - Folder tree and album listings
//! - **Upload** - Signed upload settings and upload status
//!
//! Every call follows the same shape: build a request model, dispatch it
//! through the shared `CantoClient`, decode the result.
//!
//! ## Example
//!
//! ```rust,ignore
//! use canto_saas_auth::Scope;
//! use canto_saas_client::ClientOptions;
//! use canto_saas_rest::{BatchUpdatePropertiesRequest, CantoRestClient, ContentScheme};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), canto_saas_rest::Error> {
//!     let client = CantoRestClient::new(ClientOptions::from_env()?)?;
//!     client.authorize(None, Scope::Admin).await?;
//!
//!     let request = BatchUpdatePropertiesRequest::new()
//!         .add_content("abc123", ContentScheme::Image)
//!         .add_property("copyright", "ACME Corp", "replace", false);
//!     client.asset().batch_update_properties(&request).await?;
//!
//!     Ok(())
//! }
//! ```

pub mod asset;
mod client;
pub mod library_tree;
mod types;
pub mod upload;

pub use canto_saas_client::{Error, ErrorKind, Result};

// Main client and facades
pub use client::{Asset, CantoRestClient, LibraryTree, Upload};

// Request models and responses
pub use asset::{
    BatchContent, BatchProperty, BatchUpdatePropertiesRequest, ContentDetails,
    GetContentDetailsRequest, SearchRequest, SearchResponse,
};
pub use library_tree::{GetTreeRequest, GetTreeResponse, ListAlbumContentRequest, TreeNode};
pub use types::{ContentScheme, SortDirection};
pub use upload::{
    GetUploadSettingRequest, QueryUploadStatusRequest, UploadSetting, UploadStatus,
    UploadStatusResponse,
};
