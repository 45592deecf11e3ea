//! Media-delivery (MDC) rendition URLs.
//!
//! MDC URLs are public and deterministic, so building them needs neither
//! network access nor a token.

use crate::config::ClientOptions;

/// Scheme used when none is given.
pub const DEFAULT_MDC_SCHEME: &str = "image";

/// Builds rendition URLs of the form
/// `https://{mdc_domain}/rendition/{mdc_account_id}/{scheme}_{asset_id}/`.
#[derive(Debug, Clone, Copy)]
pub struct MdcUrlHelper<'a> {
    options: &'a ClientOptions,
}

impl<'a> MdcUrlHelper<'a> {
    /// Create a helper reading domain and account from the options.
    pub fn new(options: &'a ClientOptions) -> Self {
        Self { options }
    }

    /// Rendition URL for an asset. An empty asset id yields the rendition root.
    pub fn url(&self, asset_id: &str, scheme: &str) -> String {
        let path = if asset_id.is_empty() {
            String::new()
        } else {
            format!("{}_{}/", scheme, asset_id)
        };
        format!("{}{}", self.root_url(), path)
    }

    /// Rendition URL for an image asset.
    pub fn image_url(&self, asset_id: &str) -> String {
        self.url(asset_id, DEFAULT_MDC_SCHEME)
    }

    /// Rendition root for the configured account.
    pub fn root_url(&self) -> String {
        format!(
            "https://{}/rendition/{}/",
            self.options.mdc_domain_name(),
            self.options.mdc_aws_account_id()
        )
    }
}
