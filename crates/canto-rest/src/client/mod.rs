//! Canto REST client.
//!
//! Wraps `CantoClient` from `canto-client` and hands out one facade per
//! endpoint group. Facades borrow the client, so they are free to create.

use canto_saas_auth::{Authorize, OAuth2Response, Scope};
use canto_saas_client::{CantoClient, ClientOptions, MdcUrlHelper, Result};

mod asset;
mod library_tree;
mod upload;

pub use asset::Asset;
pub use library_tree::LibraryTree;
pub use upload::Upload;

/// Canto REST API client.
///
/// # Example
///
/// ```rust,ignore
/// use canto_saas_rest::{CantoRestClient, ContentScheme, GetContentDetailsRequest};
/// use canto_saas_auth::Scope;
///
/// let client = CantoRestClient::new(ClientOptions::from_env()?)?;
/// client.authorize(None, Scope::Admin).await?;
///
/// let details = client
///     .asset()
///     .get_content_details(&GetContentDetailsRequest::new("abc123", ContentScheme::Image))
///     .await?;
/// ```
#[derive(Debug, Clone)]
pub struct CantoRestClient {
    client: CantoClient,
}

impl CantoRestClient {
    /// Create a REST client from options.
    pub fn new(options: ClientOptions) -> Result<Self> {
        Ok(Self {
            client: CantoClient::new(options)?,
        })
    }

    /// Create a REST client from an existing CantoClient.
    pub fn from_client(client: CantoClient) -> Self {
        Self { client }
    }

    /// Get the underlying CantoClient.
    pub fn inner(&self) -> &CantoClient {
        &self.client
    }

    /// Run the client-credentials flow and keep the token for later calls.
    pub async fn authorize(&self, user_id: Option<&str>, scope: Scope) -> Result<OAuth2Response> {
        self.client
            .authorize_with_client_credentials(user_id, scope)
            .await
    }

    pub fn asset(&self) -> Asset<'_> {
        Asset::new(&self.client)
    }

    pub fn library_tree(&self) -> LibraryTree<'_> {
        LibraryTree::new(&self.client)
    }

    pub fn upload(&self) -> Upload<'_> {
        Upload::new(&self.client)
    }

    /// Media-delivery URL helper.
    pub fn mdc(&self) -> MdcUrlHelper<'_> {
        self.client.mdc()
    }
}

impl From<CantoClient> for CantoRestClient {
    fn from(client: CantoClient) -> Self {
        Self::from_client(client)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use canto_saas_client::testing::MockTransport;
    use canto_saas_client::Response;

    use crate::asset::BatchUpdatePropertiesRequest;
    use crate::types::ContentScheme;

    #[tokio::test]
    async fn test_authorize_then_call_sends_bearer() {
        let mock = Arc::new(MockTransport::new());
        mock.respond_with(Response::new(
            200,
            r#"{"accessToken":"X","expiresIn":3600,"tokenType":"Bearer","refreshToken":""}"#,
        ))
        .respond_with(Response::new(200, "success"));
        let client = CantoRestClient::new(mock.client_options().build()).unwrap();

        client.authorize(None, Scope::Admin).await.unwrap();
        client
            .asset()
            .batch_update_properties(
                &BatchUpdatePropertiesRequest::new().add_content("1", ContentScheme::Image),
            )
            .await
            .unwrap();

        let requests = mock.requests();
        assert_eq!(requests.len(), 2);
        assert!(requests[0].header("Authorization").is_none());
        assert_eq!(requests[1].header("Authorization"), Some("Bearer X"));
    }

    #[test]
    fn test_clones_share_token() {
        let mock = Arc::new(MockTransport::new());
        let client = CantoRestClient::new(mock.client_options().build()).unwrap();
        let copy = client.clone();

        client.inner().set_access_token("shared");
        assert_eq!(copy.inner().access_token().as_deref(), Some("shared"));
    }

    #[test]
    fn test_mdc_passthrough() {
        let mock = Arc::new(MockTransport::new());
        let client = CantoRestClient::new(
            mock.client_options()
                .with_mdc_domain_name("mdc.example.com")
                .with_mdc_aws_account_id("acct")
                .build(),
        )
        .unwrap();

        assert_eq!(
            client.mdc().url("42", ContentScheme::Image.as_str()),
            "https://mdc.example.com/rendition/acct/image_42/"
        );
    }
}
