use tracing::instrument;

use canto_saas_client::{CantoClient, Response, Result};

use crate::asset::{
    BatchUpdatePropertiesRequest, ContentDetails, GetContentDetailsRequest, SearchRequest,
    SearchResponse,
};

/// Asset endpoints.
#[derive(Debug, Clone, Copy)]
pub struct Asset<'a> {
    client: &'a CantoClient,
}

impl<'a> Asset<'a> {
    pub fn new(client: &'a CantoClient) -> Self {
        Self { client }
    }

    /// Apply property changes to every listed item.
    ///
    /// Returns the raw 2xx response; the server answers with a plain status
    /// text rather than JSON.
    #[instrument(
        skip(self, request),
        fields(contents = request.contents.len(), properties = request.properties.len())
    )]
    pub async fn batch_update_properties(
        &self,
        request: &BatchUpdatePropertiesRequest,
    ) -> Result<Response> {
        self.client.send(request).await
    }

    /// Metadata of a single item.
    #[instrument(skip(self, request), fields(id = request.content_id(), scheme = %request.scheme()))]
    pub async fn get_content_details(
        &self,
        request: &GetContentDetailsRequest,
    ) -> Result<ContentDetails> {
        self.client.send_json(request).await
    }

    /// Search the library.
    #[instrument(skip(self, request))]
    pub async fn search(&self, request: &SearchRequest) -> Result<SearchResponse> {
        self.client.send_json(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use canto_saas_client::testing::MockTransport;
    use canto_saas_client::{ErrorKind, HttpMethod, TransportError};

    use crate::types::ContentScheme;

    fn client(mock: &Arc<MockTransport>) -> CantoClient {
        let client = CantoClient::new(mock.client_options().build()).unwrap();
        client.set_access_token("token-1234");
        client
    }

    fn batch_request() -> BatchUpdatePropertiesRequest {
        BatchUpdatePropertiesRequest::new()
    }

    #[tokio::test]
    async fn test_batch_update_properties_success() {
        let mock = Arc::new(MockTransport::new());
        mock.respond_with(Response::new(200, "success"));
        let client = client(&mock);

        let response = Asset::new(&client)
            .batch_update_properties(&batch_request())
            .await
            .unwrap();

        assert_eq!(response.text().unwrap(), "success");

        let sent = mock.last_request().unwrap();
        assert_eq!(sent.method, HttpMethod::Put);
        assert_eq!(sent.url.as_str(), "https://test.canto.com/api/v1/batch/edit");
        assert_eq!(sent.header("Authorization"), Some("Bearer token-1234"));
        assert_eq!(sent.header("Content-Type"), Some("application/json"));
        assert_eq!(sent.body_text(), Some(r#"{"contents":[],"properties":[]}"#));
    }

    #[tokio::test]
    async fn test_batch_update_properties_not_authorized() {
        let mock = Arc::new(MockTransport::new());
        mock.fail_with(TransportError::with_response(
            "Error Communicating with Server",
            Response::new(401, ""),
        ));
        let client = client(&mock);

        let err = Asset::new(&client)
            .batch_update_properties(&batch_request())
            .await
            .unwrap_err();

        assert!(matches!(err.kind, ErrorKind::NotAuthorized(_)));
        assert_eq!(err.numeric_code(), Some(1626717511));
    }

    #[tokio::test]
    async fn test_batch_update_properties_unexpected_status() {
        let mock = Arc::new(MockTransport::new());
        mock.fail_with(TransportError::with_response(
            "Error Communicating with Server",
            Response::new(400, "success"),
        ));
        let client = client(&mock);

        let err = Asset::new(&client)
            .batch_update_properties(&batch_request())
            .await
            .unwrap_err();

        assert_eq!(err.numeric_code(), Some(1627649307));
        match err.kind {
            ErrorKind::UnexpectedHttpStatus { status, ref body } => {
                assert_eq!(status, 400);
                assert_eq!(body, "success");
            }
            ref other => panic!("unexpected error kind: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_get_content_details() {
        let mock = Arc::new(MockTransport::new());
        mock.respond_with(Response::new(
            200,
            r#"{"id":"abc123","scheme":"image","name":"logo.png","owner":"u1"}"#,
        ));
        let client = client(&mock);

        let details = Asset::new(&client)
            .get_content_details(&GetContentDetailsRequest::new("abc123", ContentScheme::Image))
            .await
            .unwrap();

        assert_eq!(details.id, "abc123");
        assert_eq!(details.owner.as_deref(), Some("u1"));
        assert_eq!(
            mock.last_request().unwrap().url.path(),
            "/api/v1/image/abc123"
        );
    }

    #[tokio::test]
    async fn test_search_invalid_json() {
        let mock = Arc::new(MockTransport::new());
        mock.respond_with(Response::new(200, "not json"));
        let client = client(&mock);

        let err = Asset::new(&client)
            .search(&SearchRequest::new("logo"))
            .await
            .unwrap_err();

        assert!(matches!(err.kind, ErrorKind::InvalidResponse(_)));
    }
}
