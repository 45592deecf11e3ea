use tracing::instrument;

use canto_saas_client::{CantoClient, Result};

use crate::asset::SearchResponse;
use crate::library_tree::{GetTreeRequest, GetTreeResponse, ListAlbumContentRequest};

/// Folder and album endpoints.
#[derive(Debug, Clone, Copy)]
pub struct LibraryTree<'a> {
    client: &'a CantoClient,
}

impl<'a> LibraryTree<'a> {
    pub fn new(client: &'a CantoClient) -> Self {
        Self { client }
    }

    /// Folder tree from the root or below `request.folder_id`.
    #[instrument(skip(self, request), fields(folder_id = request.folder_id.as_deref()))]
    pub async fn get_tree(&self, request: &GetTreeRequest) -> Result<GetTreeResponse> {
        self.client.send_json(request).await
    }

    /// One page of an album's items.
    #[instrument(skip(self, request), fields(album_id = request.album_id()))]
    pub async fn list_album_content(
        &self,
        request: &ListAlbumContentRequest,
    ) -> Result<SearchResponse> {
        self.client.send_json(request).await
    }
}
