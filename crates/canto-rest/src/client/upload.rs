use tracing::instrument;

use canto_saas_client::{CantoClient, Result};

use crate::upload::{
    GetUploadSettingRequest, QueryUploadStatusRequest, UploadSetting, UploadStatusResponse,
};

/// Upload endpoints.
#[derive(Debug, Clone, Copy)]
pub struct Upload<'a> {
    client: &'a CantoClient,
}

impl<'a> Upload<'a> {
    pub fn new(client: &'a CantoClient) -> Self {
        Self { client }
    }

    /// Signed form for a direct upload.
    #[instrument(skip(self, request))]
    pub async fn get_upload_setting(
        &self,
        request: &GetUploadSettingRequest,
    ) -> Result<UploadSetting> {
        self.client.send_json(request).await
    }

    /// Recent uploads and their processing state.
    #[instrument(skip(self, request), fields(hours = request.hours))]
    pub async fn query_upload_status(
        &self,
        request: &QueryUploadStatusRequest,
    ) -> Result<UploadStatusResponse> {
        self.client.send_json(request).await
    }
}
