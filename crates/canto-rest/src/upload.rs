//! Upload setting and status types.
//!
//! The upload itself is a form post straight to the storage URL returned by
//! [`GetUploadSettingRequest`]; this crate only talks to the Canto API.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use canto_saas_client::{ApiRequest, HttpMethod};

use crate::types::{non_empty, push_param};

/// Fetch the signed form fields for a direct upload.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GetUploadSettingRequest {
    pub file_name: Option<String>,
}

impl GetUploadSettingRequest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Name the file up front so the returned key matches it.
    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = Some(file_name.into());
        self
    }
}

impl ApiRequest for GetUploadSettingRequest {
    fn method(&self) -> HttpMethod {
        HttpMethod::Get
    }

    fn api_path(&self) -> &str {
        "upload/setting"
    }

    fn query_params(&self) -> Option<Vec<(String, String)>> {
        let mut params = Vec::new();
        push_param(&mut params, "fileName", self.file_name.as_deref());
        non_empty(params)
    }
}

/// Signed upload form.
///
/// `extra` holds the remaining form fields (e.g. `x-amz-meta-*`), which must
/// be posted unchanged.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadSetting {
    pub url: String,
    #[serde(default)]
    pub key: String,
    #[serde(default)]
    pub acl: String,
    #[serde(rename = "AWSAccessKeyId", default)]
    pub aws_access_key_id: String,
    #[serde(rename = "Policy", default)]
    pub policy: String,
    #[serde(rename = "Signature", default)]
    pub signature: String,
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

impl std::fmt::Debug for UploadSetting {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UploadSetting")
            .field("url", &self.url)
            .field("key", &self.key)
            .field("acl", &self.acl)
            .field("aws_access_key_id", &self.aws_access_key_id)
            .field("policy", &"[REDACTED]")
            .field("signature", &"[REDACTED]")
            .finish_non_exhaustive()
    }
}

/// List recent uploads and their processing state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryUploadStatusRequest {
    /// Look back this many hours.
    pub hours: Option<u32>,
}

impl QueryUploadStatusRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_hours(mut self, hours: u32) -> Self {
        self.hours = Some(hours);
        self
    }
}

impl ApiRequest for QueryUploadStatusRequest {
    fn method(&self) -> HttpMethod {
        HttpMethod::Get
    }

    fn api_path(&self) -> &str {
        "upload/status"
    }

    fn query_params(&self) -> Option<Vec<(String, String)>> {
        let mut params = Vec::new();
        push_param(&mut params, "hours", self.hours);
        non_empty(params)
    }
}

/// State of one upload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadStatus {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    /// e.g. `"Done"`, `"Processing"` or `"Failed"`.
    #[serde(default)]
    pub status: String,
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

impl UploadStatus {
    pub fn is_done(&self) -> bool {
        self.status.eq_ignore_ascii_case("done")
    }
}

/// Upload status listing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UploadStatusResponse {
    #[serde(default)]
    pub results: Vec<UploadStatus>,
}
