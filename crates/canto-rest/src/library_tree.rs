//! Folder and album tree types.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use canto_saas_client::{ApiRequest, HttpMethod};

use crate::types::{non_empty, push_param, SortDirection};

/// Fetch the folder tree, from the root or below a folder.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GetTreeRequest {
    pub folder_id: Option<String>,
    pub sort_by: Option<String>,
    pub sort_direction: Option<SortDirection>,
    /// Depth to descend. The server default returns the whole tree.
    pub layer: Option<u32>,
}

impl GetTreeRequest {
    /// Tree from the library root.
    pub fn new() -> Self {
        Self::default()
    }

    /// Tree below a folder.
    pub fn for_folder(folder_id: impl Into<String>) -> Self {
        Self {
            folder_id: Some(folder_id.into()),
            ..Default::default()
        }
    }

    pub fn with_sort(mut self, sort_by: impl Into<String>, direction: SortDirection) -> Self {
        self.sort_by = Some(sort_by.into());
        self.sort_direction = Some(direction);
        self
    }

    pub fn with_layer(mut self, layer: u32) -> Self {
        self.layer = Some(layer);
        self
    }
}

impl ApiRequest for GetTreeRequest {
    fn method(&self) -> HttpMethod {
        HttpMethod::Get
    }

    fn api_path(&self) -> &str {
        "tree"
    }

    fn path_variables(&self) -> Option<Vec<String>> {
        self.folder_id.as_ref().map(|id| vec![id.clone()])
    }

    fn query_params(&self) -> Option<Vec<(String, String)>> {
        let mut params = Vec::new();
        push_param(&mut params, "sortBy", self.sort_by.as_deref());
        push_param(
            &mut params,
            "sortDirection",
            self.sort_direction.map(|d| d.as_str()),
        );
        push_param(&mut params, "layer", self.layer);
        non_empty(params)
    }
}

/// A folder or album in the tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TreeNode {
    pub id: String,
    #[serde(default)]
    pub name: String,
    /// `"folder"` or `"album"`.
    #[serde(default)]
    pub scheme: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name_path: Option<String>,
    #[serde(default)]
    pub children: Vec<TreeNode>,
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

impl TreeNode {
    pub fn is_album(&self) -> bool {
        self.scheme == "album"
    }
}

/// Tree listing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetTreeResponse {
    #[serde(default)]
    pub results: Vec<TreeNode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_direction: Option<String>,
}

impl GetTreeResponse {
    /// All albums in the tree, depth first.
    pub fn albums(&self) -> Vec<&TreeNode> {
        fn walk<'a>(nodes: &'a [TreeNode], out: &mut Vec<&'a TreeNode>) {
            for node in nodes {
                if node.is_album() {
                    out.push(node);
                }
                walk(&node.children, out);
            }
        }
        let mut albums = Vec::new();
        walk(&self.results, &mut albums);
        albums
    }
}

/// List the items in an album, one page at a time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListAlbumContentRequest {
    album_id: String,
    pub limit: Option<u32>,
    pub start: Option<u32>,
    pub sort_by: Option<String>,
    pub sort_direction: Option<SortDirection>,
}

impl ListAlbumContentRequest {
    pub fn new(album_id: impl Into<String>) -> Self {
        Self {
            album_id: album_id.into(),
            limit: None,
            start: None,
            sort_by: None,
            sort_direction: None,
        }
    }

    pub fn album_id(&self) -> &str {
        &self.album_id
    }

    pub fn with_paging(mut self, start: u32, limit: u32) -> Self {
        self.start = Some(start);
        self.limit = Some(limit);
        self
    }

    pub fn with_sort(mut self, sort_by: impl Into<String>, direction: SortDirection) -> Self {
        self.sort_by = Some(sort_by.into());
        self.sort_direction = Some(direction);
        self
    }
}

impl ApiRequest for ListAlbumContentRequest {
    fn method(&self) -> HttpMethod {
        HttpMethod::Get
    }

    fn api_path(&self) -> &str {
        "album"
    }

    fn path_variables(&self) -> Option<Vec<String>> {
        Some(vec![self.album_id.clone()])
    }

    fn query_params(&self) -> Option<Vec<(String, String)>> {
        let mut params = Vec::new();
        push_param(&mut params, "limit", self.limit);
        push_param(&mut params, "start", self.start);
        push_param(&mut params, "sortBy", self.sort_by.as_deref());
        push_param(
            &mut params,
            "sortDirection",
            self.sort_direction.map(|d| d.as_str()),
        );
        non_empty(params)
    }
}
