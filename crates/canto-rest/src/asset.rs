//! Asset request models and response types.
//!
//! - Batch property updates (`PUT batch/edit`)
//! - Content details (`GET {scheme}/{id}`)
//! - Library search (`GET search`)

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use canto_saas_client::{json_body, ApiRequest, HttpMethod, Result};

use crate::types::{non_empty, push_param, ContentScheme, SortDirection};

// =========================================================================
// Batch property update
// =========================================================================

/// One item targeted by a batch update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchContent {
    pub id: String,
    pub scheme: ContentScheme,
}

/// One property change applied to every targeted item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchProperty {
    pub property_id: String,
    pub property_value: String,
    /// Edit action understood by the server, e.g. `"replace"`.
    pub action: String,
    /// Whether `property_id` names a custom field.
    pub custom_field: bool,
}

/// Set the same properties on many items in one call.
///
/// # Example
///
/// ```rust,ignore
/// let request = BatchUpdatePropertiesRequest::new()
///     .add_content("abc123", ContentScheme::Image)
///     .add_property("copyright", "ACME", "replace", false);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchUpdatePropertiesRequest {
    pub contents: Vec<BatchContent>,
    pub properties: Vec<BatchProperty>,
}

impl BatchUpdatePropertiesRequest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Target an item.
    pub fn add_content(mut self, id: impl Into<String>, scheme: ContentScheme) -> Self {
        self.contents.push(BatchContent {
            id: id.into(),
            scheme,
        });
        self
    }

    /// Add a property change.
    pub fn add_property(
        mut self,
        property_id: impl Into<String>,
        property_value: impl Into<String>,
        action: impl Into<String>,
        custom_field: bool,
    ) -> Self {
        self.properties.push(BatchProperty {
            property_id: property_id.into(),
            property_value: property_value.into(),
            action: action.into(),
            custom_field,
        });
        self
    }
}

impl ApiRequest for BatchUpdatePropertiesRequest {
    fn method(&self) -> HttpMethod {
        HttpMethod::Put
    }

    fn api_path(&self) -> &str {
        "batch/edit"
    }

    fn has_body(&self) -> bool {
        true
    }

    fn body(&self) -> Result<String> {
        json_body(self)
    }
}

// =========================================================================
// Content details
// =========================================================================

/// Fetch the metadata of a single item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetContentDetailsRequest {
    content_id: String,
    scheme: ContentScheme,
}

impl GetContentDetailsRequest {
    pub fn new(content_id: impl Into<String>, scheme: ContentScheme) -> Self {
        Self {
            content_id: content_id.into(),
            scheme,
        }
    }

    pub fn content_id(&self) -> &str {
        &self.content_id
    }

    pub fn scheme(&self) -> ContentScheme {
        self.scheme
    }
}

impl ApiRequest for GetContentDetailsRequest {
    fn method(&self) -> HttpMethod {
        HttpMethod::Get
    }

    // The scheme and id form the whole path below the API root.
    fn api_path(&self) -> &str {
        ""
    }

    fn path_variables(&self) -> Option<Vec<String>> {
        Some(vec![self.scheme.as_str().to_string(), self.content_id.clone()])
    }
}

/// Metadata of a library item.
///
/// Only the common fields are typed; everything else the server returns is
/// kept in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentDetails {
    pub id: String,
    pub scheme: ContentScheme,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub approval_status: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tag: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub keyword: Vec<String>,
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

// =========================================================================
// Search
// =========================================================================

/// Search the library. Only parameters that are set are sent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchRequest {
    pub keyword: Option<String>,
    /// Restrict to these schemes, sent `|`-separated.
    pub schemes: Vec<ContentScheme>,
    pub tags: Option<String>,
    pub keywords: Option<String>,
    pub approval: Option<String>,
    pub owner: Option<String>,
    pub limit: Option<u32>,
    pub start: Option<u32>,
    pub sort_by: Option<String>,
    pub sort_direction: Option<SortDirection>,
    pub exact_search: Option<bool>,
}

impl SearchRequest {
    /// Full-text search for a keyword.
    pub fn new(keyword: impl Into<String>) -> Self {
        Self {
            keyword: Some(keyword.into()),
            ..Default::default()
        }
    }

    pub fn with_scheme(mut self, scheme: ContentScheme) -> Self {
        self.schemes.push(scheme);
        self
    }

    pub fn with_tags(mut self, tags: impl Into<String>) -> Self {
        self.tags = Some(tags.into());
        self
    }

    pub fn with_keywords(mut self, keywords: impl Into<String>) -> Self {
        self.keywords = Some(keywords.into());
        self
    }

    pub fn with_approval(mut self, approval: impl Into<String>) -> Self {
        self.approval = Some(approval.into());
        self
    }

    pub fn with_owner(mut self, owner: impl Into<String>) -> Self {
        self.owner = Some(owner.into());
        self
    }

    /// Page window.
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

    pub fn with_exact_search(mut self, exact: bool) -> Self {
        self.exact_search = Some(exact);
        self
    }
}

impl ApiRequest for SearchRequest {
    fn method(&self) -> HttpMethod {
        HttpMethod::Get
    }

    fn api_path(&self) -> &str {
        "search"
    }

    fn query_params(&self) -> Option<Vec<(String, String)>> {
        let mut params = Vec::new();
        push_param(&mut params, "keyword", self.keyword.as_deref());
        let schemes = self
            .schemes
            .iter()
            .map(ContentScheme::as_str)
            .collect::<Vec<_>>()
            .join("|");
        push_param(&mut params, "scheme", (!schemes.is_empty()).then_some(schemes));
        push_param(&mut params, "tags", self.tags.as_deref());
        push_param(&mut params, "keywords", self.keywords.as_deref());
        push_param(&mut params, "approval", self.approval.as_deref());
        push_param(&mut params, "owner", self.owner.as_deref());
        push_param(&mut params, "limit", self.limit);
        push_param(&mut params, "start", self.start);
        push_param(&mut params, "sortBy", self.sort_by.as_deref());
        push_param(
            &mut params,
            "sortDirection",
            self.sort_direction.map(|d| d.as_str()),
        );
        push_param(&mut params, "exactSearch", self.exact_search);
        non_empty(params)
    }
}

/// A page of search or album results.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    /// Total number of matches.
    #[serde(default)]
    pub found: u64,
    #[serde(default)]
    pub limit: u64,
    #[serde(default)]
    pub start: u64,
    #[serde(default)]
    pub results: Vec<ContentDetails>,
}

impl SearchResponse {
    /// Whether more results exist after this page.
    pub fn has_more(&self) -> bool {
        self.start.saturating_add(self.results.len() as u64) < self.found
    }
}
