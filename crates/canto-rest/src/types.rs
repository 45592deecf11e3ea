//! Shared value types for REST requests and responses.

use serde::{Deserialize, Serialize};

/// Content scheme of a library item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentScheme {
    Image,
    Video,
    Audio,
    Document,
    Presentation,
    Other,
}

impl ContentScheme {
    /// Wire value, also used as the MDC rendition scheme.
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentScheme::Image => "image",
            ContentScheme::Video => "video",
            ContentScheme::Audio => "audio",
            ContentScheme::Document => "document",
            ContentScheme::Presentation => "presentation",
            ContentScheme::Other => "other",
        }
    }
}

impl std::fmt::Display for ContentScheme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sort order for listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Ascending => "ascending",
            SortDirection::Descending => "descending",
        }
    }
}

/// Push `(key, value)` when the value is set.
pub(crate) fn push_param<V: ToString>(
    params: &mut Vec<(String, String)>,
    key: &str,
    value: Option<V>,
) {
    if let Some(value) = value {
        params.push((key.to_string(), value.to_string()));
    }
}

/// `None` when no parameter was set, so the URL gets no `?`.
pub(crate) fn non_empty(params: Vec<(String, String)>) -> Option<Vec<(String, String)>> {
    (!params.is_empty()).then_some(params)
}
