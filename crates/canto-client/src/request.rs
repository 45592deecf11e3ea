//! Request models and request building.
//!
//! Every endpoint call is described by a value implementing [`ApiRequest`]:
//! its method, API path, positional path variables, query parameters and
//! optional JSON body. [`build_request`] turns one into an [`HttpRequest`]
//! without doing any I/O.

use serde::Serialize;
use url::Url;

use crate::config::ClientOptions;
use crate::error::{Error, ErrorKind, Result};
use crate::transport::{HttpRequest, RequestFactory};

/// HTTP request method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl HttpMethod {
    /// Upper-case method name.
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
        }
    }

    /// Convert to reqwest::Method.
    #[cfg(feature = "reqwest")]
    pub fn to_reqwest(&self) -> reqwest::Method {
        match self {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Patch => reqwest::Method::PATCH,
            HttpMethod::Delete => reqwest::Method::DELETE,
        }
    }
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A typed description of one API call.
///
/// Implementors are immutable values created per call.
pub trait ApiRequest: Send + Sync {
    /// HTTP method, fixed per request type.
    fn method(&self) -> HttpMethod;

    /// Path below the API root, e.g. `batch/edit`.
    fn api_path(&self) -> &str;

    /// Positional path segments appended after the API path, in order.
    fn path_variables(&self) -> Option<Vec<String>> {
        None
    }

    /// Query parameters in the order they should be encoded. Keys are unique.
    fn query_params(&self) -> Option<Vec<(String, String)>> {
        None
    }

    /// Whether the request carries a JSON body.
    fn has_body(&self) -> bool {
        false
    }

    /// Serialized JSON body. Only called when [`has_body`](Self::has_body)
    /// returns true.
    fn body(&self) -> Result<String> {
        Err(Error::new(ErrorKind::InvalidRequest(
            "request type does not serialize a body".to_string(),
        )))
    }

    /// URL the path variables and query string are appended to.
    ///
    /// Defaults to the tenant API root joined with [`api_path`](Self::api_path).
    fn base_url(&self, options: &ClientOptions) -> Result<String> {
        options.api_url(self.api_path())
    }
}

/// Serialize a body value to JSON, mapping failures to `InvalidRequest`.
pub fn json_body<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    serde_json::to_string(value).map_err(|e| {
        Error::with_source(
            ErrorKind::InvalidRequest("Can not generate json http body.".to_string()),
            e,
        )
    })
}

/// Resolve the full URL of a request.
pub fn build_url<R: ApiRequest + ?Sized>(request: &R, options: &ClientOptions) -> Result<Url> {
    let mut url = request.base_url(options)?;

    if let Some(variables) = request.path_variables() {
        let trimmed_len = url.trim_end_matches('/').len();
        url.truncate(trimmed_len);
        for variable in &variables {
            url.push('/');
            url.push_str(&urlencoding::encode(variable));
        }
    }

    if let Some(params) = request.query_params() {
        if !params.is_empty() {
            url.push('?');
            url.push_str(&serde_urlencoded::to_string(&params)?);
        }
    }

    Ok(Url::parse(&url)?)
}

/// Assemble the HTTP request for an [`ApiRequest`].
///
/// `extra_headers` are applied in order. A request with a body always gets
/// `Content-Type: application/json`.
pub fn build_request<R: ApiRequest + ?Sized>(
    request: &R,
    options: &ClientOptions,
    factory: &dyn RequestFactory,
    extra_headers: &[(String, String)],
) -> Result<HttpRequest> {
    let url = build_url(request, options)?;
    let mut http_request = factory.create_request(request.method(), url);

    for (name, value) in extra_headers {
        http_request = http_request.with_header(name.as_str(), value.as_str());
    }

    if request.has_body() {
        let body = request.body()?;
        http_request = http_request
            .with_header("Content-Type", "application/json")
            .with_body(body);
    }

    for (name, value) in &http_request.headers {
        validate_header(name, value)?;
    }

    Ok(http_request)
}

/// Reject header names outside the RFC 9110 token set and values holding
/// control characters. The value is never echoed, it may be a token.
fn validate_header(name: &str, value: &str) -> Result<()> {
    let valid_name = !name.is_empty()
        && name
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b"!#$%&'*+-.^_`|~".contains(&b));
    if !valid_name {
        return Err(Error::new(ErrorKind::InvalidRequest(format!(
            "invalid header name {:?}",
            name
        ))));
    }

    let valid_value = value
        .bytes()
        .all(|b| b == b'\t' || (b >= 0x20 && b != 0x7f));
    if !valid_value {
        return Err(Error::new(ErrorKind::InvalidRequest(format!(
            "header {} contains a control character",
            name
        ))));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::DefaultRequestFactory;
    use std::collections::HashMap;

    struct StubRequest {
        method: HttpMethod,
        path: &'static str,
        variables: Option<Vec<String>>,
        params: Option<Vec<(String, String)>>,
        body: Option<serde_json::Value>,
    }

    impl StubRequest {
        fn get(path: &'static str) -> Self {
            Self {
                method: HttpMethod::Get,
                path,
                variables: None,
                params: None,
                body: None,
            }
        }
    }

    impl ApiRequest for StubRequest {
        fn method(&self) -> HttpMethod {
            self.method
        }

        fn api_path(&self) -> &str {
            self.path
        }

        fn path_variables(&self) -> Option<Vec<String>> {
            self.variables.clone()
        }

        fn query_params(&self) -> Option<Vec<(String, String)>> {
            self.params.clone()
        }

        fn has_body(&self) -> bool {
            self.body.is_some()
        }

        fn body(&self) -> Result<String> {
            json_body(&self.body)
        }
    }

    fn options() -> ClientOptions {
        ClientOptions::builder().with_canto_name("acme").build()
    }

    fn pairs(values: &[(&str, &str)]) -> Vec<(String, String)> {
        values
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_plain_path() {
        let url = build_url(&StubRequest::get("search"), &options()).unwrap();
        assert_eq!(url.as_str(), "https://acme.canto.com/api/v1/search");
    }

    #[test]
    fn test_path_variables_keep_order_without_double_slash() {
        let mut stub = StubRequest::get("");
        stub.variables = Some(vec!["image".to_string(), "abc123".to_string()]);

        let url = build_url(&stub, &options()).unwrap();
        assert_eq!(url.as_str(), "https://acme.canto.com/api/v1/image/abc123");

        let mut stub = StubRequest::get("tree/");
        stub.variables = Some(vec!["F1".to_string(), "F2".to_string(), "F3".to_string()]);

        let url = build_url(&stub, &options()).unwrap();
        assert!(url.as_str().ends_with("/api/v1/tree/F1/F2/F3"));
        assert!(!url.path().contains("//"));
    }

    #[test]
    fn test_path_variables_are_single_segments() {
        let mut stub = StubRequest::get("album");
        stub.variables = Some(vec!["a/b c".to_string()]);

        let url = build_url(&stub, &options()).unwrap();
        assert_eq!(url.path(), "/api/v1/album/a%2Fb%20c");
    }

    #[test]
    fn test_query_params_round_trip() {
        let params = pairs(&[
            ("keyword", "red car"),
            ("scheme", "image"),
            ("tags", "a&b=c"),
            ("limit", "100"),
        ]);
        let mut stub = StubRequest::get("search");
        stub.params = Some(params.clone());

        let url = build_url(&stub, &options()).unwrap();
        assert_eq!(
            url.query(),
            Some("keyword=red+car&scheme=image&tags=a%26b%3Dc&limit=100")
        );

        let decoded: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert_eq!(decoded, params);

        let as_map: HashMap<String, String> = decoded.into_iter().collect();
        assert_eq!(as_map.get("keyword").map(String::as_str), Some("red car"));
    }

    #[test]
    fn test_empty_query_params_add_nothing() {
        let mut stub = StubRequest::get("search");
        stub.params = Some(Vec::new());

        let url = build_url(&stub, &options()).unwrap();
        assert_eq!(url.query(), None);
        assert!(!url.as_str().ends_with('?'));
    }

    #[test]
    fn test_missing_tenant_is_invalid_request() {
        let err = build_url(&StubRequest::get("search"), &ClientOptions::default()).unwrap_err();
        assert!(matches!(err.kind, ErrorKind::InvalidRequest(_)));
    }

    #[test]
    fn test_unparsable_url_is_invalid_request() {
        let options = ClientOptions::builder()
            .with_canto_name("acme")
            .with_canto_domain("bad domain")
            .build();
        let err = build_url(&StubRequest::get("search"), &options).unwrap_err();
        assert!(matches!(err.kind, ErrorKind::InvalidRequest(_)));
    }

    #[test]
    fn test_body_sets_content_type() {
        let mut stub = StubRequest::get("batch/edit");
        stub.method = HttpMethod::Put;
        stub.body = Some(serde_json::json!({"contents": [], "properties": []}));

        let request = build_request(&stub, &options(), &DefaultRequestFactory, &[]).unwrap();

        assert_eq!(request.method, HttpMethod::Put);
        assert_eq!(request.header("Content-Type"), Some("application/json"));

        let body: serde_json::Value = serde_json::from_str(request.body_text().unwrap()).unwrap();
        assert_eq!(body, serde_json::json!({"contents": [], "properties": []}));
    }

    #[test]
    fn test_body_content_type_overrides_extra_header() {
        let mut stub = StubRequest::get("batch/edit");
        stub.body = Some(serde_json::json!({}));
        let headers = pairs(&[("content-type", "text/plain"), ("X-Trace", "1")]);

        let request = build_request(&stub, &options(), &DefaultRequestFactory, &headers).unwrap();

        assert_eq!(request.header("Content-Type"), Some("application/json"));
        assert_eq!(request.header("X-Trace"), Some("1"));
    }

    #[test]
    fn test_no_body_no_content_type() {
        let headers = pairs(&[("Authorization", "Bearer t")]);
        let request =
            build_request(&StubRequest::get("search"), &options(), &DefaultRequestFactory, &headers)
                .unwrap();

        assert!(request.body.is_none());
        assert!(request.header("Content-Type").is_none());
        assert_eq!(request.header("Authorization"), Some("Bearer t"));
    }

    #[test]
    fn test_default_body_is_invalid_request() {
        struct NoBody;

        impl ApiRequest for NoBody {
            fn method(&self) -> HttpMethod {
                HttpMethod::Post
            }

            fn api_path(&self) -> &str {
                "upload"
            }

            fn has_body(&self) -> bool {
                true
            }
        }

        let err = build_request(&NoBody, &options(), &DefaultRequestFactory, &[]).unwrap_err();
        assert_eq!(err.numeric_code(), Some(1626885024));
    }

    #[test]
    fn test_json_body_failure_is_invalid_request() {
        let mut map = HashMap::new();
        map.insert(vec![1u8], "non-string key");

        let err = json_body(&map).unwrap_err();
        assert!(matches!(err.kind, ErrorKind::InvalidRequest(_)));
        assert!(err.source.is_some());
    }

    #[test]
    fn test_control_character_in_header_is_invalid_request() {
        let headers = pairs(&[("Authorization", "Bearer abc\ndef")]);
        let err = build_request(
            &StubRequest::get("search"),
            &options(),
            &DefaultRequestFactory,
            &headers,
        )
        .unwrap_err();

        assert!(matches!(err.kind, ErrorKind::InvalidRequest(_)));
        assert!(!err.to_string().contains("abc"));
    }

    #[test]
    fn test_invalid_header_name_is_invalid_request() {
        let headers = pairs(&[("X Trace", "1")]);
        let err = build_request(
            &StubRequest::get("search"),
            &options(),
            &DefaultRequestFactory,
            &headers,
        )
        .unwrap_err();
        assert!(matches!(err.kind, ErrorKind::InvalidRequest(_)));
    }

    #[test]
    fn test_tab_and_non_ascii_header_values_pass() {
        let headers = pairs(&[("X-Note", "a\tb"), ("X-Name", "Jürgen")]);
        let request = build_request(
            &StubRequest::get("search"),
            &options(),
            &DefaultRequestFactory,
            &headers,
        )
        .unwrap();
        assert_eq!(request.header("X-Note"), Some("a\tb"));
    }
}
