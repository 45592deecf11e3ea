//! End-to-end tests over real HTTP against a local mock server.

use std::time::Duration;

use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::common::{init_tracing, RedirectFactory};
use canto_saas_api::rest::{BatchUpdatePropertiesRequest, GetUploadSettingRequest};
use canto_saas_api::{CantoRestClient, ClientOptions, ContentScheme, ErrorKind, Scope};

async fn setup() -> (MockServer, CantoRestClient) {
    init_tracing();
    let server = MockServer::start().await;

    let options = ClientOptions::builder()
        .with_canto_name("test")
        .with_canto_domain("canto.com")
        .with_app_id("app-id")
        .with_app_secret("app-secret")
        .with_timeout(Duration::from_secs(5))
        .with_debug(true)
        .with_request_factory(RedirectFactory::new(&server.uri()))
        .build();
    let client = CantoRestClient::new(options).expect("client should build");

    (server, client)
}

fn token_response(token: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(serde_json::json!({
        "accessToken": token,
        "expiresIn": 3600,
        "tokenType": "Bearer",
        "refreshToken": "refresh"
    }))
}

#[tokio::test]
async fn test_authorize_then_batch_update() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/oauth/api/oauth2/token"))
        .and(header("X-Forwarded-Host", "oauth.canto.com"))
        .and(query_param("app_id", "app-id"))
        .and(query_param("app_secret", "app-secret"))
        .and(query_param("grant_type", "client_credentials"))
        .and(query_param("scope", "admin"))
        .respond_with(token_response("live-token"))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("PUT"))
        .and(path("/api/v1/batch/edit"))
        .and(header("X-Forwarded-Host", "test.canto.com"))
        .and(header("Authorization", "Bearer live-token"))
        .and(header("Content-Type", "application/json"))
        .and(body_json(serde_json::json!({
            "contents": [{"id": "abc123", "scheme": "image"}],
            "properties": [{
                "propertyId": "copyright",
                "propertyValue": "ACME",
                "action": "replace",
                "customField": false
            }]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_string("success"))
        .expect(1)
        .mount(&server)
        .await;

    let token = client.authorize(None, Scope::Admin).await.unwrap();
    assert_eq!(token.expires_in, 3600);

    let request = BatchUpdatePropertiesRequest::new()
        .add_content("abc123", ContentScheme::Image)
        .add_property("copyright", "ACME", "replace", false);
    let response = client.asset().batch_update_properties(&request).await.unwrap();
    assert_eq!(response.text().unwrap(), "success");
}

#[tokio::test]
async fn test_rejected_credentials() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/oauth/api/oauth2/token"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let err = client.authorize(None, Scope::Admin).await.unwrap_err();
    assert!(matches!(err.kind, ErrorKind::AuthorizationFailed(_)));
    assert!(!client.inner().is_authorized());
}

#[tokio::test]
async fn test_expired_token_and_server_error() {
    let (server, client) = setup().await;
    client.inner().set_access_token("stale");

    Mock::given(method("GET"))
        .and(path("/api/v1/upload/setting"))
        .and(query_param("fileName", "a.jpg"))
        .respond_with(ResponseTemplate::new(401))
        .up_to_n_times(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/v1/upload/setting"))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
        .mount(&server)
        .await;

    let request = GetUploadSettingRequest::new().with_file_name("a.jpg");

    let err = client.upload().get_upload_setting(&request).await.unwrap_err();
    assert!(matches!(err.kind, ErrorKind::NotAuthorized(_)));
    assert_eq!(err.numeric_code(), Some(1626717511));

    let err = client.upload().get_upload_setting(&request).await.unwrap_err();
    assert_eq!(err.status(), Some(503));
    match err.kind {
        ErrorKind::UnexpectedHttpStatus { ref body, .. } => assert_eq!(body, "maintenance"),
        ref other => panic!("unexpected error kind: {other:?}"),
    }
}

#[test]
fn test_mdc_urls_need_no_network() {
    let client = CantoRestClient::new(
        ClientOptions::builder()
            .with_canto_name("test")
            .with_mdc_domain_name("mdc.example.com")
            .with_mdc_aws_account_id("acct-1")
            .build(),
    )
    .unwrap();

    assert_eq!(
        client.mdc().url("abc123", ContentScheme::Video.as_str()),
        "https://mdc.example.com/rendition/acct-1/video_abc123/"
    );
    assert_eq!(
        client.mdc().url("", "image"),
        "https://mdc.example.com/rendition/acct-1/"
    );
}
