use std::sync::{Arc, Once};

use canto_saas_api::client::{HttpMethod, HttpRequest, RequestFactory};
use canto_saas_api::{CantoRestClient, ClientOptions, Scope};
use url::Url;

static TRACING: Once = Once::new();

/// Install a test subscriber once. Respects `RUST_LOG`.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// Get an authorized client for live tests.
///
/// **IMPORTANT**: live tests MUST run against a real Canto tenant. This
/// panics with a helpful message when the environment is incomplete instead
/// of silently skipping.
pub async fn live_client() -> CantoRestClient {
    init_tracing();

    let options = match ClientOptions::from_env() {
        Ok(options) => options,
        Err(e) => panic!(
            "\n\nLive test configuration error: {e}\n\
             Set CANTO_NAME, CANTO_APP_ID and CANTO_APP_SECRET \
             (optionally CANTO_DOMAIN, CANTO_MDC_DOMAIN, CANTO_MDC_ACCOUNT_ID).\n\n"
        ),
    };

    let client = match CantoRestClient::new(options) {
        Ok(client) => client,
        Err(e) => panic!("\n\nCould not create client: {e}\n\n"),
    };

    let user_id = std::env::var("CANTO_USER_ID").ok();
    if let Err(e) = client.authorize(user_id.as_deref(), Scope::Admin).await {
        panic!(
            "\n\nLive test authentication failed: {e}\n\
             Check the app id and secret, and that the app is allowed the \
             client-credentials grant.\n\n"
        );
    }

    client
}

/// Sends every request to a fixed origin, keeping path and query.
///
/// Tenant and OAuth hosts are subdomains, which a local mock server cannot
/// answer for; this factory folds them onto one address.
#[derive(Debug)]
pub struct RedirectFactory {
    origin: Url,
}

impl RedirectFactory {
    pub fn new(origin: &str) -> Arc<Self> {
        Arc::new(Self {
            origin: Url::parse(origin).expect("mock server URI must parse"),
        })
    }
}

impl RequestFactory for RedirectFactory {
    fn create_request(&self, method: HttpMethod, url: Url) -> HttpRequest {
        let mut target = self.origin.clone();
        target.set_path(url.path());
        target.set_query(url.query());
        // original host travels along so tests can tell tenant and OAuth apart
        HttpRequest::new(method, target)
            .with_header("X-Forwarded-Host", url.host_str().unwrap_or_default())
    }
}
