//! In-memory transport for tests.
//!
//! Queue responses or transport errors, run the code under test, then
//! inspect the requests that were sent.
//!
//! ```rust,ignore
//! let mock = Arc::new(MockTransport::new());
//! mock.respond_with(Response::new(200, "success"));
//! let client = CantoClient::new(mock.client_options().build())?;
//! ```

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;

use crate::config::{ClientOptions, ClientOptionsBuilder};
use crate::response::Response;
use crate::transport::{HttpRequest, HttpTransport, TransportError};

type Outcome = std::result::Result<Response, TransportError>;

/// Transport replaying queued outcomes in FIFO order.
///
/// Once the queue is empty every call fails with a transport error.
#[derive(Debug, Default)]
pub struct MockTransport {
    outcomes: Mutex<VecDeque<Outcome>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl MockTransport {
    /// Create an empty mock.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a response.
    pub fn respond_with(&self, response: Response) -> &Self {
        self.outcomes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(Ok(response));
        self
    }

    /// Queue a transport error.
    pub fn fail_with(&self, error: TransportError) -> &Self {
        self.outcomes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(Err(error));
        self
    }

    /// Requests sent so far, oldest first.
    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// The most recent request.
    pub fn last_request(&self) -> Option<HttpRequest> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .last()
            .cloned()
    }

    /// Options for tenant `test` on `canto.com` with app id and secret `test`,
    /// using this mock as transport.
    pub fn client_options(self: &Arc<Self>) -> ClientOptionsBuilder {
        ClientOptions::builder()
            .with_canto_name("test")
            .with_canto_domain("canto.com")
            .with_app_id("test")
            .with_app_secret("test")
            .with_http_client(Arc::clone(self) as Arc<dyn HttpTransport>)
    }
}

#[async_trait]
impl HttpTransport for MockTransport {
    async fn send(&self, request: HttpRequest) -> Outcome {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(request);

        self.outcomes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front()
            .unwrap_or_else(|| Err(TransportError::new("no mocked response left")))
    }
}
