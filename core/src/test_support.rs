//! In-memory transport for unit tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::error::TransportError;
use crate::header::Headers;
use crate::transport::{HttpRequest, HttpResponse, Transport};

pub(crate) enum Reply {
    Respond(HttpResponse),
    After(Duration, HttpResponse),
    Hang,
    Fail(&'static str),
}

pub(crate) fn ok(body: &str) -> HttpResponse {
    HttpResponse {
        status: 200,
        headers: Headers::new(),
        body: body.to_string(),
    }
}

/// Records every request and answers according to its `Reply`.
pub(crate) struct StubTransport {
    reply: Reply,
    calls: AtomicUsize,
    requests: Mutex<Vec<HttpRequest>>,
    token: Mutex<Option<CancellationToken>>,
}

impl StubTransport {
    pub(crate) fn new(reply: Reply) -> Arc<Self> {
        Arc::new(Self {
            reply,
            calls: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
            token: Mutex::new(None),
        })
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub(crate) fn last_request(&self) -> Option<HttpRequest> {
        self.requests.lock().unwrap().last().cloned()
    }

    pub(crate) fn was_cancelled(&self) -> bool {
        self.token
            .lock()
            .unwrap()
            .as_ref()
            .is_some_and(CancellationToken::is_cancelled)
    }
}

#[async_trait]
impl Transport for StubTransport {
    async fn send(&self, request: HttpRequest, cancel: CancellationToken) -> Result<HttpResponse, TransportError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(request);
        *self.token.lock().unwrap() = Some(cancel);

        match &self.reply {
            Reply::Respond(response) => Ok(response.clone()),
            Reply::After(delay, response) => {
                tokio::time::sleep(*delay).await;
                Ok(response.clone())
            }
            Reply::Hang => std::future::pending().await,
            Reply::Fail(message) => Err((*message).into()),
        }
    }
}
