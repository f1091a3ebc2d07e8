//! Request orchestration: context building, gating, dispatch, timeout race
//! and outcome transformation.
//!
//! # Design
//! A call is split at the only suspension point. `RequestSender::send` does
//! everything that can fail on the caller's input (method, options, URL,
//! headers, body rendering) and runs the before-send gates, all before
//! returning. What it returns is a `PendingCall` that owns everything it
//! needs, so it is `'static` and can be spawned.
//!
//! The pending call races the transport against the response timeout with
//! `tokio::select!`. Whichever branch loses is dropped, and a
//! `CancellationToken` handed to the transport is cancelled through a drop
//! guard, so a late response can never replace a timeout and a timer can
//! never fire after the response arrived.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use std::time::Duration;

use futures::future::{self, BoxFuture, FutureExt};
use serde_json::{Map, Value};
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace};
use uuid::Uuid;

use crate::config::{CallOptions, SenderOptions};
use crate::context::{Outcome, RequestContext};
use crate::error::{RequestError, Result};
use crate::header::{self, HeaderResolver, Headers};
use crate::method;
use crate::middleware::{AfterReceiveChain, BeforeSendChain};
use crate::transport::{HttpRequest, Transport};
use crate::url_builder::UrlBuilder;

/// The inputs of one call besides method and endpoint.
#[derive(Debug, Clone, Default)]
pub struct CallArgs {
    /// Ignored for GET and DELETE, which always send an empty object.
    pub body: Value,
    pub params: Map<String, Value>,
    pub headers: Headers,
    pub options: CallOptions,
}

impl CallArgs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn body(mut self, body: Value) -> Self {
        self.body = body;
        self
    }

    /// Sets the query params. Anything but a JSON object is treated as no
    /// params.
    pub fn params(mut self, params: Value) -> Self {
        self.params = match params {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        self
    }

    pub fn header(mut self, key: &str, value: &str) -> Self {
        self.headers.insert(key.to_string(), value.to_string());
        self
    }

    pub fn options(mut self, options: CallOptions) -> Self {
        self.options = options;
        self
    }
}

/// Borrows the client's components for the duration of one `send`.
pub(crate) struct RequestSender<'a> {
    pub(crate) urls: &'a UrlBuilder,
    pub(crate) headers: &'a HeaderResolver,
    pub(crate) before_send: &'a BeforeSendChain,
    pub(crate) after_receive: &'a AfterReceiveChain,
    pub(crate) transport: &'a Arc<dyn Transport>,
    pub(crate) defaults: &'a SenderOptions,
}

impl RequestSender<'_> {
    /// Validates and prepares a call, then hands back the future that
    /// dispatches it.
    ///
    /// Errors here are synchronous: no context escapes and nothing is sent.
    /// A vetoed call returns a pending call that resolves to
    /// `Outcome::Empty` without touching the transport or the after-receive
    /// chain.
    pub(crate) fn send(&self, raw_method: &str, endpoint: &str, args: CallArgs) -> Result<PendingCall> {
        let Some(context) = self.prepare(raw_method, endpoint, args)? else {
            return Ok(PendingCall::ready(Outcome::Empty));
        };
        let request = HttpRequest::from_context(&context);

        debug!(id = %context.id, method = %context.method, url = %context.url, "dispatching request");
        let transport = Arc::clone(self.transport);
        let after_receive = self.after_receive.clone();
        let timeout = context.options.timeout();

        Ok(PendingCall::new(async move {
            let outcome = race_against_timeout(transport, request, timeout).await?;
            debug!(id = %context.id, status = ?outcome.status(), timeout = outcome.is_timeout(), "request resolved");
            Ok(after_receive.apply(outcome, &context))
        }))
    }

    /// Builds the context and runs the gates. `None` means vetoed.
    pub(crate) fn prepare(&self, raw_method: &str, endpoint: &str, args: CallArgs) -> Result<Option<RequestContext>> {
        let verb = method::parse_method(raw_method)?;
        header::validate(&args.headers)?;
        let options = self.defaults.merged(&args.options);
        let mode = options.before_send_conversion_mode;

        let raw_body = if verb.has_body() {
            args.body
        } else {
            Value::Object(Map::new())
        };

        let context = RequestContext {
            id: Uuid::new_v4(),
            method: verb,
            endpoint: endpoint.to_string(),
            url: self.urls.build_url(endpoint, &args.params, mode),
            headers: self.headers.headers_for_verb(verb, &args.headers),
            body: mode.convert(&raw_body),
            options,
            raw_method: raw_method.to_string(),
            raw_params: args.params,
            raw_body,
        };
        trace!(id = %context.id, url = %context.url, headers = ?context.headers, "request context built");

        if !self.before_send.apply(&context) {
            debug!(id = %context.id, method = %context.method, url = %context.url, "request vetoed by before-send middleware");
            return Ok(None);
        }
        Ok(Some(context))
    }
}

/// Waits for the transport, or for `timeout` if one is set, whichever comes
/// first.
async fn race_against_timeout(
    transport: Arc<dyn Transport>,
    request: HttpRequest,
    timeout: Option<Duration>,
) -> Result<Outcome> {
    let cancel = CancellationToken::new();
    let _guard = cancel.clone().drop_guard();
    let response = transport.send(request, cancel.child_token());

    let Some(limit) = timeout else {
        return response.await.map(Outcome::Response).map_err(RequestError::Transport);
    };

    tokio::select! {
        biased;
        result = response => result.map(Outcome::Response).map_err(RequestError::Transport),
        () = tokio::time::sleep(limit) => {
            debug!(?limit, "response timeout elapsed");
            Ok(Outcome::Timeout)
        }
    }
}

/// A prepared call that resolves once, to an `Outcome` or a transport error.
#[must_use = "a pending call does nothing unless awaited"]
pub struct PendingCall {
    inner: BoxFuture<'static, Result<Outcome>>,
}

impl PendingCall {
    fn new(fut: impl Future<Output = Result<Outcome>> + Send + 'static) -> Self {
        Self { inner: fut.boxed() }
    }

    fn ready(outcome: Outcome) -> Self {
        Self::new(future::ready(Ok(outcome)))
    }
}

impl Future for PendingCall {
    type Output = Result<Outcome>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        self.inner.as_mut().poll(cx)
    }
}

impl std::fmt::Debug for PendingCall {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PendingCall").finish_non_exhaustive()
    }
}
