//! Public facade over the request pipeline.
//!
//! # Design
//! `RequestService` owns the long-lived pieces (base URL, default header
//! table, both middleware chains, client-wide options and the transport) and
//! lends them to a `RequestSender` for each call. Management methods take
//! `&mut self`, so they cannot run while a call is being prepared; calls
//! already dispatched hold their own snapshot of the after-receive chain.

use std::sync::Arc;

use crate::config::{ClientConfig, SenderOptions};
use crate::error::Result;
use crate::header::{HeaderResolver, Headers};
use crate::middleware::{AfterReceive, AfterReceiveChain, BeforeSend, BeforeSendChain};
use crate::sender::{CallArgs, PendingCall, RequestSender};
use crate::transport::Transport;
use crate::url_builder::UrlBuilder;

/// A configurable HTTP request client.
///
/// Every request method validates its input and returns a `PendingCall`
/// synchronously; awaiting it performs the round-trip.
pub struct RequestService {
    urls: UrlBuilder,
    headers: HeaderResolver,
    before_send: BeforeSendChain,
    after_receive: AfterReceiveChain,
    defaults: SenderOptions,
    transport: Arc<dyn Transport>,
}

impl RequestService {
    /// A client with built-in default headers, no base URL and default
    /// options.
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self {
            urls: UrlBuilder::default(),
            headers: HeaderResolver::default(),
            before_send: BeforeSendChain::default(),
            after_receive: AfterReceiveChain::default(),
            defaults: SenderOptions::default(),
            transport,
        }
    }

    pub fn with_config(transport: Arc<dyn Transport>, config: &ClientConfig) -> Result<Self> {
        Ok(Self {
            urls: UrlBuilder::new(&config.base_url)?,
            headers: HeaderResolver::new(&config.headers)?,
            before_send: BeforeSendChain::default(),
            after_receive: AfterReceiveChain::default(),
            defaults: config.options.clone(),
            transport,
        })
    }

    pub fn base_url(&self) -> &str {
        self.urls.base_url()
    }

    pub fn set_base_url(&mut self, url: &str) -> Result<()> {
        self.urls.set_base_url(url)
    }

    pub fn default_options(&self) -> &SenderOptions {
        &self.defaults
    }

    /// Sets a default header for `method`, or for every method when `method`
    /// is `None`.
    pub fn set_default_header(&mut self, key: &str, value: &str, method: Option<&str>) -> Result<()> {
        self.headers.set_default(key, value, method)
    }

    pub fn remove_default_header(&mut self, key: &str, method: Option<&str>) -> Result<()> {
        self.headers.remove_default(key, method)
    }

    /// The default headers a call with `method` would start from.
    pub fn headers_for(&self, method: &str) -> Result<Headers> {
        self.headers.headers_for(method, &Headers::new())
    }

    pub fn add_before_send_middleware(&mut self, middleware: BeforeSend) {
        self.before_send.add(middleware);
    }

    pub fn remove_before_send_middleware(&mut self, middleware: &BeforeSend) {
        self.before_send.remove(middleware);
    }

    pub fn add_after_receive_middleware(&mut self, middleware: AfterReceive) {
        self.after_receive.add(middleware);
    }

    pub fn remove_after_receive_middleware(&mut self, middleware: &AfterReceive) {
        self.after_receive.remove(middleware);
    }

    /// `args.body` is ignored.
    pub fn get(&self, endpoint: &str, args: CallArgs) -> Result<PendingCall> {
        self.send("GET", endpoint, args)
    }

    pub fn post(&self, endpoint: &str, args: CallArgs) -> Result<PendingCall> {
        self.send("POST", endpoint, args)
    }

    pub fn put(&self, endpoint: &str, args: CallArgs) -> Result<PendingCall> {
        self.send("PUT", endpoint, args)
    }

    pub fn patch(&self, endpoint: &str, args: CallArgs) -> Result<PendingCall> {
        self.send("PATCH", endpoint, args)
    }

    /// `args.body` is ignored.
    pub fn delete(&self, endpoint: &str, args: CallArgs) -> Result<PendingCall> {
        self.send("DELETE", endpoint, args)
    }

    /// Sends a request with a method given as text. The method is
    /// uppercased before validation.
    pub fn send(&self, method: &str, endpoint: &str, args: CallArgs) -> Result<PendingCall> {
        self.sender().send(method, endpoint, args)
    }

    fn sender(&self) -> RequestSender<'_> {
        RequestSender {
            urls: &self.urls,
            headers: &self.headers,
            before_send: &self.before_send,
            after_receive: &self.after_receive,
            transport: &self.transport,
            defaults: &self.defaults,
        }
    }
}

impl std::fmt::Debug for RequestService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestService")
            .field("urls", &self.urls)
            .field("headers", &self.headers)
            .field("before_send", &self.before_send)
            .field("after_receive", &self.after_receive)
            .field("defaults", &self.defaults)
            .finish_non_exhaustive()
    }
}
