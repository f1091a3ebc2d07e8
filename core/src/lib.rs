//! Configurable HTTP request client core.
//!
//! # Overview
//! Callers register default headers, a base URL and two kinds of
//! middleware, then issue GET/POST/PUT/PATCH/DELETE calls. Every call goes
//! through one pipeline: build the context, run the before-send gates,
//! dispatch to the transport raced against a timeout, then fold the outcome
//! through the after-receive middleware.
//!
//! # Design
//! - The network call is made by a caller-supplied `Transport`
//!   (host-does-IO); this crate never opens a socket.
//! - Validation errors are returned synchronously, before a `PendingCall`
//!   exists. Vetoes and timeouts are `Outcome` values, not errors.
//! - Verbs are an enum and the default header table is indexed by it.

pub mod client;
pub mod config;
pub mod context;
pub mod convert;
pub mod error;
pub mod header;
pub mod method;
pub mod middleware;
pub mod query;
pub mod sender;
pub mod transport;
pub mod url_builder;

#[cfg(test)]
mod test_support;

pub use client::RequestService;
pub use config::{CallOptions, ClientConfig, SenderOptions};
pub use context::{Outcome, RequestContext};
pub use convert::ConversionMode;
pub use error::{RequestError, Result, TransportError};
pub use header::{HeaderDefaults, HeaderResolver, Headers};
pub use method::Verb;
pub use middleware::{AfterReceive, BeforeSend};
pub use sender::{CallArgs, PendingCall};
pub use transport::{HttpRequest, HttpResponse, Transport};
pub use url_builder::UrlBuilder;

// Transport implementations need the token type.
pub use tokio_util::sync::CancellationToken;
