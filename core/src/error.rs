//! Error types for the request client.
//!
//! # Design
//! Configuration and validation problems are reported synchronously from
//! the call that caused them, before any future exists. Transport failures
//! are the only errors delivered by awaiting a `PendingCall`, and they are
//! carried through untouched in `Transport`.
//!
//! A vetoed call and a timed-out call are not errors: both resolve to an
//! `Outcome` value.

use thiserror::Error;

use crate::method::valid_methods;

/// Opaque failure produced by a `Transport` implementation.
pub type TransportError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, RequestError>;

/// Errors returned by the request client.
#[derive(Debug, Error)]
pub enum RequestError {
    /// A configuration setter received a value it cannot store (empty or
    /// malformed header name, header value with control characters, base
    /// URL with whitespace). The stored state is left unchanged.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The method is not one of GET, POST, PUT, PATCH, DELETE.
    #[error("the method must be one of {}, got {:?}", valid_methods().join(", "), .method)]
    InvalidMethod { method: String },

    /// The transport failed; the error is passed through as-is.
    #[error(transparent)]
    Transport(TransportError),
}

impl RequestError {
    pub(crate) fn invalid_method(method: &str) -> Self {
        RequestError::InvalidMethod {
            method: method.to_string(),
        }
    }

    /// Returns the transport's own error if this is a transport failure.
    pub fn transport_error(&self) -> Option<&(dyn std::error::Error + Send + Sync + 'static)> {
        match self {
            RequestError::Transport(err) => Some(err.as_ref()),
            _ => None,
        }
    }
}
