//! Per-call request context and call outcome.

use serde_json::{Map, Value};
use uuid::Uuid;

use crate::config::SenderOptions;
use crate::header::Headers;
use crate::method::Verb;
use crate::transport::HttpResponse;

/// Everything resolved for one call, plus the raw inputs it came from.
///
/// Built once per call and only ever shared by reference, so middleware
/// can inspect it but not change it.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestContext {
    /// Correlates log lines for this call.
    pub id: Uuid,
    pub method: Verb,
    pub endpoint: String,
    /// Base URL + endpoint + converted query string.
    pub url: String,
    /// Default headers for `method` with the call headers merged on top.
    pub headers: Headers,
    /// Body after key conversion. An empty object for GET and DELETE.
    pub body: Value,
    /// Client defaults with the call options applied.
    pub options: SenderOptions,
    /// The method string exactly as the caller passed it.
    pub raw_method: String,
    pub raw_params: Map<String, Value>,
    pub raw_body: Value,
}

/// The single resolved value of a call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The transport answered first.
    Response(HttpResponse),
    /// The response timeout fired first.
    Timeout,
    /// A before-send middleware vetoed the call; nothing was dispatched.
    Empty,
}

impl Outcome {
    /// Status reported for a timed-out call.
    pub const TIMEOUT_STATUS: u16 = 408;

    pub fn is_timeout(&self) -> bool {
        matches!(self, Outcome::Timeout)
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Outcome::Empty)
    }

    /// Response status, `408` for a timeout, `None` for a vetoed call.
    pub fn status(&self) -> Option<u16> {
        match self {
            Outcome::Response(response) => Some(response.status),
            Outcome::Timeout => Some(Self::TIMEOUT_STATUS),
            Outcome::Empty => None,
        }
    }

    pub fn response(&self) -> Option<&HttpResponse> {
        match self {
            Outcome::Response(response) => Some(response),
            _ => None,
        }
    }

    pub fn into_response(self) -> Option<HttpResponse> {
        match self {
            Outcome::Response(response) => Some(response),
            _ => None,
        }
    }
}
