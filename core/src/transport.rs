//! Transport boundary for the host-does-IO pattern.
//!
//! # Design
//! Requests and responses are plain data. The client builds an `HttpRequest`
//! from the resolved context and hands it to a `Transport`, which performs
//! the actual network call. Nothing in this crate opens a socket, so the
//! orchestration stays deterministic and can be tested against an
//! in-memory transport.
//!
//! The transport receives a `CancellationToken` that fires once its result
//! is no longer wanted (the timeout won the race, or the caller dropped the
//! pending call). Futures are dropped either way; the token is for work the
//! transport moved off-task.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tokio_util::sync::CancellationToken;

use crate::context::RequestContext;
use crate::error::TransportError;
use crate::header::Headers;
use crate::method::Verb;

/// An HTTP request described as plain data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: Verb,
    pub url: String,
    pub headers: Headers,
    /// JSON text for POST, PUT and PATCH; `None` for GET and DELETE.
    pub body: Option<String>,
}

impl HttpRequest {
    pub(crate) fn from_context(context: &RequestContext) -> Self {
        let body = context.method.has_body().then(|| context.body.to_string());
        HttpRequest {
            method: context.method,
            url: context.url.clone(),
            headers: context.headers.clone(),
            body,
        }
    }
}

/// An HTTP response described as plain data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Headers,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Decodes the body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> serde_json::Result<T> {
        serde_json::from_str(&self.body)
    }
}

/// Performs the network round-trip for one request.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: HttpRequest, cancel: CancellationToken) -> std::result::Result<HttpResponse, TransportError>;
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::config::SenderOptions;

    fn context(method: Verb) -> RequestContext {
        RequestContext {
            id: uuid::Uuid::nil(),
            method,
            endpoint: "/orders".to_string(),
            url: "http://h/orders".to_string(),
            headers: Headers::from([("X-A".to_string(), "1".to_string())]),
            body: json!({"qty": 2}),
            options: SenderOptions::default(),
            raw_method: method.as_str().to_lowercase(),
            raw_params: Default::default(),
            raw_body: json!({"qty": 2}),
        }
    }

    #[test]
    fn body_bearing_verbs_carry_json_text() {
        for verb in [Verb::Post, Verb::Put, Verb::Patch] {
            let request = HttpRequest::from_context(&context(verb));
            assert_eq!(request.method, verb);
            assert_eq!(request.url, "http://h/orders");
            assert_eq!(request.body.as_deref(), Some(r#"{"qty":2}"#));
            assert_eq!(request.headers["X-A"], "1");
        }
    }

    #[test]
    fn get_and_delete_have_no_body() {
        for verb in [Verb::Get, Verb::Delete] {
            let request = HttpRequest::from_context(&context(verb));
            assert!(request.body.is_none(), "{verb}");
        }
    }

    #[test]
    fn response_helpers() {
        let response = HttpResponse {
            status: 201,
            headers: Headers::new(),
            body: r#"{"id":7}"#.to_string(),
        };
        assert!(response.is_success());
        let value: serde_json::Value = response.json().unwrap();
        assert_eq!(value["id"], 7);

        let response = HttpResponse {
            status: 404,
            headers: Headers::new(),
            body: "not json".to_string(),
        };
        assert!(!response.is_success());
        assert!(response.json::<serde_json::Value>().is_err());
    }
}
