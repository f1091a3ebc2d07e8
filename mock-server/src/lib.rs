//! Echo server for exercising the request client over real HTTP.
//!
//! - `/echo` answers every supported method with what it received.
//! - `/delay/{ms}` answers after sleeping, for timeout races.
//! - `/status/{code}` answers with the given status and an empty body.

use std::collections::BTreeMap;
use std::time::Duration;

use axum::{
    extract::{Path, Query},
    http::{HeaderMap, Method, StatusCode, Uri},
    routing::{any, get},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::net::TcpListener;
use tracing::debug;
use uuid::Uuid;

/// What `/echo` saw.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Echo {
    pub id: Uuid,
    pub method: String,
    pub path: String,
    pub query: Vec<(String, String)>,
    /// Header names are lowercase.
    pub headers: BTreeMap<String, String>,
    /// The body parsed as JSON, a JSON string if it is not JSON, or `null`
    /// when empty.
    pub body: Value,
}

pub fn app() -> Router {
    Router::new()
        .route(
            "/echo",
            get(echo).post(echo).put(echo).patch(echo).delete(echo),
        )
        .route("/delay/{ms}", get(delay))
        .route("/status/{code}", any(status))
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn echo(
    method: Method,
    uri: Uri,
    Query(query): Query<Vec<(String, String)>>,
    headers: HeaderMap,
    body: String,
) -> Json<Echo> {
    let echo = Echo {
        id: Uuid::new_v4(),
        method: method.to_string(),
        path: uri.path().to_string(),
        query,
        headers: headers
            .iter()
            .filter_map(|(name, value)| Some((name.to_string(), value.to_str().ok()?.to_string())))
            .collect(),
        body: parse_body(body),
    };
    debug!(id = %echo.id, method = %echo.method, "echo");
    Json(echo)
}

async fn delay(Path(ms): Path<u64>) -> Json<Value> {
    tokio::time::sleep(Duration::from_millis(ms)).await;
    Json(serde_json::json!({ "delayedMs": ms }))
}

async fn status(Path(code): Path<u16>) -> StatusCode {
    StatusCode::from_u16(code).unwrap_or(StatusCode::BAD_REQUEST)
}

fn parse_body(body: String) -> Value {
    if body.is_empty() {
        return Value::Null;
    }
    serde_json::from_str(&body).unwrap_or(Value::String(body))
}
