use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
};

use axum::{
    extract::{Path, State},
    http::{header, HeaderMap, StatusCode},
    routing::post,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};

/// A request as the mock server received it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RecordedRequest {
    pub path: String,
    pub authorization: Option<String>,
    pub body: Value,
}

/// Shared state behind the router. Cloning shares the recorded requests.
#[derive(Clone, Debug)]
pub struct MockState {
    api_key: Arc<str>,
    requests: Arc<RwLock<Vec<RecordedRequest>>>,
    next_id: Arc<AtomicU64>,
}

impl MockState {
    pub fn new(api_key: &str) -> Self {
        Self {
            api_key: Arc::from(api_key),
            requests: Arc::new(RwLock::new(Vec::new())),
            next_id: Arc::new(AtomicU64::new(1)),
        }
    }

    pub async fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.read().await.clone()
    }

    async fn record(&self, path: String, headers: &HeaderMap, body: Value) {
        let authorization = headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        self.requests.write().await.push(RecordedRequest {
            path,
            authorization,
            body,
        });
    }

    fn authorized(&self, headers: &HeaderMap) -> bool {
        let expected = format!("Bearer {}", self.api_key);
        headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v == expected)
    }
}

type Reply = (StatusCode, Json<Value>);

pub fn app(api_key: &str) -> Router {
    app_with_state(MockState::new(api_key))
}

pub fn app_with_state(state: MockState) -> Router {
    Router::new()
        .route("/v1/campaigns/{id}/triggers", post(trigger_broadcast))
        .route("/v1/send/email", post(send_email))
        .with_state(state)
}

pub async fn run(listener: TcpListener, state: MockState) -> Result<(), std::io::Error> {
    axum::serve(listener, app_with_state(state)).await
}

fn unauthorized() -> Reply {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({"meta": {"error": "Unauthorized request"}})),
    )
}

fn bad_request(errors: Vec<String>) -> Reply {
    (StatusCode::BAD_REQUEST, Json(json!({ "errors": errors })))
}

fn parse_body(raw: &str) -> Result<Value, Reply> {
    serde_json::from_str(raw).map_err(|e| bad_request(vec![format!("invalid JSON: {e}")]))
}

async fn trigger_broadcast(
    State(state): State<MockState>,
    Path(id): Path<u64>,
    headers: HeaderMap,
    raw: String,
) -> Reply {
    let body = match parse_body(&raw) {
        Ok(body) => body,
        Err(reply) => return reply,
    };
    state
        .record(format!("/v1/campaigns/{id}/triggers"), &headers, body.clone())
        .await;

    if !state.authorized(&headers) {
        return unauthorized();
    }
    if !body.is_object() {
        return bad_request(vec!["request body must be a JSON object".to_string()]);
    }

    let trigger_id = state.next_id.fetch_add(1, Ordering::Relaxed);
    tracing::debug!(campaign = id, trigger_id, "broadcast triggered");
    (StatusCode::OK, Json(json!({ "id": trigger_id })))
}

async fn send_email(State(state): State<MockState>, headers: HeaderMap, raw: String) -> Reply {
    let body = match parse_body(&raw) {
        Ok(body) => body,
        Err(reply) => return reply,
    };
    state
        .record("/v1/send/email".to_string(), &headers, body.clone())
        .await;

    if !state.authorized(&headers) {
        return unauthorized();
    }

    let errors = missing_email_fields(&body);
    if !errors.is_empty() {
        return bad_request(errors);
    }

    let delivery = state.next_id.fetch_add(1, Ordering::Relaxed);
    tracing::debug!(delivery, "transactional email queued");
    (
        StatusCode::OK,
        Json(json!({ "delivery_id": format!("delivery-{delivery}"), "queued_at": 1_700_000_000 })),
    )
}

/// Validation errors for a send-email body, one per missing required field.
pub fn missing_email_fields(body: &Value) -> Vec<String> {
    let mut errors = Vec::new();
    for field in ["transactional_message_id", "to"] {
        if !body.get(field).is_some_and(Value::is_string) {
            errors.push(format!("{field} is required"));
        }
    }
    if !body.get("identifiers").is_some_and(Value::is_object) {
        errors.push("identifiers is required".to_string());
    }
    errors
}
