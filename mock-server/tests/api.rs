use axum::http::{self, Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::{app, app_with_state, MockState};
use serde_json::{json, Value};
use tower::ServiceExt;

const KEY: &str = "test-key";

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = body_bytes(response).await;
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

fn post(uri: &str, auth: Option<&str>, body: &str) -> Request<String> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(http::header::CONTENT_TYPE, "application/json");
    if let Some(auth) = auth {
        builder = builder.header(http::header::AUTHORIZATION, auth);
    }
    builder.body(body.to_string()).unwrap()
}

fn bearer() -> Option<&'static str> {
    Some("Bearer test-key")
}

// --- broadcast triggers ---

#[tokio::test]
async fn trigger_broadcast_returns_200() {
    let resp = app(KEY)
        .oneshot(post(
            "/v1/campaigns/5/triggers",
            bearer(),
            r#"{"data":{"promo":"SPRING"}}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert!(body["id"].is_u64());
}

#[tokio::test]
async fn trigger_broadcast_empty_object_is_accepted() {
    let resp = app(KEY)
        .oneshot(post("/v1/campaigns/5/triggers", bearer(), "{}"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
async fn trigger_broadcast_without_token_returns_401() {
    let resp = app(KEY)
        .oneshot(post("/v1/campaigns/5/triggers", None, "{}"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(resp).await;
    assert_eq!(body["meta"]["error"], "Unauthorized request");
}

#[tokio::test]
async fn trigger_broadcast_wrong_token_returns_401() {
    let resp = app(KEY)
        .oneshot(post("/v1/campaigns/5/triggers", Some("Bearer nope"), "{}"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn trigger_broadcast_non_object_returns_400() {
    let resp = app(KEY)
        .oneshot(post("/v1/campaigns/5/triggers", bearer(), "[1,2]"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body = body_json(resp).await;
    assert_eq!(body["errors"][0], "request body must be a JSON object");
}

#[tokio::test]
async fn trigger_broadcast_bad_campaign_id_returns_400() {
    let resp = app(KEY)
        .oneshot(post("/v1/campaigns/not-a-number/triggers", bearer(), "{}"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

// --- transactional email ---

#[tokio::test]
async fn send_email_returns_200() {
    let resp = app(KEY)
        .oneshot(post(
            "/v1/send/email",
            bearer(),
            r#"{"transactional_message_id":"3","to":"a@example.com","identifiers":{"id":"a"}}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert!(body["delivery_id"].as_str().unwrap().starts_with("delivery-"));
}

#[tokio::test]
async fn send_email_missing_fields_returns_400() {
    let resp = app(KEY)
        .oneshot(post("/v1/send/email", bearer(), r#"{"to":"a@example.com"}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body = body_json(resp).await;
    assert_eq!(
        body,
        json!({"errors": ["transactional_message_id is required", "identifiers is required"]})
    );
}

#[tokio::test]
async fn send_email_malformed_json_returns_400() {
    let resp = app(KEY)
        .oneshot(post("/v1/send/email", bearer(), "{not json"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body = body_json(resp).await;
    assert!(body["errors"][0].as_str().unwrap().starts_with("invalid JSON"));
}

#[tokio::test]
async fn unknown_route_returns_404() {
    let resp = app(KEY)
        .oneshot(post("/v1/customers", bearer(), "{}"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert!(body_bytes(resp).await.is_empty());
}

// --- recording ---

#[tokio::test]
async fn requests_are_recorded_in_order() {
    use tower::Service;

    let state = MockState::new(KEY);
    let mut app = app_with_state(state.clone()).into_service();

    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(post("/v1/campaigns/8/triggers", bearer(), r#"{"recipients":{"segment":{"id":1}}}"#))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(post("/v1/send/email", Some("Bearer wrong"), "{}"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let recorded = state.requests().await;
    assert_eq!(recorded.len(), 2);
    assert_eq!(recorded[0].path, "/v1/campaigns/8/triggers");
    assert_eq!(recorded[0].authorization.as_deref(), Some("Bearer test-key"));
    assert_eq!(recorded[0].body, json!({"recipients": {"segment": {"id": 1}}}));
    assert_eq!(recorded[1].path, "/v1/send/email");
    assert_eq!(recorded[1].authorization.as_deref(), Some("Bearer wrong"));
}
