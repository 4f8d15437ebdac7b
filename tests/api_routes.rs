//! API Route Tests
//!
//! Exercises the full router (handlers, error mapping, header middleware)
//! with `oneshot`, backed by a wiremock agent platform.

mod fixtures;

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
    middleware,
};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::util::ServiceExt;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use convoai_gateway::core::convoai::AgentLifecycleClient;
use convoai_gateway::core::token::{AgoraTokenIssuer, TokenIssuer};
use convoai_gateway::{
    ServerConfig, middleware::response_headers_middleware, routes, state::AppState,
};

use fixtures::{APP_CERTIFICATE, APP_ID, StubIssuer, test_config};

fn app_with(config: ServerConfig, issuer: Arc<dyn TokenIssuer>) -> Router {
    let platform = Arc::new(AgentLifecycleClient::from_config(&config));
    let state = AppState::with_components(config, issuer, platform);
    routes::api::create_api_router()
        .layer(middleware::from_fn_with_state(
            state.clone(),
            response_headers_middleware,
        ))
        .with_state(state)
}

fn app(server: &MockServer) -> Router {
    app_with(test_config(&server.uri()), Arc::new(StubIssuer))
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("Content-Type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_ping() {
    let server = MockServer::start().await;
    let request = Request::builder().uri("/ping").body(Body::empty()).unwrap();

    let response = app(&server).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await, json!({"message": "pong"}));
}

#[tokio::test]
async fn test_invite_agent() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(format!("/{APP_ID}/join")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "agent_id": "test-agent-123",
            "create_ts": 1,
            "status": "RUNNING"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let response = app(&server)
        .oneshot(post_json(
            "/agent/invite",
            json!({"requester_id": "123", "channel_name": "test-channel"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["agent_id"], "test-agent-123");
    assert_eq!(body["status"], "RUNNING");
    assert!(body["create_ts"].as_i64().unwrap() > 0);
}

#[tokio::test]
async fn test_invite_short_channel_rejected_without_platform_call() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let response = app(&server)
        .oneshot(post_json(
            "/agent/invite",
            json!({"requester_id": "123", "channel_name": "te"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        json_body(response).await["error"],
        "channel_name length must be between 3 and 64 characters"
    );
}

#[tokio::test]
async fn test_invite_missing_requester() {
    let server = MockServer::start().await;

    let response = app(&server)
        .oneshot(post_json("/agent/invite", json!({"channel_name": "test-channel"})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(response).await["error"], "requester_id is required");
}

#[tokio::test]
async fn test_invite_malformed_json() {
    let server = MockServer::start().await;
    let request = Request::builder()
        .method("POST")
        .uri("/agent/invite")
        .header("Content-Type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();

    let response = app(&server).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(json_body(response).await["error"].is_string());
}

#[tokio::test]
async fn test_invite_platform_failure_is_500() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(format!("/{APP_ID}/join")))
        .respond_with(ResponseTemplate::new(503).set_body_string("busy"))
        .mount(&server)
        .await;

    let response = app(&server)
        .oneshot(post_json(
            "/agent/invite",
            json!({"requester_id": "123", "channel_name": "test-channel"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let error = json_body(response).await["error"].as_str().unwrap().to_string();
    assert!(error.contains("status=503"));
}

#[tokio::test]
async fn test_remove_agent() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(format!("/{APP_ID}/agents/agent-123abc/leave")))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let response = app(&server)
        .oneshot(post_json("/agent/remove", json!({"agent_id": "agent-123abc"})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        json_body(response).await,
        json!({"success": true, "agent_id": "agent-123abc"})
    );
}

#[tokio::test]
async fn test_remove_agent_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(format!("/{APP_ID}/agents/agent-123abc/leave")))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let response = app(&server)
        .oneshot(post_json("/agent/remove", json!({"agent_id": "agent-123abc"})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let error = json_body(response).await["error"].as_str().unwrap().to_string();
    assert!(error.contains("404"));
}

#[tokio::test]
async fn test_remove_agent_missing_id() {
    let server = MockServer::start().await;

    let response = app(&server)
        .oneshot(post_json("/agent/remove", json!({})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(response).await["error"], "agent_id is required");
}

#[tokio::test]
async fn test_get_new_token() {
    let server = MockServer::start().await;
    let issuer = Arc::new(AgoraTokenIssuer::new(APP_ID, APP_CERTIFICATE));
    let app = app_with(test_config(&server.uri()), issuer);

    let response = app
        .oneshot(post_json(
            "/token/getNew",
            json!({"tokenType": "rtc", "channel": "test-channel", "uid": 0, "role": "subscriber"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let token = json_body(response).await["token"].as_str().unwrap().to_string();
    assert!(token.starts_with("007"));
}

#[tokio::test]
async fn test_get_new_token_rejects_unknown_type_and_role() {
    let server = MockServer::start().await;

    let response = app(&server)
        .oneshot(post_json(
            "/token/getNew",
            json!({"tokenType": "rtm", "channel": "test-channel", "uid": "1"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app(&server)
        .oneshot(post_json(
            "/token/getNew",
            json!({"tokenType": "rtc", "channel": "test-channel", "uid": "1", "role": "admin"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_no_cache_and_timestamp_headers() {
    let server = MockServer::start().await;
    let request = Request::builder().uri("/ping").body(Body::empty()).unwrap();

    let response = app(&server).oneshot(request).await.unwrap();
    let headers = response.headers();

    assert_eq!(
        headers.get("cache-control").unwrap(),
        "private, no-cache, no-store, must-revalidate"
    );
    assert_eq!(headers.get("expires").unwrap(), "-1");
    assert_eq!(headers.get("pragma").unwrap(), "no-cache");
    assert!(headers.get("x-timestamp").is_some());
    assert!(headers.get("access-control-allow-origin").is_none());
}

#[tokio::test]
async fn test_cors_wildcard_echoes_origin() {
    let server = MockServer::start().await;
    let mut config = test_config(&server.uri());
    config.cors_allow_origin = Some("*".to_string());

    let request = Request::builder()
        .uri("/ping")
        .header("Origin", "http://example.com")
        .body(Body::empty())
        .unwrap();
    let response = app_with(config, Arc::new(StubIssuer))
        .oneshot(request)
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get("access-control-allow-origin").unwrap(),
        "http://example.com"
    );
}

#[tokio::test]
async fn test_cors_disallowed_origin_forbidden() {
    let server = MockServer::start().await;
    let mut config = test_config(&server.uri());
    config.cors_allow_origin = Some("http://example.com".to_string());

    let request = Request::builder()
        .uri("/ping")
        .header("Origin", "http://not-allowed.com")
        .body(Body::empty())
        .unwrap();
    let response = app_with(config, Arc::new(StubIssuer))
        .oneshot(request)
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_cors_preflight() {
    let server = MockServer::start().await;
    let mut config = test_config(&server.uri());
    config.cors_allow_origin = Some("http://example.com,http://allowed.com".to_string());

    let request = Request::builder()
        .method("OPTIONS")
        .uri("/agent/invite")
        .header("Origin", "http://allowed.com")
        .body(Body::empty())
        .unwrap();
    let response = app_with(config, Arc::new(StubIssuer))
        .oneshot(request)
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert_eq!(
        response.headers().get("access-control-allow-origin").unwrap(),
        "http://allowed.com"
    );
    assert!(response.headers().get("access-control-allow-methods").is_some());
}
