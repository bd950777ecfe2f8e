//! End-to-end behavior of the HTTP surface against fake upstreams.

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use deoxys_server::{router, AppState, ServerConfig};
use mockito::{Matcher, Server};
use serde_json::{json, Value};
use tower::ServiceExt;

const UNREACHABLE: &str = "http://127.0.0.1:1";

fn config(hf_token: Option<&str>, hf_base: &str, text_base: &str, image_base: &str) -> ServerConfig {
    ServerConfig {
        hf_access_token: hf_token.map(str::to_string),
        huggingface_base_url: hf_base.to_string(),
        pollinations_text_url: text_base.to_string(),
        pollinations_image_url: image_base.to_string(),
        request_timeout_ms: 5_000,
        warmup_delay_ms: 10,
        ..ServerConfig::default()
    }
}

fn app(config: &ServerConfig) -> Router {
    router(AppState::from_config(config).unwrap())
}

async fn post(app: Router, uri: &str, body: impl Into<Body>) -> (StatusCode, Value) {
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("content-type", "application/json")
                .body(body.into())
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

fn chat_body(text: &str) -> String {
    json!({ "messages": [{ "role": "user", "content": text }] }).to_string()
}

#[tokio::test]
async fn test_chat_without_token_or_network_is_demo() {
    let app = app(&config(None, UNREACHABLE, UNREACHABLE, UNREACHABLE));

    let (status, body) = post(app, "/chat", chat_body("Hello")).await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["provider"], "demo");
    assert!(body["text"].as_str().unwrap().starts_with("Demo mode is on."));
    assert_eq!(
        body["reason"],
        "No provider responded. Checked Hugging Face (HF_ACCESS_TOKEN/HF_CHAT_MODEL) then Pollinations."
    );
}

#[tokio::test]
async fn test_chat_simplify_mode_falls_back_to_bullets() {
    let app = app(&config(None, UNREACHABLE, UNREACHABLE, UNREACHABLE));
    let body = json!({
        "messages": [{ "role": "user", "content": "The cat sat down." }],
        "simplifyMode": true
    });

    let (status, body) = post(app, "/chat", body.to_string()).await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["text"], "- The cat sat down.");
}

#[tokio::test]
async fn test_chat_unauthorized_falls_through_to_pollinations() {
    let mut server = Server::new_async().await;
    let hf = server
        .mock("POST", Matcher::Regex(r"^/models/".to_string()))
        .with_status(401)
        .with_body("bad token")
        .expect(1)
        .create_async()
        .await;
    let pollinations = server
        .mock("GET", Matcher::Any)
        .with_status(200)
        .with_body("  - Hi there.  ")
        .expect(1)
        .create_async()
        .await;
    let url = server.url();
    let app = app(&config(Some("hf_bad"), &url, &url, UNREACHABLE));

    let (status, body) = post(app, "/chat", chat_body("Hello")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "text": "- Hi there.", "provider": "pollinations:text" }));
    hf.assert_async().await;
    pollinations.assert_async().await;
}

#[tokio::test]
async fn test_chat_primary_model_answers() {
    let mut server = Server::new_async().await;
    server
        .mock(
            "POST",
            Matcher::Regex(
                r"^/models/mistralai%2FMistral-7B-Instruct-v0\.2\?wait_for_model=true".to_string(),
            ),
        )
        .with_status(200)
        .with_body(r#"[{"generated_text":"- Short."}]"#)
        .create_async()
        .await;
    let pollinations = server
        .mock("GET", Matcher::Any)
        .expect(0)
        .create_async()
        .await;
    let url = server.url();
    let app = app(&config(Some("hf_ok"), &url, &url, UNREACHABLE));

    let (status, body) = post(app, "/chat", chat_body("Hello")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["provider"], "huggingface:mistralai/Mistral-7B-Instruct-v0.2");
    assert_eq!(body["text"], "- Short.");
    pollinations.assert_async().await;
}

#[tokio::test]
async fn test_chat_every_upstream_failing_is_demo() {
    let mut server = Server::new_async().await;
    let hf = server
        .mock("POST", Matcher::Regex(r"^/models/".to_string()))
        .with_status(503)
        .expect(6)
        .create_async()
        .await;
    server
        .mock("GET", Matcher::Any)
        .with_status(500)
        .create_async()
        .await;
    let url = server.url();
    let app = app(&config(Some("hf_ok"), &url, &url, UNREACHABLE));

    let (status, body) = post(app, "/chat", chat_body("Hello")).await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["provider"], "demo");
    hf.assert_async().await;
}

#[tokio::test]
async fn test_chat_malformed_json() {
    let app = app(&config(None, UNREACHABLE, UNREACHABLE, UNREACHABLE));

    let (status, body) = post(app, "/chat", "{not json").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_chat_null_fields_are_defaults() {
    let app = app(&config(None, UNREACHABLE, UNREACHABLE, UNREACHABLE));

    let (status, body) = post(app.clone(), "/chat", r#"{"messages":null}"#).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["provider"], "demo");

    let body = json!({
        "messages": [{ "role": "user", "content": "Hello" }],
        "simplifyMode": null
    });
    let (status, body) = post(app, "/chat", body.to_string()).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["provider"], "demo");
    assert!(body["text"].as_str().unwrap().starts_with("Demo mode is on."));
}

#[tokio::test]
async fn test_chat_unknown_role_is_accepted() {
    let app = app(&config(None, UNREACHABLE, UNREACHABLE, UNREACHABLE));
    let body = json!({
        "messages": [
            { "role": "system", "content": "Be brief." },
            { "role": "user", "content": "Hello" }
        ]
    });

    let (status, body) = post(app, "/chat", body.to_string()).await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["provider"], "demo");
}

#[tokio::test]
async fn test_image_returns_exact_bytes_as_data_url() {
    let mut server = Server::new_async().await;
    let bytes: Vec<u8> = (0u8..=255).collect();
    let mock = server
        .mock("GET", Matcher::Regex(r"^/prompt/a%20red%20fox".to_string()))
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("width".into(), "256".into()),
            Matcher::UrlEncoded("height".into(), "256".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "image/jpeg")
        .with_body(bytes.clone())
        .create_async()
        .await;
    let app = app(&config(None, UNREACHABLE, UNREACHABLE, &server.url()));

    let (status, body) = post(
        app,
        "/image",
        json!({ "prompt": "a red fox", "size": "256x256" }).to_string(),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let data_url = body["image"].as_str().unwrap();
    let payload = data_url.strip_prefix("data:image/jpeg;base64,").unwrap();
    assert_eq!(STANDARD.decode(payload).unwrap(), bytes);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_image_missing_prompt() {
    for body in [
        json!({}),
        json!({ "prompt": "" }),
        json!({ "prompt": 42, "size": "256x256" }),
    ] {
        let app = app(&config(None, UNREACHABLE, UNREACHABLE, UNREACHABLE));
        let (status, body) = post(app, "/image", body.to_string()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "error": "Missing prompt." }));
    }
}

#[tokio::test]
async fn test_image_upstream_failure() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", Matcher::Regex(r"^/prompt/".to_string()))
        .with_status(500)
        .create_async()
        .await;
    let app = app(&config(None, UNREACHABLE, UNREACHABLE, &server.url()));

    let (status, body) = post(app, "/image", json!({ "prompt": "a cat" }).to_string()).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "error": "Image generation failed." }));
}

#[tokio::test]
async fn test_health() {
    let app = app(&ServerConfig::default());
    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(serde_json::from_slice::<Value>(&bytes).unwrap(), json!({ "status": "ok" }));
}
