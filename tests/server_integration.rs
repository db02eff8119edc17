use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::{Json, Router, routing::post};
use axum_test::TestServer;
use portfolio_site::AppState;
use portfolio_site::chat::message::FALLBACK_TEXT;
use portfolio_site::config::AppConfig;
use portfolio_site::server::build_router;
use portfolio_site::skills::SkillCategory;
use serde_json::json;
use std::sync::Arc;
use tower::ServiceExt;

const PORTFOLIO: &str = r#"{
    "projects": [
        {"title": "Speech Recognition", "description": "Realtime ASR", "tags": ["audio"], "link": "https://example.com/asr"}
    ],
    "skills": [
        {"items": [{"name": "Rust"}, {"name": "Python"}, {"name": "PyTorch"}]},
        {"items": [{"name": "Docker"}, {"name": "Linux"}, {"name": "Git"}]}
    ]
}"#;

fn state_for(data_file: &str, static_dir: &str) -> AppState {
    let mut config = AppConfig::load_from_args(["portfolio-site", "--data-file", data_file])
        .expect("config");
    config.server.static_dir = static_dir.to_string();
    AppState::new(Arc::new(config)).expect("state")
}

fn chat_state(endpoint: Option<String>) -> AppState {
    let mut config = AppConfig::load_from_args(["portfolio-site"]).expect("config");
    config.chat.endpoint = endpoint;
    AppState::new(Arc::new(config)).expect("state")
}

/// Serve a chat backend that bolds the message, returning its `/api/chat` URL.
async fn spawn_chat_backend() -> String {
    let app = Router::new().route(
        "/api/chat",
        post(|Json(body): Json<serde_json::Value>| async move {
            let message = body["message"].as_str().unwrap_or_default().to_string();
            Json(json!({
                "response": {"text": format!("**{message}**"), "suggestions": ["Projects"]}
            }))
        }),
    );
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}/api/chat")
}

fn fixture() -> (tempfile::TempDir, AppState) {
    let dir = tempfile::tempdir().expect("tempdir");
    let data = dir.path().join("portfolio.json");
    std::fs::write(&data, PORTFOLIO).expect("write data");

    let static_dir = dir.path().join("static");
    std::fs::create_dir_all(static_dir.join("css")).expect("static dir");
    std::fs::write(static_dir.join("css/style.css"), "body { margin: 0; }").expect("css");

    let state = state_for(
        &data.to_string_lossy(),
        &static_dir.to_string_lossy(),
    );
    (dir, state)
}

#[tokio::test]
async fn test_home_page_renders_widgets() {
    let (_dir, state) = fixture();
    let server = TestServer::new(build_router(state)).unwrap();

    let response = server.get("/").await;
    response.assert_status_ok();
    let html = response.text();

    assert!(html.contains(r#"id="terminal-output""#));
    assert!(html.contains(" skills: Rust, Python, PyTorch, Docker, Linux, Git, ..."));
    assert!(html.contains(" job: "));
    assert!(html.contains(r#"id="top-up-btn""#));
    assert!(html.contains("display:none"));
    assert!(html.contains(r#"class="chatbot-container""#));
    assert!(html.contains("Speech Recognition"));
    assert!(html.contains(r#"href="https://example.com/asr""#));
    assert!(html.contains(r#"<script defer src="/static/js/main.js"></script>"#));
    assert!(html.contains(r#"data-threshold="100""#));
    assert!(html.contains(r#"action="/chat/send" method="post""#));
}

#[tokio::test]
async fn test_skills_api() {
    let (_dir, state) = fixture();
    let server = TestServer::new(build_router(state)).unwrap();

    let response = server.get("/api/skills").await;
    response.assert_status_ok();
    let skills: Vec<SkillCategory> = response.json();
    assert_eq!(skills.len(), 2);
    assert_eq!(skills[1].items[0].name, "Docker");
}

#[tokio::test]
async fn test_missing_data_file_renders_empty_portfolio() {
    let dir = tempfile::tempdir().expect("tempdir");
    let missing = dir.path().join("missing.json");
    let state = state_for(&missing.to_string_lossy(), "static");
    let server = TestServer::new(build_router(state)).unwrap();

    let html = server.get("/").await.text();
    assert!(html.contains("No projects yet."));
    // The skills line still renders, with an empty value
    assert!(html.contains(r#"<span class="content-text"> skills: </span>"#));

    let skills: Vec<SkillCategory> = server.get("/api/skills").await.json();
    assert!(skills.is_empty());
}

#[tokio::test]
async fn test_malformed_data_file_is_server_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let data = dir.path().join("portfolio.json");
    std::fs::write(&data, "{ nope").expect("write data");
    let state = state_for(&data.to_string_lossy(), "static");

    let response = build_router(state)
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_static_assets() {
    let (_dir, state) = fixture();
    let server = TestServer::new(build_router(state)).unwrap();

    let response = server.get("/static/css/style.css").await;
    response.assert_status_ok();
    assert!(response.text().contains("margin"));

    server
        .get("/static/nope.js")
        .expect_failure()
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_chat_send_returns_new_messages() {
    let endpoint = spawn_chat_backend().await;
    let server = TestServer::new(build_router(chat_state(Some(endpoint)))).unwrap();

    let response = server
        .post("/chat/send")
        .form(&[("message", "  <hi>  ")])
        .await;
    response.assert_status_ok();
    let html = response.text();

    assert_eq!(html.matches(r#"<div class="message "#).count(), 2);
    assert!(html.starts_with(r#"<div class="message user"><div class="message-content">&lt;hi&gt;</div>"#));
    assert!(html.contains("<strong>&lt;hi&gt;</strong>"));
    assert!(html.contains(r#"data-suggestion="Projects""#));
    assert!(!html.contains("typing-indicator"));
    // Only new messages; the welcome stays on the page
    assert!(!html.contains("portfolio assistant"));
}

#[tokio::test]
async fn test_chat_send_without_endpoint_is_fallback() {
    let server = TestServer::new(build_router(chat_state(None))).unwrap();

    let html = server.post("/chat/send").form(&[("message", "hello")]).await.text();
    assert!(html.contains(r#"<div class="message user">"#));
    assert!(html.contains(FALLBACK_TEXT));
    assert!(html.contains(r#"data-suggestion="Tell me about projects""#));
}

#[tokio::test]
async fn test_chat_send_blank_message_is_empty() {
    let server = TestServer::new(build_router(chat_state(None))).unwrap();

    let response = server.post("/chat/send").form(&[("message", "   ")]).await;
    response.assert_status_ok();
    assert!(response.text().is_empty());
}

#[tokio::test]
async fn test_page_script_served() {
    let dir = tempfile::tempdir().expect("tempdir");
    let static_dir = dir.path().join("static");
    std::fs::create_dir_all(static_dir.join("js")).expect("static dir");
    std::fs::write(static_dir.join("js/main.js"), "initChat();").expect("js");
    let state = state_for(
        &dir.path().join("missing.json").to_string_lossy(),
        &static_dir.to_string_lossy(),
    );
    let server = TestServer::new(build_router(state)).unwrap();

    let response = server.get("/static/js/main.js").await;
    response.assert_status_ok();
    assert_eq!(response.text(), "initChat();");
}
