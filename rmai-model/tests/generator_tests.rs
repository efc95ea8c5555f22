//! Generator behaviour against a stub chat-completions server.

use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use rmai_core::{Location, Resident, RetryPolicy};
use rmai_model::{ChatClient, GenerationConfig, Generator, ModelError};
use serde_json::{Value, json};

async fn spawn_server(app: Router) -> (String, tokio::task::JoinHandle<()>) {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.expect("bind test listener");
    let addr = listener.local_addr().expect("listener addr");
    let handle = tokio::spawn(async move {
        axum::serve(listener, app).await.expect("server run");
    });
    (format!("http://{}/v1", addr), handle)
}

fn chat_client(base: &str) -> ChatClient {
    let config = GenerationConfig::builder()
        .base_url(base)
        .retry(RetryPolicy::immediate(3))
        .build()
        .unwrap();
    ChatClient::new("sk-test", config).unwrap()
}

fn citadel() -> Location {
    Location {
        name: "Citadel of Ricks".into(),
        kind: "Space station".into(),
        dimension: "unknown".into(),
        residents: vec![Resident { name: "Rick Sanchez".into(), ..Default::default() }],
        ..Default::default()
    }
}

/// Echoes the request settings back so tests can inspect them.
async fn echo_chat(Json(body): Json<Value>) -> impl IntoResponse {
    let content = format!(
        "model={} temperature={} max_tokens={} system={}",
        body["model"].as_str().unwrap_or_default(),
        body["temperature"],
        body["max_tokens"],
        body["messages"][0]["content"].as_str().unwrap_or_default(),
    );
    Json(json!({ "choices": [{ "message": { "role": "assistant", "content": content } }] }))
}

async fn always_fail(State(calls): State<Arc<AtomicU32>>) -> Response {
    calls.fetch_add(1, Ordering::SeqCst);
    (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({ "error": { "message": "boom" } })))
        .into_response()
}

#[tokio::test]
async fn remote_reply_is_returned() {
    let app = Router::new().route("/v1/chat/completions", post(echo_chat));
    let (base, handle) = spawn_server(app).await;

    let text = Generator::new(chat_client(&base)).summarize_location(&citadel()).await;
    assert!(text.contains("model=gpt-4o-mini"), "{text}");
    assert!(text.contains("max_tokens=400"));
    assert!(text.contains("temperature=0.8"));
    assert!(text.contains("sardonic Rick & Morty narrator"));

    handle.abort();
}

#[tokio::test]
async fn failures_are_retried_then_templated() {
    let calls = Arc::new(AtomicU32::new(0));
    let app = Router::new()
        .route("/v1/chat/completions", post(always_fail))
        .with_state(Arc::clone(&calls));
    let (base, handle) = spawn_server(app).await;

    let text = Generator::new(chat_client(&base)).summarize_location(&citadel()).await;
    assert!(text.starts_with("Welcome to Citadel of Ricks, a space station"));
    assert_eq!(calls.load(Ordering::SeqCst), 3);

    handle.abort();
}

#[tokio::test]
async fn chat_client_reports_exhaustion() {
    let calls = Arc::new(AtomicU32::new(0));
    let app = Router::new()
        .route("/v1/chat/completions", post(always_fail))
        .with_state(Arc::clone(&calls));
    let (base, handle) = spawn_server(app).await;

    let err = chat_client(&base).complete("hello").await.unwrap_err();
    match err {
        ModelError::RetriesExhausted { attempts, message } => {
            assert_eq!(attempts, 3);
            assert!(message.contains("boom"), "{message}");
        }
        other => panic!("unexpected error: {other}"),
    }

    handle.abort();
}

#[tokio::test]
async fn unreachable_server_falls_back_to_dialogue_template() {
    let rick = Resident { name: "Rick".into(), species: "Human".into(), ..Default::default() };
    let morty = Resident { name: "Morty".into(), species: "Human".into(), ..Default::default() };

    let text = Generator::new(chat_client("http://127.0.0.1:9/v1")).generate_dialogue(&rick, &morty).await;
    assert_eq!(text.lines().count(), 6);
    assert!(text.starts_with("Rick: You ever feel"));
}

#[tokio::test]
async fn template_only_generator_never_calls_out() {
    let text = Generator::template_only().summarize_location(&Location::default()).await;
    assert!(text.contains("the usual suspects"));
}
