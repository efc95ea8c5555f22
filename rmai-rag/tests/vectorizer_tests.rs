//! Vectorizer invariants and remote-provider fallback.

use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use rmai_core::RetryPolicy;
use rmai_rag::{OpenAIEmbeddingProvider, RagConfig, Vectorizer};
use proptest::prelude::*;
use serde_json::{Value, json};

async fn spawn_server(app: Router) -> (String, tokio::task::JoinHandle<()>) {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.expect("bind test listener");
    let addr = listener.local_addr().expect("listener addr");
    let handle = tokio::spawn(async move {
        axum::serve(listener, app).await.expect("server run");
    });
    (format!("http://{}", addr), handle)
}

fn norm(v: &[f32]) -> f64 {
    v.iter().map(|x| (*x as f64).powi(2)).sum::<f64>().sqrt()
}

fn remote_vectorizer(base: &str) -> Vectorizer {
    let provider = OpenAIEmbeddingProvider::new("sk-test")
        .unwrap()
        .with_base_url(base)
        .with_retry(RetryPolicy::immediate(3));
    Vectorizer::with_remote(provider, RagConfig::default())
}

async fn echo_embeddings(Json(body): Json<Value>) -> impl IntoResponse {
    let inputs = body["input"].as_array().cloned().unwrap_or_default();
    let data: Vec<Value> = inputs
        .iter()
        .enumerate()
        .map(|(i, _)| json!({ "index": i, "embedding": [i as f32 + 1.0, 2.0, 0.0] }))
        .collect();
    Json(json!({ "data": data }))
}

async fn failing_embeddings() -> impl IntoResponse {
    (StatusCode::UNAUTHORIZED, Json(json!({ "error": { "message": "invalid api key" } })))
}

/// 503 on the first request, echo embeddings afterwards.
async fn flaky_embeddings(
    State(calls): State<Arc<AtomicU32>>,
    Json(body): Json<Value>,
) -> Response {
    if calls.fetch_add(1, Ordering::SeqCst) == 0 {
        return StatusCode::SERVICE_UNAVAILABLE.into_response();
    }
    echo_embeddings(Json(body)).await.into_response()
}

async fn short_embeddings() -> impl IntoResponse {
    Json(json!({ "data": [{ "index": 0, "embedding": [1.0, 0.0] }] }))
}

#[tokio::test]
async fn remote_vectors_are_used_and_normalized() {
    let app = Router::new().route("/embeddings", post(echo_embeddings));
    let (base, handle) = spawn_server(app).await;

    let vectors = remote_vectorizer(&base).embed(&["rick", "morty"]).await.unwrap();
    assert_eq!(vectors.len(), 2);
    assert!(vectors.iter().all(|v| v.len() == 3));
    for v in &vectors {
        assert!((norm(v) - 1.0).abs() < 1e-6);
    }
    // [2, 2, 0] / |[2, 2, 0]|
    assert!((vectors[1][0] - vectors[1][1]).abs() < 1e-6);

    handle.abort();
}

#[tokio::test]
async fn remote_failure_falls_back_to_local_vectors() {
    let app = Router::new().route("/embeddings", post(failing_embeddings));
    let (base, handle) = spawn_server(app).await;

    let vectors = remote_vectorizer(&base).embed(&["rick", "morty"]).await.unwrap();
    assert_eq!(vectors.len(), 2);
    assert!(vectors.iter().all(|v| v.len() == 16));
    for v in &vectors {
        assert!((norm(v) - 1.0).abs() < 1e-6);
    }

    handle.abort();
}

#[tokio::test]
async fn transient_remote_error_is_retried() {
    let calls = Arc::new(AtomicU32::new(0));
    let app = Router::new()
        .route("/embeddings", post(flaky_embeddings))
        .with_state(Arc::clone(&calls));
    let (base, handle) = spawn_server(app).await;

    let vectors = remote_vectorizer(&base).embed(&["rick", "morty"]).await.unwrap();
    assert!(vectors.iter().all(|v| v.len() == 3));
    assert_eq!(calls.load(Ordering::SeqCst), 2);

    handle.abort();
}

#[tokio::test]
async fn exhausted_provider_reports_attempts() {
    let app = Router::new().route("/embeddings", post(failing_embeddings));
    let (base, handle) = spawn_server(app).await;

    let provider = OpenAIEmbeddingProvider::new("sk-test")
        .unwrap()
        .with_base_url(&base)
        .with_retry(RetryPolicy::immediate(2));
    let err = provider.embed_batch(&["rick"]).await.unwrap_err();
    let message = err.to_string();
    assert!(message.contains("gave up after 2 attempt(s)"), "{message}");
    assert!(message.contains("invalid api key"), "{message}");

    handle.abort();
}

#[tokio::test]
async fn malformed_remote_response_falls_back() {
    let app = Router::new().route("/embeddings", post(short_embeddings));
    let (base, handle) = spawn_server(app).await;

    let vectors = remote_vectorizer(&base).embed(&["rick", "morty", "summer"]).await.unwrap();
    assert_eq!(vectors.len(), 3);
    assert!(vectors.iter().all(|v| v.len() == 16));

    handle.abort();
}

#[tokio::test]
async fn unreachable_remote_falls_back() {
    // nothing listens on the discard port
    let vectors = remote_vectorizer("http://127.0.0.1:9").embed(&["hi"]).await.unwrap();
    assert_eq!(vectors.len(), 1);
    assert!((norm(&vectors[0]) - 1.0).abs() < 1e-6);
}

#[tokio::test]
async fn blank_texts_yield_zero_vectors_of_shared_dimension() {
    let vectors = Vectorizer::default().embed(&["", "squanch"]).await.unwrap();
    assert_eq!(vectors[0].len(), vectors[1].len());
    assert_eq!(norm(&vectors[0]), 0.0);
    assert!((norm(&vectors[1]) - 1.0).abs() < 1e-6);
}

mod prop_vectorizer_invariants {
    use super::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(48))]

        #[test]
        fn unit_norm_and_shared_dimension(
            texts in proptest::collection::vec("[A-Za-z0-9]{1,8}( [A-Za-z0-9,.!?-]{1,8}){0,5}", 1..16),
        ) {
            let rt = tokio::runtime::Runtime::new().unwrap();
            let refs: Vec<&str> = texts.iter().map(String::as_str).collect();
            let vectors = rt.block_on(Vectorizer::default().embed(&refs)).unwrap();

            prop_assert_eq!(vectors.len(), texts.len());
            let dimension = vectors[0].len();
            prop_assert!(dimension >= 16);
            for v in &vectors {
                prop_assert_eq!(v.len(), dimension);
                prop_assert!((norm(v) - 1.0).abs() < 1e-6);
            }
        }
    }
}
