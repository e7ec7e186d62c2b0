//! HttpBackend against an in-process mock of the solver API.

use axum::{
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use nl_client::{Backend, HttpBackend};
use nl_core::{Endpoint, PuzzleRequest, SolveError};
use serde_json::{json, Value};

async fn serve(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

fn puzzle() -> PuzzleRequest {
    PuzzleRequest::new("Alice, Bob and Carol sit in 3 seats.").unwrap()
}

#[tokio::test]
async fn baseline_posts_puzzle_and_decodes_result() {
    let app = Router::new().route(
        "/baseline",
        post(|Json(body): Json<Value>| async move {
            Json(json!({
                "model": "baseline_llm",
                "raw_response": format!("echo: {}", body["puzzle"].as_str().unwrap_or_default()),
                "validation": { "valid": true, "violations": [] }
            }))
        }),
    );
    let backend = HttpBackend::new(&serve(app).await).unwrap();

    let result = backend.baseline(&puzzle()).await.unwrap();
    assert_eq!(
        result.raw_response,
        "echo: Alice, Bob and Carol sit in 3 seats."
    );
    assert!(result.validation.valid);
    assert_eq!(result.model.as_deref(), Some("baseline_llm"));
}

#[tokio::test]
async fn neurosymbolic_decodes_solutions() {
    let app = Router::new().route(
        "/neurosymbolic",
        post(|| async {
            Json(json!({
                "structured_representation": { "people": ["Alice", "Bob"] },
                "total_solutions": 2,
                "solutions": [{ "Alice": 1, "Bob": 2 }]
            }))
        }),
    );
    let backend = HttpBackend::new(&serve(app).await).unwrap();

    let result = backend.neurosymbolic(&puzzle()).await.unwrap();
    assert_eq!(result.total_solutions, 2);
    assert_eq!(result.solutions.len(), 1);
    assert_eq!(result.first_solution().unwrap().seat_of("Bob"), Some(2));
}

#[tokio::test]
async fn non_success_status_is_http_status_error() {
    let app = Router::new().route(
        "/baseline",
        post(|| async { (StatusCode::SERVICE_UNAVAILABLE, "waking up") }),
    );
    let backend = HttpBackend::new(&serve(app).await).unwrap();

    let err = backend.baseline(&puzzle()).await.unwrap_err();
    assert_eq!(
        err,
        SolveError::HttpStatus {
            endpoint: Endpoint::Baseline,
            status: 503
        }
    );
}

#[tokio::test]
async fn unknown_route_is_http_status_error() {
    let backend = HttpBackend::new(&serve(Router::new()).await).unwrap();
    let err = backend.neurosymbolic(&puzzle()).await.unwrap_err();
    assert!(matches!(
        err,
        SolveError::HttpStatus {
            endpoint: Endpoint::NeuroSymbolic,
            status: 404
        }
    ));
}

#[tokio::test]
async fn html_body_with_ok_status_is_malformed() {
    let app = Router::new().route("/baseline", post(|| async { "<html>hello</html>" }));
    let backend = HttpBackend::new(&serve(app).await).unwrap();

    let err = backend.baseline(&puzzle()).await.unwrap_err();
    assert_eq!(err.kind(), "malformed_response");
}

#[tokio::test]
async fn missing_fields_are_malformed_not_defaulted() {
    let app = Router::new().route(
        "/neurosymbolic",
        post(|| async { Json(json!({ "total_solutions": 1 })) }),
    );
    let backend = HttpBackend::new(&serve(app).await).unwrap();

    let err = backend.neurosymbolic(&puzzle()).await.unwrap_err();
    assert!(matches!(
        err,
        SolveError::MalformedResponse {
            endpoint: Endpoint::NeuroSymbolic,
            ..
        }
    ));
}

#[tokio::test]
async fn refused_connection_is_network_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let backend = HttpBackend::new(&format!("http://{addr}")).unwrap();
    let err = backend.baseline(&puzzle()).await.unwrap_err();
    assert_eq!(err.kind(), "network");
    assert!(err.user_message().contains("cold start"));
}

#[tokio::test]
async fn health_returns_banner() {
    let app = Router::new().route(
        "/",
        get(|| async { Json(json!({ "message": "Neuro-Symbolic Seating Puzzle API Running" })) }),
    );
    let backend = HttpBackend::new(&serve(app).await).unwrap();

    let message = backend.health().await.unwrap();
    assert_eq!(message, "Neuro-Symbolic Seating Puzzle API Running");
}
