//! HTTP client tests against an in-process mock of the analysis service.

mod common;

use std::collections::HashMap;
use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use parking_lot::Mutex;
use serde_json::{json, Value};

use common::harness;
use taskscope::client::{AnalysisBackend, AnalysisClient, ClientError};
use taskscope::form::{AnalyzeOutcome, TaskBuffer};
use taskscope::models::{AnalyzeRequest, FormInput};

#[derive(Clone, Default)]
struct Recorded {
    content_types: Arc<Mutex<Vec<Option<String>>>>,
    bodies: Arc<Mutex<Vec<Value>>>,
    queries: Arc<Mutex<Vec<HashMap<String, String>>>>,
}

/// Scores every task 10 and echoes the strategy, like a minimal service.
async fn analyze_handler(
    State(recorded): State<Recorded>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Json<Value> {
    recorded.content_types.lock().push(
        headers
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
    );
    recorded.bodies.lock().push(body.clone());

    let tasks: Vec<Value> = body["tasks"]
        .as_array()
        .cloned()
        .unwrap_or_default()
        .into_iter()
        .map(|t| json!({"title": t["title"], "score": 10, "meta": {"notes": []}}))
        .collect();
    Json(json!({"strategy": body["strategy"], "tasks": tasks}))
}

async fn suggest_handler(
    State(recorded): State<Recorded>,
    Query(params): Query<HashMap<String, String>>,
) -> Json<Value> {
    recorded.queries.lock().push(params);
    Json(json!({
        "strategy": "smart_balance",
        "suggestions": [{"title": "A", "score": 12, "explanation": "Balanced selection"}]
    }))
}

async fn spawn_service(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind mock service");
    let addr = listener.local_addr().expect("No local address");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Mock service failed");
    });
    format!("http://{}/api", addr)
}

async fn mock_service() -> (String, Recorded) {
    let recorded = Recorded::default();
    let app = Router::new()
        .route("/api/tasks/analyze/", post(analyze_handler))
        .route("/api/tasks/suggest/", get(suggest_handler))
        .with_state(recorded.clone());
    (spawn_service(app).await, recorded)
}

fn request(strategy: &str, tasks: Value) -> AnalyzeRequest {
    AnalyzeRequest {
        strategy: strategy.to_string(),
        tasks,
    }
}

mod analyze {
    use super::*;

    #[tokio::test]
    async fn posts_json_body() {
        let (url, recorded) = mock_service().await;
        let client = AnalysisClient::new(url);

        let body = client
            .analyze(&request("high_impact", json!([{"title": "T1"}])))
            .await
            .expect("Request failed");

        assert_eq!(body["tasks"][0]["title"], "T1");
        assert_eq!(body["tasks"][0]["score"], 10);
        assert_eq!(
            recorded.bodies.lock().clone(),
            vec![json!({"strategy": "high_impact", "tasks": [{"title": "T1"}]})]
        );
        assert_eq!(
            recorded.content_types.lock()[0].as_deref(),
            Some("application/json")
        );
    }

    #[tokio::test]
    async fn returns_json_body_of_error_status() {
        let app = Router::new().route(
            "/api/tasks/analyze/",
            post(|| async {
                (
                    StatusCode::BAD_REQUEST,
                    Json(json!({"error": "Task at index 0 missing title"})),
                )
            }),
        );
        let client = AnalysisClient::new(spawn_service(app).await);

        let body = client
            .analyze(&request("smart_balance", json!([{}])))
            .await
            .expect("Request failed");

        assert_eq!(body, json!({"error": "Task at index 0 missing title"}));
    }

    #[tokio::test]
    async fn non_json_body_is_an_error() {
        let app = Router::new().route(
            "/api/tasks/analyze/",
            post(|| async { (StatusCode::BAD_GATEWAY, "upstream unavailable").into_response() }),
        );
        let client = AnalysisClient::new(spawn_service(app).await);

        let err = client
            .analyze(&request("smart_balance", json!([])))
            .await
            .unwrap_err();

        match err {
            ClientError::InvalidBody { status, .. } => assert_eq!(status, StatusCode::BAD_GATEWAY),
            other => panic!("Expected InvalidBody, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn unreachable_service_is_an_http_error() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let client = AnalysisClient::new(format!("http://{}/api", addr));

        let err = client
            .analyze(&request("smart_balance", json!([])))
            .await
            .unwrap_err();

        assert!(matches!(err, ClientError::Http(_)));
    }
}

mod suggest {
    use super::*;

    #[tokio::test]
    async fn sends_tasks_and_strategy_as_query() {
        let (url, recorded) = mock_service().await;
        let client = AnalysisClient::new(url);

        let body = client
            .suggest(&request("deadline_driven", json!([{"title": "A & B"}])))
            .await
            .expect("Request failed");

        assert_eq!(body["suggestions"][0]["title"], "A");
        let queries = recorded.queries.lock().clone();
        assert_eq!(queries.len(), 1);
        assert_eq!(queries[0]["strategy"], "deadline_driven");
        let tasks: Value = serde_json::from_str(&queries[0]["tasks"]).unwrap();
        assert_eq!(tasks, json!([{"title": "A & B"}]));
    }
}

mod form_round_trip {
    use super::*;

    #[tokio::test]
    async fn added_tasks_are_scored_and_rendered() {
        let (url, recorded) = mock_service().await;
        let h = harness(AnalysisClient::new(url));

        for title in ["Draft", "Review"] {
            h.form.fill(FormInput {
                title: title.to_string(),
                importance: "6".to_string(),
                ..Default::default()
            });
            h.client.add_task().expect("Failed to add task");
        }

        let outcome = h
            .client
            .analyze("smart_balance")
            .await
            .expect("Analyze failed");

        assert_eq!(outcome, AnalyzeOutcome::Rendered(2));
        let titles: Vec<_> = h.results.cards().into_iter().map(|c| c.title).collect();
        assert_eq!(titles, vec!["Draft", "Review"]);

        let sent = recorded.bodies.lock()[0].clone();
        assert_eq!(sent["tasks"][0]["importance"], 6);
        assert_eq!(sent["tasks"][1]["due_date"], Value::Null);
        assert_eq!(sent["tasks"], serde_json::from_str::<Value>(&h.buffer.text()).unwrap());
    }

    #[tokio::test]
    async fn error_status_with_empty_tasks_renders_nothing() {
        let app = Router::new().route(
            "/api/tasks/analyze/",
            post(|| async {
                (
                    StatusCode::BAD_REQUEST,
                    Json(json!({"error": "Invalid JSON", "tasks": []})),
                )
            }),
        );
        let h = harness(AnalysisClient::new(spawn_service(app).await));
        h.buffer.set_text("[]".to_string());

        let outcome = h
            .client
            .analyze("smart_balance")
            .await
            .expect("Analyze failed");

        assert_eq!(outcome, AnalyzeOutcome::Rendered(0));
        assert!(h.notifier.alerts().is_empty());
    }
}
