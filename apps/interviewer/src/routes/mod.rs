pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::interview::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route(
            "/api/v1/interview",
            get(handlers::handle_snapshot).post(handlers::handle_start),
        )
        .route("/api/v1/interview/messages", post(handlers::handle_submit))
        .route("/api/v1/interview/report", post(handlers::handle_report))
        .route(
            "/api/v1/interview/transcript",
            get(handlers::handle_transcript),
        )
        .route("/api/v1/interview/reset", post(handlers::handle_reset))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;

    use async_trait::async_trait;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::gateway::LlmGateway;
    use crate::llm_client::{ChatBackend, CompletionOptions, LlmError};

    struct OfflineBackend;

    #[async_trait]
    impl ChatBackend for OfflineBackend {
        async fn complete(
            &self,
            _system: &str,
            _prompt: &str,
            _options: CompletionOptions,
        ) -> Result<String, LlmError> {
            Err(LlmError::EmptyContent)
        }
    }

    fn test_router() -> Router {
        let gateway = LlmGateway::new(Arc::new(OfflineBackend), Duration::from_secs(5));
        build_router(AppState::new(Arc::new(gateway), 3))
    }

    async fn send(router: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        let response = router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    #[tokio::test]
    async fn test_health() {
        let (status, body) = send(&test_router(), "GET", "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_snapshot_without_interview_is_not_found() {
        let (status, body) = send(&test_router(), "GET", "/api/v1/interview", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_full_interview_over_http() {
        let router = test_router();

        let (status, body) = send(
            &router,
            "POST",
            "/api/v1/interview",
            Some(json!({ "total_questions": 1 })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["snapshot"]["phase"], "introduction");

        let (status, body) = send(
            &router,
            "POST",
            "/api/v1/interview/report",
            None,
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["error"]["code"], "INVALID_PHASE");

        let (_, body) = send(
            &router,
            "POST",
            "/api/v1/interview/messages",
            Some(json!({ "text": "ready" })),
        )
        .await;
        assert_eq!(body["snapshot"]["phase"], "questioning");
        assert_eq!(body["snapshot"]["current_question_index"], 1);

        let (_, body) = send(
            &router,
            "POST",
            "/api/v1/interview/messages",
            Some(json!({ "text": "I would use INDEX with MATCH on a combined key" })),
        )
        .await;
        assert_eq!(body["snapshot"]["phase"], "conclusion");

        let (status, body) = send(&router, "POST", "/api/v1/interview/report", None).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["report"].as_str().unwrap().contains("Overall Score"));
        assert_eq!(body["scorecard"]["answered"], 1);

        let (_, body) = send(&router, "GET", "/api/v1/interview/transcript", None).await;
        assert_eq!(body["records"].as_array().unwrap().len(), 1);
        assert!(body["records"][0]["feedback"]
            .as_str()
            .unwrap()
            .contains("The ideal solution would be"));

        let (_, body) = send(&router, "POST", "/api/v1/interview/reset", None).await;
        assert_eq!(body["phase"], "introduction");
        assert_eq!(body["responses_count"], 0);
    }

    #[tokio::test]
    async fn test_zero_questions_rejected() {
        let (status, body) = send(
            &test_router(),
            "POST",
            "/api/v1/interview",
            Some(json!({ "total_questions": 0 })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }
}
