use crate::infra::{AppState, QuizService};
use agent_quiz::error::AppError;
use agent_quiz::quiz::{profiles, QuestionSet, QuizResult, ResultProfile};
use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::debug;

/// Submission body. `choices` maps question index to an option label,
/// `answers` maps question index to a raw score expression.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct EvaluateRequest {
    #[serde(default)]
    pub(crate) choices: BTreeMap<usize, String>,
    #[serde(default)]
    pub(crate) answers: BTreeMap<usize, Option<String>>,
}

#[derive(Debug, Serialize)]
pub(crate) struct EvaluateResponse {
    pub(crate) evaluated_at: DateTime<Utc>,
    #[serde(flatten)]
    pub(crate) result: QuizResult,
}

#[derive(Debug, Serialize)]
pub(crate) struct ProfileView {
    pub(crate) code: String,
    pub(crate) known: bool,
    pub(crate) profile: ResultProfile,
}

pub(crate) fn quiz_router(service: Arc<QuizService>) -> Router {
    Router::new()
        .route("/api/v1/quiz/questions", get(questions_endpoint))
        .route("/api/v1/quiz/evaluate", post(evaluate_endpoint))
        .route("/api/v1/quiz/profiles", get(profiles_endpoint))
        .route("/api/v1/quiz/profiles/:code", get(profile_endpoint))
        .with_state(service)
}

pub(crate) fn with_quiz_routes(service: Arc<QuizService>) -> Router {
    quiz_router(service)
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn questions_endpoint(
    State(service): State<Arc<QuizService>>,
) -> Json<QuestionSet> {
    Json(service.questions().clone())
}

pub(crate) async fn evaluate_endpoint(
    State(service): State<Arc<QuizService>>,
    Json(payload): Json<EvaluateRequest>,
) -> Result<Json<EvaluateResponse>, AppError> {
    let EvaluateRequest { choices, answers } = payload;
    let answers = service.answers_from(&choices, &answers)?;
    let result = service.evaluate(&answers)?;

    let delay = service.reveal_delay();
    if !delay.is_zero() {
        debug!(?delay, "holding result for reveal");
        tokio::time::sleep(delay).await;
    }

    Ok(Json(EvaluateResponse {
        evaluated_at: Utc::now(),
        result,
    }))
}

pub(crate) async fn profiles_endpoint() -> Json<Vec<ProfileView>> {
    let views = profiles::all()
        .map(|(code, profile)| ProfileView {
            code: code.to_string(),
            known: true,
            profile: *profile,
        })
        .collect();
    Json(views)
}

pub(crate) async fn profile_endpoint(Path(code): Path<String>) -> Json<ProfileView> {
    let code = code.trim().to_ascii_uppercase();
    let known = profiles::lookup(&code).is_some();
    Json(ProfileView {
        profile: *profiles::resolve(&code),
        known,
        code,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::fixtures::service;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use serde_json::Value;
    use tower::ServiceExt;

    async fn send(router: Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = router.oneshot(request).await.expect("router responds");
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body reads");
        let body = serde_json::from_slice(&bytes).expect("json body");
        (status, body)
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::post(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .expect("request builds")
    }

    #[tokio::test]
    async fn questions_endpoint_lists_dataset() {
        let router = quiz_router(Arc::new(service()));
        let request = Request::get("/api/v1/quiz/questions")
            .body(Body::empty())
            .expect("request builds");

        let (status, body) = send(router, request).await;
        assert_eq!(status, StatusCode::OK);
        let questions = body.as_array().expect("array");
        assert_eq!(questions.len(), 2);
        assert_eq!(questions[1]["options"].as_array().expect("options").len(), 2);
    }

    #[tokio::test]
    async fn evaluate_endpoint_returns_result_for_complete_choices() {
        let router = quiz_router(Arc::new(service()));
        let request = post_json(
            "/api/v1/quiz/evaluate",
            json!({ "choices": { "0": "A", "1": "a" } }),
        );

        let (status, body) = send(router, request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["type_code"], "AIEC");
        assert_eq!(body["role"], "Duelist");
        assert_eq!(body["tally"]["Duelist"], 4);
        assert_eq!(body["tally"]["Aggro"], 6);
        assert!(body["evaluated_at"].is_string());
        assert!(body["profile"]["title"].is_string());
    }

    #[tokio::test]
    async fn evaluate_endpoint_accepts_raw_expressions() {
        let router = quiz_router(Arc::new(service()));
        let request = post_json(
            "/api/v1/quiz/evaluate",
            json!({ "answers": { "0": "BadSegmentNoColon,Logic:5", "1": null } }),
        );

        let (status, body) = send(router, request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["type_code"], "PLEC");
        assert_eq!(body["tally"]["Logic"], 5);
    }

    #[tokio::test]
    async fn evaluate_endpoint_rejects_answers_for_missing_questions() {
        let router = quiz_router(Arc::new(service()));
        let request = post_json(
            "/api/v1/quiz/evaluate",
            json!({ "answers": { "0": "Logic:1", "1": "Stoic:1", "57": "Duelist:1000" } }),
        );

        let (status, body) = send(router, request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"]
            .as_str()
            .expect("error message")
            .contains("question 57 does not exist"));
    }

    #[tokio::test]
    async fn evaluate_endpoint_rejects_incomplete_submission() {
        let router = quiz_router(Arc::new(service()));
        let request = post_json("/api/v1/quiz/evaluate", json!({ "choices": { "0": "B" } }));

        let (status, body) = send(router, request).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["answered"], 1);
        assert_eq!(body["total"], 2);
    }

    #[tokio::test]
    async fn evaluate_endpoint_rejects_options_the_question_lacks() {
        let router = quiz_router(Arc::new(service()));
        let request = post_json(
            "/api/v1/quiz/evaluate",
            json!({ "choices": { "0": "A", "1": "D" } }),
        );

        let (status, body) = send(router, request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"]
            .as_str()
            .expect("error message")
            .contains("no option D"));
    }

    #[tokio::test]
    async fn profile_endpoint_falls_back_for_unknown_codes() {
        let router = quiz_router(Arc::new(service()));
        let request = Request::get("/api/v1/quiz/profiles/zzzz")
            .body(Body::empty())
            .expect("request builds");

        let (status, body) = send(router, request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["code"], "ZZZZ");
        assert_eq!(body["known"], false);
        assert_eq!(
            body["profile"]["title"],
            profiles::FALLBACK_PROFILE.title
        );
    }

    #[tokio::test]
    async fn profiles_endpoint_lists_sixteen_codes() {
        let Json(views) = profiles_endpoint().await;
        assert_eq!(views.len(), 16);
        assert!(views.iter().all(|view| view.known));
    }
}
