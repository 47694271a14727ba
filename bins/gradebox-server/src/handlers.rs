// HTTP route handlers for the gradebox server

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use gradebox_common::types::{RunMode, TestCase};
use gradebox_judge::{entry_point, executor};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tracing::{error, info};

use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct RunRequest {
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub question_id: String,
    #[serde(default)]
    pub test_cases: Vec<TestCase>,
}

#[derive(Debug, Deserialize)]
pub struct ExecuteRequest {
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub question_id: String,
}

#[derive(Debug, Deserialize)]
pub struct CompileRequest {
    #[serde(default)]
    pub code: String,
}

/// POST /api/run - Grade a submission against test cases
///
/// Test cases come from the request body; when the body carries none, the
/// question's declared examples are used instead.
pub async fn run_code(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<RunRequest>,
) -> impl IntoResponse {
    if payload.code.is_empty() {
        return (StatusCode::BAD_REQUEST, Json(json!({"error": "No code provided"})))
            .into_response();
    }

    let mut test_cases = payload.test_cases;
    if test_cases.is_empty() && !payload.question_id.is_empty() {
        test_cases = state.questions.example_test_cases(&payload.question_id);
    }

    if test_cases.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": "No test cases available for this question.",
                "details": "This question doesn't have test cases configured. Please use 'Execute Code' to run your code with examples, or contact the administrator to add test cases for this problem.",
                "suggestion": "Try using the 'Execute Code' button instead, which will use examples or generate simple test cases."
            })),
        )
            .into_response();
    }

    info!(
        question_id = %payload.question_id,
        test_cases = test_cases.len(),
        "Run request accepted"
    );

    let outcome =
        executor::run_submission(&state.runner, &payload.code, &test_cases, RunMode::Judged).await;
    (StatusCode::OK, Json(outcome)).into_response()
}

/// POST /api/execute - Run a submission once to observe its output
///
/// Uses the question's first example when one exists; otherwise a minimal
/// input is guessed from the method signature's parameter names.
pub async fn execute_code(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<ExecuteRequest>,
) -> impl IntoResponse {
    if payload.code.is_empty() {
        return (StatusCode::BAD_REQUEST, Json(json!({"error": "No code provided"})))
            .into_response();
    }

    let mut test_cases = state.questions.example_test_cases(&payload.question_id);
    test_cases.truncate(1);

    if test_cases.is_empty() {
        if let Some(input) = entry_point::placeholder_input(&payload.code) {
            test_cases.push(TestCase { input, expected: None });
        }
    }

    if test_cases.is_empty() {
        return (
            StatusCode::OK,
            Json(json!({
                "success": false,
                "error": "Cannot execute: No test cases or examples available. Please use 'Run Tests' with a question that has test cases."
            })),
        )
            .into_response();
    }

    info!(question_id = %payload.question_id, "Execute request accepted");

    let outcome =
        executor::run_submission(&state.runner, &payload.code, &test_cases, RunMode::Execute).await;
    (StatusCode::OK, Json(outcome)).into_response()
}

/// POST /api/compile - Syntax check without running any test case
pub async fn compile_code(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CompileRequest>,
) -> impl IntoResponse {
    if payload.code.is_empty() {
        return (StatusCode::BAD_REQUEST, Json(json!({"error": "No code provided"})))
            .into_response();
    }

    let output = match state.runner.check_syntax(&payload.code).await {
        Ok(output) => output,
        Err(e) => {
            error!(error = %e, "Syntax check failed to run");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"success": false, "error": format!("Server error: {}", e)})),
            )
                .into_response();
        }
    };

    if output.timed_out {
        return (
            StatusCode::OK,
            Json(json!({"success": false, "error": executor::TIMEOUT_MESSAGE})),
        )
            .into_response();
    }

    if !output.succeeded() {
        let diagnostic = if output.stderr.trim().is_empty() {
            output.stdout.trim().to_string()
        } else {
            output.stderr.trim().to_string()
        };
        return (StatusCode::OK, Json(json!({"success": false, "error": diagnostic})))
            .into_response();
    }

    if !entry_point::has_solution_class(&payload.code) {
        return (
            StatusCode::OK,
            Json(json!({
                "success": false,
                "error": "No 'Solution' class found in your code. Make sure to define a class named 'Solution'."
            })),
        )
            .into_response();
    }

    (
        StatusCode::OK,
        Json(json!({
            "success": true,
            "message": "Code compiled successfully! No syntax errors found.",
            "output": "✅ Syntax check passed\n✅ Solution class found"
        })),
    )
        .into_response()
}

/// GET /api/questions - List the full question registry
pub async fn list_questions(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    (StatusCode::OK, Json(state.questions.all().clone()))
}

/// GET /api/questions/{question_id} - Fetch one question
pub async fn get_question(
    State(state): State<Arc<AppState>>,
    Path(question_id): Path<String>,
) -> impl IntoResponse {
    match state.questions.get(&question_id) {
        Some(question) => (StatusCode::OK, Json(question.clone())).into_response(),
        None => (StatusCode::NOT_FOUND, Json(json!({"error": "Question not found"})))
            .into_response(),
    }
}

/// GET /status - Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}
