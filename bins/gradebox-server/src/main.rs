mod config;
mod handlers;

use anyhow::{Context, Result};
use axum::routing::{get, post};
use axum::Router;
use gradebox_common::questions::QuestionStore;
use gradebox_judge::runner::PythonRunner;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

use crate::config::ServerConfig;

#[derive(Clone)]
pub struct AppState {
    pub questions: QuestionStore,
    pub runner: PythonRunner,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing subscriber
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    info!("Gradebox server booting...");

    let config = ServerConfig::from_env();
    let questions = QuestionStore::load(&config.questions_file)
        .with_context(|| format!("failed to load questions from {}", config.questions_file))?;
    info!(
        questions = questions.len(),
        file = %config.questions_file,
        "Question registry loaded"
    );

    let state = Arc::new(AppState {
        questions,
        runner: PythonRunner::new(&config.python_bin),
    });

    let app = Router::new()
        .route("/status", get(handlers::health_check))
        .route("/api/run", post(handlers::run_code))
        .route("/api/execute", post(handlers::execute_code))
        .route("/api/compile", post(handlers::compile_code))
        .route("/api/questions", get(handlers::list_questions))
        .route("/api/questions/:question_id", get(handlers::get_question))
        .with_state(state);

    let listener = TcpListener::bind(&config.addr)
        .await
        .with_context(|| format!("failed to bind to {}", config.addr))?;

    info!("HTTP server listening on {}", config.addr);
    info!("Ready to grade submissions");

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
