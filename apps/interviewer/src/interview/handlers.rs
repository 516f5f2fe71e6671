//! Axum route handlers for the Interview API.
//!
//! One interview exists at a time. Starting a new one replaces the old one.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::interview::models::{QuestionRecord, Snapshot};
use crate::interview::scorecard::Scorecard;
use crate::interview::Session;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
pub struct StartRequest {
    #[serde(default)]
    pub total_questions: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct SubmitRequest {
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
    pub snapshot: Snapshot,
}

#[derive(Debug, Serialize)]
pub struct ReportResponse {
    pub report: String,
    pub scorecard: Option<Scorecard>,
}

#[derive(Debug, Serialize)]
pub struct TranscriptResponse {
    pub records: Vec<QuestionRecord>,
    pub scorecard: Option<Scorecard>,
}

fn no_interview() -> AppError {
    AppError::NotFound("No interview in progress. Start one first.".to_string())
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/interview
///
/// Creates a fresh interview (replacing any current one) and returns the introduction.
pub async fn handle_start(
    State(state): State<AppState>,
    Json(request): Json<StartRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    let total = request
        .total_questions
        .unwrap_or(state.default_total_questions);
    let mut session = Session::new(total, state.gateway.clone())?;
    let message = session.begin()?;
    let snapshot = session.snapshot();

    let mut slot = state.interview.lock().await;
    if slot.replace(session).is_some() {
        info!("Replaced the previous interview");
    }

    Ok(Json(MessageResponse { message, snapshot }))
}

/// GET /api/v1/interview
pub async fn handle_snapshot(State(state): State<AppState>) -> Result<Json<Snapshot>, AppError> {
    let slot = state.interview.lock().await;
    let session = slot.as_ref().ok_or_else(no_interview)?;
    Ok(Json(session.snapshot()))
}

/// POST /api/v1/interview/messages
///
/// Readiness confirmation or an answer, depending on the current phase.
pub async fn handle_submit(
    State(state): State<AppState>,
    Json(request): Json<SubmitRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    let mut slot = state.interview.lock().await;
    let session = slot.as_mut().ok_or_else(no_interview)?;
    let message = session.submit(&request.text).await?;
    Ok(Json(MessageResponse {
        message,
        snapshot: session.snapshot(),
    }))
}

/// POST /api/v1/interview/report
///
/// Final report. Only available after the last answer; safe to call repeatedly.
pub async fn handle_report(
    State(state): State<AppState>,
) -> Result<Json<ReportResponse>, AppError> {
    let slot = state.interview.lock().await;
    let session = slot.as_ref().ok_or_else(no_interview)?;
    let report = session.conclude().await?;
    Ok(Json(ReportResponse {
        report,
        scorecard: session.scorecard(),
    }))
}

/// GET /api/v1/interview/transcript
///
/// Every answered question with its evaluation, for the results view.
pub async fn handle_transcript(
    State(state): State<AppState>,
) -> Result<Json<TranscriptResponse>, AppError> {
    let slot = state.interview.lock().await;
    let session = slot.as_ref().ok_or_else(no_interview)?;
    Ok(Json(TranscriptResponse {
        records: session.records(),
        scorecard: session.scorecard(),
    }))
}

/// POST /api/v1/interview/reset
pub async fn handle_reset(State(state): State<AppState>) -> Result<Json<Snapshot>, AppError> {
    let mut slot = state.interview.lock().await;
    let session = slot.as_mut().ok_or_else(no_interview)?;
    session.reset();
    Ok(Json(session.snapshot()))
}
