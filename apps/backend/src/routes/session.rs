//! Session lifecycle endpoints

use axum::{
    extract::{Path, State},
    Json,
};
use chrono::Utc;
use uuid::Uuid;

use lexibox_core::{matching, Session, SessionError, TaskKind};

use crate::error::{ApiError, Result};
use crate::models::{
    SessionResponse, StartLessonRequest, SubmitOutcomeRequest, SubmitOutcomeResponse, SummaryView,
    TaskView,
};
use crate::AppState;

/// POST /api/sessions/lesson
pub async fn start_lesson(
    State(state): State<AppState>,
    Json(payload): Json<StartLessonRequest>,
) -> Result<Json<SessionResponse>> {
    let lesson_index = match payload.lesson_index {
        Some(index) => index,
        None => state.progress.lock().expect("progress lock").current_lesson,
    };

    let mut rng = rand::thread_rng();
    let session = Session::lesson(&state.catalog, lesson_index, &mut rng)?;
    Ok(Json(register_session(&state, session)))
}

/// POST /api/sessions/review
pub async fn start_review(State(state): State<AppState>) -> Result<Json<SessionResponse>> {
    let mut rng = rand::thread_rng();
    let session = {
        let progress = state.progress.lock().expect("progress lock");
        Session::review(&state.catalog, &progress, Utc::now(), &mut rng)?
    };
    Ok(Json(register_session(&state, session)))
}

/// Store a freshly started session and build its first view.
fn register_session(state: &AppState, session: Session) -> SessionResponse {
    let session_id = Uuid::new_v4();
    let mut rng = rand::thread_rng();
    let response = SessionResponse::build(session_id, &session, &state.catalog, &mut rng);
    state
        .sessions
        .lock()
        .expect("sessions lock")
        .insert(session_id, session);
    response
}

/// GET /api/sessions/{id}
pub async fn get_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionResponse>> {
    let sessions = state.sessions.lock().expect("sessions lock");
    let session = sessions
        .get(&id)
        .ok_or_else(|| ApiError::NotFound(format!("session {id}")))?;

    let mut rng = rand::thread_rng();
    Ok(Json(SessionResponse::build(id, session, &state.catalog, &mut rng)))
}

/// POST /api/sessions/{id}/answers
pub async fn submit_answer(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<SubmitOutcomeRequest>,
) -> Result<Json<SubmitOutcomeResponse>> {
    let now = Utc::now();
    let mut sessions = state.sessions.lock().expect("sessions lock");
    let session = sessions
        .get_mut(&id)
        .ok_or_else(|| ApiError::NotFound(format!("session {id}")))?;

    let correct = grade(&state, session, &payload)?;

    let (outcome, summary) = {
        let mut progress = state.progress.lock().expect("progress lock");
        let outcome = session.submit_outcome(&mut progress, correct, now)?;
        // persistence is a side effect; a failed save never fails the answer
        if let Err(err) = state.store.save(&progress) {
            tracing::warn!("failed to persist progress: {}", err);
        }
        let summary = outcome
            .summary
            .clone()
            .map(|s| SummaryView::new(s, &progress));
        (outcome, summary)
    };

    let mut rng = rand::thread_rng();
    let task = session
        .current_task()
        .and_then(|t| TaskView::build(t, &state.catalog, &mut rng));
    let response = SubmitOutcomeResponse {
        correct: outcome.correct,
        xp_gained: outcome.xp_gained,
        combo: outcome.combo,
        finished: outcome.finished,
        task_count: session.task_count(),
        position: session.position(),
        summary,
        task,
    };

    if outcome.finished {
        sessions.remove(&id);
    }

    Ok(Json(response))
}

/// Resolve the submitted outcome, grading typed answers server-side.
fn grade(state: &AppState, session: &Session, payload: &SubmitOutcomeRequest) -> Result<bool> {
    let task = session
        .current_task()
        .ok_or_else(|| ApiError::from(SessionError::SessionFinished))?;

    if let Some(typed) = payload.typed_answer.as_deref() {
        let word = state
            .catalog
            .get(task.word_id)
            .ok_or_else(|| ApiError::Internal(format!("word {} missing from catalog", task.word_id)))?;
        let result = match task.kind {
            TaskKind::Assemble | TaskKind::Scramble => {
                matching::compare_assembly(typed, &word.english)
            }
            TaskKind::Choice => matching::compare_spelling(typed, &word.translation),
            _ => matching::compare_spelling(typed, &word.english),
        };
        return Ok(result.is_correct);
    }

    payload
        .correct
        .ok_or_else(|| ApiError::BadRequest("provide either `correct` or `typed_answer`".to_string()))
}
