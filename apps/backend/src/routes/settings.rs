//! Reminder settings endpoints

use axum::{extract::State, Json};

use lexibox_core::ReminderSettings;

use crate::error::{ApiError, Result};
use crate::models::UpdateReminderRequest;
use crate::AppState;

/// GET /api/settings/reminder
pub async fn get_reminder(State(state): State<AppState>) -> Json<ReminderSettings> {
    let progress = state.progress.lock().expect("progress lock");
    Json(progress.reminder)
}

/// PUT /api/settings/reminder
pub async fn update_reminder(
    State(state): State<AppState>,
    Json(payload): Json<UpdateReminderRequest>,
) -> Result<Json<ReminderSettings>> {
    if payload.hour.is_some_and(|h| h > 23) {
        return Err(ApiError::BadRequest("hour must be 0-23".to_string()));
    }
    if payload.minute.is_some_and(|m| m > 59) {
        return Err(ApiError::BadRequest("minute must be 0-59".to_string()));
    }

    let mut progress = state.progress.lock().expect("progress lock");
    payload.apply(&mut progress.reminder);

    if let Err(err) = state.store.save(&progress) {
        tracing::warn!("failed to persist settings: {}", err);
    }

    Ok(Json(progress.reminder))
}
