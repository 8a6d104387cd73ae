//! Progress projection endpoints

use axum::{extract::State, Json};
use chrono::Utc;

use crate::models::{CourseResponse, LessonOverview, ProgressOverview};
use crate::AppState;

/// GET /api/progress
pub async fn overview(State(state): State<AppState>) -> Json<ProgressOverview> {
    let now = Utc::now();
    let progress = state.progress.lock().expect("progress lock");

    Json(ProgressOverview {
        total_xp: progress.total_xp,
        day_streak: progress.day_streak,
        words_learned: progress.words_learned(),
        lessons_completed: progress.lessons_completed(),
        due_reviews: progress.due_review_count(now),
        current_lesson: progress.current_lesson,
        total_lessons: state.catalog.total_lessons(),
        last_study_date: progress.last_study_date,
    })
}

/// GET /api/progress/course
pub async fn course(State(state): State<AppState>) -> Json<CourseResponse> {
    let progress = state.progress.lock().expect("progress lock");

    let lessons = (0..state.catalog.total_lessons())
        .map(|index| LessonOverview {
            lesson_index: index,
            word_count: state.catalog.lesson_words(index).len(),
            stars: progress.stars_for_lesson(index),
            is_completed: progress
                .lesson_stats
                .get(&index)
                .is_some_and(|l| l.is_completed),
            is_unlocked: index <= progress.current_lesson,
        })
        .collect();

    Json(CourseResponse { lessons })
}
