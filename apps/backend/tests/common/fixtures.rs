//! Test fixtures and factory functions for creating test data.

use serde_json::json;

/// Generate catalog content with `n` words, six words per lesson.
pub fn sample_catalog_content(n: usize) -> String {
    (0..n)
        .map(|i| format!("word{i} | noun | mot{i}\n"))
        .collect()
}

/// Body for starting a lesson session.
pub fn start_lesson_request(lesson_index: Option<usize>) -> serde_json::Value {
    match lesson_index {
        Some(index) => json!({ "lesson_index": index }),
        None => json!({}),
    }
}

/// Body for submitting a client-graded outcome.
pub fn submit_correct(correct: bool) -> serde_json::Value {
    json!({ "correct": correct })
}

/// Body for submitting a typed answer to grade server-side.
pub fn submit_typed(answer: &str) -> serde_json::Value {
    json!({ "typed_answer": answer })
}

/// Body for a reminder settings update.
pub fn reminder_update(enabled: bool, hour: u32, minute: u32) -> serde_json::Value {
    json!({ "enabled": enabled, "hour": hour, "minute": minute })
}
