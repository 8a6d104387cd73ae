//! Common test utilities and fixtures for integration tests.
//!
//! The test context assembles the app with an inline word catalog and a
//! throwaway progress file, so tests run hermetically with no external
//! services.

pub mod fixtures;

use std::path::PathBuf;

use axum::Router;
use axum_test::TestServer;
use uuid::Uuid;

use lexibox_backend::services::storage::ProgressStore;
use lexibox_backend::{router, AppState};
use lexibox_core::Catalog;

pub struct TestContext {
    pub state: AppState,
    progress_path: PathBuf,
}

impl TestContext {
    /// Create a context over the default two-lesson test catalog.
    pub fn new() -> Self {
        Self::with_catalog(&fixtures::sample_catalog_content(12))
    }

    pub fn with_catalog(content: &str) -> Self {
        let catalog = Catalog::parse(content).expect("test catalog parses");
        let progress_path =
            std::env::temp_dir().join(format!("lexibox-test-{}.json", Uuid::new_v4()));
        let store = ProgressStore::new(&progress_path);
        let state = AppState::new(catalog, store);
        Self {
            state,
            progress_path,
        }
    }

    pub fn router(&self) -> Router {
        router(self.state.clone())
    }

    pub fn server(&self) -> TestServer {
        TestServer::new(self.router()).expect("test server starts")
    }
}

impl Drop for TestContext {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.progress_path);
    }
}

/// Start a lesson session and answer every task correctly until it
/// finishes. Returns the final submit response body.
pub async fn complete_lesson(server: &TestServer, lesson_index: usize) -> serde_json::Value {
    let response = server
        .post("/api/sessions/lesson")
        .json(&fixtures::start_lesson_request(Some(lesson_index)))
        .await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    let session_id = body["session_id"].as_str().expect("session id").to_string();
    complete_lesson_session(server, &session_id).await
}

/// Answer every remaining task of a session correctly until it finishes.
/// Returns the final submit response body.
pub async fn complete_lesson_session(server: &TestServer, session_id: &str) -> serde_json::Value {
    // generous bound; corrects never grow the queue
    for _ in 0..100 {
        let response = server
            .post(&format!("/api/sessions/{session_id}/answers"))
            .json(&fixtures::submit_correct(true))
            .await;
        response.assert_status_ok();
        let body: serde_json::Value = response.json();
        if body["finished"] == true {
            return body;
        }
    }
    panic!("session never finished");
}
