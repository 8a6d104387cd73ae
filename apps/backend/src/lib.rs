pub mod error;
pub mod models;
pub mod routes;
pub mod services;

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;

use lexibox_core::{Catalog, Session, UserProgress};

use crate::services::storage::ProgressStore;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<Catalog>,
    pub progress: Arc<Mutex<UserProgress>>,
    pub sessions: Arc<Mutex<HashMap<Uuid, Session>>>,
    pub store: Arc<ProgressStore>,
}

impl AppState {
    /// Assemble state from a catalog and a progress store.
    pub fn new(catalog: Catalog, store: ProgressStore) -> Self {
        let progress = store.load();
        Self {
            catalog: Arc::new(catalog),
            progress: Arc::new(Mutex::new(progress)),
            sessions: Arc::new(Mutex::new(HashMap::new())),
            store: Arc::new(store),
        }
    }
}

/// Build the API router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        // Session routes
        .route("/api/sessions/lesson", post(routes::session::start_lesson))
        .route("/api/sessions/review", post(routes::session::start_review))
        .route("/api/sessions/{id}", get(routes::session::get_session))
        .route("/api/sessions/{id}/answers", post(routes::session::submit_answer))
        // Progress routes
        .route("/api/progress", get(routes::progress::overview))
        .route("/api/progress/course", get(routes::progress::course))
        // Settings routes
        .route(
            "/api/settings/reminder",
            get(routes::settings::get_reminder).put(routes::settings::update_reminder),
        )
        .with_state(state)
}

pub async fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let catalog_path =
        std::env::var("CATALOG_PATH").unwrap_or_else(|_| "data/catalog.txt".to_string());
    tracing::info!("Loading catalog from {}", catalog_path);
    let content = std::fs::read_to_string(&catalog_path)?;
    let catalog = Catalog::parse(&content)?;
    tracing::info!(
        "Catalog loaded: {} words across {} lessons",
        catalog.len(),
        catalog.total_lessons()
    );

    let progress_path =
        std::env::var("PROGRESS_PATH").unwrap_or_else(|_| "data/progress.json".to_string());
    let store = ProgressStore::new(progress_path);

    let state = AppState::new(catalog, store);

    // Daily reminder observer; reads state, never mutates it.
    tokio::spawn(services::reminder::run(state.clone()));

    let app = router(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port = std::env::var("PORT").unwrap_or_else(|_| "3000".to_string());
    let addr = format!("{}:{}", host, port);

    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn health_check() -> &'static str {
    "OK"
}
