pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;

use std::sync::Arc;

use axum::{
    routing::{get, post, put},
    Router,
};
use chrono::{DateTime, Utc};
use study_core::backup::Backup;
use study_core::ThreadRandom;
use tokio::sync::{Mutex, MutexGuard};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;
use crate::services::library::Library;
use crate::services::storage::StorageService;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub library: Arc<Mutex<Library>>,
    pub storage: Arc<StorageService>,
}

impl AppState {
    pub fn new(library: Library, storage: StorageService) -> Self {
        Self {
            library: Arc::new(Mutex::new(library)),
            storage: Arc::new(storage),
        }
    }

    /// Lock the library with any expired display delay already applied.
    pub async fn session(&self, now: DateTime<Utc>) -> MutexGuard<'_, Library> {
        let mut library = self.library.lock().await;
        library.tick(now);
        library
    }

    /// Save the library to disk.
    pub async fn persist(&self, library: &Library) -> error::Result<()> {
        self.storage.save(&library.snapshot()).await?;
        Ok(())
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        // Lessons
        .route("/api/lessons", get(routes::lessons::list).post(routes::lessons::create))
        .route(
            "/api/lessons/:id",
            put(routes::lessons::rename).delete(routes::lessons::delete),
        )
        .route("/api/lessons/:id/select", post(routes::lessons::select))
        .route("/api/stats", get(routes::lessons::stats))
        // Cards
        .route("/api/cards", get(routes::cards::list).post(routes::cards::create))
        .route("/api/cards/:id", axum::routing::delete(routes::cards::delete))
        // Review
        .route("/api/review", get(routes::review::current))
        .route("/api/review/flip", post(routes::review::flip))
        .route("/api/review/rate", post(routes::review::rate))
        .route("/api/review/reset", post(routes::review::reset))
        // Games
        .route(
            "/api/match",
            get(routes::games::get_match).post(routes::games::start_match),
        )
        .route("/api/match/select", post(routes::games::select_tile))
        .route(
            "/api/quiz",
            get(routes::games::get_quiz).post(routes::games::start_quiz),
        )
        .route("/api/quiz/answer", post(routes::games::answer_quiz))
        .route("/api/quiz/next", post(routes::games::next_quiz))
        .route(
            "/api/typing",
            get(routes::games::get_typing).post(routes::games::start_typing),
        )
        .route("/api/typing/submit", post(routes::games::submit_typing))
        .route("/api/typing/next", post(routes::games::next_typing))
        // Backup
        .route(
            "/api/backup",
            get(routes::backup::export).post(routes::backup::import),
        )
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
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

    let config = Config::from_env()?;

    tracing::info!(path = %config.data_path.display(), "Loading library...");
    let storage = StorageService::new(&config.data_path);
    let backup = match storage.load().await? {
        Some(backup) => backup,
        None => {
            tracing::info!("No saved library, starting with the sample lesson");
            let backup = Backup::sample(Utc::now());
            storage.save(&backup).await?;
            backup
        }
    };

    let library = Library::new(backup, config.delays, Box::new(ThreadRandom::new()));
    let app = router(AppState::new(library, storage));

    let addr = config.addr();
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn health_check() -> &'static str {
    "OK"
}
