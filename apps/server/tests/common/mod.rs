//! Common test utilities for integration tests.
//!
//! Every context gets its own data file in a temp directory and an identity
//! shuffle so card order is predictable. Display delays are zero unless a
//! test asks otherwise, so a pending advance fires on the next request.

pub mod fixtures;

use axum::Router;
use axum_test::TestServer;
use chrono::Utc;
use tempfile::TempDir;

use study_core::backup::Backup;
use study_core::{DisplayDelays, FixedSequence};
use study_quest_server::services::library::Library;
use study_quest_server::services::storage::StorageService;
use study_quest_server::{router, AppState};

#[allow(dead_code)]
pub struct TestContext {
    pub state: AppState,
    dir: TempDir,
}

#[allow(dead_code)]
impl TestContext {
    /// Context seeded with the sample lesson.
    pub fn new() -> Self {
        Self::with_backup(Backup::sample(Utc::now()))
    }

    pub fn with_backup(backup: Backup) -> Self {
        Self::build(backup, DisplayDelays::immediate())
    }

    /// Sample lesson with the given display delays.
    pub fn with_delays(delays: DisplayDelays) -> Self {
        Self::build(Backup::sample(Utc::now()), delays)
    }

    fn build(backup: Backup, delays: DisplayDelays) -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let storage = StorageService::new(dir.path().join("library.json"));
        let library = Library::new(
            backup,
            delays,
            Box::new(FixedSequence::identity()),
        );

        Self {
            state: AppState::new(library, storage),
            dir,
        }
    }

    pub fn router(&self) -> Router {
        router(self.state.clone())
    }

    pub fn server(&self) -> TestServer {
        TestServer::new(self.router()).expect("Failed to start test server")
    }

    /// Read back what the server last wrote to disk.
    pub async fn saved(&self) -> Option<Backup> {
        self.state.storage.load().await.expect("Failed to read data file")
    }

    pub fn data_dir(&self) -> &std::path::Path {
        self.dir.path()
    }
}
