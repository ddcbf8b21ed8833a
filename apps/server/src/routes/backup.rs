//! Backup export and import

use axum::{
    extract::State,
    http::{header, HeaderValue},
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use study_core::backup;

use super::lessons::lessons_response;
use crate::error::Result;
use crate::models::LessonsResponse;
use crate::AppState;

/// GET /api/backup
pub async fn export(State(state): State<AppState>) -> Result<Response> {
    let now = Utc::now();
    let library = state.session(now).await;
    let json = backup::to_json(&library.snapshot(), now)?;

    let filename = format!(
        "attachment; filename=\"study-quest-backup-{}.json\"",
        now.format("%Y-%m-%d")
    );
    let mut response = ([(header::CONTENT_TYPE, "application/json")], json).into_response();
    if let Ok(value) = HeaderValue::from_str(&filename) {
        response.headers_mut().insert(header::CONTENT_DISPOSITION, value);
    }
    Ok(response)
}

/// POST /api/backup
///
/// Takes the raw file content. A backup that fails validation leaves the
/// library untouched.
pub async fn import(State(state): State<AppState>, body: String) -> Result<Json<LessonsResponse>> {
    let now = Utc::now();
    let parsed = backup::parse(&body, now)?;

    let mut library = state.session(now).await;
    library.import(parsed);
    state.persist(&library).await?;

    Ok(Json(lessons_response(&library, now)))
}
