//! Lesson endpoints

use axum::{
    extract::{Path, State},
    Json,
};
use chrono::{DateTime, Utc};

use crate::error::Result;
use crate::models::*;
use crate::services::library::Library;
use crate::AppState;

pub(crate) fn lessons_response(library: &Library, now: DateTime<Utc>) -> LessonsResponse {
    let current_id = library.current_lesson_id();
    LessonsResponse {
        current_lesson_id: current_id.to_string(),
        lessons: library
            .lessons()
            .iter()
            .map(|(id, lesson)| LessonSummary::new(id, lesson, id == current_id, now))
            .collect(),
    }
}

fn current_summary(library: &Library, now: DateTime<Utc>) -> Result<LessonSummary> {
    let lesson = library.current_lesson()?;
    Ok(LessonSummary::new(library.current_lesson_id(), lesson, true, now))
}

/// GET /api/lessons
pub async fn list(State(state): State<AppState>) -> Result<Json<LessonsResponse>> {
    let now = Utc::now();
    let library = state.session(now).await;
    Ok(Json(lessons_response(&library, now)))
}

/// POST /api/lessons
pub async fn create(
    State(state): State<AppState>,
    Json(request): Json<LessonNameRequest>,
) -> Result<Json<LessonSummary>> {
    let now = Utc::now();
    let mut library = state.session(now).await;
    library.create_lesson(&request.name)?;
    state.persist(&library).await?;
    Ok(Json(current_summary(&library, now)?))
}

/// PUT /api/lessons/:id
pub async fn rename(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<LessonNameRequest>,
) -> Result<Json<LessonsResponse>> {
    let now = Utc::now();
    let mut library = state.session(now).await;
    library.rename_lesson(&id, &request.name)?;
    state.persist(&library).await?;
    Ok(Json(lessons_response(&library, now)))
}

/// DELETE /api/lessons/:id
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<LessonsResponse>> {
    let now = Utc::now();
    let mut library = state.session(now).await;
    library.delete_lesson(&id)?;
    state.persist(&library).await?;
    Ok(Json(lessons_response(&library, now)))
}

/// POST /api/lessons/:id/select
pub async fn select(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<LessonSummary>> {
    let now = Utc::now();
    let mut library = state.session(now).await;
    library.switch_lesson(&id)?;
    state.persist(&library).await?;
    Ok(Json(current_summary(&library, now)?))
}

/// GET /api/stats
pub async fn stats(State(state): State<AppState>) -> Result<Json<Stats>> {
    let library = state.session(Utc::now()).await;
    Ok(Json(library.current_lesson()?.stats))
}
