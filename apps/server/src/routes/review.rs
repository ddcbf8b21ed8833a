//! Flashcard review endpoints

use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use study_core::Quality;

use crate::error::Result;
use crate::models::*;
use crate::services::library::Library;
use crate::AppState;

fn view(library: &Library, now: DateTime<Utc>) -> Result<ReviewView> {
    Ok(ReviewView::new(library.review(), library.current_lesson()?, now))
}

/// GET /api/review
pub async fn current(State(state): State<AppState>) -> Result<Json<ReviewView>> {
    let now = Utc::now();
    let library = state.session(now).await;
    Ok(Json(view(&library, now)?))
}

/// POST /api/review/flip
pub async fn flip(State(state): State<AppState>) -> Result<Json<ReviewView>> {
    let now = Utc::now();
    let mut library = state.session(now).await;
    library.flip();
    Ok(Json(view(&library, now)?))
}

/// POST /api/review/rate
pub async fn rate(
    State(state): State<AppState>,
    Json(request): Json<RateRequest>,
) -> Result<Json<RateResponse>> {
    let quality = Quality::from_number(request.quality)?;
    let now = Utc::now();
    let mut library = state.session(now).await;

    let result = library.rate(quality, now)?;
    state.persist(&library).await?;

    Ok(Json(RateResponse {
        graded: result.card,
        outcome: result.outcome,
        review: view(&library, now)?,
    }))
}

/// POST /api/review/reset
pub async fn reset(State(state): State<AppState>) -> Result<Json<ReviewView>> {
    let now = Utc::now();
    let mut library = state.session(now).await;
    library.reset_progress(now)?;
    state.persist(&library).await?;
    Ok(Json(view(&library, now)?))
}
