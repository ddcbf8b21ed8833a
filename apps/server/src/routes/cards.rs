//! Card endpoints for the current lesson

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;

use crate::error::Result;
use crate::models::*;
use crate::AppState;

/// GET /api/cards
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Card>>> {
    let library = state.session(Utc::now()).await;
    Ok(Json(library.current_lesson()?.cards.clone()))
}

/// POST /api/cards
pub async fn create(
    State(state): State<AppState>,
    Json(request): Json<CreateCardRequest>,
) -> Result<(StatusCode, Json<Card>)> {
    let now = Utc::now();
    let mut library = state.session(now).await;
    let card = library.add_card(&request.front, &request.back, now)?;
    state.persist(&library).await?;
    Ok((StatusCode::CREATED, Json(card)))
}

/// DELETE /api/cards/:id
pub async fn delete(State(state): State<AppState>, Path(id): Path<CardId>) -> Result<StatusCode> {
    let mut library = state.session(Utc::now()).await;
    library.delete_card(id)?;
    state.persist(&library).await?;
    Ok(StatusCode::NO_CONTENT)
}
