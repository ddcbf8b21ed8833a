//! Match, quiz and typing game endpoints.
//!
//! Each game lives in the library until another game starts or the lesson
//! changes. Requests against a game that is not running are conflicts.

use axum::{extract::State, Json};
use chrono::Utc;

use crate::error::Result;
use crate::models::*;
use crate::services::library::{no_game, Game, Library};
use crate::AppState;

fn match_view(library: &Library) -> Result<MatchView> {
    match library.game() {
        Game::Match(game) => Ok(MatchView::from(game)),
        _ => Err(no_game("match")),
    }
}

fn quiz(library: &Library) -> Result<&QuizGame> {
    match library.game() {
        Game::Quiz(game) => Ok(game),
        _ => Err(no_game("quiz")),
    }
}

fn typing(library: &Library) -> Result<&TypingGame> {
    match library.game() {
        Game::Typing(game) => Ok(game),
        _ => Err(no_game("typing")),
    }
}

// === Match ===

/// POST /api/match
pub async fn start_match(State(state): State<AppState>) -> Result<Json<MatchView>> {
    let mut library = state.session(Utc::now()).await;
    library.start_match()?;
    Ok(Json(match_view(&library)?))
}

/// GET /api/match
pub async fn get_match(State(state): State<AppState>) -> Result<Json<MatchView>> {
    let library = state.session(Utc::now()).await;
    Ok(Json(match_view(&library)?))
}

/// POST /api/match/select
pub async fn select_tile(
    State(state): State<AppState>,
    Json(request): Json<SelectTileRequest>,
) -> Result<Json<SelectTileResponse>> {
    let now = Utc::now();
    let mut library = state.session(now).await;

    let outcome = library.select_tile(request.index, now)?;
    if matches!(outcome, SelectOutcome::Matched { .. } | SelectOutcome::Mismatched) {
        state.persist(&library).await?;
    }

    Ok(Json(SelectTileResponse {
        outcome,
        game: match_view(&library)?,
    }))
}

// === Quiz ===

/// POST /api/quiz
pub async fn start_quiz(State(state): State<AppState>) -> Result<Json<QuizView>> {
    let mut library = state.session(Utc::now()).await;
    library.start_quiz()?;
    Ok(Json(QuizView::from(quiz(&library)?)))
}

/// GET /api/quiz
pub async fn get_quiz(State(state): State<AppState>) -> Result<Json<QuizView>> {
    let library = state.session(Utc::now()).await;
    Ok(Json(QuizView::from(quiz(&library)?)))
}

/// POST /api/quiz/answer
pub async fn answer_quiz(
    State(state): State<AppState>,
    Json(request): Json<AnswerRequest>,
) -> Result<Json<AnswerResponse>> {
    let now = Utc::now();
    let mut library = state.session(now).await;

    let correct = library.answer_quiz(&request.choice, now)?;
    state.persist(&library).await?;

    let game = quiz(&library)?;
    Ok(Json(AnswerResponse {
        correct,
        expected: game.question().back.clone(),
        quiz: QuizView::from(game),
    }))
}

/// POST /api/quiz/next
pub async fn next_quiz(State(state): State<AppState>) -> Result<Json<QuizView>> {
    let mut library = state.session(Utc::now()).await;
    library.next_quiz_question()?;
    Ok(Json(QuizView::from(quiz(&library)?)))
}

// === Typing ===

/// POST /api/typing
pub async fn start_typing(State(state): State<AppState>) -> Result<Json<TypingView>> {
    let mut library = state.session(Utc::now()).await;
    library.start_typing()?;
    Ok(Json(TypingView::from(typing(&library)?)))
}

/// GET /api/typing
pub async fn get_typing(State(state): State<AppState>) -> Result<Json<TypingView>> {
    let library = state.session(Utc::now()).await;
    Ok(Json(TypingView::from(typing(&library)?)))
}

/// POST /api/typing/submit
pub async fn submit_typing(
    State(state): State<AppState>,
    Json(request): Json<SubmitRequest>,
) -> Result<Json<SubmitResponse>> {
    let now = Utc::now();
    let mut library = state.session(now).await;

    let correct = library.submit_typing(&request.input, now)?;
    if correct.is_some() {
        state.persist(&library).await?;
    }

    let game = typing(&library)?;
    Ok(Json(SubmitResponse {
        correct,
        expected: correct.map(|_| game.question().back.clone()),
        typing: TypingView::from(game),
    }))
}

/// POST /api/typing/next
pub async fn next_typing(State(state): State<AppState>) -> Result<Json<TypingView>> {
    let mut library = state.session(Utc::now()).await;
    library.next_typing_question()?;
    Ok(Json(TypingView::from(typing(&library)?)))
}
