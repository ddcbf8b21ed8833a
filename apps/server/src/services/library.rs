//! In-memory lesson library and the active practice session.
//!
//! The library is the single owner of every lesson. Handlers lock it, call one
//! operation and persist a snapshot. The review cursor survives mode changes;
//! a game session is replaced whenever another game starts and dropped when
//! the lesson changes.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use study_core::backup::{Backup, DEFAULT_LESSON_ID};
use study_core::{
    Card, CardId, DisplayDelays, Lesson, MatchGame, Quality, QuizGame, RandomSource,
    ReviewSession, SchedulingResult, SelectOutcome, Sm2Lite, TypingGame,
};
use uuid::Uuid;

use crate::error::{ApiError, Result};

/// The game currently being played, if any.
#[derive(Debug, Default)]
pub enum Game {
    #[default]
    Idle,
    Match(MatchGame),
    Quiz(QuizGame),
    Typing(TypingGame),
}

pub struct Library {
    lessons: BTreeMap<String, Lesson>,
    current_lesson_id: String,
    review: ReviewSession,
    game: Game,
    algorithm: Sm2Lite,
    delays: DisplayDelays,
    rng: Box<dyn RandomSource + Send + Sync>,
}

impl Library {
    /// Build a library from a loaded backup.
    pub fn new(backup: Backup, delays: DisplayDelays, rng: Box<dyn RandomSource + Send + Sync>) -> Self {
        let (lessons, current_lesson_id) = normalize(backup);
        Self {
            lessons,
            current_lesson_id,
            review: ReviewSession::new(),
            game: Game::Idle,
            algorithm: Sm2Lite::default(),
            delays,
            rng,
        }
    }

    /// Everything worth saving, in backup form.
    pub fn snapshot(&self) -> Backup {
        Backup {
            lessons: self.lessons.clone(),
            current_lesson_id: self.current_lesson_id.clone(),
            export_date: None,
        }
    }

    /// Replace every lesson with an imported backup.
    pub fn import(&mut self, backup: Backup) {
        let (lessons, current_lesson_id) = normalize(backup);
        self.lessons = lessons;
        self.enter_lesson(current_lesson_id);
        tracing::info!(
            lessons = self.lessons.len(),
            current = %self.current_lesson_id,
            "library imported"
        );
    }

    /// Fire any display delay that has run out.
    pub fn tick(&mut self, now: DateTime<Utc>) {
        let Some(lesson) = self.lessons.get(&self.current_lesson_id) else {
            return;
        };
        let advanced = match &mut self.game {
            Game::Idle => Ok(false),
            Game::Match(game) => Ok(game.tick(now)),
            Game::Quiz(game) => game.tick(&lesson.cards, self.rng.as_mut(), now),
            Game::Typing(game) => game.tick(&lesson.cards, self.rng.as_mut(), now),
        };
        if let Err(e) = advanced {
            tracing::warn!(error = %e, "could not advance game");
        }
    }

    // === Lessons ===

    pub fn lessons(&self) -> &BTreeMap<String, Lesson> {
        &self.lessons
    }

    pub fn current_lesson_id(&self) -> &str {
        &self.current_lesson_id
    }

    pub fn current_lesson(&self) -> Result<&Lesson> {
        current(&self.lessons, &self.current_lesson_id)
    }

    /// Create an empty lesson and make it current.
    pub fn create_lesson(&mut self, name: &str) -> Result<String> {
        let name = required_name(name)?;
        let id = Uuid::new_v4().to_string();
        self.lessons.insert(id.clone(), Lesson::new(name));
        self.enter_lesson(id.clone());
        tracing::info!(lesson = %id, "lesson created");
        Ok(id)
    }

    pub fn rename_lesson(&mut self, id: &str, name: &str) -> Result<()> {
        let name = required_name(name)?;
        let lesson = self
            .lessons
            .get_mut(id)
            .ok_or_else(|| lesson_not_found(id))?;
        lesson.name = name;
        Ok(())
    }

    /// Delete a lesson. The last remaining lesson cannot be deleted.
    pub fn delete_lesson(&mut self, id: &str) -> Result<()> {
        if !self.lessons.contains_key(id) {
            return Err(lesson_not_found(id));
        }
        if self.lessons.len() <= 1 {
            return Err(ApiError::Conflict("cannot delete the last lesson".to_string()));
        }

        self.lessons.remove(id);
        if self.current_lesson_id == id {
            self.enter_lesson(first_lesson_id(&self.lessons));
        }
        tracing::info!(lesson = %id, "lesson deleted");
        Ok(())
    }

    pub fn switch_lesson(&mut self, id: &str) -> Result<()> {
        if !self.lessons.contains_key(id) {
            return Err(lesson_not_found(id));
        }
        self.enter_lesson(id.to_string());
        Ok(())
    }

    fn enter_lesson(&mut self, id: String) {
        self.current_lesson_id = id;
        self.review = ReviewSession::new();
        self.game = Game::Idle;
    }

    // === Cards ===

    pub fn add_card(&mut self, front: &str, back: &str, now: DateTime<Utc>) -> Result<Card> {
        let (front, back) = (front.trim(), back.trim());
        if front.is_empty() || back.is_empty() {
            return Err(ApiError::BadRequest("front and back are required".to_string()));
        }

        let lesson = current_mut(&mut self.lessons, &self.current_lesson_id)?;
        let card = Card::new(lesson.next_card_id(), front, back, now);
        lesson.cards.push(card.clone());
        Ok(card)
    }

    pub fn delete_card(&mut self, id: CardId) -> Result<()> {
        let lesson = current_mut(&mut self.lessons, &self.current_lesson_id)?;
        let before = lesson.cards.len();
        lesson.cards.retain(|c| c.id != id);
        if lesson.cards.len() == before {
            return Err(ApiError::NotFound(format!("card {id}")));
        }
        Ok(())
    }

    // === Review ===

    pub fn review(&self) -> &ReviewSession {
        &self.review
    }

    pub fn flip(&mut self) -> bool {
        self.review.flip()
    }

    pub fn rate(&mut self, quality: Quality, now: DateTime<Utc>) -> Result<SchedulingResult> {
        let lesson = current_mut(&mut self.lessons, &self.current_lesson_id)?;
        Ok(self.review.rate(&self.algorithm, lesson, quality, now)?)
    }

    pub fn reset_progress(&mut self, now: DateTime<Utc>) -> Result<()> {
        let lesson = current_mut(&mut self.lessons, &self.current_lesson_id)?;
        self.review.reset_progress(lesson, now);
        Ok(())
    }

    // === Games ===

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn start_match(&mut self) -> Result<()> {
        let lesson = current(&self.lessons, &self.current_lesson_id)?;
        let game = MatchGame::start(&lesson.cards, self.delays, self.rng.as_mut())?;
        self.game = Game::Match(game);
        Ok(())
    }

    pub fn select_tile(&mut self, index: usize, now: DateTime<Utc>) -> Result<SelectOutcome> {
        let lesson = current_mut(&mut self.lessons, &self.current_lesson_id)?;
        let Game::Match(game) = &mut self.game else {
            return Err(no_game("match"));
        };
        Ok(game.select(index, &mut lesson.stats, now)?)
    }

    pub fn start_quiz(&mut self) -> Result<()> {
        let lesson = current(&self.lessons, &self.current_lesson_id)?;
        let game = QuizGame::start(&lesson.cards, self.delays, self.rng.as_mut())?;
        self.game = Game::Quiz(game);
        Ok(())
    }

    pub fn answer_quiz(&mut self, choice: &str, now: DateTime<Utc>) -> Result<bool> {
        let lesson = current_mut(&mut self.lessons, &self.current_lesson_id)?;
        let Game::Quiz(game) = &mut self.game else {
            return Err(no_game("quiz"));
        };
        Ok(game.answer(choice, &mut lesson.stats, now)?)
    }

    pub fn next_quiz_question(&mut self) -> Result<()> {
        let lesson = current(&self.lessons, &self.current_lesson_id)?;
        let Game::Quiz(game) = &mut self.game else {
            return Err(no_game("quiz"));
        };
        Ok(game.next_question(&lesson.cards, self.rng.as_mut())?)
    }

    pub fn start_typing(&mut self) -> Result<()> {
        let lesson = current(&self.lessons, &self.current_lesson_id)?;
        let game = TypingGame::start(&lesson.cards, self.delays, self.rng.as_mut())?;
        self.game = Game::Typing(game);
        Ok(())
    }

    pub fn submit_typing(&mut self, input: &str, now: DateTime<Utc>) -> Result<Option<bool>> {
        let lesson = current_mut(&mut self.lessons, &self.current_lesson_id)?;
        let Game::Typing(game) = &mut self.game else {
            return Err(no_game("typing"));
        };
        Ok(game.submit(input, &mut lesson.stats, now)?)
    }

    pub fn next_typing_question(&mut self) -> Result<()> {
        let lesson = current(&self.lessons, &self.current_lesson_id)?;
        let Game::Typing(game) = &mut self.game else {
            return Err(no_game("typing"));
        };
        Ok(game.next_question(&lesson.cards, self.rng.as_mut())?)
    }
}

/// A backup with no lessons gets an empty default lesson, and an unknown
/// current id falls back to the first lesson.
fn normalize(backup: Backup) -> (BTreeMap<String, Lesson>, String) {
    let mut lessons = backup.lessons;
    if lessons.is_empty() {
        lessons.insert(DEFAULT_LESSON_ID.to_string(), Lesson::new("My Lesson"));
    }
    let current_lesson_id = if lessons.contains_key(&backup.current_lesson_id) {
        backup.current_lesson_id
    } else {
        first_lesson_id(&lessons)
    };
    (lessons, current_lesson_id)
}

fn current<'a>(lessons: &'a BTreeMap<String, Lesson>, id: &str) -> Result<&'a Lesson> {
    lessons.get(id).ok_or_else(|| lesson_not_found(id))
}

fn current_mut<'a>(lessons: &'a mut BTreeMap<String, Lesson>, id: &str) -> Result<&'a mut Lesson> {
    lessons.get_mut(id).ok_or_else(|| lesson_not_found(id))
}

fn first_lesson_id(lessons: &BTreeMap<String, Lesson>) -> String {
    lessons.keys().next().cloned().unwrap_or_else(|| DEFAULT_LESSON_ID.to_string())
}

fn required_name(name: &str) -> Result<String> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ApiError::BadRequest("lesson name is required".to_string()));
    }
    Ok(name.to_string())
}

fn lesson_not_found(id: &str) -> ApiError {
    ApiError::NotFound(format!("lesson {id}"))
}

pub(crate) fn no_game(mode: &str) -> ApiError {
    ApiError::Conflict(format!("no {mode} game in progress"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use study_core::{FixedSequence, StudyError};

    fn library() -> Library {
        Library::new(
            Backup::sample(Utc::now()),
            DisplayDelays::immediate(),
            Box::new(FixedSequence::identity()),
        )
    }

    #[test]
    fn starts_on_sample_lesson() {
        let library = library();
        assert_eq!(library.current_lesson_id(), DEFAULT_LESSON_ID);
        assert_eq!(library.current_lesson().unwrap().cards.len(), 6);
    }

    #[test]
    fn empty_backup_gets_default_lesson() {
        let backup = Backup {
            lessons: BTreeMap::new(),
            current_lesson_id: "gone".to_string(),
            export_date: None,
        };
        let library = Library::new(
            backup,
            DisplayDelays::default(),
            Box::new(FixedSequence::identity()),
        );
        assert_eq!(library.current_lesson_id(), DEFAULT_LESSON_ID);
        assert!(library.current_lesson().unwrap().cards.is_empty());
    }

    #[test]
    fn created_lesson_becomes_current() {
        let mut library = library();
        let id = library.create_lesson("  Chemistry ").unwrap();
        assert_eq!(library.current_lesson_id(), id);
        let lesson = library.current_lesson().unwrap();
        assert_eq!(lesson.name, "Chemistry");
        assert!(lesson.cards.is_empty());
    }

    #[test]
    fn blank_lesson_name_is_rejected() {
        let mut library = library();
        assert!(matches!(library.create_lesson("  "), Err(ApiError::BadRequest(_))));
        assert!(matches!(
            library.rename_lesson(DEFAULT_LESSON_ID, ""),
            Err(ApiError::BadRequest(_))
        ));
    }

    #[test]
    fn last_lesson_cannot_be_deleted() {
        let mut library = library();
        assert!(matches!(
            library.delete_lesson(DEFAULT_LESSON_ID),
            Err(ApiError::Conflict(_))
        ));
    }

    #[test]
    fn deleting_current_lesson_switches_to_first() {
        let mut library = library();
        let id = library.create_lesson("Other").unwrap();
        library.delete_lesson(&id).unwrap();
        assert_eq!(library.current_lesson_id(), DEFAULT_LESSON_ID);
    }

    #[test]
    fn switching_lesson_drops_game() {
        let mut library = library();
        library.start_match().unwrap();
        let id = library.create_lesson("Other").unwrap();
        library.switch_lesson(DEFAULT_LESSON_ID).unwrap();
        assert!(matches!(library.game(), Game::Idle));
        assert!(library.switch_lesson("missing").is_err());
        assert_ne!(id, DEFAULT_LESSON_ID);
    }

    #[test]
    fn cards_get_sequential_ids() {
        let mut library = library();
        let card = library.add_card(" Q ", " A ", Utc::now()).unwrap();
        assert_eq!(card.id, 7);
        assert_eq!(card.front, "Q");
        library.delete_card(7).unwrap();
        assert!(matches!(library.delete_card(7), Err(ApiError::NotFound(_))));
    }

    #[test]
    fn quiz_on_small_lesson_is_refused() {
        let mut library = library();
        library.create_lesson("Tiny").unwrap();
        library.add_card("Q", "A", Utc::now()).unwrap();
        let err = library.start_quiz().unwrap_err();
        assert!(matches!(
            err,
            ApiError::Study(StudyError::NotEnoughCards { available: 1, .. })
        ));
        assert!(matches!(library.game(), Game::Idle));
    }

    #[test]
    fn game_actions_need_matching_game() {
        let mut library = library();
        library.start_typing().unwrap();
        assert!(matches!(
            library.answer_quiz("Paris", Utc::now()),
            Err(ApiError::Conflict(_))
        ));
    }

    #[test]
    fn tick_advances_quiz_with_immediate_delays() {
        let mut library = library();
        library.start_quiz().unwrap();
        let now = Utc::now();
        library.answer_quiz("Paris", now).unwrap();
        library.tick(now);

        let Game::Quiz(game) = library.game() else {
            panic!("expected quiz");
        };
        assert_eq!(game.locked_answer(), None);
        assert_eq!(game.score().score, 1);
        assert_eq!(library.current_lesson().unwrap().stats.correct, 1);
    }

    #[test]
    fn import_replaces_lessons_and_session() {
        let mut library = library();
        library.start_match().unwrap();
        let mut backup = Backup::sample(Utc::now());
        backup.lessons.insert("extra".to_string(), Lesson::new("Extra"));
        backup.current_lesson_id = "extra".to_string();

        library.import(backup);
        assert_eq!(library.current_lesson_id(), "extra");
        assert_eq!(library.lessons().len(), 2);
        assert!(matches!(library.game(), Game::Idle));
    }
}
