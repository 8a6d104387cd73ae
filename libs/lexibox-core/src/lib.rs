//! Core engine for the Lexibox vocabulary trainer.
//!
//! Provides:
//! - Word catalog parsing and lesson slicing
//! - Leitner-box spaced repetition scheduling
//! - Task queue generation for lesson and review sessions
//! - The live session state machine and the progress aggregate it commits to
//! - Answer matching for typed exercises

pub mod algorithm;
pub mod catalog;
pub mod error;
pub mod generator;
pub mod matching;
pub mod session;
pub mod types;

pub use algorithm::{Leitner, REVIEW_INTERVALS_DAYS};
pub use catalog::{Catalog, Word};
pub use error::{CatalogError, SessionError};
pub use generator::{build_lesson_queue, build_review_queue, pick_distractors};
pub use matching::{compare_assembly, compare_spelling, MatchResult};
pub use session::{Session, SessionSummary, SubmitOutcome};
pub use types::{
    LessonStats, ReminderSettings, SessionMode, Task, TaskKind, UserProgress, WordStats,
    MATCH_GROUP_SIZE, REVIEW_WORDS_PER_SESSION, SCRAMBLE_WORDS_PER_LESSON, WORDS_PER_LESSON,
};
