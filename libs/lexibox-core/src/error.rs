//! Error types for lexibox-core.

use thiserror::Error;

/// Errors that can occur while parsing a word catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("missing {field} at line {line}")]
    MissingField { line: usize, field: &'static str },

    #[error("catalog contains no words")]
    EmptyCatalog,
}

/// Errors surfaced by session construction and the session state machine.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("nothing to review")]
    NothingToReview,

    #[error("lesson {index} is out of range")]
    LessonOutOfRange { index: usize },

    #[error("session is already finished")]
    SessionFinished,
}
