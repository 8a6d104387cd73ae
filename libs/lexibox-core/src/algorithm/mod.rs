//! Spaced repetition scheduling.

pub mod leitner;

pub use leitner::{Leitner, REVIEW_INTERVALS_DAYS};
