//! Word catalog loading.
//!
//! # Format
//! ```text
//! # comments and blank lines are skipped
//! dog | noun | perro
//! to eat | verb | comer
//! ```
//!
//! One word per line: english text, part-of-speech tag and translation,
//! separated by pipes. Ids are assigned in file order and never change.

use serde::{Deserialize, Serialize};

use crate::error::CatalogError;
use crate::types::WORDS_PER_LESSON;

/// Immutable catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Word {
    pub id: u32,
    pub english: String,
    pub part_of_speech: String,
    pub translation: String,
}

/// The ordered, immutable word catalog.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    words: Vec<Word>,
}

impl Catalog {
    /// Parse catalog content into a word list.
    pub fn parse(content: &str) -> Result<Self, CatalogError> {
        let mut words = Vec::new();

        for (idx, raw) in content.lines().enumerate() {
            let line = idx + 1;
            let trimmed = raw.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }

            let mut parts = trimmed.splitn(3, '|').map(str::trim);
            let english = parts
                .next()
                .filter(|s| !s.is_empty())
                .ok_or(CatalogError::MissingField { line, field: "english" })?;
            let part_of_speech = parts
                .next()
                .filter(|s| !s.is_empty())
                .ok_or(CatalogError::MissingField { line, field: "part of speech" })?;
            let translation = parts
                .next()
                .filter(|s| !s.is_empty())
                .ok_or(CatalogError::MissingField { line, field: "translation" })?;

            words.push(Word {
                id: words.len() as u32,
                english: english.to_string(),
                part_of_speech: part_of_speech.to_string(),
                translation: translation.to_string(),
            });
        }

        if words.is_empty() {
            return Err(CatalogError::EmptyCatalog);
        }

        Ok(Self { words })
    }

    /// Build a catalog from an already-constructed word list.
    pub fn from_words(words: Vec<Word>) -> Self {
        Self { words }
    }

    /// Look up a word by id.
    pub fn get(&self, id: u32) -> Option<&Word> {
        self.words.iter().find(|w| w.id == id)
    }

    pub fn words(&self) -> &[Word] {
        &self.words
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// The contiguous word slice a lesson introduces. The final lesson may
    /// be shorter; an out-of-range index yields an empty slice.
    pub fn lesson_words(&self, lesson_index: usize) -> &[Word] {
        let start = lesson_index * WORDS_PER_LESSON;
        if start >= self.words.len() {
            return &[];
        }
        let end = (start + WORDS_PER_LESSON).min(self.words.len());
        &self.words[start..end]
    }

    /// Number of lessons the catalog yields, counting a partial tail.
    pub fn total_lessons(&self) -> usize {
        self.words.len().div_ceil(WORDS_PER_LESSON)
    }
}
