//! Core types for the vocabulary learning engine.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Number of words introduced by a single lesson.
pub const WORDS_PER_LESSON: usize = 6;

/// Maximum number of words pulled into one review session.
pub const REVIEW_WORDS_PER_SESSION: usize = 12;

/// Words per lesson that get a scramble exercise.
pub const SCRAMBLE_WORDS_PER_LESSON: usize = 3;

/// Number of words grouped into a trailing match exercise.
pub const MATCH_GROUP_SIZE: usize = 6;

/// Highest Leitner box a word can reach.
pub const MAX_BOX: u8 = 5;

/// Exercise variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskKind {
    /// Passive exposure: show the word, no grading on mastery.
    Learn,
    /// Pick the translation from shuffled options.
    Choice,
    /// Rebuild the word from letter tiles.
    Assemble,
    /// Rebuild the word from a scrambled rendering.
    Scramble,
    /// Type the word from its translation.
    Spell,
    /// Pair up a group of words with their translations.
    Match,
}

/// A single exercise instance within a session.
///
/// Tasks are ephemeral: created when a session starts, discarded when it
/// ends. Ids are unique within one session only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: u32,
    pub word_id: u32,
    pub kind: TaskKind,
    #[serde(default)]
    pub is_retry: bool,
    /// Word ids covered by this task. Only populated for `Match`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub group: Vec<u32>,
}

impl Task {
    /// Whether this task counts toward the star-rating error percentage.
    /// Retries and passive exposure never do.
    pub fn is_scorable(&self) -> bool {
        !self.is_retry && self.kind != TaskKind::Learn
    }
}

/// Per-word mastery record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordStats {
    pub word_id: u32,
    /// Leitner box, 0 (unknown) through 5 (retained).
    pub box_index: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_review: Option<DateTime<Utc>>,
    #[serde(default)]
    pub consecutive_correct: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_error: Option<DateTime<Utc>>,
}

impl WordStats {
    /// Fresh stats for a word that has never been graded.
    pub fn new(word_id: u32) -> Self {
        Self {
            word_id,
            box_index: 0,
            next_review: None,
            consecutive_correct: 0,
            last_error: None,
        }
    }

    /// Whether the word is eligible for review at `now`. Words that have
    /// never been scheduled are due immediately.
    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        self.next_review.map_or(true, |due| due <= now)
    }
}

/// Per-lesson completion record. Stars only ever increase and completion
/// never reverts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LessonStats {
    pub lesson_index: usize,
    pub stars: u8,
    pub is_completed: bool,
}

/// Session flavor: introducing a lesson's words or reviewing known ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionMode {
    Lesson,
    Review,
}

/// Daily study reminder configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReminderSettings {
    pub enabled: bool,
    pub hour: u32,
    pub minute: u32,
}

impl Default for ReminderSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            hour: 18,
            minute: 0,
        }
    }
}

/// The durable progress aggregate.
///
/// Every field defaults, so a stored partial or older document deserializes
/// by merging defaults over what is present. Ordered maps keep the
/// serialized form stable across save/load cycles.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserProgress {
    pub current_lesson: usize,
    pub completed_words: BTreeSet<u32>,
    pub word_stats: BTreeMap<u32, WordStats>,
    pub lesson_stats: BTreeMap<usize, LessonStats>,
    pub last_study_date: Option<DateTime<Utc>>,
    pub total_xp: u64,
    pub day_streak: u32,
    pub reminder: ReminderSettings,
}

impl UserProgress {
    /// Number of words ever marked completed.
    pub fn words_learned(&self) -> usize {
        self.completed_words.len()
    }

    /// Number of lessons finished at least once.
    pub fn lessons_completed(&self) -> usize {
        self.lesson_stats.values().filter(|l| l.is_completed).count()
    }

    /// Words currently eligible for review: tracked words whose review date
    /// has passed, plus completed words that were never graded.
    pub fn due_review_count(&self, now: DateTime<Utc>) -> usize {
        let mut due: BTreeSet<u32> = self
            .word_stats
            .values()
            .filter(|stats| stats.is_due(now))
            .map(|stats| stats.word_id)
            .collect();
        for id in &self.completed_words {
            if !self.word_stats.contains_key(id) {
                due.insert(*id);
            }
        }
        due.len()
    }

    /// Best star rating earned for a lesson, 0 if never finished.
    pub fn stars_for_lesson(&self, lesson_index: usize) -> u8 {
        self.lesson_stats
            .get(&lesson_index)
            .map_or(0, |stats| stats.stars)
    }

    /// Whether a session was finished on the calendar day of `now`.
    pub fn studied_today(&self, now: DateTime<Utc>) -> bool {
        self.last_study_date
            .map_or(false, |d| d.date_naive() == now.date_naive())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    fn at(y: i32, mo: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, 0, 0).unwrap()
    }

    #[test]
    fn fresh_stats_are_due_immediately() {
        let stats = WordStats::new(3);
        assert!(stats.is_due(at(2024, 1, 1, 0)));
    }

    #[test]
    fn stats_due_only_after_review_date() {
        let mut stats = WordStats::new(3);
        stats.next_review = Some(at(2024, 1, 10, 12));
        assert!(!stats.is_due(at(2024, 1, 10, 11)));
        assert!(stats.is_due(at(2024, 1, 10, 12)));
        assert!(stats.is_due(at(2024, 1, 11, 0)));
    }

    #[test]
    fn scorable_excludes_learn_and_retries() {
        let task = Task {
            id: 0,
            word_id: 1,
            kind: TaskKind::Spell,
            is_retry: false,
            group: Vec::new(),
        };
        assert!(task.is_scorable());
        assert!(!Task { kind: TaskKind::Learn, ..task.clone() }.is_scorable());
        assert!(!Task { is_retry: true, ..task.clone() }.is_scorable());
        assert!(Task { kind: TaskKind::Match, ..task }.is_scorable());
    }

    #[test]
    fn progress_round_trips_through_json() {
        let mut progress = UserProgress::default();
        progress.current_lesson = 2;
        progress.total_xp = 420;
        progress.day_streak = 3;
        progress.last_study_date = Some(at(2024, 5, 1, 9));
        progress.completed_words.extend([0, 1, 2]);
        progress.word_stats.insert(
            1,
            WordStats {
                word_id: 1,
                box_index: 4,
                next_review: Some(at(2024, 5, 8, 9)),
                consecutive_correct: 4,
                last_error: None,
            },
        );
        progress.lesson_stats.insert(
            0,
            LessonStats {
                lesson_index: 0,
                stars: 3,
                is_completed: true,
            },
        );
        progress.reminder = ReminderSettings {
            enabled: true,
            hour: 8,
            minute: 30,
        };

        let json = serde_json::to_string(&progress).unwrap();
        let restored: UserProgress = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, progress);
    }

    #[test]
    fn partial_document_merges_defaults() {
        let restored: UserProgress = serde_json::from_str(r#"{"total_xp": 50}"#).unwrap();
        assert_eq!(restored.total_xp, 50);
        assert_eq!(restored.current_lesson, 0);
        assert_eq!(restored.day_streak, 0);
        assert!(restored.completed_words.is_empty());
        assert!(restored.word_stats.is_empty());
        assert!(!restored.reminder.enabled);
    }

    #[test]
    fn due_count_includes_completed_words_without_stats() {
        let now = at(2024, 3, 1, 10);
        let mut progress = UserProgress::default();
        progress.completed_words.extend([0, 1]);
        // word 1 is tracked and scheduled into the future
        progress.word_stats.insert(
            1,
            WordStats {
                word_id: 1,
                box_index: 2,
                next_review: Some(at(2024, 3, 5, 10)),
                consecutive_correct: 2,
                last_error: None,
            },
        );
        // word 0 was only ever seen in a lesson, so it counts as due
        assert_eq!(progress.due_review_count(now), 1);
    }

    #[test]
    fn studied_today_compares_calendar_days() {
        let mut progress = UserProgress::default();
        assert!(!progress.studied_today(at(2024, 3, 1, 10)));
        progress.last_study_date = Some(at(2024, 3, 1, 1));
        assert!(progress.studied_today(at(2024, 3, 1, 23)));
        assert!(!progress.studied_today(at(2024, 3, 2, 0)));
    }
}
