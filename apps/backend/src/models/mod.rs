//! API types for the Lexibox backend

use chrono::{DateTime, Utc};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use lexibox_core::{
    pick_distractors, Catalog, ReminderSettings, Session, SessionMode, SessionSummary, Task,
    TaskKind, UserProgress, Word,
};

/// Number of decoy options offered alongside the correct choice.
const CHOICE_DISTRACTORS: usize = 3;

/// One exercise, with the presentation data a client needs to render it.
#[derive(Debug, Clone, Serialize)]
pub struct TaskView {
    pub id: u32,
    pub kind: TaskKind,
    pub is_retry: bool,
    pub word: Word,
    /// Shuffled translation choices. Only for `Choice`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    /// Shuffled letter tiles of the target word. Only for `Assemble` and
    /// `Scramble`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub letters: Option<Vec<char>>,
    /// Words to pair up with their translations. Only for `Match`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pairs: Option<Vec<Word>>,
}

impl TaskView {
    /// Build the client view of a task. Returns `None` when the task's word
    /// is not in the catalog.
    pub fn build<R: Rng + ?Sized>(task: &Task, catalog: &Catalog, rng: &mut R) -> Option<Self> {
        let word = catalog.get(task.word_id)?.clone();

        let options = match task.kind {
            TaskKind::Choice => {
                let mut options: Vec<String> =
                    pick_distractors(catalog, &word, CHOICE_DISTRACTORS, rng)
                        .into_iter()
                        .map(|w| w.translation.clone())
                        .collect();
                options.push(word.translation.clone());
                options.shuffle(rng);
                Some(options)
            }
            _ => None,
        };

        let letters = match task.kind {
            TaskKind::Assemble | TaskKind::Scramble => {
                let mut letters: Vec<char> = word.english.chars().collect();
                letters.shuffle(rng);
                Some(letters)
            }
            _ => None,
        };

        let pairs = match task.kind {
            TaskKind::Match => Some(
                task.group
                    .iter()
                    .filter_map(|id| catalog.get(*id).cloned())
                    .collect(),
            ),
            _ => None,
        };

        Some(Self {
            id: task.id,
            kind: task.kind,
            is_retry: task.is_retry,
            word,
            options,
            letters,
            pairs,
        })
    }
}

// === Session API ===

#[derive(Debug, Default, Deserialize)]
pub struct StartLessonRequest {
    #[serde(default)]
    pub lesson_index: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub session_id: Uuid,
    pub mode: SessionMode,
    pub task_count: usize,
    pub position: usize,
    pub combo: u32,
    pub session_xp: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task: Option<TaskView>,
}

impl SessionResponse {
    pub fn build<R: Rng + ?Sized>(
        session_id: Uuid,
        session: &Session,
        catalog: &Catalog,
        rng: &mut R,
    ) -> Self {
        let task = session
            .current_task()
            .and_then(|t| TaskView::build(t, catalog, rng));
        Self {
            session_id,
            mode: session.mode(),
            task_count: session.task_count(),
            position: session.position(),
            combo: session.combo(),
            session_xp: session.session_xp(),
            task,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SubmitOutcomeRequest {
    /// Outcome graded by the client (choice taps, match completion).
    #[serde(default)]
    pub correct: Option<bool>,
    /// Raw text to grade server-side for typed exercises.
    #[serde(default)]
    pub typed_answer: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SubmitOutcomeResponse {
    pub correct: bool,
    pub xp_gained: u64,
    pub combo: u32,
    pub finished: bool,
    pub task_count: usize,
    pub position: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<SummaryView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task: Option<TaskView>,
}

/// Session summary combined with the aggregate totals it updated.
#[derive(Debug, Serialize)]
pub struct SummaryView {
    pub mode: SessionMode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lesson_index: Option<usize>,
    pub stars: u8,
    pub session_xp: u64,
    pub session_errors: u32,
    pub scorable_tasks: usize,
    pub new_words: Vec<u32>,
    pub day_streak: u32,
    pub total_xp: u64,
}

impl SummaryView {
    pub fn new(summary: SessionSummary, progress: &UserProgress) -> Self {
        Self {
            mode: summary.mode,
            lesson_index: summary.lesson_index,
            stars: summary.stars,
            session_xp: summary.session_xp,
            session_errors: summary.session_errors,
            scorable_tasks: summary.scorable_tasks,
            new_words: summary.new_words,
            day_streak: progress.day_streak,
            total_xp: progress.total_xp,
        }
    }
}

// === Progress API ===

#[derive(Debug, Serialize)]
pub struct ProgressOverview {
    pub total_xp: u64,
    pub day_streak: u32,
    pub words_learned: usize,
    pub lessons_completed: usize,
    pub due_reviews: usize,
    pub current_lesson: usize,
    pub total_lessons: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_study_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize)]
pub struct LessonOverview {
    pub lesson_index: usize,
    pub word_count: usize,
    pub stars: u8,
    pub is_completed: bool,
    pub is_unlocked: bool,
}

#[derive(Debug, Serialize)]
pub struct CourseResponse {
    pub lessons: Vec<LessonOverview>,
}

// === Settings API ===

/// Partial reminder settings update; absent fields keep their value.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateReminderRequest {
    #[serde(default)]
    pub enabled: Option<bool>,
    #[serde(default)]
    pub hour: Option<u32>,
    #[serde(default)]
    pub minute: Option<u32>,
}

impl UpdateReminderRequest {
    /// Apply the update over existing settings.
    pub fn apply(&self, settings: &mut ReminderSettings) {
        if let Some(enabled) = self.enabled {
            settings.enabled = enabled;
        }
        if let Some(hour) = self.hour {
            settings.hour = hour;
        }
        if let Some(minute) = self.minute {
            settings.minute = minute;
        }
    }
}
