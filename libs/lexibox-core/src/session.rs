//! Live session state machine.
//!
//! A session owns an ordered task queue and advances one graded outcome at
//! a time. Mastery moves with every graded answer; failures grow the queue
//! with retry tasks; reaching the end of the queue commits the session
//! totals (XP, streak, lesson record) to the progress aggregate.

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::algorithm::Leitner;
use crate::catalog::Catalog;
use crate::error::SessionError;
use crate::generator::{build_lesson_queue, build_review_queue};
use crate::types::{LessonStats, SessionMode, Task, TaskKind, UserProgress, WordStats};

/// XP awarded for any correct answer.
const XP_BASE: u64 = 10;

/// Additional XP per combo step held when answering.
const XP_COMBO_BONUS: u64 = 2;

/// Result of a single `submit_outcome` call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmitOutcome {
    pub correct: bool,
    pub xp_gained: u64,
    pub combo: u32,
    pub finished: bool,
    pub summary: Option<SessionSummary>,
}

/// Totals reported when a session reaches the end of its queue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub mode: SessionMode,
    pub lesson_index: Option<usize>,
    pub stars: u8,
    pub session_xp: u64,
    pub session_errors: u32,
    pub scorable_tasks: usize,
    /// Words newly marked completed by this session (lesson mode only).
    pub new_words: Vec<u32>,
}

/// A running lesson or review session.
#[derive(Debug, Clone)]
pub struct Session {
    mode: SessionMode,
    lesson_index: Option<usize>,
    tasks: Vec<Task>,
    current_index: usize,
    combo: u32,
    session_xp: u64,
    session_errors: u32,
    next_task_id: u32,
    leitner: Leitner,
}

impl Session {
    /// Start a session introducing a lesson's word slice.
    pub fn lesson<R: Rng + ?Sized>(
        catalog: &Catalog,
        lesson_index: usize,
        rng: &mut R,
    ) -> Result<Self, SessionError> {
        let tasks = build_lesson_queue(catalog, lesson_index, rng)?;
        Ok(Self::new(SessionMode::Lesson, Some(lesson_index), tasks))
    }

    /// Start a review session over due and weak words.
    pub fn review<R: Rng + ?Sized>(
        catalog: &Catalog,
        progress: &UserProgress,
        now: DateTime<Utc>,
        rng: &mut R,
    ) -> Result<Self, SessionError> {
        let tasks = build_review_queue(catalog, progress, now, rng)?;
        Ok(Self::new(SessionMode::Review, None, tasks))
    }

    fn new(mode: SessionMode, lesson_index: Option<usize>, tasks: Vec<Task>) -> Self {
        let next_task_id = tasks.iter().map(|t| t.id + 1).max().unwrap_or(0);
        Self {
            mode,
            lesson_index,
            tasks,
            current_index: 0,
            combo: 0,
            session_xp: 0,
            session_errors: 0,
            next_task_id,
            leitner: Leitner::default(),
        }
    }

    pub fn mode(&self) -> SessionMode {
        self.mode
    }

    pub fn lesson_index(&self) -> Option<usize> {
        self.lesson_index
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn task_count(&self) -> usize {
        self.tasks.len()
    }

    pub fn position(&self) -> usize {
        self.current_index
    }

    pub fn combo(&self) -> u32 {
        self.combo
    }

    pub fn session_xp(&self) -> u64 {
        self.session_xp
    }

    pub fn session_errors(&self) -> u32 {
        self.session_errors
    }

    /// Task awaiting an outcome, or `None` once the session is finished.
    pub fn current_task(&self) -> Option<&Task> {
        self.tasks.get(self.current_index)
    }

    pub fn is_finished(&self) -> bool {
        self.current_index >= self.tasks.len()
    }

    /// Grade the current task and advance the queue.
    ///
    /// Mutates `progress` in two steps: per-word mastery moves with every
    /// graded answer, while XP, streak and lesson records are committed only
    /// when the final task completes. Abandoning a session before that point
    /// leaves the session totals unapplied.
    pub fn submit_outcome(
        &mut self,
        progress: &mut UserProgress,
        correct: bool,
        now: DateTime<Utc>,
    ) -> Result<SubmitOutcome, SessionError> {
        let task = self
            .tasks
            .get(self.current_index)
            .cloned()
            .ok_or(SessionError::SessionFinished)?;

        let xp_gained = if correct {
            let gained = XP_BASE + u64::from(self.combo) * XP_COMBO_BONUS;
            self.combo += 1;
            gained
        } else {
            self.combo = 0;
            self.session_errors += 1;
            0
        };
        self.session_xp += xp_gained;

        if !task.is_retry && task.kind != TaskKind::Match {
            self.apply_mastery(progress, &task, correct, now);
        }

        if !correct && task.kind != TaskKind::Match {
            self.insert_penalties(&task);
        }

        self.current_index += 1;

        let summary = if self.is_finished() {
            Some(self.finalize(progress, now))
        } else {
            None
        };

        Ok(SubmitOutcome {
            correct,
            xp_gained,
            combo: self.combo,
            finished: summary.is_some(),
            summary,
        })
    }

    /// Box transition for a graded, non-retry, non-match task.
    fn apply_mastery(
        &self,
        progress: &mut UserProgress,
        task: &Task,
        correct: bool,
        now: DateTime<Utc>,
    ) {
        if correct && task.kind == TaskKind::Learn {
            // passive exposure is never graded on mastery
            return;
        }
        let stats = progress
            .word_stats
            .entry(task.word_id)
            .or_insert_with(|| WordStats::new(task.word_id));
        *stats = if correct {
            self.leitner.promote(stats, now)
        } else {
            self.leitner.demote(stats, now)
        };
    }

    /// Rebuild the queue with a LEARN re-exposure and a repeat of the failed
    /// exercise placed right after the current position.
    fn insert_penalties(&mut self, failed: &Task) {
        let learn = self.retry_task(failed.word_id, TaskKind::Learn);
        // scramble failures are retried as assembly
        let repeat_kind = if failed.kind == TaskKind::Scramble {
            TaskKind::Assemble
        } else {
            failed.kind
        };
        let repeat = self.retry_task(failed.word_id, repeat_kind);

        let mut rebuilt = Vec::with_capacity(self.tasks.len() + 2);
        rebuilt.extend(self.tasks[..=self.current_index].iter().cloned());
        rebuilt.push(learn);
        rebuilt.push(repeat);
        rebuilt.extend(self.tasks[self.current_index + 1..].iter().cloned());
        self.tasks = rebuilt;
    }

    fn retry_task(&mut self, word_id: u32, kind: TaskKind) -> Task {
        let id = self.next_task_id;
        self.next_task_id += 1;
        Task {
            id,
            word_id,
            kind,
            is_retry: true,
            group: Vec::new(),
        }
    }

    /// Apply end-of-session totals to the aggregate and build the summary.
    fn finalize(&self, progress: &mut UserProgress, now: DateTime<Utc>) -> SessionSummary {
        let scorable_tasks = self.tasks.iter().filter(|t| t.is_scorable()).count();
        let stars = star_rating(self.session_errors, scorable_tasks);

        progress.day_streak = next_streak(progress.last_study_date, progress.day_streak, now);
        progress.last_study_date = Some(now);
        progress.total_xp += self.session_xp;

        let mut new_words = Vec::new();
        if let (SessionMode::Lesson, Some(index)) = (self.mode, self.lesson_index) {
            let entry = progress.lesson_stats.entry(index).or_insert(LessonStats {
                lesson_index: index,
                stars: 0,
                is_completed: false,
            });
            entry.stars = entry.stars.max(stars);
            entry.is_completed = true;

            for task in &self.tasks {
                if task.kind == TaskKind::Learn
                    && !task.is_retry
                    && progress.completed_words.insert(task.word_id)
                {
                    new_words.push(task.word_id);
                }
            }

            progress.current_lesson = progress.current_lesson.max(index + 1);
        }

        SessionSummary {
            mode: self.mode,
            lesson_index: self.lesson_index,
            stars,
            session_xp: self.session_xp,
            session_errors: self.session_errors,
            scorable_tasks,
            new_words,
        }
    }
}

/// Star rating for a finished session. The 10% error band is inclusive.
fn star_rating(errors: u32, scorable: usize) -> u8 {
    if errors == 0 {
        3
    } else if errors as usize * 10 <= scorable {
        2
    } else {
        1
    }
}

/// Day streak after finishing a session at `now`: consecutive days extend
/// it, a second session the same day keeps it, anything else restarts it.
fn next_streak(last_study: Option<DateTime<Utc>>, streak: u32, now: DateTime<Utc>) -> u32 {
    let today = now.date_naive();
    match last_study.map(|d| d.date_naive()) {
        Some(day) if day == today => streak,
        Some(day) if day.succ_opt() == Some(today) => streak + 1,
        _ => 1,
    }
}
