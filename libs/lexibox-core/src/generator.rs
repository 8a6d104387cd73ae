//! Task queue construction for lesson and review sessions.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use rand::seq::SliceRandom;
use rand::Rng;

use crate::catalog::{Catalog, Word};
use crate::error::SessionError;
use crate::types::{
    Task, TaskKind, UserProgress, MATCH_GROUP_SIZE, REVIEW_WORDS_PER_SESSION,
    SCRAMBLE_WORDS_PER_LESSON,
};

/// Build the ordered task queue for a new-lesson session.
///
/// Phases ramp from recognition to production: one LEARN task per word in
/// catalog order, then CHOICE, ASSEMBLE and SPELL rounds covering every word
/// (each round shuffled on its own), a SCRAMBLE round for a random subset,
/// and a single trailing MATCH task over the whole slice.
pub fn build_lesson_queue<R: Rng + ?Sized>(
    catalog: &Catalog,
    lesson_index: usize,
    rng: &mut R,
) -> Result<Vec<Task>, SessionError> {
    let slice = catalog.lesson_words(lesson_index);
    if slice.is_empty() {
        return Err(SessionError::LessonOutOfRange { index: lesson_index });
    }

    let mut next_id = 0u32;
    let mut make = |word_id: u32, kind: TaskKind| -> Task {
        let task = Task {
            id: next_id,
            word_id,
            kind,
            is_retry: false,
            group: Vec::new(),
        };
        next_id += 1;
        task
    };

    let mut tasks: Vec<Task> = slice.iter().map(|w| make(w.id, TaskKind::Learn)).collect();

    for kind in [TaskKind::Choice, TaskKind::Assemble, TaskKind::Spell] {
        let mut phase: Vec<Task> = slice.iter().map(|w| make(w.id, kind)).collect();
        phase.shuffle(rng);
        tasks.extend(phase);
    }

    let mut scramble: Vec<Task> = slice
        .choose_multiple(rng, SCRAMBLE_WORDS_PER_LESSON)
        .map(|w| make(w.id, TaskKind::Scramble))
        .collect();
    scramble.shuffle(rng);
    tasks.extend(scramble);

    let mut match_task = make(slice[0].id, TaskKind::Match);
    match_task.group = slice.iter().map(|w| w.id).collect();
    tasks.push(match_task);

    Ok(tasks)
}

/// Build the ordered task queue for a review session.
///
/// Due words come first, weaker boxes before stronger, ties broken at
/// random. The task shape per word scales with mastery: scaffolded
/// LEARN + ASSEMBLE for boxes 0-1, SCRAMBLE + SPELL for boxes 2-3, a lone
/// recall SPELL above that. A MATCH task over the first six words closes
/// the session when enough words were selected.
pub fn build_review_queue<R: Rng + ?Sized>(
    catalog: &Catalog,
    progress: &UserProgress,
    now: DateTime<Utc>,
    rng: &mut R,
) -> Result<Vec<Task>, SessionError> {
    let selected = select_review_words(catalog, progress, now, rng);
    if selected.is_empty() {
        return Err(SessionError::NothingToReview);
    }

    let mut next_id = 0u32;
    let mut make = |word_id: u32, kind: TaskKind| -> Task {
        let task = Task {
            id: next_id,
            word_id,
            kind,
            is_retry: false,
            group: Vec::new(),
        };
        next_id += 1;
        task
    };

    let mut tasks = Vec::new();
    for &(word_id, box_index) in &selected {
        let kinds: &[TaskKind] = match box_index {
            0 | 1 => &[TaskKind::Learn, TaskKind::Assemble],
            2 | 3 => &[TaskKind::Scramble, TaskKind::Spell],
            _ => &[TaskKind::Spell],
        };
        for &kind in kinds {
            tasks.push(make(word_id, kind));
        }
    }

    if selected.len() >= MATCH_GROUP_SIZE {
        let group: Vec<u32> = selected
            .iter()
            .take(MATCH_GROUP_SIZE)
            .map(|&(id, _)| id)
            .collect();
        let mut match_task = make(group[0], TaskKind::Match);
        match_task.group = group;
        tasks.push(match_task);
    }

    Ok(tasks)
}

/// Uniformly sample `count` decoy words, excluding the target. The caller
/// combines them with the correct answer and shuffles.
pub fn pick_distractors<'a, R: Rng + ?Sized>(
    catalog: &'a Catalog,
    target: &Word,
    count: usize,
    rng: &mut R,
) -> Vec<&'a Word> {
    let pool: Vec<&Word> = catalog
        .words()
        .iter()
        .filter(|w| w.id != target.id)
        .collect();
    let mut picked: Vec<&Word> = pool.choose_multiple(rng, count).copied().collect();
    picked.shuffle(rng);
    picked
}

/// Pick up to `REVIEW_WORDS_PER_SESSION` candidates from the union of
/// completed and tracked words: stable order on (due, box), then a shuffle
/// inside every run sharing the same key.
fn select_review_words<R: Rng + ?Sized>(
    catalog: &Catalog,
    progress: &UserProgress,
    now: DateTime<Utc>,
    rng: &mut R,
) -> Vec<(u32, u8)> {
    let mut seen = BTreeSet::new();
    let mut keyed: Vec<(u8, u8, u32)> = Vec::new();

    for &id in progress.completed_words.iter().chain(progress.word_stats.keys()) {
        if !seen.insert(id) || catalog.get(id).is_none() {
            continue;
        }
        let (due, box_index) = match progress.word_stats.get(&id) {
            Some(stats) => (stats.is_due(now), stats.box_index),
            None => (true, 0),
        };
        keyed.push((u8::from(!due), box_index, id));
    }

    keyed.sort_by_key(|&(due_rank, box_index, _)| (due_rank, box_index));
    shuffle_equal_runs(&mut keyed, rng);

    keyed
        .into_iter()
        .take(REVIEW_WORDS_PER_SESSION)
        .map(|(_, box_index, id)| (id, box_index))
        .collect()
}

fn shuffle_equal_runs<R: Rng + ?Sized>(keyed: &mut [(u8, u8, u32)], rng: &mut R) {
    let mut start = 0;
    while start < keyed.len() {
        let key = (keyed[start].0, keyed[start].1);
        let mut end = start + 1;
        while end < keyed.len() && (keyed[end].0, keyed[end].1) == key {
            end += 1;
        }
        keyed[start..end].shuffle(rng);
        start = end;
    }
}
