//! Leitner box scheduling.
//!
//! Words climb a fixed ladder of six boxes; each box maps to an escalating
//! review interval. Any miss drops the word back to box 0 and makes it due
//! immediately.

use chrono::{DateTime, Duration, Utc};

use crate::types::{WordStats, MAX_BOX};

/// Review intervals in days, indexed by box.
pub const REVIEW_INTERVALS_DAYS: [i64; 6] = [1, 2, 4, 7, 14, 30];

/// Leitner box model with configurable intervals.
#[derive(Debug, Clone)]
pub struct Leitner {
    pub box_intervals: [i64; 6],
}

impl Default for Leitner {
    fn default() -> Self {
        Self {
            box_intervals: REVIEW_INTERVALS_DAYS,
        }
    }
}

impl Leitner {
    /// Next eligible review time for a word sitting in `box_index`.
    pub fn next_review(&self, box_index: u8, now: DateTime<Utc>) -> DateTime<Utc> {
        let idx = box_index.min(MAX_BOX) as usize;
        now + Duration::days(self.box_intervals[idx])
    }

    /// Apply a correct outcome: climb one box and push the review out by the
    /// new box's interval.
    pub fn promote(&self, stats: &WordStats, now: DateTime<Utc>) -> WordStats {
        let box_index = (stats.box_index + 1).min(MAX_BOX);
        WordStats {
            box_index,
            next_review: Some(self.next_review(box_index, now)),
            consecutive_correct: stats.consecutive_correct + 1,
            ..stats.clone()
        }
    }

    /// Apply an incorrect outcome: back to box 0, due immediately.
    pub fn demote(&self, stats: &WordStats, now: DateTime<Utc>) -> WordStats {
        WordStats {
            box_index: 0,
            next_review: Some(now),
            consecutive_correct: 0,
            last_error: Some(now),
            ..stats.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn next_review_follows_interval_table() {
        let leitner = Leitner::default();
        for (box_index, days) in REVIEW_INTERVALS_DAYS.iter().enumerate() {
            assert_eq!(
                leitner.next_review(box_index as u8, now()),
                now() + Duration::days(*days)
            );
        }
    }

    #[test]
    fn next_review_clamps_box_to_table() {
        let leitner = Leitner::default();
        assert_eq!(
            leitner.next_review(9, now()),
            now() + Duration::days(REVIEW_INTERVALS_DAYS[5])
        );
    }

    #[test]
    fn promote_climbs_one_box() {
        let leitner = Leitner::default();
        let stats = WordStats::new(7);
        let promoted = leitner.promote(&stats, now());
        assert_eq!(promoted.box_index, 1);
        assert_eq!(promoted.consecutive_correct, 1);
        assert_eq!(promoted.next_review, Some(now() + Duration::days(2)));
        assert_eq!(promoted.word_id, 7);
    }

    #[test]
    fn promote_caps_at_top_box() {
        let leitner = Leitner::default();
        let mut stats = WordStats::new(7);
        stats.box_index = MAX_BOX;
        stats.consecutive_correct = 9;
        let promoted = leitner.promote(&stats, now());
        assert_eq!(promoted.box_index, MAX_BOX);
        assert_eq!(promoted.consecutive_correct, 10);
    }

    #[test]
    fn demote_resets_regardless_of_box() {
        let leitner = Leitner::default();
        let mut stats = WordStats::new(7);
        stats.box_index = 4;
        stats.consecutive_correct = 6;
        let demoted = leitner.demote(&stats, now());
        assert_eq!(demoted.box_index, 0);
        assert_eq!(demoted.consecutive_correct, 0);
        assert_eq!(demoted.next_review, Some(now()));
        assert_eq!(demoted.last_error, Some(now()));
    }
}
