//! Daily study reminder observer.
//!
//! A periodic timer that checks wall-clock time against the configured
//! reminder time. It reads progress state and emits a notification event; it
//! never mutates session or progress state.

use std::time::Duration;

use chrono::{DateTime, NaiveDate, Timelike, Utc};

use lexibox_core::UserProgress;

use crate::AppState;

const CHECK_INTERVAL: Duration = Duration::from_secs(60);

/// Whether a reminder should fire at `now`: reminders are enabled, the
/// configured time has passed, and no session was finished today.
pub fn reminder_due(progress: &UserProgress, now: DateTime<Utc>) -> bool {
    let reminder = &progress.reminder;
    if !reminder.enabled {
        return false;
    }
    let time = now.time();
    let at_or_past = (time.hour(), time.minute()) >= (reminder.hour, reminder.minute);
    at_or_past && !progress.studied_today(now)
}

/// Run the reminder observer until the process exits. Fires at most once per
/// calendar day.
pub async fn run(state: AppState) {
    let mut ticker = tokio::time::interval(CHECK_INTERVAL);
    let mut last_fired: Option<NaiveDate> = None;

    loop {
        ticker.tick().await;
        let now = Utc::now();
        if last_fired == Some(now.date_naive()) {
            continue;
        }

        let due = {
            let progress = state.progress.lock().expect("progress lock");
            reminder_due(&progress, now)
        };

        if due {
            tracing::info!("study reminder: no session finished today");
            last_fired = Some(now.date_naive());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use lexibox_core::ReminderSettings;

    fn at(hour: u32, minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, hour, minute, 0).unwrap()
    }

    fn progress_with_reminder(enabled: bool) -> UserProgress {
        let mut progress = UserProgress::default();
        progress.reminder = ReminderSettings {
            enabled,
            hour: 18,
            minute: 30,
        };
        progress
    }

    #[test]
    fn disabled_reminder_never_fires() {
        let progress = progress_with_reminder(false);
        assert!(!reminder_due(&progress, at(19, 0)));
    }

    #[test]
    fn fires_only_at_or_after_configured_time() {
        let progress = progress_with_reminder(true);
        assert!(!reminder_due(&progress, at(18, 29)));
        assert!(reminder_due(&progress, at(18, 30)));
        assert!(reminder_due(&progress, at(23, 59)));
    }

    #[test]
    fn studying_today_suppresses_the_reminder() {
        let mut progress = progress_with_reminder(true);
        progress.last_study_date = Some(at(9, 0));
        assert!(!reminder_due(&progress, at(19, 0)));
    }

    #[test]
    fn yesterdays_study_does_not_suppress() {
        let mut progress = progress_with_reminder(true);
        progress.last_study_date = Some(at(9, 0) - chrono::Duration::days(1));
        assert!(reminder_due(&progress, at(19, 0)));
    }
}
