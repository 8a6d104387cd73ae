//! Progress persistence.
//!
//! The aggregate is stored as a single JSON document. A missing or corrupt
//! file yields default progress; the session flow never fails on a load
//! error.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use lexibox_core::UserProgress;

/// JSON-file store for the progress aggregate.
#[derive(Debug, Clone)]
pub struct ProgressStore {
    path: PathBuf,
}

impl ProgressStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load stored progress, falling back to defaults when the file is
    /// missing or unreadable.
    pub fn load(&self) -> UserProgress {
        match fs::read_to_string(&self.path) {
            Ok(content) => match serde_json::from_str(&content) {
                Ok(progress) => progress,
                Err(err) => {
                    tracing::warn!("stored progress is corrupt, starting fresh: {}", err);
                    UserProgress::default()
                }
            },
            Err(err) if err.kind() == io::ErrorKind::NotFound => UserProgress::default(),
            Err(err) => {
                tracing::warn!("could not read stored progress, starting fresh: {}", err);
                UserProgress::default()
            }
        }
    }

    /// Persist the aggregate, replacing the previous document atomically.
    pub fn save(&self, progress: &UserProgress) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(progress)
            .map_err(|err| io::Error::new(io::ErrorKind::Other, err))?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use uuid::Uuid;

    fn temp_store() -> ProgressStore {
        let path = std::env::temp_dir().join(format!("lexibox-store-{}.json", Uuid::new_v4()));
        ProgressStore::new(path)
    }

    #[test]
    fn load_missing_file_returns_default() {
        let store = temp_store();
        assert_eq!(store.load(), UserProgress::default());
    }

    #[test]
    fn save_then_load_round_trips() {
        let store = temp_store();
        let mut progress = UserProgress::default();
        progress.total_xp = 321;
        progress.day_streak = 4;
        progress.completed_words.extend([1, 2, 3]);

        store.save(&progress).unwrap();
        assert_eq!(store.load(), progress);

        let _ = fs::remove_file(store.path());
    }

    #[test]
    fn corrupt_file_falls_back_to_default() {
        let store = temp_store();
        fs::write(store.path(), "{not json").unwrap();
        assert_eq!(store.load(), UserProgress::default());

        let _ = fs::remove_file(store.path());
    }

    #[test]
    fn save_overwrites_previous_document() {
        let store = temp_store();
        let mut progress = UserProgress::default();
        store.save(&progress).unwrap();

        progress.total_xp = 99;
        store.save(&progress).unwrap();
        assert_eq!(store.load().total_xp, 99);

        let _ = fs::remove_file(store.path());
    }
}
