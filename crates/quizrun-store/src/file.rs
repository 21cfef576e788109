//! JSON-file progress store.
//!
//! Each key maps to `<dir>/<key>.json`. Writes go to a temporary file in the
//! same directory which is then renamed over the target, so a crash never
//! leaves a half-written snapshot behind.

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use tempfile::NamedTempFile;

use quizrun_core::model::PersistedProgress;
use quizrun_core::traits::ProgressStore;

use crate::error::StoreError;

/// A `ProgressStore` backed by one JSON file per key.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    /// The directory is created on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// File that holds the snapshot for `key`.
    pub fn path_for(&self, key: &str) -> Result<PathBuf, StoreError> {
        let valid = !key.is_empty()
            && !key.starts_with('.')
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));
        if !valid {
            return Err(StoreError::InvalidKey(key.to_string()));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl ProgressStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<PersistedProgress>> {
        let path = self.path_for(key)?;
        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(e).with_context(|| format!("failed to read {}", path.display()))
            }
        };

        let progress = serde_json::from_str(&content).map_err(|e| StoreError::Corrupt {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Ok(Some(progress))
    }

    fn set(&self, key: &str, progress: &PersistedProgress) -> Result<()> {
        let path = self.path_for(key)?;
        std::fs::create_dir_all(&self.dir)
            .with_context(|| format!("failed to create store directory {}", self.dir.display()))?;

        let json = serde_json::to_vec_pretty(progress).context("failed to serialize snapshot")?;
        let mut tmp = NamedTempFile::new_in(&self.dir)
            .with_context(|| format!("failed to create temp file in {}", self.dir.display()))?;
        tmp.write_all(&json)
            .context("failed to write snapshot")?;
        tmp.as_file().sync_all().context("failed to sync snapshot")?;
        tmp.persist(&path)
            .map_err(|e| e.error)
            .with_context(|| format!("failed to replace {}", path.display()))?;

        tracing::debug!("saved progress at index {} to {}", progress.index, path.display());
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<()> {
        let path = self.path_for(key)?;
        match std::fs::remove_file(&path) {
            Ok(()) => {
                tracing::debug!("removed {}", path.display());
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e).with_context(|| format!("failed to remove {}", path.display())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quizrun_core::model::{AnswerRecord, Question};
    use quizrun_core::PROGRESS_KEY;

    fn snapshot() -> PersistedProgress {
        let question = Question {
            prompt: "Borrow checker runs at?".into(),
            options: vec!["compile time".into(), "run time".into()],
            correct_answer: "compile time".into(),
            explanation: "It is a static analysis.".into(),
            reference_text: "The Rust Book, ch. 4".into(),
        };
        PersistedProgress {
            index: 1,
            score: 1,
            history: vec![AnswerRecord::new(&question, "compile time")],
            saved_at: Some(chrono::Utc::now()),
        }
    }

    #[test]
    fn set_get_delete_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("state"));

        assert!(store.get(PROGRESS_KEY).unwrap().is_none());

        let progress = snapshot();
        store.set(PROGRESS_KEY, &progress).unwrap();
        assert!(store.path_for(PROGRESS_KEY).unwrap().exists());
        assert_eq!(store.get(PROGRESS_KEY).unwrap(), Some(progress));

        store.delete(PROGRESS_KEY).unwrap();
        assert!(store.get(PROGRESS_KEY).unwrap().is_none());
        store.delete(PROGRESS_KEY).unwrap();
    }

    #[test]
    fn overwrite_leaves_no_temp_files() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path());

        let mut progress = snapshot();
        store.set("quiz", &progress).unwrap();
        progress.index = 2;
        progress.history.push(progress.history[0].clone());
        progress.score = 2;
        store.set("quiz", &progress).unwrap();

        assert_eq!(store.get("quiz").unwrap().unwrap().index, 2);
        let entries: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path());
        std::fs::write(store.path_for("quiz").unwrap(), "{ truncated").unwrap();

        let err = store.get("quiz").unwrap_err();
        assert!(matches!(
            err.downcast_ref::<StoreError>(),
            Some(StoreError::Corrupt { .. })
        ));
    }

    #[test]
    fn invalid_keys_are_rejected() {
        let store = JsonFileStore::new("unused");
        for key in ["", "../escape", ".hidden", "a/b", "sp ace"] {
            assert!(
                matches!(store.path_for(key), Err(StoreError::InvalidKey(_))),
                "key {key:?} should be rejected"
            );
        }
        assert!(store.path_for("quiz_app_progress").is_ok());
        assert!(store.path_for("rust-101.v2").is_ok());
    }

    #[test]
    fn reads_snapshot_written_by_other_tools() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path());
        std::fs::write(
            store.path_for(PROGRESS_KEY).unwrap(),
            r#"{"index": 0, "score": 0, "history": []}"#,
        )
        .unwrap();

        let progress = store.get(PROGRESS_KEY).unwrap().unwrap();
        assert_eq!(progress.index, 0);
        assert!(progress.saved_at.is_none());
    }
}
