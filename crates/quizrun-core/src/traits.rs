//! Collaborator traits for question sources and progress stores.
//!
//! `QuestionSource` is implemented by the `quizrun-sources` crate and
//! `ProgressStore` by `quizrun-store`. `MemoryStore` lives here so the engine
//! can be driven without touching the filesystem.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::LoadError;
use crate::model::{PersistedProgress, Question};

/// Well-known key under which the session snapshot is stored.
pub const PROGRESS_KEY: &str = "quiz_app_progress";

// ---------------------------------------------------------------------------
// Question source trait
// ---------------------------------------------------------------------------

/// Trait for backends that supply the ordered question list.
#[async_trait]
pub trait QuestionSource: Send + Sync {
    /// Human-readable source description (e.g. a path or URL).
    fn name(&self) -> &str;

    /// Fetch the questions. Called once per session, before the engine exists.
    async fn load_questions(&self) -> Result<Vec<Question>, LoadError>;
}

// ---------------------------------------------------------------------------
// Progress store trait
// ---------------------------------------------------------------------------

/// Synchronous key-value persistence for session snapshots.
pub trait ProgressStore: Send + Sync {
    /// Read the snapshot stored under `key`, if any.
    fn get(&self, key: &str) -> anyhow::Result<Option<PersistedProgress>>;

    /// Create or overwrite the snapshot under `key`.
    fn set(&self, key: &str, progress: &PersistedProgress) -> anyhow::Result<()>;

    /// Remove the snapshot under `key`. Removing a missing key is not an error.
    fn delete(&self, key: &str) -> anyhow::Result<()>;
}

/// In-memory progress store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, PersistedProgress>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that already holds `progress` under `key`.
    pub fn with_entry(key: &str, progress: PersistedProgress) -> Self {
        let store = Self::new();
        store.lock().insert(key.to_string(), progress);
        store
    }

    /// Number of stored snapshots.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, PersistedProgress>> {
        // A poisoned map is still a valid map.
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl ProgressStore for MemoryStore {
    fn get(&self, key: &str) -> anyhow::Result<Option<PersistedProgress>> {
        Ok(self.lock().get(key).cloned())
    }

    fn set(&self, key: &str, progress: &PersistedProgress) -> anyhow::Result<()> {
        self.lock().insert(key.to_string(), progress.clone());
        Ok(())
    }

    fn delete(&self, key: &str) -> anyhow::Result<()> {
        self.lock().remove(key);
        Ok(())
    }
}
