//! Local question file source.

use std::path::PathBuf;

use async_trait::async_trait;
use tracing::instrument;

use quizrun_core::error::LoadError;
use quizrun_core::model::Question;
use quizrun_core::parser::{parse_questions_str, Format};
use quizrun_core::traits::QuestionSource;

/// Reads a JSON or TOML question file from disk.
pub struct FileSource {
    path: PathBuf,
    name: String,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path.display().to_string();
        Self { path, name }
    }
}

#[async_trait]
impl QuestionSource for FileSource {
    fn name(&self) -> &str {
        &self.name
    }

    #[instrument(skip(self), fields(path = %self.name))]
    async fn load_questions(&self) -> Result<Vec<Question>, LoadError> {
        let content = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| match e.kind() {
                std::io::ErrorKind::NotFound => LoadError::NotFound(self.name.clone()),
                _ => LoadError::Unreachable(format!("failed to read {}: {e}", self.name)),
            })?;

        let questions = parse_questions_str(&content, Format::from_path(&self.path))?;
        tracing::debug!("read {} questions", questions.len());
        Ok(questions)
    }
}
