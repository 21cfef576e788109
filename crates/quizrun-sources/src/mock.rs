//! In-memory question source for testing.

use std::sync::atomic::{AtomicU32, Ordering};

use async_trait::async_trait;

use quizrun_core::error::LoadError;
use quizrun_core::model::Question;
use quizrun_core::parser::check_questions;
use quizrun_core::traits::QuestionSource;

/// A question source that serves a fixed list, or a fixed failure.
pub struct StaticSource {
    questions: Vec<Question>,
    failure: Option<String>,
    call_count: AtomicU32,
}

impl StaticSource {
    pub fn new(questions: Vec<Question>) -> Self {
        Self {
            questions,
            failure: None,
            call_count: AtomicU32::new(0),
        }
    }

    /// A source whose every load fails as unreachable with `message`.
    pub fn failing(message: &str) -> Self {
        Self {
            questions: Vec::new(),
            failure: Some(message.to_string()),
            call_count: AtomicU32::new(0),
        }
    }

    /// Number of loads served.
    pub fn call_count(&self) -> u32 {
        self.call_count.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl QuestionSource for StaticSource {
    fn name(&self) -> &str {
        "static"
    }

    async fn load_questions(&self) -> Result<Vec<Question>, LoadError> {
        self.call_count.fetch_add(1, Ordering::Relaxed);
        if let Some(message) = &self.failure {
            return Err(LoadError::Unreachable(message.clone()));
        }
        check_questions(&self.questions)?;
        Ok(self.questions.clone())
    }
}
