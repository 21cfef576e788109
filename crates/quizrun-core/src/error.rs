//! Error types for loading questions and driving the quiz engine.
//!
//! `LoadError` is the only condition a presentation layer is expected to show
//! to the user. `QuizError` variants other than `Storage` are contract
//! violations: the caller asked the engine for something its current phase
//! does not allow.

use thiserror::Error;

use crate::engine::Phase;

/// Errors produced while fetching or parsing the question set.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The question file or resource does not exist.
    #[error("question source not found: {0}")]
    NotFound(String),

    /// The source could not be reached (connection refused, IO failure).
    #[error("question source unreachable: {0}")]
    Unreachable(String),

    /// The source answered with an HTTP error status.
    #[error("question source returned HTTP {status}: {message}")]
    Http { status: u16, message: String },

    /// The fetch did not complete in time.
    #[error("question fetch timed out after {0}s")]
    Timeout(u64),

    /// The payload was fetched but is not a usable question set.
    #[error("malformed question set: {0}")]
    Malformed(String),
}

/// Errors returned by `QuizEngine` operations.
#[derive(Debug, Error)]
pub enum QuizError {
    /// `initialize` was given no questions.
    #[error("cannot start a quiz with no questions")]
    EmptyQuestionSet,

    /// The operation is not allowed in the engine's current phase.
    #[error("{operation} is not allowed while {phase}")]
    PreconditionFailed {
        operation: &'static str,
        phase: Phase,
    },

    /// A question was requested past the end of the quiz.
    #[error("question index {index} is out of range (total {total})")]
    OutOfRange { index: usize, total: usize },

    /// The selected text is not one of the current question's options.
    #[error("'{0}' is not an option of the current question")]
    UnknownOption(String),

    /// The progress store failed; engine state was left unchanged.
    #[error("progress store failed: {0:#}")]
    Storage(#[source] anyhow::Error),
}

impl QuizError {
    /// Returns `true` for errors that indicate the caller and the engine
    /// disagree about the quiz phase.
    pub fn is_contract_violation(&self) -> bool {
        matches!(
            self,
            QuizError::PreconditionFailed { .. }
                | QuizError::OutOfRange { .. }
                | QuizError::UnknownOption(_)
        )
    }
}
