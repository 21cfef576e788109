//! quizrun-core: Quiz engine, data model, and collaborator traits.
//!
//! This crate defines the question/answer data model, the `QuizEngine` state
//! machine, and the `QuestionSource` / `ProgressStore` traits that the rest of
//! quizrun builds on.

pub mod engine;
pub mod error;
pub mod model;
pub mod parser;
pub mod report;
pub mod traits;
pub mod view;

pub use engine::{Phase, QuizEngine};
pub use error::{LoadError, QuizError};
pub use model::{AnswerRecord, PersistedProgress, Question, QuizResult, ResultTier};
pub use traits::{MemoryStore, ProgressStore, QuestionSource, PROGRESS_KEY};
