//! quizrun-sources: Question sources.
//!
//! Implements the `QuestionSource` trait for local files and HTTP endpoints,
//! plus an in-memory source for tests, and loads the quizrun configuration
//! that chooses between them.

pub mod config;
pub mod file;
pub mod http;
pub mod mock;

pub use config::{create_source, load_config_from, QuizrunConfig, SourceConfig, StoreConfig};
pub use file::FileSource;
pub use http::HttpSource;
pub use mock::StaticSource;
