//! quizrun-store: Progress stores.
//!
//! Implements the `ProgressStore` trait on top of the filesystem so a quiz
//! can be resumed by a later process.

pub mod error;
pub mod file;

pub use error::StoreError;
pub use file::JsonFileStore;
