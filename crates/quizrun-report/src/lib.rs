//! quizrun-report: Report rendering.
//!
//! Turns a `QuizReport` into a self-contained HTML page: the score circle,
//! the qualitative message, and the full answer review.

pub mod html;

pub use html::{generate_html, write_html_report};
