//! Question set parser.
//!
//! Loads question sets from JSON (a top-level array, the `questions.json`
//! layout) or TOML (`[[questions]]` tables), checks them for fatal problems,
//! and reports non-fatal warnings.

use std::collections::HashSet;
use std::path::Path;

use serde::Deserialize;

use crate::error::LoadError;
use crate::model::Question;

/// Intermediate TOML structure for question set files.
#[derive(Debug, Deserialize)]
struct TomlQuestionFile {
    #[serde(default)]
    questions: Vec<Question>,
}

/// Serialization format of a question set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Json,
    Toml,
}

impl Format {
    /// Pick a format from a file extension; anything but `.toml` is JSON.
    pub fn from_path(path: &Path) -> Self {
        if path.extension().is_some_and(|ext| ext == "toml") {
            Format::Toml
        } else {
            Format::Json
        }
    }
}

/// Read and parse a question file, then run [`check_questions`].
pub fn parse_questions(path: &Path) -> Result<Vec<Question>, LoadError> {
    let content = std::fs::read_to_string(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => LoadError::NotFound(path.display().to_string()),
        _ => LoadError::Unreachable(format!("failed to read {}: {e}", path.display())),
    })?;

    parse_questions_str(&content, Format::from_path(path))
}

/// Parse question set text (useful for testing and HTTP bodies).
pub fn parse_questions_str(content: &str, format: Format) -> Result<Vec<Question>, LoadError> {
    let questions = match format {
        Format::Json => serde_json::from_str::<Vec<Question>>(content)
            .map_err(|e| LoadError::Malformed(format!("invalid JSON: {e}")))?,
        Format::Toml => {
            toml::from_str::<TomlQuestionFile>(content)
                .map_err(|e| LoadError::Malformed(format!("invalid TOML: {e}")))?
                .questions
        }
    };

    check_questions(&questions)?;
    Ok(questions)
}

/// Reject question sets the engine cannot run.
///
/// A set is unusable when it is empty, or when any question has no options
/// or a correct answer that matches none of its options.
pub fn check_questions(questions: &[Question]) -> Result<(), LoadError> {
    if questions.is_empty() {
        return Err(LoadError::Malformed("question set is empty".into()));
    }

    for (i, q) in questions.iter().enumerate() {
        if q.options.is_empty() {
            return Err(LoadError::Malformed(format!(
                "question {} has no options",
                i + 1
            )));
        }
        if !q.has_option(&q.correct_answer) {
            return Err(LoadError::Malformed(format!(
                "question {}: answer '{}' is not one of its options",
                i + 1,
                q.correct_answer
            )));
        }
    }

    Ok(())
}

/// A warning from question set validation.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// 1-based question number (if applicable).
    pub question: Option<usize>,
    /// Warning message.
    pub message: String,
}

/// Validate a question set for issues that do not stop a quiz from running.
pub fn validate_questions(questions: &[Question]) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    // Duplicate prompts across the set
    let mut seen_prompts = HashSet::new();
    for (i, q) in questions.iter().enumerate() {
        if !q.prompt.trim().is_empty() && !seen_prompts.insert(q.prompt.trim()) {
            warnings.push(ValidationWarning {
                question: Some(i + 1),
                message: format!("duplicate question: {}", q.prompt.trim()),
            });
        }
    }

    for (i, q) in questions.iter().enumerate() {
        let number = Some(i + 1);

        if q.prompt.trim().is_empty() {
            warnings.push(ValidationWarning {
                question: number,
                message: "prompt is empty".into(),
            });
        }

        if q.options.len() == 1 {
            warnings.push(ValidationWarning {
                question: number,
                message: "only one option".into(),
            });
        }

        let mut seen = HashSet::new();
        for option in &q.options {
            if !seen.insert(option.as_str()) {
                warnings.push(ValidationWarning {
                    question: number,
                    message: format!("duplicate option: {option}"),
                });
            }
        }

        let correct_count = q.options.iter().filter(|o| q.is_correct(o)).count();
        if correct_count > 1 {
            warnings.push(ValidationWarning {
                question: number,
                message: format!("answer '{}' appears {correct_count} times", q.correct_answer),
            });
        }

        if q.explanation.trim().is_empty() {
            warnings.push(ValidationWarning {
                question: number,
                message: "no explanation provided".into(),
            });
        }
    }

    warnings
}
