//! Core data model types for quizrun.
//!
//! Questions are immutable once loaded; answer records are created once per
//! question at submit time; snapshots carry the minimal state needed to
//! resume a session.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single multiple-choice question.
///
/// On disk the prompt and correct answer are stored as `question` and
/// `answer`; `prompt` and `correct_answer` are accepted as aliases.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// The question text shown to the user.
    #[serde(rename = "question", alias = "prompt")]
    pub prompt: String,
    /// Answer options, in display order.
    pub options: Vec<String>,
    /// Text of the correct option.
    #[serde(rename = "answer", alias = "correct_answer")]
    pub correct_answer: String,
    /// Shown after the user submits an answer.
    #[serde(default)]
    pub explanation: String,
    /// Source or further reading for the answer.
    #[serde(default)]
    pub reference_text: String,
}

impl Question {
    /// Whether `option` is the correct answer. Matching is by text only, so a
    /// duplicated correct option is correct wherever it appears.
    pub fn is_correct(&self, option: &str) -> bool {
        option == self.correct_answer
    }

    /// Whether `option` is one of this question's options.
    pub fn has_option(&self, option: &str) -> bool {
        self.options.iter().any(|o| o == option)
    }
}

/// The user's committed answer to one question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerRecord {
    /// The question that was answered.
    #[serde(alias = "questionObj")]
    pub question: Question,
    /// The option text the user submitted.
    #[serde(alias = "userSelected")]
    pub selected_option: String,
    /// Whether `selected_option` equals the question's correct answer.
    #[serde(alias = "isCorrect")]
    pub is_correct: bool,
}

impl AnswerRecord {
    pub fn new(question: &Question, selected_option: &str) -> Self {
        Self {
            question: question.clone(),
            selected_option: selected_option.to_string(),
            is_correct: question.is_correct(selected_option),
        }
    }
}

/// Serializable snapshot written to the progress store after each advance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedProgress {
    /// Index of the question to resume at.
    pub index: usize,
    /// Correct answers so far.
    pub score: usize,
    /// One record per answered question.
    #[serde(default)]
    pub history: Vec<AnswerRecord>,
    /// When the snapshot was written.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub saved_at: Option<DateTime<Utc>>,
}

impl PersistedProgress {
    /// Whether the snapshot agrees with itself: one history entry per
    /// answered question and a score matching the correct entries.
    pub fn is_consistent(&self) -> bool {
        self.history.len() == self.index
            && self.history.iter().filter(|r| r.is_correct).count() == self.score
    }
}

/// Final outcome of a finished quiz.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizResult {
    pub score: usize,
    pub total: usize,
    /// `100 * score / total`, rounded half-up.
    pub percentage: u32,
}

impl QuizResult {
    pub fn new(score: usize, total: usize) -> Self {
        Self {
            score,
            total,
            percentage: round_percentage(score, total),
        }
    }

    pub fn tier(&self) -> ResultTier {
        ResultTier::from_percentage(self.percentage)
    }
}

/// `round(100 * score / total)` with halves rounded up, in integer arithmetic.
fn round_percentage(score: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    ((200 * score + total) / (2 * total)) as u32
}

/// Qualitative band for a final percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResultTier {
    /// 80% and above.
    Top,
    /// 50% up to (not including) 80%.
    Mid,
    /// Below 50%.
    Low,
}

impl ResultTier {
    pub fn from_percentage(percentage: u32) -> Self {
        if percentage >= 80 {
            ResultTier::Top
        } else if percentage >= 50 {
            ResultTier::Mid
        } else {
            ResultTier::Low
        }
    }

    /// Message shown on the result screen.
    pub fn message(&self) -> &'static str {
        match self {
            ResultTier::Top => "Excellent! 🏆",
            ResultTier::Mid => "Good job 💪",
            ResultTier::Low => "Keep practicing 📚",
        }
    }
}

impl fmt::Display for ResultTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResultTier::Top => write!(f, "top"),
            ResultTier::Mid => write!(f, "mid"),
            ResultTier::Low => write!(f, "low"),
        }
    }
}
