//! Presentation data derived from engine state.
//!
//! These are plain values a front-end renders; the engine never deals in
//! rendering constructs itself.

use serde::{Deserialize, Serialize};

use crate::engine::{Phase, QuizEngine};
use crate::error::QuizError;
use crate::model::{AnswerRecord, QuizResult, ResultTier};

/// Everything needed to draw the current question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionView {
    /// 1-based question number.
    pub number: usize,
    pub total: usize,
    pub prompt: String,
    pub options: Vec<String>,
    /// Fraction of questions already behind the user, in `[0, 1)`.
    pub progress: f64,
    /// Correct answers so far.
    pub score: usize,
    /// Tentative selection, if any.
    pub selected: Option<String>,
}

/// How an option should be marked after submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mark {
    Correct,
    Wrong,
    Neutral,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionMark {
    pub text: String,
    pub mark: Mark,
}

/// Feedback for the question just submitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feedback {
    pub selected: String,
    pub is_correct: bool,
    pub correct_answer: String,
    pub explanation: String,
    pub reference_text: String,
    /// One entry per option, in display order.
    pub marks: Vec<OptionMark>,
    /// Running score including this answer.
    pub score: usize,
}

/// The result screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultView {
    pub result: QuizResult,
    pub tier: ResultTier,
    pub message: String,
}

impl From<QuizResult> for ResultView {
    fn from(result: QuizResult) -> Self {
        let tier = result.tier();
        Self {
            result,
            tier,
            message: tier.message().to_string(),
        }
    }
}

/// One line of the post-quiz review.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewItem {
    /// 1-based question number.
    pub number: usize,
    pub prompt: String,
    pub is_correct: bool,
    pub selected: String,
    /// Only present when the user was wrong.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub correct_answer: Option<String>,
    pub explanation: String,
}

impl ReviewItem {
    pub fn from_record(number: usize, record: &AnswerRecord) -> Self {
        Self {
            number,
            prompt: record.question.prompt.clone(),
            is_correct: record.is_correct,
            selected: record.selected_option.clone(),
            correct_answer: (!record.is_correct).then(|| record.question.correct_answer.clone()),
            explanation: record.question.explanation.clone(),
        }
    }
}

/// Build review items for an answer history, numbered from 1.
pub fn review_items(history: &[AnswerRecord]) -> Vec<ReviewItem> {
    history
        .iter()
        .enumerate()
        .map(|(i, record)| ReviewItem::from_record(i + 1, record))
        .collect()
}

/// Marks for every option of the record's question.
pub fn option_marks(record: &AnswerRecord) -> Vec<OptionMark> {
    record
        .question
        .options
        .iter()
        .map(|text| {
            let mark = if record.question.is_correct(text) {
                Mark::Correct
            } else if !record.is_correct && *text == record.selected_option {
                Mark::Wrong
            } else {
                Mark::Neutral
            };
            OptionMark {
                text: text.clone(),
                mark,
            }
        })
        .collect()
}

impl QuizEngine {
    /// View of the current question while answering or answered.
    pub fn question_view(&self) -> Result<QuestionView, QuizError> {
        let question = self.current_question()?;
        Ok(QuestionView {
            number: self.current_index() + 1,
            total: self.total(),
            prompt: question.prompt.clone(),
            options: question.options.clone(),
            progress: self.current_index() as f64 / self.total() as f64,
            score: self.score(),
            selected: self.selection().map(str::to_string),
        })
    }

    /// Feedback for the submitted answer; only valid in `Answered`.
    pub fn feedback(&self) -> Result<Feedback, QuizError> {
        let record = match (self.phase(), self.history().last()) {
            (Phase::Answered, Some(record)) => record,
            (phase, _) => {
                return Err(QuizError::PreconditionFailed {
                    operation: "feedback",
                    phase,
                })
            }
        };
        Ok(Feedback {
            selected: record.selected_option.clone(),
            is_correct: record.is_correct,
            correct_answer: record.question.correct_answer.clone(),
            explanation: record.question.explanation.clone(),
            reference_text: record.question.reference_text.clone(),
            marks: option_marks(record),
            score: self.score(),
        })
    }

    /// The result screen once finished.
    pub fn result_view(&self) -> Result<ResultView, QuizError> {
        Ok(self.result()?.into())
    }

    /// Review items; only valid in `Reviewing`.
    pub fn review_items(&self) -> Result<Vec<ReviewItem>, QuizError> {
        Ok(review_items(self.review()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Question;
    use crate::traits::MemoryStore;
    use std::sync::Arc;

    fn questions() -> Vec<Question> {
        vec![
            Question {
                prompt: "Pick A".into(),
                options: vec!["A".into(), "B".into(), "A".into()],
                correct_answer: "A".into(),
                explanation: "A is first".into(),
                reference_text: "Alphabet".into(),
            },
            Question {
                prompt: "Pick Y".into(),
                options: vec!["X".into(), "Y".into()],
                correct_answer: "Y".into(),
                explanation: "Y follows X".into(),
                reference_text: "Alphabet".into(),
            },
        ]
    }

    fn engine() -> QuizEngine {
        QuizEngine::initialize(questions(), Arc::new(MemoryStore::new())).unwrap()
    }

    #[test]
    fn question_view_tracks_progress() {
        let mut engine = engine();
        let view = engine.question_view().unwrap();
        assert_eq!(view.number, 1);
        assert_eq!(view.total, 2);
        assert_eq!(view.progress, 0.0);
        assert!(view.selected.is_none());

        engine.select_option("B").unwrap();
        assert_eq!(engine.question_view().unwrap().selected.as_deref(), Some("B"));
        engine.submit_answer().unwrap();
        engine.advance().unwrap();

        let view = engine.question_view().unwrap();
        assert_eq!(view.number, 2);
        assert_eq!(view.progress, 0.5);
        assert_eq!(view.prompt, "Pick Y");
    }

    #[test]
    fn feedback_marks_every_correct_duplicate_and_the_wrong_pick() {
        let mut engine = engine();
        assert!(engine.feedback().is_err());
        engine.select_option("B").unwrap();
        engine.submit_answer().unwrap();

        let feedback = engine.feedback().unwrap();
        assert!(!feedback.is_correct);
        assert_eq!(feedback.correct_answer, "A");
        assert_eq!(feedback.reference_text, "Alphabet");
        let marks: Vec<Mark> = feedback.marks.iter().map(|m| m.mark).collect();
        assert_eq!(marks, vec![Mark::Correct, Mark::Wrong, Mark::Correct]);
    }

    #[test]
    fn feedback_for_correct_answer_has_no_wrong_mark() {
        let mut engine = engine();
        engine.select_option("A").unwrap();
        engine.submit_answer().unwrap();
        let feedback = engine.feedback().unwrap();
        assert!(feedback.is_correct);
        assert_eq!(feedback.score, 1);
        assert!(feedback.marks.iter().all(|m| m.mark != Mark::Wrong));
    }

    #[test]
    fn result_and_review_views() {
        let mut engine = engine();
        for option in ["A", "X"] {
            engine.select_option(option).unwrap();
            engine.submit_answer().unwrap();
            engine.advance().unwrap();
        }

        let result = engine.result_view().unwrap();
        assert_eq!(result.result.percentage, 50);
        assert_eq!(result.tier, ResultTier::Mid);
        assert_eq!(result.message, ResultTier::Mid.message());

        assert!(engine.review_items().is_err());
        engine.enter_review().unwrap();
        let items = engine.review_items().unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].number, 1);
        assert!(items[0].is_correct);
        assert!(items[0].correct_answer.is_none());
        assert_eq!(items[1].selected, "X");
        assert_eq!(items[1].correct_answer.as_deref(), Some("Y"));
        assert_eq!(items[1].explanation, "Y follows X");
    }
}
