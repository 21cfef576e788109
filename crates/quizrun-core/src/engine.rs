//! The quiz state machine.
//!
//! A `QuizEngine` owns every piece of mutable quiz state for one session and
//! is the only place progress is written to or cleared from the store.
//!
//! ```text
//! (load) ──► Answering ──submit──► Answered ──advance──► Answering ...
//!                                      │
//!                                      └──advance (last)──► Finished ◄──► Reviewing
//! ```
//!
//! `restart` returns to `Answering` at question 0 from any phase.

use std::fmt;
use std::sync::Arc;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::error::QuizError;
use crate::model::{AnswerRecord, PersistedProgress, Question, QuizResult};
use crate::traits::{ProgressStore, QuestionSource, PROGRESS_KEY};

/// Where the engine is in a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    /// Waiting for the user to pick and submit an option.
    Answering,
    /// The current question has been submitted; waiting for `advance`.
    Answered,
    /// Every question has been answered.
    Finished,
    /// Showing the answer history after finishing.
    Reviewing,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Answering => write!(f, "answering"),
            Phase::Answered => write!(f, "answered"),
            Phase::Finished => write!(f, "finished"),
            Phase::Reviewing => write!(f, "reviewing"),
        }
    }
}

/// Quiz session state and transitions.
pub struct QuizEngine {
    questions: Vec<Question>,
    current_index: usize,
    score: usize,
    history: Vec<AnswerRecord>,
    selection: Option<String>,
    phase: Phase,
    store: Arc<dyn ProgressStore>,
    key: String,
    resumed: bool,
}

impl fmt::Debug for QuizEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuizEngine")
            .field("questions", &self.questions.len())
            .field("current_index", &self.current_index)
            .field("score", &self.score)
            .field("history", &self.history.len())
            .field("selection", &self.selection)
            .field("phase", &self.phase)
            .field("key", &self.key)
            .finish()
    }
}

impl QuizEngine {
    /// Fetch questions from `source` and start or resume a session.
    ///
    /// The engine only exists once the fetch has succeeded; a fetch failure is
    /// returned as a `LoadError` inside the `anyhow` chain.
    pub async fn load(source: &dyn QuestionSource, store: Arc<dyn ProgressStore>) -> Result<Self> {
        Self::load_with_key(source, store, PROGRESS_KEY).await
    }

    /// Like [`QuizEngine::load`] with an explicit store key.
    pub async fn load_with_key(
        source: &dyn QuestionSource,
        store: Arc<dyn ProgressStore>,
        key: &str,
    ) -> Result<Self> {
        tracing::debug!("loading questions from {}", source.name());
        let questions = source.load_questions().await?;
        tracing::debug!("loaded {} questions from {}", questions.len(), source.name());
        Ok(Self::initialize_with_key(questions, store, key)?)
    }

    /// Start or resume a session over `questions` using the default key.
    pub fn initialize(
        questions: Vec<Question>,
        store: Arc<dyn ProgressStore>,
    ) -> Result<Self, QuizError> {
        Self::initialize_with_key(questions, store, PROGRESS_KEY)
    }

    /// Start or resume a session over `questions`.
    ///
    /// A stored snapshot is resumed when its index points at an existing
    /// question and its history agrees with its index and score. Any other
    /// snapshot is stale: it is deleted and the session starts at question 0.
    pub fn initialize_with_key(
        questions: Vec<Question>,
        store: Arc<dyn ProgressStore>,
        key: &str,
    ) -> Result<Self, QuizError> {
        if questions.is_empty() {
            return Err(QuizError::EmptyQuestionSet);
        }

        let mut engine = Self {
            questions,
            current_index: 0,
            score: 0,
            history: Vec::new(),
            selection: None,
            phase: Phase::Answering,
            store,
            key: key.to_string(),
            resumed: false,
        };

        let saved = match engine.store.get(key) {
            Ok(saved) => saved,
            Err(e) => {
                tracing::warn!("discarding unreadable progress under '{key}': {e:#}");
                None
            }
        };

        match saved {
            Some(progress) if progress.index < engine.total() && progress.is_consistent() => {
                tracing::info!(
                    "resuming at question {} of {} (score {})",
                    progress.index + 1,
                    engine.total(),
                    progress.score
                );
                engine.current_index = progress.index;
                engine.score = progress.score;
                engine.history = progress.history;
                engine.resumed = true;
            }
            Some(progress) => {
                if progress.index >= engine.total() {
                    tracing::info!(
                        "saved progress at index {} is past the last question, starting fresh",
                        progress.index
                    );
                } else {
                    tracing::warn!(
                        "saved progress is inconsistent (index {}, score {}, {} answers), starting fresh",
                        progress.index,
                        progress.score,
                        progress.history.len()
                    );
                }
                engine.store.delete(key).map_err(QuizError::Storage)?;
            }
            None => {
                tracing::info!("starting a new quiz with {} questions", engine.total());
                engine.store.delete(key).map_err(QuizError::Storage)?;
            }
        }

        engine.check_invariants();
        Ok(engine)
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn total(&self) -> usize {
        self.questions.len()
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn score(&self) -> usize {
        self.score
    }

    pub fn history(&self) -> &[AnswerRecord] {
        &self.history
    }

    /// The tentative, not yet submitted, selection.
    pub fn selection(&self) -> Option<&str> {
        self.selection.as_deref()
    }

    /// Whether this session was restored from a snapshot.
    pub fn was_resumed(&self) -> bool {
        self.resumed
    }

    /// Store key used for this session's snapshot.
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn is_finished(&self) -> bool {
        matches!(self.phase, Phase::Finished | Phase::Reviewing)
    }

    // -----------------------------------------------------------------------
    // Operations
    // -----------------------------------------------------------------------

    /// The question at the current index.
    pub fn current_question(&self) -> Result<&Question, QuizError> {
        self.questions
            .get(self.current_index)
            .ok_or(QuizError::OutOfRange {
                index: self.current_index,
                total: self.total(),
            })
    }

    /// Record a tentative choice, replacing any earlier one.
    pub fn select_option(&mut self, option: &str) -> Result<(), QuizError> {
        self.require(Phase::Answering, "select_option")?;
        if !self.current_question()?.has_option(option) {
            return Err(QuizError::UnknownOption(option.to_string()));
        }
        self.selection = Some(option.to_string());
        Ok(())
    }

    /// Commit the tentative choice for the current question.
    pub fn submit_answer(&mut self) -> Result<&AnswerRecord, QuizError> {
        self.require(Phase::Answering, "submit_answer")?;
        let Some(selected) = self.selection.take() else {
            return Err(QuizError::PreconditionFailed {
                operation: "submit_answer without a selection",
                phase: self.phase,
            });
        };

        let record = AnswerRecord::new(self.current_question()?, &selected);
        tracing::debug!(
            "question {} answered '{}' ({})",
            self.current_index + 1,
            record.selected_option,
            if record.is_correct { "correct" } else { "wrong" }
        );
        if record.is_correct {
            self.score += 1;
        }
        self.history.push(record);
        self.phase = Phase::Answered;

        Ok(&self.history[self.history.len() - 1])
    }

    /// Move past the submitted question.
    ///
    /// Landing on another question writes a snapshot; moving past the last one
    /// deletes it and finishes the quiz. If the store fails, the engine stays
    /// on the submitted question.
    pub fn advance(&mut self) -> Result<Phase, QuizError> {
        self.require(Phase::Answered, "advance")?;
        let next = self.current_index + 1;

        if next < self.total() {
            let progress = PersistedProgress {
                index: next,
                score: self.score,
                history: self.history.clone(),
                saved_at: Some(chrono::Utc::now()),
            };
            self.store
                .set(&self.key, &progress)
                .map_err(QuizError::Storage)?;
            self.current_index = next;
            self.phase = Phase::Answering;
        } else {
            self.store.delete(&self.key).map_err(QuizError::Storage)?;
            self.current_index = next;
            self.phase = Phase::Finished;
            tracing::info!("quiz finished: {}/{}", self.score, self.total());
        }

        self.check_invariants();
        Ok(self.phase)
    }

    /// Final score, available once the quiz is finished.
    pub fn result(&self) -> Result<QuizResult, QuizError> {
        if !self.is_finished() {
            return Err(QuizError::PreconditionFailed {
                operation: "result",
                phase: self.phase,
            });
        }
        Ok(QuizResult::new(self.score, self.total()))
    }

    /// Clear saved progress and start again at question 0.
    pub fn restart(&mut self) -> Result<(), QuizError> {
        self.store.delete(&self.key).map_err(QuizError::Storage)?;
        self.current_index = 0;
        self.score = 0;
        self.history.clear();
        self.selection = None;
        self.phase = Phase::Answering;
        self.resumed = false;
        tracing::info!("quiz restarted");
        self.check_invariants();
        Ok(())
    }

    pub fn enter_review(&mut self) -> Result<(), QuizError> {
        self.require(Phase::Finished, "enter_review")?;
        self.phase = Phase::Reviewing;
        Ok(())
    }

    pub fn exit_review(&mut self) -> Result<(), QuizError> {
        self.require(Phase::Reviewing, "exit_review")?;
        self.phase = Phase::Finished;
        Ok(())
    }

    /// The answer history, read-only, while reviewing.
    pub fn review(&self) -> Result<&[AnswerRecord], QuizError> {
        self.require(Phase::Reviewing, "review")?;
        Ok(&self.history)
    }

    fn require(&self, phase: Phase, operation: &'static str) -> Result<(), QuizError> {
        if self.phase == phase {
            Ok(())
        } else {
            Err(QuizError::PreconditionFailed {
                operation,
                phase: self.phase,
            })
        }
    }

    fn check_invariants(&self) {
        debug_assert!(self.current_index <= self.total());
        debug_assert_eq!(
            self.history.len(),
            self.current_index + usize::from(self.phase == Phase::Answered)
        );
        debug_assert_eq!(
            self.score,
            self.history.iter().filter(|r| r.is_correct).count()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LoadError;
    use crate::traits::MemoryStore;
    use async_trait::async_trait;

    fn q(prompt: &str, options: &[&str], answer: &str) -> Question {
        Question {
            prompt: prompt.into(),
            options: options.iter().map(|s| s.to_string()).collect(),
            correct_answer: answer.into(),
            explanation: format!("because {answer}"),
            reference_text: format!("ref {prompt}"),
        }
    }

    fn two_questions() -> Vec<Question> {
        vec![q("first", &["A", "B"], "A"), q("second", &["X", "Y"], "Y")]
    }

    fn numbered(n: usize) -> Vec<Question> {
        (0..n)
            .map(|i| q(&format!("q{i}"), &["right", "wrong"], "right"))
            .collect()
    }

    fn engine_with(questions: Vec<Question>) -> (Arc<MemoryStore>, QuizEngine) {
        let store = Arc::new(MemoryStore::new());
        let engine = QuizEngine::initialize(questions, store.clone()).unwrap();
        (store, engine)
    }

    fn answer(engine: &mut QuizEngine, option: &str) {
        engine.select_option(option).unwrap();
        engine.submit_answer().unwrap();
        engine.advance().unwrap();
    }

    fn assert_invariants(engine: &QuizEngine) {
        assert_eq!(engine.history().len(), engine.current_index());
        assert_eq!(
            engine.score(),
            engine.history().iter().filter(|r| r.is_correct).count()
        );
    }

    /// Store whose writes can be switched off.
    #[derive(Default)]
    struct FlakyStore {
        inner: MemoryStore,
        failing: std::sync::atomic::AtomicBool,
    }

    impl FlakyStore {
        fn fail(&self, on: bool) {
            self.failing
                .store(on, std::sync::atomic::Ordering::SeqCst);
        }

        fn check(&self) -> anyhow::Result<()> {
            if self.failing.load(std::sync::atomic::Ordering::SeqCst) {
                anyhow::bail!("store offline");
            }
            Ok(())
        }
    }

    impl ProgressStore for FlakyStore {
        fn get(&self, key: &str) -> anyhow::Result<Option<PersistedProgress>> {
            self.check()?;
            self.inner.get(key)
        }
        fn set(&self, key: &str, progress: &PersistedProgress) -> anyhow::Result<()> {
            self.check()?;
            self.inner.set(key, progress)
        }
        fn delete(&self, key: &str) -> anyhow::Result<()> {
            self.check()?;
            self.inner.delete(key)
        }
    }

    #[test]
    fn concrete_two_question_session() {
        let (store, mut engine) = engine_with(two_questions());
        assert_eq!(engine.phase(), Phase::Answering);

        engine.select_option("A").unwrap();
        let record = engine.submit_answer().unwrap();
        assert_eq!(record.selected_option, "A");
        assert!(record.is_correct);
        assert_eq!(engine.score(), 1);
        assert_eq!(engine.phase(), Phase::Answered);

        assert_eq!(engine.advance().unwrap(), Phase::Answering);
        assert_eq!(engine.current_index(), 1);
        let saved = store.get(PROGRESS_KEY).unwrap().unwrap();
        assert_eq!(saved.index, 1);
        assert_eq!(saved.score, 1);
        assert_eq!(saved.history.len(), 1);
        assert!(saved.saved_at.is_some());

        engine.select_option("X").unwrap();
        assert!(!engine.submit_answer().unwrap().is_correct);
        assert_eq!(engine.score(), 1);

        assert_eq!(engine.advance().unwrap(), Phase::Finished);
        assert_eq!(engine.current_index(), 2);
        assert!(store.get(PROGRESS_KEY).unwrap().is_none());

        let result = engine.result().unwrap();
        assert_eq!(result, QuizResult::new(1, 2));
        assert_eq!(result.percentage, 50);
    }

    #[test]
    fn invariants_hold_after_every_advance() {
        let (_store, mut engine) = engine_with(numbered(6));
        assert_invariants(&engine);
        for i in 0..6 {
            answer(&mut engine, if i % 2 == 0 { "right" } else { "wrong" });
            assert_invariants(&engine);
        }
        assert_eq!(engine.phase(), Phase::Finished);
        assert_eq!(engine.history().len(), 6);
        assert_eq!(engine.result().unwrap().score, engine.score());
        assert_eq!(engine.score(), 3);
    }

    #[test]
    fn resume_restores_snapshot() {
        let questions = numbered(4);
        let history: Vec<AnswerRecord> = vec![
            AnswerRecord::new(&questions[0], "right"),
            AnswerRecord::new(&questions[1], "wrong"),
        ];
        let store = Arc::new(MemoryStore::with_entry(
            PROGRESS_KEY,
            PersistedProgress {
                index: 2,
                score: 1,
                history: history.clone(),
                saved_at: None,
            },
        ));

        let engine = QuizEngine::initialize(questions.clone(), store.clone()).unwrap();
        assert!(engine.was_resumed());
        assert_eq!(engine.current_index(), 2);
        assert_eq!(engine.score(), 1);
        assert_eq!(engine.history(), history.as_slice());
        assert_eq!(engine.current_question().unwrap(), &questions[2]);
        // resuming leaves the snapshot in place
        assert!(store.get(PROGRESS_KEY).unwrap().is_some());
    }

    #[test]
    fn stale_snapshot_is_discarded() {
        let questions = numbered(2);
        let history = vec![
            AnswerRecord::new(&questions[0], "right"),
            AnswerRecord::new(&questions[1], "right"),
        ];
        let store = Arc::new(MemoryStore::with_entry(
            PROGRESS_KEY,
            PersistedProgress {
                index: 2,
                score: 2,
                history,
                saved_at: None,
            },
        ));

        let engine = QuizEngine::initialize(questions, store.clone()).unwrap();
        assert!(!engine.was_resumed());
        assert_eq!(engine.current_index(), 0);
        assert_eq!(engine.score(), 0);
        assert!(engine.history().is_empty());
        assert!(store.is_empty());
    }

    #[test]
    fn inconsistent_snapshot_is_discarded() {
        let questions = numbered(3);
        let store = Arc::new(MemoryStore::with_entry(
            PROGRESS_KEY,
            PersistedProgress {
                index: 2,
                score: 5,
                history: vec![],
                saved_at: None,
            },
        ));

        let engine = QuizEngine::initialize(questions, store.clone()).unwrap();
        assert_eq!(engine.current_index(), 0);
        assert!(store.is_empty());
    }

    #[test]
    fn custom_key_leaves_other_keys_alone() {
        let store = Arc::new(MemoryStore::with_entry(
            PROGRESS_KEY,
            PersistedProgress {
                index: 99,
                score: 0,
                history: vec![],
                saved_at: None,
            },
        ));
        let mut engine =
            QuizEngine::initialize_with_key(numbered(2), store.clone(), "other").unwrap();
        answer(&mut engine, "right");
        assert_eq!(engine.key(), "other");
        assert_eq!(store.get("other").unwrap().unwrap().index, 1);
        assert_eq!(store.get(PROGRESS_KEY).unwrap().unwrap().index, 99);
    }

    #[test]
    fn empty_question_set_is_rejected() {
        let store = Arc::new(MemoryStore::new());
        let err = QuizEngine::initialize(vec![], store).unwrap_err();
        assert!(matches!(err, QuizError::EmptyQuestionSet));
    }

    #[test]
    fn restart_twice_equals_once() {
        let (store, mut engine) = engine_with(numbered(3));
        answer(&mut engine, "right");
        engine.select_option("wrong").unwrap();

        engine.restart().unwrap();
        let once = (
            engine.phase(),
            engine.current_index(),
            engine.score(),
            engine.history().to_vec(),
            engine.selection().map(str::to_string),
        );
        engine.restart().unwrap();
        let twice = (
            engine.phase(),
            engine.current_index(),
            engine.score(),
            engine.history().to_vec(),
            engine.selection().map(str::to_string),
        );

        assert_eq!(once, twice);
        assert_eq!(once.0, Phase::Answering);
        assert_eq!(once.1, 0);
        assert!(once.4.is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn restart_from_finished_and_reviewing() {
        let (_store, mut engine) = engine_with(numbered(1));
        answer(&mut engine, "right");
        engine.enter_review().unwrap();
        engine.restart().unwrap();
        assert_eq!(engine.phase(), Phase::Answering);
        assert_eq!(engine.current_question().unwrap().prompt, "q0");
    }

    #[test]
    fn selection_is_replaced_not_accumulated() {
        let (_store, mut engine) = engine_with(two_questions());
        engine.select_option("B").unwrap();
        engine.select_option("A").unwrap();
        assert_eq!(engine.selection(), Some("A"));
        assert!(engine.history().is_empty());
        assert!(engine.submit_answer().unwrap().is_correct);
        assert!(engine.selection().is_none());
    }

    #[test]
    fn select_unknown_option_fails() {
        let (_store, mut engine) = engine_with(two_questions());
        let err = engine.select_option("Z").unwrap_err();
        assert!(matches!(err, QuizError::UnknownOption(ref s) if s == "Z"));
        assert!(engine.selection().is_none());
    }

    #[test]
    fn submit_without_selection_fails() {
        let (_store, mut engine) = engine_with(two_questions());
        let err = engine.submit_answer().unwrap_err();
        assert!(matches!(err, QuizError::PreconditionFailed { .. }));
        assert!(engine.history().is_empty());
    }

    #[test]
    fn double_submit_is_rejected() {
        let (_store, mut engine) = engine_with(two_questions());
        engine.select_option("A").unwrap();
        engine.submit_answer().unwrap();
        let err = engine.submit_answer().unwrap_err();
        assert!(matches!(
            err,
            QuizError::PreconditionFailed {
                phase: Phase::Answered,
                ..
            }
        ));
        assert!(engine.select_option("B").is_err());
        assert_eq!(engine.history().len(), 1);
        assert_eq!(engine.score(), 1);
    }

    #[test]
    fn advance_requires_submit() {
        let (store, mut engine) = engine_with(two_questions());
        engine.select_option("A").unwrap();
        let err = engine.advance().unwrap_err();
        assert!(matches!(
            err,
            QuizError::PreconditionFailed {
                operation: "advance",
                phase: Phase::Answering
            }
        ));
        assert_eq!(engine.current_index(), 0);
        assert!(store.is_empty());
    }

    #[test]
    fn current_question_out_of_range_after_finish() {
        let (_store, mut engine) = engine_with(numbered(1));
        answer(&mut engine, "wrong");
        let err = engine.current_question().unwrap_err();
        assert!(matches!(err, QuizError::OutOfRange { index: 1, total: 1 }));
        assert!(engine.select_option("right").is_err());
    }

    #[test]
    fn result_only_when_finished() {
        let (_store, mut engine) = engine_with(numbered(2));
        assert!(engine.result().is_err());
        answer(&mut engine, "right");
        assert!(engine.result().is_err());
        answer(&mut engine, "right");
        assert_eq!(engine.result().unwrap().percentage, 100);
    }

    #[test]
    fn review_toggles_without_changing_state() {
        let (_store, mut engine) = engine_with(two_questions());
        assert!(engine.enter_review().is_err());
        answer(&mut engine, "A");
        answer(&mut engine, "X");
        assert!(engine.review().is_err());
        assert!(engine.exit_review().is_err());

        let before = engine.result().unwrap();
        engine.enter_review().unwrap();
        assert_eq!(engine.phase(), Phase::Reviewing);
        assert_eq!(engine.review().unwrap().len(), 2);
        assert_eq!(engine.result().unwrap(), before);
        engine.exit_review().unwrap();
        assert_eq!(engine.phase(), Phase::Finished);
        assert_eq!(engine.result().unwrap(), before);
    }

    #[test]
    fn duplicated_correct_option_matches_by_text() {
        let (_store, mut engine) = engine_with(vec![q("dup", &["A", "B", "A"], "A")]);
        engine.select_option("A").unwrap();
        assert!(engine.submit_answer().unwrap().is_correct);
    }

    #[test]
    fn percentage_boundaries() {
        let cases = [(5, 4, 80), (5, 2, 40), (10, 5, 50)];
        for (total, correct, expected) in cases {
            let (_store, mut engine) = engine_with(numbered(total));
            for i in 0..total {
                answer(&mut engine, if i < correct { "right" } else { "wrong" });
            }
            assert_eq!(engine.result().unwrap().percentage, expected);
        }
    }

    #[test]
    fn failed_write_keeps_engine_on_question() {
        let store = Arc::new(FlakyStore::default());
        let mut engine = QuizEngine::initialize(numbered(3), store.clone()).unwrap();
        engine.select_option("right").unwrap();
        engine.submit_answer().unwrap();

        store.fail(true);
        let err = engine.advance().unwrap_err();
        assert!(matches!(err, QuizError::Storage(_)));
        assert_eq!(engine.phase(), Phase::Answered);
        assert_eq!(engine.current_index(), 0);

        store.fail(false);
        assert_eq!(engine.advance().unwrap(), Phase::Answering);
        assert_eq!(store.get(PROGRESS_KEY).unwrap().unwrap().index, 1);
    }

    #[test]
    fn unreadable_store_starts_fresh_but_delete_failure_surfaces() {
        let store = Arc::new(FlakyStore::default());
        store.fail(true);
        let err = QuizEngine::initialize(numbered(2), store.clone()).unwrap_err();
        assert!(matches!(err, QuizError::Storage(_)));
    }

    struct FixedSource(Result<Vec<Question>, String>);

    #[async_trait]
    impl QuestionSource for FixedSource {
        fn name(&self) -> &str {
            "fixed"
        }

        async fn load_questions(&self) -> Result<Vec<Question>, LoadError> {
            self.0.clone().map_err(LoadError::Unreachable)
        }
    }

    #[tokio::test]
    async fn load_initializes_after_fetch() {
        let source = FixedSource(Ok(two_questions()));
        let engine = QuizEngine::load(&source, Arc::new(MemoryStore::new()))
            .await
            .unwrap();
        assert_eq!(engine.total(), 2);
        assert_eq!(engine.phase(), Phase::Answering);
    }

    #[tokio::test]
    async fn load_failure_yields_no_engine() {
        let source = FixedSource(Err("connection refused".into()));
        let err = QuizEngine::load(&source, Arc::new(MemoryStore::new()))
            .await
            .unwrap_err();
        assert!(err.downcast_ref::<LoadError>().is_some());
        assert!(err.to_string().contains("connection refused"));
    }
}
