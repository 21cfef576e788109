//! The `quizrun play` command.

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};

use quizrun_core::report::QuizReport;
use quizrun_core::view::{Feedback, Mark, QuestionView, ResultView, ReviewItem};
use quizrun_core::{Phase, QuizEngine, QuizError};
use quizrun_report::write_html_report;
use quizrun_sources::create_source;
use quizrun_store::JsonFileStore;

pub async fn execute(
    questions: Option<String>,
    config_path: Option<PathBuf>,
    store_dir: Option<PathBuf>,
    report: Option<PathBuf>,
) -> Result<()> {
    let config = super::resolve_config(config_path, questions, store_dir)?;
    let source = create_source(&config.source)?;
    let store = Arc::new(JsonFileStore::new(&config.store.dir));

    let mut engine = QuizEngine::load_with_key(source.as_ref(), store, &config.store.key)
        .await
        .with_context(|| format!("could not start quiz from {}", source.name()))?;

    let mut session = Session::new(&mut engine, source.name(), report);
    let stdin = io::stdin();
    let stdout = io::stdout();
    session.run(&mut stdin.lock(), &mut stdout.lock())?;
    Ok(())
}

/// How an interactive session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The user left mid-quiz; progress stays in the store.
    Quit,
    /// The user left from the result screen.
    Done,
}

enum Step {
    Continue,
    Stop(Outcome),
}

/// Drives a `QuizEngine` from line-based input.
pub struct Session<'a> {
    engine: &'a mut QuizEngine,
    title: String,
    report_path: Option<PathBuf>,
}

impl<'a> Session<'a> {
    pub fn new(engine: &'a mut QuizEngine, title: &str, report_path: Option<PathBuf>) -> Self {
        Self {
            engine,
            title: title.to_string(),
            report_path,
        }
    }

    pub fn run<R: BufRead, W: Write>(&mut self, input: &mut R, out: &mut W) -> Result<Outcome> {
        if self.engine.was_resumed() {
            writeln!(
                out,
                "Resuming at question {} of {} (score {}).",
                self.engine.current_index() + 1,
                self.engine.total(),
                self.engine.score()
            )?;
        }

        loop {
            let step = match self.engine.phase() {
                Phase::Answering => self.ask(input, out)?,
                Phase::Answered => self.show_feedback(input, out)?,
                Phase::Finished => self.result_menu(input, out)?,
                Phase::Reviewing => {
                    self.engine.exit_review()?;
                    Step::Continue
                }
            };

            if let Step::Stop(outcome) = step {
                if outcome == Outcome::Quit {
                    self.print_quit_notice(out)?;
                }
                return Ok(outcome);
            }
        }
    }

    fn ask<R: BufRead, W: Write>(&mut self, input: &mut R, out: &mut W) -> Result<Step> {
        let view = self.engine.question_view()?;
        print_question(out, &view)?;

        loop {
            write!(
                out,
                "Answer [1-{}], q to quit, r to restart: ",
                view.options.len()
            )?;
            out.flush()?;

            let Some(line) = read_line(input)? else {
                return Ok(Step::Stop(Outcome::Quit));
            };
            match line.as_str() {
                "q" => return Ok(Step::Stop(Outcome::Quit)),
                "r" => match self.engine.restart() {
                    Ok(()) => {
                        writeln!(out, "Restarted.")?;
                        return Ok(Step::Continue);
                    }
                    Err(e) => offer_retry(out, e)?,
                },
                choice => {
                    let option = choice
                        .parse::<usize>()
                        .ok()
                        .and_then(|n| n.checked_sub(1))
                        .and_then(|i| view.options.get(i));
                    match option {
                        Some(option) => {
                            self.engine.select_option(option)?;
                            self.engine.submit_answer()?;
                            return Ok(Step::Continue);
                        }
                        None => writeln!(
                            out,
                            "Please enter a number between 1 and {}.",
                            view.options.len()
                        )?,
                    }
                }
            }
        }
    }

    fn show_feedback<R: BufRead, W: Write>(&mut self, input: &mut R, out: &mut W) -> Result<Step> {
        let feedback = self.engine.feedback()?;
        print_feedback(out, &feedback)?;

        let last = self.engine.current_index() + 1 == self.engine.total();
        loop {
            write!(
                out,
                "Press Enter for {} (q to quit): ",
                if last {
                    "your result"
                } else {
                    "the next question"
                }
            )?;
            out.flush()?;

            match read_line(input)?.as_deref() {
                None | Some("q") => return Ok(Step::Stop(Outcome::Quit)),
                Some(_) => match self.engine.advance() {
                    Ok(phase) => {
                        if phase == Phase::Finished {
                            self.write_report(out)?;
                        }
                        return Ok(Step::Continue);
                    }
                    Err(e) => offer_retry(out, e)?,
                },
            }
        }
    }

    fn result_menu<R: BufRead, W: Write>(&mut self, input: &mut R, out: &mut W) -> Result<Step> {
        print_result(out, &self.engine.result_view()?)?;

        loop {
            write!(out, "[v] review answers, [r] restart, [q] quit: ")?;
            out.flush()?;

            match read_line(input)?.as_deref() {
                None | Some("q") => return Ok(Step::Stop(Outcome::Done)),
                Some("v") => {
                    self.engine.enter_review()?;
                    let items = self.engine.review_items()?;
                    print_review(out, &items)?;
                    self.engine.exit_review()?;
                }
                Some("r") => match self.engine.restart() {
                    Ok(()) => {
                        writeln!(out, "Restarted.")?;
                        return Ok(Step::Continue);
                    }
                    Err(e) => offer_retry(out, e)?,
                },
                Some(_) => writeln!(out, "Please enter v, r or q.")?,
            }
        }
    }

    /// Saved progress only exists past the first question, and an answer
    /// that was never advanced past is not part of it.
    fn print_quit_notice<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let index = self.engine.current_index();
        if index == 0 {
            return writeln!(out, "\nNo progress saved yet.");
        }
        writeln!(out)?;
        if self.engine.phase() == Phase::Answered {
            writeln!(
                out,
                "Your answer to question {} was not saved and will be asked again.",
                index + 1
            )?;
        }
        writeln!(
            out,
            "Progress saved. Run `quizrun play` again to resume at question {}.",
            index + 1
        )
    }

    fn write_report<W: Write>(&self, out: &mut W) -> Result<()> {
        let Some(path) = &self.report_path else {
            return Ok(());
        };
        let report = QuizReport::from_engine(&*self.engine, &self.title)?;
        save_report(&report, path)?;
        writeln!(out, "Report written to {}", path.display())?;
        Ok(())
    }
}

/// Report a failed store write and let the user try the same step again.
/// Contract violations end the session.
fn offer_retry<W: Write>(out: &mut W, err: QuizError) -> Result<()> {
    if err.is_contract_violation() {
        return Err(err.into());
    }
    tracing::warn!("{err:#}");
    writeln!(out, "{err}. Please try again.")?;
    Ok(())
}

/// Write `report` as HTML for `.html`/`.htm`, Markdown for `.md`, JSON otherwise.
fn save_report(report: &QuizReport, path: &Path) -> Result<()> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or_default();
    let written = match extension {
        "html" | "htm" => write_html_report(report, path),
        "md" | "markdown" => report.save_markdown(path),
        _ => report.save_json(path),
    };
    written.with_context(|| format!("failed to write report {}", path.display()))
}

/// Next trimmed input line, or `None` at end of input.
fn read_line<R: BufRead>(input: &mut R) -> Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line).context("failed to read input")? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

fn progress_bar(fraction: f64, width: usize) -> String {
    let filled = ((fraction * width as f64).round() as usize).min(width);
    format!("[{}{}]", "#".repeat(filled), ".".repeat(width - filled))
}

fn print_question<W: Write>(out: &mut W, view: &QuestionView) -> io::Result<()> {
    writeln!(out)?;
    writeln!(
        out,
        "Question {} of {}  {}  Score: {}",
        view.number,
        view.total,
        progress_bar(view.progress, 20),
        view.score
    )?;
    writeln!(out, "{}", view.prompt)?;
    for (i, option) in view.options.iter().enumerate() {
        writeln!(out, "  {}) {}", i + 1, option)?;
    }
    Ok(())
}

fn print_feedback<W: Write>(out: &mut W, feedback: &Feedback) -> io::Result<()> {
    if feedback.is_correct {
        writeln!(out, "Correct!")?;
    } else {
        writeln!(out, "Wrong. The correct answer is: {}", feedback.correct_answer)?;
    }
    for (i, option) in feedback.marks.iter().enumerate() {
        let note = match option.mark {
            Mark::Correct => "  <- correct",
            Mark::Wrong => "  <- your answer",
            Mark::Neutral => "",
        };
        writeln!(out, "  {}) {}{}", i + 1, option.text, note)?;
    }
    if !feedback.explanation.is_empty() {
        writeln!(out, "Explanation: {}", feedback.explanation)?;
    }
    if !feedback.reference_text.is_empty() {
        writeln!(out, "Reference: {}", feedback.reference_text)?;
    }
    writeln!(out, "Score: {}", feedback.score)
}

fn print_result<W: Write>(out: &mut W, view: &ResultView) -> io::Result<()> {
    writeln!(out)?;
    writeln!(
        out,
        "Quiz complete! Score: {}/{} ({}%)",
        view.result.score, view.result.total, view.result.percentage
    )?;
    writeln!(out, "{}", view.message)
}

fn print_review<W: Write>(out: &mut W, items: &[ReviewItem]) -> io::Result<()> {
    use comfy_table::{Cell, ContentArrangement, Table};

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        "#",
        "Question",
        "Your answer",
        "Result",
        "Correct answer",
        "Explanation",
    ]);

    for item in items {
        table.add_row(vec![
            Cell::new(item.number),
            Cell::new(&item.prompt),
            Cell::new(&item.selected),
            Cell::new(if item.is_correct { "correct" } else { "wrong" }),
            Cell::new(item.correct_answer.as_deref().unwrap_or("")),
            Cell::new(&item.explanation),
        ]);
    }

    writeln!(out, "\n{table}")
}
