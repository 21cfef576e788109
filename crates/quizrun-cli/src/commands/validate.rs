//! The `quizrun validate` command.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use quizrun_core::model::Question;
use quizrun_core::parser::{parse_questions, validate_questions};

pub fn execute(questions_path: PathBuf) -> Result<()> {
    let sets = if questions_path.is_dir() {
        load_directory(&questions_path)?
    } else {
        let questions = parse_questions(&questions_path)
            .with_context(|| format!("invalid question set {}", questions_path.display()))?;
        vec![(questions_path, questions)]
    };

    let mut total_warnings = 0;

    for (path, questions) in &sets {
        println!(
            "Question set: {} ({} questions)",
            path.display(),
            questions.len()
        );

        let warnings = validate_questions(questions);
        for w in &warnings {
            let prefix = w
                .question
                .map(|n| format!("  [Q{n}]"))
                .unwrap_or_else(|| "  ".to_string());
            println!("{prefix} WARNING: {}", w.message);
        }
        total_warnings += warnings.len();
    }

    if total_warnings == 0 {
        println!("All questions valid.");
    } else {
        println!("\n{total_warnings} warning(s) found.");
    }

    Ok(())
}

/// Parse every `.json` and `.toml` file in `dir`, sorted by name.
fn load_directory(dir: &Path) -> Result<Vec<(PathBuf, Vec<Question>)>> {
    let mut paths: Vec<PathBuf> = std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory {}", dir.display()))?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| {
            p.is_file()
                && p
                    .extension()
                    .is_some_and(|ext| ext == "json" || ext == "toml")
        })
        .collect();
    paths.sort();

    if paths.is_empty() {
        anyhow::bail!("no .json or .toml question files in {}", dir.display());
    }

    paths
        .into_iter()
        .map(|path| {
            let questions = parse_questions(&path)
                .with_context(|| format!("invalid question set {}", path.display()))?;
            Ok((path, questions))
        })
        .collect()
}
