//! The `quizrun init` command.

use std::path::Path;

use anyhow::Result;

pub fn execute() -> Result<()> {
    write_if_missing(Path::new("quizrun.toml"), SAMPLE_CONFIG)?;
    write_if_missing(Path::new("questions.json"), EXAMPLE_QUESTIONS)?;

    println!("\nNext steps:");
    println!("  1. Edit questions.json with your own questions");
    println!("  2. Run: quizrun validate --questions questions.json");
    println!("  3. Run: quizrun play");

    Ok(())
}

fn write_if_missing(path: &Path, content: &str) -> Result<()> {
    if path.exists() {
        println!("{} already exists, skipping.", path.display());
    } else {
        std::fs::write(path, content)?;
        println!("Created {}", path.display());
    }
    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# quizrun configuration

[source]
type = "file"
path = "questions.json"

# Or fetch the question set over HTTP:
# [source]
# type = "http"
# url = "https://example.com/questions.json"
# timeout_secs = 30

[store]
dir = ".quizrun"
key = "quiz_app_progress"
"#;

const EXAMPLE_QUESTIONS: &str = r#"[
  {
    "question": "Which keyword declares a mutable binding in Rust?",
    "options": ["let", "let mut", "mut let", "var"],
    "answer": "let mut",
    "explanation": "Bindings are immutable by default; `mut` opts in to mutation.",
    "reference_text": "The Rust Programming Language, ch. 3.1"
  },
  {
    "question": "What does the `?` operator do on an `Err` value?",
    "options": ["Panics", "Returns it early from the function", "Ignores it"],
    "answer": "Returns it early from the function",
    "explanation": "`?` converts the error with `From` and returns it.",
    "reference_text": "The Rust Programming Language, ch. 9.2"
  },
  {
    "question": "Which trait lets a type be duplicated by a plain bitwise copy?",
    "options": ["Clone", "Copy", "Default", "Send"],
    "answer": "Copy",
    "explanation": "`Copy` types are implicitly copied instead of moved.",
    "reference_text": "std::marker::Copy"
  }
]
"#;
