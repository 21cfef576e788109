//! Quiz report types with JSON persistence and Markdown rendering.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::engine::QuizEngine;
use crate::model::{QuizResult, ResultTier};
use crate::view::{review_items, ReviewItem};

/// A finished quiz, ready to save or render.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizReport {
    /// Unique report identifier.
    pub id: Uuid,
    /// When the report was created.
    pub created_at: DateTime<Utc>,
    /// Title shown in rendered reports (usually the question source).
    pub title: String,
    pub result: QuizResult,
    pub tier: ResultTier,
    pub message: String,
    /// Every answer, in question order.
    pub items: Vec<ReviewItem>,
}

impl QuizReport {
    /// Build a report from a finished (or reviewing) engine.
    pub fn from_engine(engine: &QuizEngine, title: &str) -> Result<Self> {
        let result = engine.result()?;
        let tier = result.tier();
        Ok(Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            title: title.to_string(),
            result,
            tier,
            message: tier.message().to_string(),
            items: review_items(engine.history()),
        })
    }

    /// Number of wrong answers.
    pub fn mistakes(&self) -> usize {
        self.items.iter().filter(|i| !i.is_correct).count()
    }

    /// Save the report as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize report")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        Ok(())
    }

    /// Write the Markdown rendering to a file.
    pub fn save_markdown(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.to_markdown())
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        Ok(())
    }

    /// Load a report from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read report from {}", path.display()))?;
        let report: QuizReport =
            serde_json::from_str(&content).context("failed to parse report JSON")?;
        Ok(report)
    }

    /// Render the report as Markdown.
    pub fn to_markdown(&self) -> String {
        let mut md = String::new();
        md.push_str(&format!("# {}\n\n", self.title));
        md.push_str(&format!(
            "**Score:** {}/{} ({}%) - {}\n\n",
            self.result.score, self.result.total, self.result.percentage, self.message
        ));

        md.push_str("| # | Question | Your answer | Result |\n");
        md.push_str("|---|----------|-------------|--------|\n");
        for item in &self.items {
            let verdict = match &item.correct_answer {
                None => "correct".to_string(),
                Some(answer) => format!("wrong (answer: {answer})"),
            };
            md.push_str(&format!(
                "| {} | {} | {} | {} |\n",
                item.number,
                escape_cell(&item.prompt),
                escape_cell(&item.selected),
                escape_cell(&verdict)
            ));
        }

        if self.mistakes() > 0 {
            md.push_str("\n## Explanations\n\n");
            for item in self.items.iter().filter(|i| !i.is_correct) {
                md.push_str(&format!("- **Q{}:** {}\n", item.number, item.explanation));
            }
        }

        md
    }
}

fn escape_cell(s: &str) -> String {
    s.replace('|', "\\|").replace('\n', " ")
}
