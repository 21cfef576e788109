//! The `quizrun status` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{ContentArrangement, Table};

use quizrun_core::traits::ProgressStore;
use quizrun_store::JsonFileStore;

pub fn execute(config_path: Option<PathBuf>, store_dir: Option<PathBuf>) -> Result<()> {
    let config = super::resolve_config(config_path, None, store_dir)?;
    let store = JsonFileStore::new(&config.store.dir);

    let Some(progress) = store.get(&config.store.key)? else {
        println!("No saved progress.");
        return Ok(());
    };

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Field", "Value"]);
    table.add_row(vec!["Key".to_string(), config.store.key.clone()]);
    table.add_row(vec![
        "Next question".to_string(),
        (progress.index + 1).to_string(),
    ]);
    table.add_row(vec!["Score".to_string(), progress.score.to_string()]);
    table.add_row(vec![
        "Answered".to_string(),
        progress.history.len().to_string(),
    ]);
    table.add_row(vec![
        "Saved at".to_string(),
        progress
            .saved_at
            .map(|t| t.format("%Y-%m-%d %H:%M:%S UTC").to_string())
            .unwrap_or_else(|| "unknown".to_string()),
    ]);

    if !progress.is_consistent() {
        tracing::warn!("saved progress is inconsistent and will be discarded on next play");
    }

    println!("{table}");
    Ok(())
}
