//! The `quizrun reset` command.

use std::path::PathBuf;

use anyhow::Result;

use quizrun_core::traits::ProgressStore;
use quizrun_store::JsonFileStore;

pub fn execute(config_path: Option<PathBuf>, store_dir: Option<PathBuf>) -> Result<()> {
    let config = super::resolve_config(config_path, None, store_dir)?;
    let store = JsonFileStore::new(&config.store.dir);

    store.delete(&config.store.key)?;
    println!("Saved progress cleared.");
    Ok(())
}
