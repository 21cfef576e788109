pub mod init;
pub mod play;
pub mod reset;
pub mod status;
pub mod validate;

use std::path::PathBuf;

use anyhow::Result;

use quizrun_sources::config::{load_config_from, QuizrunConfig, SourceConfig};

/// Load the config file, then let command-line flags override it.
fn resolve_config(
    config_path: Option<PathBuf>,
    questions: Option<String>,
    store_dir: Option<PathBuf>,
) -> Result<QuizrunConfig> {
    let mut config = load_config_from(config_path.as_deref())?;
    if let Some(location) = questions {
        config.source = SourceConfig::from_location(&location);
    }
    if let Some(dir) = store_dir {
        config.store.dir = dir;
    }
    tracing::debug!(?config, "resolved configuration");
    Ok(config)
}
