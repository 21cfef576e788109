//! Configuration and source factory.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use quizrun_core::traits::{QuestionSource, PROGRESS_KEY};

use crate::file::FileSource;
use crate::http::HttpSource;

/// Where questions come from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SourceConfig {
    File {
        #[serde(default = "default_questions_path")]
        path: PathBuf,
    },
    Http {
        url: String,
        #[serde(default = "default_timeout_secs")]
        timeout_secs: u64,
    },
}

impl SourceConfig {
    /// Interpret a command-line or environment location: URLs become HTTP
    /// sources, anything else a file path.
    pub fn from_location(location: &str) -> Self {
        if location.starts_with("http://") || location.starts_with("https://") {
            SourceConfig::Http {
                url: location.to_string(),
                timeout_secs: default_timeout_secs(),
            }
        } else {
            SourceConfig::File {
                path: PathBuf::from(location),
            }
        }
    }

    /// Human-readable location, used as the quiz title.
    pub fn location(&self) -> String {
        match self {
            SourceConfig::File { path } => path.display().to_string(),
            SourceConfig::Http { url, .. } => url.clone(),
        }
    }
}

impl Default for SourceConfig {
    fn default() -> Self {
        SourceConfig::File {
            path: default_questions_path(),
        }
    }
}

fn default_questions_path() -> PathBuf {
    PathBuf::from("questions.json")
}
fn default_timeout_secs() -> u64 {
    30
}

/// Where progress snapshots are kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Directory holding one JSON file per key.
    #[serde(default = "default_store_dir")]
    pub dir: PathBuf,
    /// Key of the session snapshot.
    #[serde(default = "default_key")]
    pub key: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            dir: default_store_dir(),
            key: default_key(),
        }
    }
}

fn default_store_dir() -> PathBuf {
    PathBuf::from(".quizrun")
}
fn default_key() -> String {
    PROGRESS_KEY.to_string()
}

/// Top-level quizrun configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizrunConfig {
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub store: StoreConfig,
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
fn resolve_env_vars(s: &str) -> String {
    let mut result = s.to_string();
    let mut from = 0;
    while let Some(offset) = result[from..].find("${") {
        let start = from + offset;
        let Some(end) = result[start..].find('}') else {
            break;
        };
        let var_name = &result[start + 2..start + end];
        let value = std::env::var(var_name).unwrap_or_default();
        result = format!("{}{}{}", &result[..start], value, &result[start + end + 1..]);
        from = start + value.len();
    }
    result
}

fn resolve_path(path: &Path) -> PathBuf {
    PathBuf::from(resolve_env_vars(&path.to_string_lossy()))
}

impl QuizrunConfig {
    /// Expand `${VAR}` references in every string setting.
    fn resolve_env_refs(mut self) -> Self {
        self.source = match self.source {
            SourceConfig::File { path } => SourceConfig::File {
                path: resolve_path(&path),
            },
            SourceConfig::Http { url, timeout_secs } => SourceConfig::Http {
                url: resolve_env_vars(&url),
                timeout_secs,
            },
        };
        self.store.dir = resolve_path(&self.store.dir);
        self.store.key = resolve_env_vars(&self.store.key);
        self
    }

    /// Apply `QUIZRUN_QUESTIONS` / `QUIZRUN_STORE_DIR` style overrides.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(location) = lookup("QUIZRUN_QUESTIONS").filter(|s| !s.is_empty()) {
            self.source = SourceConfig::from_location(&location);
        }
        if let Some(dir) = lookup("QUIZRUN_STORE_DIR").filter(|s| !s.is_empty()) {
            self.store.dir = PathBuf::from(dir);
        }
    }
}

/// Load config from an explicit path, or search the well-known paths.
///
/// Search order when no path is given:
/// 1. `quizrun.toml` in the current directory
/// 2. `~/.config/quizrun/config.toml`
///
/// Environment variable overrides: `QUIZRUN_QUESTIONS`, `QUIZRUN_STORE_DIR`.
pub fn load_config_from(path: Option<&Path>) -> Result<QuizrunConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("quizrun.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            tracing::debug!("loading config from {}", path.display());
            parse_config(&path)?
        }
        None => QuizrunConfig::default(),
    };

    config.apply_overrides(|name| std::env::var(name).ok());
    Ok(config)
}

fn parse_config(path: &Path) -> Result<QuizrunConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config: {}", path.display()))?;
    let config = toml::from_str::<QuizrunConfig>(&content)
        .with_context(|| format!("failed to parse config: {}", path.display()))?;
    Ok(config.resolve_env_refs())
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("quizrun"))
}

/// Create a question source from its configuration.
pub fn create_source(config: &SourceConfig) -> Result<Box<dyn QuestionSource>> {
    match config {
        SourceConfig::File { path } => Ok(Box::new(FileSource::new(path))),
        SourceConfig::Http { url, timeout_secs } => {
            Ok(Box::new(HttpSource::with_timeout(url, *timeout_secs)?))
        }
    }
}
