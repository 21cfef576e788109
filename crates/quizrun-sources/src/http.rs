//! HTTP question source: a GET of a JSON question array.

use std::time::Duration;

use async_trait::async_trait;
use tracing::instrument;

use quizrun_core::error::LoadError;
use quizrun_core::model::Question;
use quizrun_core::parser::{parse_questions_str, Format};
use quizrun_core::traits::QuestionSource;

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Fetches `questions.json` (or any JSON question array) over HTTP.
pub struct HttpSource {
    url: String,
    timeout_secs: u64,
    client: reqwest::Client,
}

impl HttpSource {
    pub fn new(url: &str) -> anyhow::Result<Self> {
        Self::with_timeout(url, DEFAULT_TIMEOUT_SECS)
    }

    pub fn with_timeout(url: &str, timeout_secs: u64) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| anyhow::anyhow!("failed to build HTTP client: {e}"))?;

        Ok(Self {
            url: url.to_string(),
            timeout_secs,
            client,
        })
    }
}

#[async_trait]
impl QuestionSource for HttpSource {
    fn name(&self) -> &str {
        &self.url
    }

    #[instrument(skip(self), fields(url = %self.url))]
    async fn load_questions(&self) -> Result<Vec<Question>, LoadError> {
        let response = self
            .client
            .get(&self.url)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    LoadError::Timeout(self.timeout_secs)
                } else if e.is_connect() {
                    LoadError::Unreachable(format!("cannot connect to {}", self.url))
                } else {
                    LoadError::Unreachable(e.to_string())
                }
            })?;

        let status = response.status().as_u16();
        if status == 404 {
            return Err(LoadError::NotFound(self.url.clone()));
        }
        if status >= 400 {
            let body = response.text().await.unwrap_or_default();
            return Err(LoadError::Http {
                status,
                message: body,
            });
        }

        let body = response.text().await.map_err(|e| {
            if e.is_timeout() {
                LoadError::Timeout(self.timeout_secs)
            } else {
                LoadError::Unreachable(format!("failed to read response body: {e}"))
            }
        })?;

        let questions = parse_questions_str(&body, Format::Json)?;
        tracing::debug!("fetched {} questions", questions.len());
        Ok(questions)
    }
}
