pub mod llm;
pub mod prompt;
pub mod requestor;
pub mod types;
pub mod validator;

pub use llm::{AnthropicClient, LlmClient, LlmError};
pub use types::{CredibilityLabel, CredibilityResult, CredibilitySubscores};

use std::{sync::Arc, time::Duration};
use tracing::{info, instrument, warn};

use crate::{
    error::AnalysisError,
    extractor,
    fetcher::FETCH_TIMEOUT,
    text::normalize_input,
};

/// What to analyze. Exactly one source, so "both" and "neither" cannot be expressed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalysisRequest {
    Url(String),
    RawText(String),
}

impl AnalysisRequest {
    fn kind(&self) -> &'static str {
        match self {
            Self::Url(_) => "url",
            Self::RawText(_) => "raw_text",
        }
    }
}

/// Runs the whole pipeline: extraction (for URLs), normalization, the model
/// call and validation. Holds no per-request state.
#[derive(Clone)]
pub struct Analyzer {
    llm: Arc<dyn LlmClient>,
    fetch_timeout: Duration,
}

impl Analyzer {
    pub fn new(llm: Arc<dyn LlmClient>) -> Self {
        Self {
            llm,
            fetch_timeout: FETCH_TIMEOUT,
        }
    }

    pub fn with_fetch_timeout(mut self, timeout: Duration) -> Self {
        self.fetch_timeout = timeout;
        self
    }

    #[instrument(skip_all, fields(source = request.kind()))]
    pub async fn analyze(
        &self,
        request: AnalysisRequest,
    ) -> Result<CredibilityResult, AnalysisError> {
        let text = match request {
            AnalysisRequest::Url(url) => {
                extractor::extract_article_with_timeout(&url, self.fetch_timeout)
                    .await?
                    .into_text()
            }
            AnalysisRequest::RawText(text) => text,
        };
        let text = normalize_input(&text)?;

        let raw = requestor::request_analysis(self.llm.as_ref(), &text).await?;

        let result = validator::validate(&raw).map_err(|e| {
            warn!(error = %e, "model output failed validation");
            AnalysisError::from(e)
        })?;

        info!(
            score = result.score,
            label = %result.label,
            has_subscores = result.subscores.is_some(),
            "analysis complete"
        );

        Ok(result)
    }
}
