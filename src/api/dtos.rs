use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::analysis::AnalysisRequest;

pub const MISSING_INPUT: &str = "Provide either 'url' or 'rawText' in the request body.";
pub const AMBIGUOUS_INPUT: &str = "Provide either 'url' or 'rawText', not both.";
pub const INVALID_BODY: &str = "Invalid request body.";

/// Body of `POST /api/analyze`. Exactly one field must be set.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeRequest {
    #[schema(example = "https://example.com/news/story")]
    pub url: Option<String>,
    pub raw_text: Option<String>,
}

impl TryFrom<AnalyzeRequest> for AnalysisRequest {
    type Error = String;

    /// Blank strings count as absent.
    fn try_from(body: AnalyzeRequest) -> Result<Self, Self::Error> {
        let url = body.url.filter(|s| !s.trim().is_empty());
        let raw_text = body.raw_text.filter(|s| !s.trim().is_empty());

        match (url, raw_text) {
            (Some(url), None) => Ok(AnalysisRequest::Url(url)),
            (None, Some(text)) => Ok(AnalysisRequest::RawText(text)),
            (Some(_), Some(_)) => Err(AMBIGUOUS_INPUT.to_string()),
            (None, None) => Err(MISSING_INPUT.to_string()),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}
