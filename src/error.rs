use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::{error, warn};

use crate::{analysis::validator::ValidationError, api::dtos::ErrorResponse, fetcher::FetchError};

/// Every way an analysis can fail, from bad input through to unusable model output.
///
/// `Display` carries diagnostic detail meant for logs. Callers facing end users
/// should use [`AnalysisError::user_message`] instead.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalysisError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("fetch failed: {0}")]
    FetchFailed(String),

    #[error("fetch timed out")]
    Timeout,

    #[error("unsupported content-type: {0:?}")]
    UnsupportedContentType(String),

    #[error("no article content could be extracted")]
    ExtractionFailed,

    #[error("extracted content too short ({0} chars)")]
    ExtractionTooShort(usize),

    #[error("model request failed: {0}")]
    ModelRequestFailed(String),

    #[error("model output was malformed: {message} (preview: {preview:?})")]
    MalformedOutput { message: String, preview: String },

    #[error("model output has invalid {field}: {reason}")]
    InvalidField { field: &'static str, reason: String },

    #[error("analysis service is not configured")]
    ServiceUnavailable,
}

impl AnalysisError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::InvalidInput(_) => StatusCode::BAD_REQUEST,
            Self::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            Self::FetchFailed(_)
            | Self::Timeout
            | Self::UnsupportedContentType(_)
            | Self::ExtractionFailed
            | Self::ExtractionTooShort(_)
            | Self::ModelRequestFailed(_)
            | Self::MalformedOutput { .. }
            | Self::InvalidField { .. } => StatusCode::BAD_GATEWAY,
        }
    }

    /// Short message that is safe to show to whoever submitted the request.
    pub fn user_message(&self) -> String {
        match self {
            Self::InvalidInput(reason) => reason.clone(),
            Self::FetchFailed(reason) => format!("Could not fetch URL: {reason}"),
            Self::Timeout => "Request timed out. The page took too long to load.".to_string(),
            Self::UnsupportedContentType(_) => {
                "URL did not return HTML. Only web pages can be analyzed.".to_string()
            }
            Self::ExtractionFailed => {
                "Could not extract article content from this page.".to_string()
            }
            Self::ExtractionTooShort(_) => {
                "Extracted content was too short. The page may not contain a readable article."
                    .to_string()
            }
            Self::ModelRequestFailed(_) => {
                "The analysis service could not be reached. Please try again later.".to_string()
            }
            Self::MalformedOutput { .. } => {
                "The analysis service returned an unreadable response.".to_string()
            }
            Self::InvalidField { field, .. } => {
                format!("The analysis service returned an invalid {field}.")
            }
            Self::ServiceUnavailable => "Analysis service is not configured.".to_string(),
        }
    }
}

impl From<FetchError> for AnalysisError {
    fn from(err: FetchError) -> Self {
        match err {
            FetchError::InvalidUrl(_) => Self::InvalidInput("Invalid URL format.".to_string()),
            FetchError::UnsupportedScheme(_) => {
                Self::InvalidInput("URL must use http or https.".to_string())
            }
            FetchError::Timeout => Self::Timeout,
            FetchError::Http { status } => Self::FetchFailed(format!(
                "URL returned {}. The page may be unavailable.",
                status.as_u16()
            )),
            FetchError::UnsupportedContentType(content_type) => {
                Self::UnsupportedContentType(content_type)
            }
            FetchError::BodyTooLarge(size) => {
                Self::FetchFailed(format!("page is too large ({size} bytes)"))
            }
            FetchError::Network(message) | FetchError::Io(message) => Self::FetchFailed(message),
        }
    }
}

impl From<ValidationError> for AnalysisError {
    fn from(err: ValidationError) -> Self {
        match err {
            ValidationError::MalformedOutput { message, preview } => {
                Self::MalformedOutput { message, preview }
            }
            ValidationError::InvalidField { field, reason } => Self::InvalidField { field, reason },
        }
    }
}

impl IntoResponse for AnalysisError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(error = %self, status = status.as_u16(), "analysis failed");
        } else {
            warn!(error = %self, status = status.as_u16(), "analysis rejected");
        }

        (
            status,
            Json(ErrorResponse {
                error: self.user_message(),
            }),
        )
            .into_response()
    }
}
