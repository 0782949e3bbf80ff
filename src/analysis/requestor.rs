use std::borrow::Cow;
use tracing::{debug, error, info, warn};

use crate::analysis::{
    llm::LlmClient,
    prompt::{SYSTEM_PROMPT, truncate_input},
};
use crate::error::AnalysisError;
use crate::text::{char_len, take_chars};

const LOG_PREVIEW_CHARS: usize = 100;

/// Sends `text` to the model exactly once and returns whatever text came back.
///
/// An empty reply is not special-cased here; it fails later as malformed JSON.
pub async fn request_analysis(llm: &dyn LlmClient, text: &str) -> Result<String, AnalysisError> {
    let input = truncate_input(text);
    info!(
        input_chars = char_len(text),
        truncated = matches!(input, Cow::Owned(_)),
        "requesting credibility analysis"
    );

    let raw = llm.complete(SYSTEM_PROMPT, &input).await.map_err(|e| {
        error!(error = %e, "model request failed");
        AnalysisError::ModelRequestFailed(e.to_string())
    })?;

    if raw.is_empty() {
        warn!("model returned no text content");
    }
    debug!(
        raw_chars = char_len(&raw),
        preview = take_chars(&raw, LOG_PREVIEW_CHARS),
        "model response received"
    );

    Ok(raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::llm::{LlmError, MockLlmClient};
    use crate::analysis::prompt::{MAX_INPUT_CHARS, TRUNCATION_MARKER};

    #[tokio::test]
    async fn test_sends_system_prompt_and_text() {
        let mut llm = MockLlmClient::new();
        llm.expect_complete()
            .withf(|system, user| system == SYSTEM_PROMPT && user == "Water is wet.")
            .times(1)
            .returning(|_, _| Ok(r#"{"score": 90}"#.to_string()));

        let raw = request_analysis(&llm, "Water is wet.").await.unwrap();
        assert_eq!(raw, r#"{"score": 90}"#);
    }

    #[tokio::test]
    async fn test_long_text_truncated_before_sending() {
        let text = "x".repeat(6_000);

        let mut llm = MockLlmClient::new();
        llm.expect_complete()
            .withf(|_, user| {
                user.ends_with(TRUNCATION_MARKER)
                    && user.len() == MAX_INPUT_CHARS + TRUNCATION_MARKER.len()
            })
            .times(1)
            .returning(|_, _| Ok(String::new()));

        request_analysis(&llm, &text).await.unwrap();
    }

    #[tokio::test]
    async fn test_empty_reply_passed_through() {
        let mut llm = MockLlmClient::new();
        llm.expect_complete().returning(|_, _| Ok(String::new()));

        assert_eq!(request_analysis(&llm, "claim").await.unwrap(), "");
    }

    #[tokio::test]
    async fn test_transport_failure() {
        let mut llm = MockLlmClient::new();
        llm.expect_complete().times(1).returning(|_, _| {
            Err(LlmError::Api {
                status: reqwest::StatusCode::UNAUTHORIZED,
                message: "invalid x-api-key".to_string(),
            })
        });

        let err = request_analysis(&llm, "claim").await.unwrap_err();
        assert!(matches!(err, AnalysisError::ModelRequestFailed(ref m) if m.contains("401")));
    }
}
