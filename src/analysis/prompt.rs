use std::borrow::Cow;

use crate::text::{char_len, take_chars};

pub const MAX_INPUT_CHARS: usize = 4_000;

pub const TRUNCATION_MARKER: &str = "\n[...truncated]";

pub const SYSTEM_PROMPT: &str = r#"You are a credibility analyst. Given a short text (news excerpt, claim, or social post), output a credibility assessment as JSON only. No markdown, no code fence, no other text. Just a single JSON object.

Required fields:
- score: number 0-100 (overall credibility)
- label: one of "low" | "medium" | "high"
- explanation: string, 2-4 sentences explaining the assessment

Optional fields (each 0-100 if present):
- subscores: object with optional sourceReliability, factualConsistency, toneAndBias

Output exactly one JSON object and nothing else."#;

/// Caps `text` at [`MAX_INPUT_CHARS`] characters and appends [`TRUNCATION_MARKER`]
/// when anything was cut. The article lede survives; the tail is dropped.
pub fn truncate_input(text: &str) -> Cow<'_, str> {
    if char_len(text) <= MAX_INPUT_CHARS {
        return Cow::Borrowed(text);
    }

    let mut truncated = String::with_capacity(MAX_INPUT_CHARS * 4 + TRUNCATION_MARKER.len());
    truncated.push_str(take_chars(text, MAX_INPUT_CHARS));
    truncated.push_str(TRUNCATION_MARKER);
    Cow::Owned(truncated)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_input_untouched() {
        let text = "A short claim.";
        assert!(matches!(truncate_input(text), Cow::Borrowed("A short claim.")));
    }

    #[test]
    fn test_exact_limit_untouched() {
        let text = "a".repeat(MAX_INPUT_CHARS);
        assert_eq!(truncate_input(&text), text);
    }

    #[test]
    fn test_long_input_truncated_with_marker() {
        let text = format!("{}{}", "a".repeat(MAX_INPUT_CHARS), "b".repeat(2_000));
        let truncated = truncate_input(&text);

        assert!(truncated.ends_with(TRUNCATION_MARKER));
        let body = truncated.strip_suffix(TRUNCATION_MARKER).unwrap();
        assert_eq!(body.chars().count(), MAX_INPUT_CHARS);
        assert!(!body.contains('b'));
    }

    #[test]
    fn test_truncation_counts_chars_not_bytes() {
        let text = "é".repeat(MAX_INPUT_CHARS + 1);
        let truncated = truncate_input(&text);
        let body = truncated.strip_suffix(TRUNCATION_MARKER).unwrap();
        assert_eq!(body.chars().count(), MAX_INPUT_CHARS);
    }

    #[test]
    fn test_system_prompt_names_every_field() {
        for field in [
            "score",
            "label",
            "explanation",
            "subscores",
            "sourceReliability",
            "factualConsistency",
            "toneAndBias",
        ] {
            assert!(SYSTEM_PROMPT.contains(field), "missing {field}");
        }
    }
}
