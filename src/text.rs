use crate::error::AnalysisError;

/// Trims user-supplied or extracted text and rejects it when nothing is left.
pub fn normalize_input(raw: &str) -> Result<String, AnalysisError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(AnalysisError::InvalidInput("Text is empty.".to_string()));
    }
    Ok(trimmed.to_string())
}

/// Length in characters. Every length rule in this crate counts chars, not bytes.
pub fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// The first `max_chars` characters of `text`, never splitting a character.
pub fn take_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
