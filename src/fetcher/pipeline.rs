use crate::fetcher::types::PageResponse;
use bytes::Bytes;
use chrono::Utc;
use encoding_rs::Encoding;
use regex::Regex;
use reqwest::StatusCode;
use std::sync::LazyLock;
use tracing::warn;
use url::Url;

static CHARSET_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)charset\s*=\s*["']?([^"'\s;]+)"#).unwrap());

static META_CHARSET_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)<meta\s+[^>]*?charset\s*=\s*["']?([^"'\s/>]+)"#).unwrap());

static META_HTTP_EQUIV_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<meta\s+[^>]*?http-equiv\s*=\s*["']?content-type["']?[^>]*?content\s*=\s*["']?[^"'>]*?charset\s*=\s*([^"'\s;/>]+)"#).unwrap()
});

const SNIFF_BYTES: usize = 4096;

/// Returns true when the Content-Type header names an HTML document.
pub fn is_html(content_type: &str) -> bool {
    content_type.to_ascii_lowercase().contains("text/html")
}

pub fn process_response(
    url_final: Url,
    status: StatusCode,
    body_bytes: Bytes,
    content_type: String,
) -> PageResponse {
    let encoding = detect_encoding(&content_type, &body_bytes);
    let (decoded, used, had_errors) = encoding.decode(&body_bytes);

    if had_errors {
        warn!(
            url = %url_final,
            encoding = used.name(),
            "body contained invalid sequences, decoded lossily"
        );
    }

    PageResponse {
        url_final,
        status,
        content_type,
        body_utf8: decoded.into_owned(),
        encoding: used.name(),
        fetched_at: Utc::now(),
    }
}

fn detect_encoding(content_type: &str, body_bytes: &[u8]) -> &'static Encoding {
    // 1. Content-Type header
    if let Some(encoding) = label_from(&CHARSET_REGEX, content_type) {
        return encoding;
    }

    // 2. <meta charset> or <meta http-equiv> near the top of the document
    let search_bytes = &body_bytes[..body_bytes.len().min(SNIFF_BYTES)];
    let search_str = String::from_utf8_lossy(search_bytes);

    if let Some(encoding) = label_from(&META_CHARSET_REGEX, &search_str) {
        return encoding;
    }
    if let Some(encoding) = label_from(&META_HTTP_EQUIV_REGEX, &search_str) {
        return encoding;
    }

    // 3. Statistical guess
    let mut detector = chardetng::EncodingDetector::new();
    detector.feed(search_bytes, body_bytes.len() <= SNIFF_BYTES);
    detector.guess(None, true)
}

fn label_from(regex: &Regex, haystack: &str) -> Option<&'static Encoding> {
    let label = regex.captures(haystack)?.get(1)?.as_str().to_lowercase();
    Encoding::for_label(label.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_charset_from_content_type() {
        let body = b"<html><head><title>Test</title></head></html>";
        let encoding = detect_encoding("text/html; charset=utf-8", body);
        assert_eq!(encoding, encoding_rs::UTF_8);
    }

    #[test]
    fn test_detect_charset_from_meta_tag() {
        let body = b"<html><head><meta charset=\"iso-8859-1\"><title>Test</title></head></html>";
        // encoding_rs maps ISO-8859-1 to its superset windows-1252
        let encoding = detect_encoding("text/html", body);
        assert_eq!(encoding, encoding_rs::WINDOWS_1252);
    }

    #[test]
    fn test_detect_charset_from_meta_http_equiv() {
        let body = b"<html><head><meta http-equiv=\"Content-Type\" content=\"text/html; charset=windows-1252\"><title>Test</title></head></html>";
        let encoding = detect_encoding("text/html", body);
        assert_eq!(encoding, encoding_rs::WINDOWS_1252);
    }

    #[test]
    fn test_process_response_decodes_latin1() {
        // "café" in windows-1252
        let body = Bytes::from_static(b"<p>caf\xe9</p>");
        let page = process_response(
            Url::parse("https://example.com").unwrap(),
            StatusCode::OK,
            body,
            "text/html; charset=windows-1252".to_string(),
        );
        assert_eq!(page.body_utf8, "<p>café</p>");
        assert_eq!(page.encoding, "windows-1252");
    }

    #[test]
    fn test_process_response_is_lossy_on_bad_utf8() {
        let body = Bytes::from_static(b"<p>ok \xff\xfe</p>");
        let page = process_response(
            Url::parse("https://example.com").unwrap(),
            StatusCode::OK,
            body,
            "text/html; charset=utf-8".to_string(),
        );
        assert!(page.body_utf8.starts_with("<p>ok "));
        assert!(page.body_utf8.contains('\u{FFFD}'));
    }

    #[test]
    fn test_is_html_case_insensitive() {
        assert!(is_html("text/html"));
        assert!(is_html("Text/HTML; charset=UTF-8"));
        assert!(!is_html("application/json"));
        assert!(!is_html("application/xhtml+xml"));
        assert!(!is_html(""));
    }
}
