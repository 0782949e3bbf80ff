use chrono::Utc;
use reqwest::StatusCode;
use std::fs;
use url::Url;

use crate::error::AnalysisError;
use crate::extractor::{MIN_EXTRACTED_CHARS, extract, extract_with_base};
use crate::fetcher::types::PageResponse;

#[test]
fn test_extract_news_article() {
    let html = fs::read_to_string("src/extractor/tests/fixtures/article.html")
        .expect("Failed to read test fixture");

    let page = create_test_page(html, "https://metro.example.com/news/transit-budget");
    let article = extract(&page).unwrap();

    assert!(article.title.unwrap().contains("Transit Budget"));
    assert!(article.text.contains("412 million"));
    assert!(article.text.contains("fare revenue"));
    assert!(!article.text.contains("window.analytics"));
    assert!(!article.text.contains("Celebrity spotted"));
    assert_eq!(
        article.url.as_str(),
        "https://metro.example.com/news/transit-budget"
    );
}

#[test]
fn test_extract_blog_post() {
    let html = fs::read_to_string("src/extractor/tests/fixtures/blog.html")
        .expect("Failed to read test fixture");

    let page = create_test_page(html, "https://blog.example.com/post");
    let article = extract(&page).unwrap();

    assert!(article.title.unwrap().contains("Moon Landing"));
    assert!(article.text.contains("the flag"));
    assert!(article.text.contains("studio lights"));
}

#[test]
fn test_extracted_text_is_trimmed() {
    let html = format!(
        "<html><body><article><p>\n\n   {}   \n\n</p></article></body></html>",
        "Officials confirmed the bridge will reopen on Monday morning. ".repeat(4)
    );

    let page = create_test_page(html, "https://example.com/bridge");
    let article = extract(&page).unwrap();

    assert_eq!(article.text, article.text.trim());
    assert!(article.text.starts_with("Officials confirmed"));
}

#[test]
fn test_reject_js_shell() {
    let html = fs::read_to_string("src/extractor/tests/fixtures/empty.html")
        .expect("Failed to read test fixture");

    let page = create_test_page(html, "https://app.example.com/");
    let err = extract(&page).unwrap_err();

    assert!(matches!(
        err,
        AnalysisError::ExtractionFailed | AnalysisError::ExtractionTooShort(_)
    ));
}

#[test]
fn test_reject_paywall_stub() {
    let html = fs::read_to_string("src/extractor/tests/fixtures/stub.html")
        .expect("Failed to read test fixture");

    let page = create_test_page(html, "https://paper.example.com/locked");
    match extract(&page) {
        Err(AnalysisError::ExtractionTooShort(len)) => assert!(len < MIN_EXTRACTED_CHARS),
        other => panic!("Expected ExtractionTooShort, got {other:?}"),
    }
}

#[test]
fn test_ten_char_page_is_too_short() {
    let html = "<html><body><p>Short text</p></body></html>".to_string();

    let page = create_test_page(html, "https://example.com/short");
    assert_eq!(
        extract(&page).unwrap_err(),
        AnalysisError::ExtractionTooShort(10)
    );
}

#[test]
fn test_blank_document_yields_no_article() {
    let html = "<html><head></head><body></body></html>".to_string();

    let page = create_test_page(html, "https://example.com/blank");
    assert_eq!(extract(&page).unwrap_err(), AnalysisError::ExtractionFailed);
}

#[test]
fn test_malformed_html() {
    let html = format!(
        "<html><head><title>Broken</title><body><p>Unclosed tags<div>{}",
        "More content that keeps going without any closing tags at all. ".repeat(3)
    );

    let page = create_test_page(html, "https://example.com/broken");

    // Should handle malformed HTML gracefully
    if let Ok(article) = extract(&page) {
        assert!(article.text.contains("More content"));
    }
}

#[test]
fn test_extract_with_base_records_submitted_url() {
    let html = fs::read_to_string("src/extractor/tests/fixtures/article.html")
        .expect("Failed to read test fixture");

    let page = create_test_page(html, "https://metro.example.com/news/transit-budget");
    let base = Url::parse("https://short.example/t/42").unwrap();
    let article = extract_with_base(&page, base.clone()).unwrap();

    assert_eq!(article.source_url, base);
    assert_eq!(article.url, page.url_final);

    let article = extract(&page).unwrap();
    assert_eq!(article.source_url, page.url_final);
}

fn create_test_page(html: String, url: &str) -> PageResponse {
    PageResponse {
        url_final: Url::parse(url).unwrap(),
        status: StatusCode::OK,
        content_type: "text/html; charset=utf-8".to_string(),
        body_utf8: html,
        encoding: "UTF-8",
        fetched_at: Utc::now(),
    }
}

#[cfg(feature = "fuzz")]
mod fuzz {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn test_extract_never_panics(
            html in ".*",
            url in "https://[a-z]+\\.com/[a-z]*"
        ) {
            let page = create_test_page(html, &url);
            let _ = extract(&page);
        }

        #[test]
        fn test_extracted_text_meets_minimum(html in ".*") {
            let page = create_test_page(html, "https://example.com");
            if let Ok(article) = extract(&page) {
                prop_assert!(article.text.chars().count() >= MIN_EXTRACTED_CHARS);
                prop_assert_eq!(article.text.trim(), article.text.as_str());
            }
        }
    }
}
