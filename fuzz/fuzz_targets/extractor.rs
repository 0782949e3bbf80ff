#![no_main]

use chrono::Utc;
use libfuzzer_sys::fuzz_target;
use reqwest::StatusCode;
use url::Url;

use credence::extractor::{MIN_EXTRACTED_CHARS, extract};
use credence::fetcher::PageResponse;

fuzz_target!(|data: &[u8]| {
    let html = String::from_utf8_lossy(data).to_string();

    let page = PageResponse {
        url_final: Url::parse("https://example.com/article").unwrap(),
        status: StatusCode::OK,
        content_type: "text/html".to_string(),
        body_utf8: html,
        encoding: "UTF-8",
        fetched_at: Utc::now(),
    };

    // Never panics; whatever comes out meets the minimum length
    if let Ok(article) = extract(&page) {
        assert!(article.text.chars().count() >= MIN_EXTRACTED_CHARS);
    }
});
