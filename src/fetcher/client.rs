use crate::fetcher::{
    errors::FetchError,
    pipeline::{is_html, process_response},
    types::PageResponse,
};
use once_cell::sync::Lazy;
use reqwest::{
    Client, ClientBuilder,
    header::{ACCEPT, ACCEPT_LANGUAGE, CONTENT_TYPE, HeaderMap, HeaderValue},
};
use std::time::Duration;
use tracing::{debug, instrument};
use url::Url;

pub const FETCH_TIMEOUT: Duration = Duration::from_secs(15);
const MAX_BODY_SIZE: u64 = 5 * 1024 * 1024; // 5MB
const MAX_REDIRECTS: usize = 10;

// Plenty of news sites answer 401/403 to anything that does not look like a browser.
pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36";

static HTTP_CLIENT: Lazy<Client> = Lazy::new(|| {
    let mut headers = HeaderMap::new();
    headers.insert(
        ACCEPT,
        HeaderValue::from_static("text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8"),
    );
    headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.9"));

    ClientBuilder::new()
        .user_agent(USER_AGENT)
        .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
        .default_headers(headers)
        .build()
        .expect("Failed to build HTTP client")
});

pub fn get_client() -> &'static Client {
    &HTTP_CLIENT
}

/// Parses `url` and makes sure it is something we are willing to fetch.
pub fn parse_http_url(url: &str) -> Result<Url, FetchError> {
    let parsed = Url::parse(url)?;
    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        other => Err(FetchError::UnsupportedScheme(other.to_string())),
    }
}

pub async fn fetch(url: &str) -> Result<PageResponse, FetchError> {
    fetch_with_timeout(url, FETCH_TIMEOUT).await
}

/// Fetches an HTML page. `timeout` bounds the whole exchange, body included;
/// when it elapses the in-flight request is dropped.
#[instrument(skip_all, fields(url = %url))]
pub async fn fetch_with_timeout(url: &str, timeout: Duration) -> Result<PageResponse, FetchError> {
    let parsed_url = parse_http_url(url)?;

    match tokio::time::timeout(timeout, fetch_html(parsed_url)).await {
        Ok(result) => result,
        Err(_elapsed) => Err(FetchError::Timeout),
    }
}

async fn fetch_html(url: Url) -> Result<PageResponse, FetchError> {
    let response = HTTP_CLIENT
        .get(url)
        .send()
        .await
        .map_err(FetchError::from_reqwest_error)?;

    let final_url = response.url().clone();
    let status = response.status();

    if !status.is_success() {
        return Err(FetchError::Http { status });
    }

    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|ct| ct.to_str().ok())
        .unwrap_or_default()
        .to_string();

    if !is_html(&content_type) {
        return Err(FetchError::UnsupportedContentType(content_type));
    }

    // Check content length before downloading
    if let Some(content_length) = response.content_length()
        && content_length > MAX_BODY_SIZE
    {
        return Err(FetchError::BodyTooLarge(content_length));
    }

    let body_bytes = response
        .bytes()
        .await
        .map_err(|e| match FetchError::from_reqwest_error(e) {
            FetchError::Timeout => FetchError::Timeout,
            other => FetchError::Io(other.to_string()),
        })?;

    // Content-Length may be missing or wrong for chunked/compressed bodies
    if body_bytes.len() as u64 > MAX_BODY_SIZE {
        return Err(FetchError::BodyTooLarge(body_bytes.len() as u64));
    }

    debug!(
        final_url = %final_url,
        status = status.as_u16(),
        bytes = body_bytes.len(),
        "fetched page"
    );

    Ok(process_response(final_url, status, body_bytes, content_type))
}
