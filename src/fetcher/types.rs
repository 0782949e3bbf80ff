use chrono::{DateTime, Utc};
use reqwest::StatusCode;
use url::Url;

#[derive(Debug)]
pub struct PageResponse {
    pub url_final: Url,
    pub status: StatusCode,
    pub content_type: String,
    pub body_utf8: String,
    /// Name of the encoding the body was decoded from, e.g. `UTF-8` or `windows-1252`.
    pub encoding: &'static str,
    pub fetched_at: DateTime<Utc>,
}
