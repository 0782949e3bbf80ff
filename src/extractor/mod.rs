pub mod model;
pub mod reader;

#[cfg(test)]
mod tests;

pub use model::ExtractedArticle;

use std::time::Duration;
use tracing::{error, info, instrument};
use url::Url;

use crate::{
    error::AnalysisError,
    fetcher::{self, FETCH_TIMEOUT, PageResponse},
    text::char_len,
};

/// Anything shorter is usually a JS shell, a consent wall or a paywall stub.
pub const MIN_EXTRACTED_CHARS: usize = 50;

pub async fn extract_article(url: &str) -> Result<ExtractedArticle, AnalysisError> {
    extract_article_with_timeout(url, FETCH_TIMEOUT).await
}

/// Fetches `url` and pulls the readable article text out of it.
#[instrument(skip_all, fields(url = %url.trim()))]
pub async fn extract_article_with_timeout(
    url: &str,
    timeout: Duration,
) -> Result<ExtractedArticle, AnalysisError> {
    let url = url.trim();
    if url.is_empty() {
        return Err(AnalysisError::InvalidInput("URL is empty.".to_string()));
    }

    let submitted = fetcher::parse_http_url(url)?;
    let page = fetcher::fetch_with_timeout(url, timeout).await?;

    // readability is synchronous and can chew on large documents for a while
    let article = tokio::task::spawn_blocking(move || extract_with_base(&page, submitted))
        .await
        .map_err(|e| {
            error!(error = %e, "extraction task failed");
            AnalysisError::ExtractionFailed
        })??;

    info!(
        final_url = %article.url,
        chars = char_len(&article.text),
        "extracted article"
    );

    Ok(article)
}

/// Extracts the article from an already fetched page, resolving against the
/// page's final URL.
pub fn extract(page: &PageResponse) -> Result<ExtractedArticle, AnalysisError> {
    extract_with_base(page, page.url_final.clone())
}

/// Extracts the article with relative links resolved against `base`, which is
/// the URL as the caller submitted it rather than where redirects ended up.
pub fn extract_with_base(
    page: &PageResponse,
    base: Url,
) -> Result<ExtractedArticle, AnalysisError> {
    let content =
        reader::extract(&page.body_utf8, &base).ok_or(AnalysisError::ExtractionFailed)?;

    let text = content.text.trim();
    let len = char_len(text);
    if len < MIN_EXTRACTED_CHARS {
        return Err(AnalysisError::ExtractionTooShort(len));
    }

    Ok(ExtractedArticle {
        url: page.url_final.clone(),
        source_url: base,
        title: content.title,
        text: text.to_string(),
    })
}
