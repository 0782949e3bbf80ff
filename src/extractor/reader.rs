use readability::extractor;
use scraper::{ElementRef, Html, Selector};
use std::sync::LazyLock;
use tracing::debug;
use url::Url;

use crate::extractor::model::ReadableContent;

/// Elements whose text never belongs to the article body.
const SKIPPED_TAGS: &[&str] = &[
    "script", "style", "noscript", "template", "nav", "header", "footer", "aside", "form",
    "button", "iframe", "svg",
];

const CONTENT_SELECTORS: &[&str] = &[
    "article",
    "main",
    "[role='main']",
    "[itemprop='articleBody']",
    ".entry-content",
    ".article-body",
    ".post-content",
    ".content",
    ".post",
    ".article",
    "#content",
    "#main",
];

// Containers with less text than this are likely teasers, keep looking.
const MIN_CONTAINER_CHARS: usize = 100;

static TITLE_SELECTOR: LazyLock<Selector> = LazyLock::new(|| Selector::parse("title").unwrap());
static BODY_SELECTOR: LazyLock<Selector> = LazyLock::new(|| Selector::parse("body").unwrap());

/// Runs readability over `html`, resolving relative references against `url`.
/// Falls back to container heuristics when readability finds nothing.
pub fn extract(html: &str, url: &Url) -> Option<ReadableContent> {
    match extractor::extract(&mut html.as_bytes(), url) {
        Ok(article) if !article.text.trim().is_empty() => {
            return Some(ReadableContent {
                title: non_empty(article.title),
                text: article.text,
            });
        }
        Ok(_) => debug!(url = %url, "readability produced no text"),
        Err(e) => debug!(url = %url, error = %e, "readability failed"),
    }

    fallback_extract(html)
}

fn fallback_extract(html: &str) -> Option<ReadableContent> {
    let document = Html::parse_document(html);
    let title = document
        .select(&TITLE_SELECTOR)
        .next()
        .and_then(|el| non_empty(el.text().collect()));

    let text = main_content_text(&document)?;

    Some(ReadableContent { title, text })
}

fn main_content_text(document: &Html) -> Option<String> {
    for selector_str in CONTENT_SELECTORS {
        let Ok(selector) = Selector::parse(selector_str) else {
            continue;
        };
        for element in document.select(&selector) {
            let text = visible_text(element);
            if text.trim().chars().count() > MIN_CONTAINER_CHARS {
                return Some(text);
            }
        }
    }

    // Last resort: the whole body minus boilerplate
    let body = document.select(&BODY_SELECTOR).next()?;
    let text = visible_text(body);
    if text.trim().is_empty() { None } else { Some(text) }
}

fn visible_text(root: ElementRef<'_>) -> String {
    let mut out = String::new();
    for node in root.descendants() {
        let Some(text) = node.value().as_text() else {
            continue;
        };
        // Only look inside `root`; some sites wrap the whole page in a <form>.
        let hidden = node
            .ancestors()
            .take_while(|ancestor| ancestor.id() != root.id())
            .any(|ancestor| {
                ancestor
                    .value()
                    .as_element()
                    .is_some_and(|el| SKIPPED_TAGS.contains(&el.name()))
            });
        if !hidden {
            out.push_str(text);
        }
    }
    out
}

fn non_empty(s: String) -> Option<String> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
