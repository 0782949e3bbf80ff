use url::Url;

/// Plain text of a fetched article. Lives for a single analysis and is never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedArticle {
    /// Final URL after redirects.
    pub url: Url,
    /// URL as submitted; relative links in the page resolve against it.
    pub source_url: Url,
    pub title: Option<String>,
    pub text: String,
}

impl ExtractedArticle {
    pub fn into_text(self) -> String {
        self.text
    }
}

#[derive(Debug)]
pub struct ReadableContent {
    pub title: Option<String>,
    pub text: String,
}
