use thiserror::Error;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("invalid url: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("unsupported url scheme: {0}")]
    UnsupportedScheme(String),

    #[error("request timeout")]
    Timeout,

    #[error("network error: {0}")]
    Network(String),

    #[error("http error {status}")]
    Http { status: reqwest::StatusCode },

    #[error("body too large ({0} bytes)")]
    BodyTooLarge(u64),

    #[error("unsupported content-type: {0:?}")]
    UnsupportedContentType(String),

    #[error("io error: {0}")]
    Io(String),
}

impl FetchError {
    pub fn from_reqwest_error(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else if let Some(status) = err.status() {
            Self::Http { status }
        } else if err.is_redirect() {
            Self::Network("too many redirects".to_string())
        } else {
            // DNS, connection refused/reset, TLS handshake
            Self::Network(describe(&err))
        }
    }
}

/// reqwest's top-level message is usually just "error sending request"; the
/// useful part (DNS, refused, certificate) lives further down the source chain.
fn describe(err: &reqwest::Error) -> String {
    let mut message = err.to_string();
    let mut source = std::error::Error::source(err);
    while let Some(inner) = source {
        message = format!("{message}: {inner}");
        source = inner.source();
    }
    message
}
