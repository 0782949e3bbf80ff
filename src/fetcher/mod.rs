pub mod client;
pub mod errors;
pub mod pipeline;
pub mod types;

pub use client::{FETCH_TIMEOUT, fetch, fetch_with_timeout, get_client, parse_http_url};
pub use errors::FetchError;
pub use types::PageResponse;
