pub mod analysis;
pub mod api;
pub mod app_state;
pub mod config;
pub mod error;
pub mod extractor;
pub mod fetcher;
pub mod health;
pub mod telemetry;
pub mod text;

pub use analysis::{AnalysisRequest, Analyzer};
pub use error::AnalysisError;
