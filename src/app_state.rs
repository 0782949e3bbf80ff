use std::sync::Arc;

use crate::{
    analysis::{AnthropicClient, Analyzer},
    config::Config,
};

#[derive(Clone)]
pub struct AppState {
    /// `None` when no model credential is configured.
    pub analyzer: Option<Arc<Analyzer>>,
}

impl AppState {
    pub fn new(analyzer: Analyzer) -> Self {
        Self {
            analyzer: Some(Arc::new(analyzer)),
        }
    }

    pub fn unconfigured() -> Self {
        Self { analyzer: None }
    }

    pub fn from_config(config: &Config) -> Self {
        match config.api_key() {
            Some(api_key) => {
                let client = AnthropicClient::new(api_key)
                    .with_base_url(config.base_url())
                    .with_model(config.model())
                    .with_max_tokens(config.max_tokens());
                Self::new(Analyzer::new(Arc::new(client)))
            }
            None => Self::unconfigured(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_config_without_key() {
        let state = AppState::from_config(&Config::new(None));
        assert!(state.analyzer.is_none());
    }

    #[test]
    fn test_from_config_with_key() {
        let state = AppState::from_config(&Config::new(Some("sk-ant-test".to_string())));
        assert!(state.analyzer.is_some());
    }
}
