use async_trait::async_trait;
use axum::Router;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use credence::{
    analysis::{Analyzer, LlmClient, LlmError},
    api,
    app_state::AppState,
};

/// Replies with a fixed string and remembers every user prompt it was sent.
#[derive(Clone, Default)]
pub struct RecordingLlm {
    reply: String,
    pub prompts: Arc<Mutex<Vec<String>>>,
}

impl RecordingLlm {
    pub fn replying(reply: &str) -> Self {
        Self {
            reply: reply.to_string(),
            prompts: Arc::default(),
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl LlmClient for RecordingLlm {
    async fn complete(&self, _system: &str, user: &str) -> Result<String, LlmError> {
        self.prompts.lock().unwrap().push(user.to_string());
        Ok(self.reply.clone())
    }
}

pub fn test_app(llm: RecordingLlm) -> Router {
    let analyzer = Analyzer::new(Arc::new(llm)).with_fetch_timeout(Duration::from_secs(2));
    api::router(AppState::new(analyzer))
}
