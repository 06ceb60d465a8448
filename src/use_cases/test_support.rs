use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use reqwest::StatusCode;

use crate::domain::{CompletionError, CompletionProvider, CompletionRequest};

// Scripted outcome for every call made against the provider.
#[derive(Clone)]
pub(crate) enum Reply {
    Text(String),
    Status(StatusCode),
    Transport,
}

// Provider double that records each request so tests can assert on what went upstream.
#[derive(Clone)]
pub(crate) struct RecordingProvider {
    requests: Arc<Mutex<Vec<CompletionRequest>>>,
    reply: Reply,
    has_key: bool,
    model: String,
}

impl RecordingProvider {
    pub(crate) fn replying(text: impl Into<String>) -> Self {
        Self::with_reply(Reply::Text(text.into()))
    }

    pub(crate) fn failing(status: StatusCode) -> Self {
        Self::with_reply(Reply::Status(status))
    }

    pub(crate) fn unreachable() -> Self {
        Self::with_reply(Reply::Transport)
    }

    fn with_reply(reply: Reply) -> Self {
        Self {
            requests: Arc::new(Mutex::new(Vec::new())),
            reply,
            has_key: true,
            model: "gpt-4o-mini".to_string(),
        }
    }

    pub(crate) fn without_key(mut self) -> Self {
        self.has_key = false;
        self
    }

    pub(crate) fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub(crate) fn requests(&self) -> Vec<CompletionRequest> {
        self.requests
            .lock()
            .expect("requests mutex poisoned")
            .clone()
    }

    pub(crate) fn calls(&self) -> usize {
        self.requests.lock().expect("requests mutex poisoned").len()
    }

    // Parsed user message of the only recorded request.
    pub(crate) fn single_user_payload(&self) -> serde_json::Value {
        let requests = self.requests();
        assert_eq!(requests.len(), 1, "expected exactly one upstream call");
        serde_json::from_str(&requests[0].user).expect("user message should be json")
    }
}

#[async_trait]
impl CompletionProvider for RecordingProvider {
    fn has_credentials(&self) -> bool {
        self.has_key
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn complete(&self, request: CompletionRequest) -> Result<String, CompletionError> {
        self.requests
            .lock()
            .expect("requests mutex poisoned")
            .push(request);

        match &self.reply {
            Reply::Text(text) => Ok(text.clone()),
            Reply::Status(status) => Err(CompletionError::Upstream {
                status: *status,
                message: Some("scripted failure".to_string()),
            }),
            Reply::Transport => Err(CompletionError::Transport("connection refused".to_string())),
        }
    }
}
