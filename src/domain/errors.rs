use reqwest::StatusCode;

use crate::domain::completion::CompletionError;

// Error taxonomy surfaced to callers of the gateway.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("{0}")]
    BadRequest(String),
    #[error("API key missing or rejected by the provider")]
    KeyInvalid,
    #[error("provider quota or rate limit exceeded, retry later")]
    RateLimited,
    #[error("unexpected server error")]
    Server,
}

impl GatewayError {
    // Stable machine-readable code sent in the error envelope.
    pub fn code(&self) -> &'static str {
        match self {
            GatewayError::BadRequest(_) => "BAD_REQUEST",
            GatewayError::KeyInvalid => "KEY_INVALID",
            GatewayError::RateLimited => "RATE_LIMIT",
            GatewayError::Server => "SERVER_ERROR",
        }
    }
}

impl From<CompletionError> for GatewayError {
    fn from(err: CompletionError) -> Self {
        match err {
            CompletionError::MissingCredentials => GatewayError::KeyInvalid,
            CompletionError::Upstream { status, .. } => match status {
                StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => GatewayError::KeyInvalid,
                StatusCode::TOO_MANY_REQUESTS => GatewayError::RateLimited,
                _ => GatewayError::Server,
            },
            CompletionError::Transport(_) | CompletionError::Decode(_) => GatewayError::Server,
        }
    }
}
