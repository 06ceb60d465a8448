use async_trait::async_trait;
use reqwest::StatusCode;

// Single system+user exchange sent to the completion API.
#[derive(Clone, Debug, PartialEq)]
pub struct CompletionRequest {
    pub system: String,
    pub user: String,
    // Sampling temperature; kept as f64 so it serializes without float noise.
    pub temperature: f64,
}

// Failures raised while talking to the completion API.
#[derive(Debug, thiserror::Error)]
pub enum CompletionError {
    #[error("no API key configured")]
    MissingCredentials,
    #[error("completion transport error: {0}")]
    Transport(String),
    #[error("completion upstream error {status}: {}", .message.as_deref().unwrap_or("no message"))]
    Upstream {
        status: StatusCode,
        message: Option<String>,
    },
    #[error("completion response decode error: {0}")]
    Decode(String),
}

// Handlers and use cases depend on this port, never on the concrete HTTP client.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    // Whether an API key is available for upstream calls.
    fn has_credentials(&self) -> bool;

    // Model name requested from the provider.
    fn model(&self) -> &str;

    // Returns the raw text of the first completion choice.
    async fn complete(&self, request: CompletionRequest) -> Result<String, CompletionError>;
}

#[async_trait]
impl<T> CompletionProvider for std::sync::Arc<T>
where
    T: CompletionProvider + ?Sized,
{
    fn has_credentials(&self) -> bool {
        (**self).has_credentials()
    }

    fn model(&self) -> &str {
        (**self).model()
    }

    async fn complete(&self, request: CompletionRequest) -> Result<String, CompletionError> {
        (**self).complete(request).await
    }
}
