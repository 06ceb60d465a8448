use crate::domain::{CompletionError, CompletionProvider, CompletionRequest};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

// Thin reqwest wrapper around the OpenAI chat-completions endpoint.
// Built once at startup and shared by every request.
#[derive(Clone)]
pub struct OpenAiClient {
    http: Client,
    base_url: String,
    api_key: Option<String>,
    model: String,
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    temperature: f64,
    response_format: ResponseFormat,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: Option<ChoiceMessage>,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorResponse {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

impl OpenAiClient {
    pub fn new(
        base_url: impl Into<String>,
        api_key: Option<String>,
        model: impl Into<String>,
    ) -> Result<Self, reqwest::Error> {
        let http = Client::builder().build()?;
        let base_url: String = base_url.into();
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            model: model.into(),
        })
    }
}

#[async_trait]
impl CompletionProvider for OpenAiClient {
    fn has_credentials(&self) -> bool {
        self.api_key.is_some()
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn complete(&self, request: CompletionRequest) -> Result<String, CompletionError> {
        let Some(api_key) = self.api_key.as_deref() else {
            return Err(CompletionError::MissingCredentials);
        };

        // Compose the completions URL and POST a JSON-mode chat request.
        let url = format!("{}/chat/completions", self.base_url);
        let body = ChatCompletionRequest {
            model: &self.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: &request.system,
                },
                ChatMessage {
                    role: "user",
                    content: &request.user,
                },
            ],
            temperature: request.temperature,
            response_format: ResponseFormat {
                kind: "json_object",
            },
        };

        let res = self
            .http
            .post(url)
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await
            .map_err(|err| {
                tracing::error!(error = %err, "completion request could not be sent.");
                CompletionError::Transport(err.to_string())
            })?;
        let status = res.status();

        // Keep upstream status/message so the gateway can map key and quota failures.
        if !status.is_success() {
            let message = res
                .json::<ApiErrorResponse>()
                .await
                .ok()
                .map(|payload| payload.error.message);
            tracing::error!(%status, message = ?message, "completion upstream rejected request.");
            return Err(CompletionError::Upstream { status, message });
        }

        let payload = res.json::<ChatCompletionResponse>().await.map_err(|err| {
            tracing::error!(error = %err, "completion response could not be decoded.");
            CompletionError::Decode(err.to_string())
        })?;

        // A missing choice or content is handed on as empty text for the use case to coerce.
        Ok(payload
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message)
            .and_then(|message| message.content)
            .unwrap_or_default())
    }
}
