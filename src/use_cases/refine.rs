use serde_json::{Value, json};

use crate::domain::{CompletionProvider, CompletionRequest, GatewayError, Refinement};
use crate::interface_adapters::protocol::RefineRequest;
use crate::use_cases::coerce::{ModelOutput, stringify};
use crate::use_cases::prompt::{take_first, truncate_with_marker};

const REFINE_TEMPERATURE: f64 = 0.3;
const MAX_PROMPT_CHARS: usize = 4000;
const MAX_FAILED_STEPS: usize = 12;
// Stands in for caller-supplied context that is never forwarded upstream.
const CONTEXT_PLACEHOLDER: &str = "[provided, omitted]";

const REFINE_SYSTEM_PROMPT: &str = "You improve a prompt written for an AI coding assistant. \
The previous prompt failed the listed checklist steps; rewrite it so those steps pass, keeping \
everything that already worked. Reply with strict JSON only, no prose, in the shape \
{\"updated_prompt\": string, \"reasons_for_changes\": [string], \"additional_checks\": [string]}.";

// Prompt refinement use case with an injected completion provider.
pub struct RefinePromptUseCase<P> {
    pub provider: P,
}

impl<P> RefinePromptUseCase<P>
where
    P: CompletionProvider,
{
    pub async fn execute(&self, payload: RefineRequest) -> Result<Refinement, GatewayError> {
        // An empty prompt is acceptable; only the type is checked.
        let Some(Value::String(last_prompt)) = payload.last_prompt else {
            return Err(GatewayError::BadRequest(
                "lastPrompt must be a string".to_string(),
            ));
        };

        if !self.provider.has_credentials() {
            return Err(GatewayError::KeyInvalid);
        }

        let failed_steps: Vec<Value> = take_first(payload.failed_steps.as_ref(), MAX_FAILED_STEPS)
            .iter()
            .map(|step| {
                json!({
                    "id": step.get("id").map(stringify).unwrap_or_default(),
                    "label": step.get("label").map(stringify).unwrap_or_default(),
                    "reason": step.get("reason").map(stringify).unwrap_or_default(),
                })
            })
            .collect();

        let user = json!({
            "lastPrompt": truncate_with_marker(&last_prompt, MAX_PROMPT_CHARS),
            "failedSteps": failed_steps,
            "fileTree": context_marker(payload.file_tree.as_ref()),
            "snippets": context_marker(payload.snippets.as_ref()),
        });

        let raw = self
            .provider
            .complete(CompletionRequest {
                system: REFINE_SYSTEM_PROMPT.to_string(),
                user: user.to_string(),
                temperature: REFINE_TEMPERATURE,
            })
            .await?;

        Ok(coerce_refinement(&raw, last_prompt))
    }
}

fn context_marker(value: Option<&Value>) -> Value {
    match value {
        Some(_) => Value::String(CONTEXT_PLACEHOLDER.to_string()),
        None => Value::Null,
    }
}

// Falls back to the caller's original, untruncated prompt.
fn coerce_refinement(raw: &str, last_prompt: String) -> Refinement {
    let Some(output) = ModelOutput::parse(raw) else {
        tracing::warn!("refine output was not valid json; returning original prompt.");
        return Refinement {
            updated_prompt: last_prompt,
            reasons_for_changes: Vec::new(),
            additional_checks: Vec::new(),
        };
    };

    Refinement {
        updated_prompt: output.text_or("updated_prompt", &last_prompt),
        reasons_for_changes: output.string_list("reasons_for_changes"),
        additional_checks: output.string_list("additional_checks"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::use_cases::test_support::RecordingProvider;
    use reqwest::StatusCode;

    fn request(body: Value) -> RefineRequest {
        serde_json::from_value(body).expect("expected refine request to deserialize")
    }

    #[tokio::test]
    async fn when_last_prompt_is_not_a_string_then_returns_bad_request() {
        let provider = RecordingProvider::replying("{}");
        let use_case = RefinePromptUseCase {
            provider: provider.clone(),
        };

        for body in [json!({}), json!({"lastPrompt": 3}), json!({"lastPrompt": ["a"]})] {
            let result = use_case.execute(request(body)).await;
            assert!(matches!(result, Err(GatewayError::BadRequest(_))));
        }
        assert_eq!(provider.calls(), 0);
    }

    #[tokio::test]
    async fn when_last_prompt_is_empty_then_it_is_accepted() {
        let provider = RecordingProvider::replying(r#"{"updated_prompt":"new"}"#);
        let use_case = RefinePromptUseCase {
            provider: provider.clone(),
        };

        let refinement = use_case
            .execute(request(json!({"lastPrompt": ""})))
            .await
            .expect("expected empty prompt to be accepted");

        assert_eq!(refinement.updated_prompt, "new");
        assert_eq!(provider.calls(), 1);
    }

    #[tokio::test]
    async fn when_key_is_missing_then_returns_key_invalid_without_upstream_call() {
        let provider = RecordingProvider::replying("{}").without_key();
        let use_case = RefinePromptUseCase {
            provider: provider.clone(),
        };

        let result = use_case.execute(request(json!({"lastPrompt": "x"}))).await;

        assert!(matches!(result, Err(GatewayError::KeyInvalid)));
        assert_eq!(provider.calls(), 0);
    }

    #[tokio::test]
    async fn when_last_prompt_is_long_then_forwarded_text_is_truncated_and_fallback_keeps_original() {
        let provider = RecordingProvider::replying("not json");
        let use_case = RefinePromptUseCase {
            provider: provider.clone(),
        };
        let long_prompt = "p".repeat(5000);

        let refinement = use_case
            .execute(request(json!({"lastPrompt": long_prompt})))
            .await
            .expect("expected fallback instead of error");

        let payload = provider.single_user_payload();
        let forwarded = payload["lastPrompt"].as_str().expect("forwarded prompt");
        assert_eq!(forwarded, format!("{}…", "p".repeat(4000)));

        assert_eq!(refinement.updated_prompt, long_prompt);
        assert!(refinement.reasons_for_changes.is_empty());
        assert!(refinement.additional_checks.is_empty());
        assert_eq!(provider.requests()[0].temperature, 0.3);
    }

    #[tokio::test]
    async fn when_context_is_supplied_then_only_a_placeholder_is_forwarded() {
        let provider = RecordingProvider::replying("{}");
        let use_case = RefinePromptUseCase {
            provider: provider.clone(),
        };

        use_case
            .execute(request(json!({
                "lastPrompt": "x",
                "fileTree": {"src": ["secret.rs"]},
                "snippets": ["let token = \"abc\";"],
            })))
            .await
            .expect("expected refine to succeed");

        let payload = provider.single_user_payload();
        assert_eq!(payload["fileTree"], CONTEXT_PLACEHOLDER);
        assert_eq!(payload["snippets"], CONTEXT_PLACEHOLDER);
        let forwarded = provider.requests()[0].user.clone();
        assert!(!forwarded.contains("secret.rs"));
        assert!(!forwarded.contains("token"));
    }

    #[tokio::test]
    async fn when_context_is_absent_then_forwards_null() {
        let provider = RecordingProvider::replying("{}");
        let use_case = RefinePromptUseCase {
            provider: provider.clone(),
        };

        use_case
            .execute(request(json!({"lastPrompt": "x"})))
            .await
            .expect("expected refine to succeed");

        let payload = provider.single_user_payload();
        assert!(payload["fileTree"].is_null());
        assert!(payload["snippets"].is_null());
    }

    #[tokio::test]
    async fn when_many_failed_steps_then_first_twelve_are_stringified() {
        let provider = RecordingProvider::replying("{}");
        let use_case = RefinePromptUseCase {
            provider: provider.clone(),
        };
        let steps: Vec<Value> = (1..=20)
            .map(|i| json!({"id": i, "label": format!("step {i}"), "reason": null}))
            .collect();

        use_case
            .execute(request(json!({"lastPrompt": "x", "failedSteps": steps})))
            .await
            .expect("expected refine to succeed");

        let payload = provider.single_user_payload();
        let forwarded = payload["failedSteps"].as_array().expect("failed steps");
        assert_eq!(forwarded.len(), 12);
        assert_eq!(
            forwarded[0],
            json!({"id": "1", "label": "step 1", "reason": ""})
        );
    }

    #[tokio::test]
    async fn when_output_has_wrong_types_then_uses_safe_defaults() {
        let use_case = RefinePromptUseCase {
            provider: RecordingProvider::replying(
                r#"{"updated_prompt":null,"reasons_for_changes":["clearer", "", 2],"additional_checks":"none"}"#,
            ),
        };

        let refinement = use_case
            .execute(request(json!({"lastPrompt": "original"})))
            .await
            .expect("expected refine to succeed");

        assert_eq!(
            refinement,
            Refinement {
                updated_prompt: "original".to_string(),
                reasons_for_changes: vec!["clearer".to_string(), "2".to_string()],
                additional_checks: Vec::new(),
            }
        );
    }

    #[tokio::test]
    async fn when_upstream_rejects_key_then_returns_key_invalid() {
        let use_case = RefinePromptUseCase {
            provider: RecordingProvider::failing(StatusCode::FORBIDDEN),
        };

        let result = use_case.execute(request(json!({"lastPrompt": "x"}))).await;

        assert!(matches!(result, Err(GatewayError::KeyInvalid)));
    }
}
