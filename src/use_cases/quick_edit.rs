use serde_json::json;

use crate::domain::{CompletionProvider, CompletionRequest, GatewayError, PatchPrompt};
use crate::interface_adapters::protocol::QuickEditRequest;
use crate::use_cases::coerce::ModelOutput;
use crate::use_cases::prompt::{non_empty_text, truncate_chars};

const QUICK_EDIT_TEMPERATURE: f64 = 0.5;
const MAX_SELECTION_CHARS: usize = 1200;
const MAX_INTENT_CHARS: usize = 200;

const QUICK_EDIT_SYSTEM_PROMPT: &str = "You write one short, precise instruction that tells an \
AI coding assistant how to change the selected text so it satisfies the user's intent. Do not \
rewrite the text yourself. Reply with strict JSON only, no prose, in the shape \
{\"patch_prompt\": string}.";

// Quick edit use case with an injected completion provider.
pub struct QuickEditUseCase<P> {
    pub provider: P,
}

impl<P> QuickEditUseCase<P>
where
    P: CompletionProvider,
{
    pub async fn execute(&self, payload: QuickEditRequest) -> Result<PatchPrompt, GatewayError> {
        let (Some(selection), Some(intent)) = (
            non_empty_text(payload.selection),
            non_empty_text(payload.intent),
        ) else {
            return Err(GatewayError::BadRequest(
                "selection and intent are required".to_string(),
            ));
        };

        if !self.provider.has_credentials() {
            return Err(GatewayError::KeyInvalid);
        }

        let user = json!({
            "selection": truncate_chars(&selection, MAX_SELECTION_CHARS),
            "intent": truncate_chars(&intent, MAX_INTENT_CHARS),
        });

        let raw = self
            .provider
            .complete(CompletionRequest {
                system: QUICK_EDIT_SYSTEM_PROMPT.to_string(),
                user: user.to_string(),
                temperature: QUICK_EDIT_TEMPERATURE,
            })
            .await?;

        let patch_prompt = ModelOutput::parse(&raw)
            .map(|output| output.text_or("patch_prompt", ""))
            .filter(|text| !text.is_empty())
            .unwrap_or_else(|| {
                tracing::warn!("quick edit output had no patch_prompt; using fallback.");
                fallback_patch_prompt(&intent)
            });

        Ok(PatchPrompt { patch_prompt })
    }
}

fn fallback_patch_prompt(intent: &str) -> String {
    format!("Edit the selection to satisfy: {intent}")
}
