use serde_json::json;

use crate::domain::{ChecklistItem, CompletionProvider, CompletionRequest, GatewayError, Plan};
use crate::interface_adapters::protocol::PlanRequest;
use crate::use_cases::coerce::{ModelOutput, stringify};
use crate::use_cases::prompt::{non_empty_text, take_first};

const PLAN_TEMPERATURE: f64 = 0.4;
// Hint arrays beyond this length are not forwarded.
const MAX_HINTS: usize = 8;
const UNPARSEABLE_PLAN: &str = "Unable to parse plan";

const PLAN_SYSTEM_PROMPT: &str = "You turn a rough software idea into a short implementation plan \
and a checklist of 4 to 8 concrete, verifiable steps. Take the listed failure tags and heuristics \
into account when they are present. Reply with strict JSON only, no prose, in the shape \
{\"plan\": string, \"checklist\": [{\"id\": string, \"label\": string}]}.";

// Plan generation use case with an injected completion provider.
pub struct GeneratePlanUseCase<P> {
    pub provider: P,
}

impl<P> GeneratePlanUseCase<P>
where
    P: CompletionProvider,
{
    pub async fn execute(&self, payload: PlanRequest) -> Result<Plan, GatewayError> {
        let idea_text = non_empty_text(payload.idea_text)
            .ok_or_else(|| GatewayError::BadRequest("ideaText is required".to_string()))?;

        if !self.provider.has_credentials() {
            return Err(GatewayError::KeyInvalid);
        }

        let user = json!({
            "idea": idea_text,
            "failureTags": take_first(payload.failure_tags.as_ref(), MAX_HINTS),
            "heuristics": take_first(payload.heuristics.as_ref(), MAX_HINTS),
        });

        let raw = self
            .provider
            .complete(CompletionRequest {
                system: PLAN_SYSTEM_PROMPT.to_string(),
                user: user.to_string(),
                temperature: PLAN_TEMPERATURE,
            })
            .await?;

        Ok(coerce_plan(&raw))
    }
}

fn coerce_plan(raw: &str) -> Plan {
    let Some(output) = ModelOutput::parse(raw) else {
        tracing::warn!("plan output was not valid json; using fallback.");
        return Plan {
            plan: UNPARSEABLE_PLAN.to_string(),
            checklist: Vec::new(),
        };
    };

    // Ids fall back to the 1-based position in the model's list, before filtering.
    let checklist = output
        .list("checklist")
        .iter()
        .enumerate()
        .filter_map(|(index, item)| {
            let label = item.get("label").map(stringify).unwrap_or_default();
            if label.is_empty() {
                return None;
            }
            let id = match item.get("id") {
                Some(id) if !id.is_null() => stringify(id),
                _ => (index + 1).to_string(),
            };
            Some(ChecklistItem { id, label })
        })
        .collect();

    Plan {
        plan: output.text_or("plan", ""),
        checklist,
    }
}
