use serde::{Deserialize, Serialize};
use serde_json::Value;

// Request fields are kept as raw JSON so the use cases decide what is malformed
// and answer with a BAD_REQUEST envelope instead of a framework rejection.

// Request payload for plan generation.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanRequest {
    pub idea_text: Option<Value>,
    pub failure_tags: Option<Value>,
    pub heuristics: Option<Value>,
}

// Request payload for prompt refinement.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefineRequest {
    pub failed_steps: Option<Value>,
    pub last_prompt: Option<Value>,
    // Only presence is forwarded upstream, never the content.
    pub file_tree: Option<Value>,
    pub snippets: Option<Value>,
}

// Request payload for a quick edit suggestion.
#[derive(Debug, Default, Deserialize)]
pub struct QuickEditRequest {
    pub selection: Option<Value>,
    pub intent: Option<Value>,
}

// Error envelope shared by every route.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub code: &'static str,
    pub message: String,
}
