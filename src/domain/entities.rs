use serde::Serialize;

// The serialization within this layer is a dependency leak, but these shapes are the
// public response contract and never vary, so the handlers return them as-is.

// Health snapshot derived from the configured provider.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct HealthReport {
    pub ok: bool,
    #[serde(rename = "hasKey")]
    pub has_key: bool,
    pub model: String,
}

// Plan produced from a free-form idea.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Plan {
    pub plan: String,
    pub checklist: Vec<ChecklistItem>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ChecklistItem {
    pub id: String,
    pub label: String,
}

// Revised prompt after failed checklist steps.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Refinement {
    pub updated_prompt: String,
    pub reasons_for_changes: Vec<String>,
    pub additional_checks: Vec<String>,
}

// Instruction describing a targeted edit to a selection.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PatchPrompt {
    pub patch_prompt: String,
}
