mod completion;
mod entities;
mod errors;

// Re-export the domain boundary types and ports.
pub use completion::{CompletionError, CompletionProvider, CompletionRequest};
pub use entities::{ChecklistItem, HealthReport, PatchPrompt, Plan, Refinement};
pub use errors::GatewayError;
