mod coerce;
mod prompt;

pub mod health;
pub mod plan;
pub mod quick_edit;
pub mod refine;

#[cfg(test)]
pub(crate) mod test_support;

pub use health::HealthCheckUseCase;
pub use plan::GeneratePlanUseCase;
pub use quick_edit::QuickEditUseCase;
pub use refine::RefinePromptUseCase;
