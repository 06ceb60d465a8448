use crate::domain::CompletionProvider;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    // One long-lived provider shared by every request; Arc<dyn Trait> keeps it swappable.
    pub completion: Arc<dyn CompletionProvider>,
}
