use crate::domain::{CompletionProvider, HealthReport};

// Reports configuration readiness without touching the upstream API.
pub struct HealthCheckUseCase<P> {
    pub provider: P,
}

impl<P> HealthCheckUseCase<P>
where
    P: CompletionProvider,
{
    pub fn execute(&self) -> HealthReport {
        let has_key = self.provider.has_credentials();
        let model = self.provider.model().to_string();

        HealthReport {
            ok: has_key && !model.is_empty(),
            has_key,
            model,
        }
    }
}
