use std::sync::Arc;

use parley_domain::{
    ArgumentId, ArgumentInput, NegotiationId, NegotiationRules, NegotiationSession,
    NegotiationUpdate,
};

use crate::infrastructure::ports::{ClockPort, NegotiationRepo, RandomPort};

use super::{load, trace_update, CompletionNotifier, NegotiationError};

/// Result of recording one argument.
#[derive(Debug, Clone)]
pub struct ArgumentResult {
    pub session: NegotiationSession,
    pub update: NegotiationUpdate,
}

impl ArgumentResult {
    /// True when the argument exhausted patience and ended the negotiation.
    pub fn auto_completed(&self) -> bool {
        self.update.completed_outcome().is_some()
    }
}

/// Applies a player argument to an active negotiation.
pub struct RecordArgument {
    repo: Arc<dyn NegotiationRepo>,
    clock: Arc<dyn ClockPort>,
    random: Arc<dyn RandomPort>,
    rules: Arc<NegotiationRules>,
    notifier: Arc<CompletionNotifier>,
}

impl RecordArgument {
    pub fn new(
        repo: Arc<dyn NegotiationRepo>,
        clock: Arc<dyn ClockPort>,
        random: Arc<dyn RandomPort>,
        rules: Arc<NegotiationRules>,
        notifier: Arc<CompletionNotifier>,
    ) -> Self {
        Self {
            repo,
            clock,
            random,
            rules,
            notifier,
        }
    }

    pub async fn execute(
        &self,
        id: NegotiationId,
        input: ArgumentInput,
    ) -> Result<ArgumentResult, NegotiationError> {
        let mut session = load(self.repo.as_ref(), id).await?;
        let argument_id = ArgumentId::from_uuid(self.random.gen_uuid());

        let update = session
            .record_argument(input, &self.rules, argument_id, self.clock.now())
            .map_err(|e| {
                tracing::debug!(negotiation_id = %id, error = %e, "Argument rejected");
                NegotiationError::from(e)
            })?;
        self.repo.save(&session).await?;
        trace_update(id, &update);

        let result = ArgumentResult { session, update };
        if result.auto_completed() {
            tracing::info!(
                negotiation_id = %id,
                arguments = result.session.arguments().len(),
                "Patience exhausted, negotiation auto-completed"
            );
            self.notifier.notify(&result.session).await;
        }
        Ok(result)
    }
}
