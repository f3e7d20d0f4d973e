//! Completion hook dispatch.

use std::sync::Arc;

use parley_domain::NegotiationSession;

use crate::infrastructure::ports::NarrativeLogPort;

/// Forwards finished sessions to the host's narrative log, if one is wired.
///
/// A hook failure is logged and swallowed: the negotiation is already
/// completed and saved by the time the hook runs.
pub struct CompletionNotifier {
    narrative_log: Option<Arc<dyn NarrativeLogPort>>,
}

impl CompletionNotifier {
    pub fn new(narrative_log: Option<Arc<dyn NarrativeLogPort>>) -> Self {
        Self { narrative_log }
    }

    pub fn disabled() -> Self {
        Self::new(None)
    }

    pub async fn notify(&self, session: &NegotiationSession) {
        let Some(narrative_log) = &self.narrative_log else {
            return;
        };
        if let Err(e) = narrative_log.negotiation_completed(session).await {
            tracing::warn!(
                negotiation_id = %session.id(),
                error = %e,
                "Narrative log hook failed for completed negotiation"
            );
        }
    }
}
