//! External service ports.

use async_trait::async_trait;
use parley_domain::NegotiationSession;

use super::error::NarrativeLogError;

/// Optional hook the host uses to write a narrative/event log entry when a
/// negotiation finishes. The engine works without it.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NarrativeLogPort: Send + Sync {
    async fn negotiation_completed(
        &self,
        session: &NegotiationSession,
    ) -> Result<(), NarrativeLogError>;
}
