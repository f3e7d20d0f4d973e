//! Repository port traits for session storage.

use async_trait::async_trait;
use parley_domain::{NegotiationId, NegotiationSession};

use super::error::RepoError;

/// Session store keyed by id.
///
/// Implementations are responsible for serializing concurrent loads/saves of
/// the same id; use cases do load -> mutate -> save with no extra locking.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NegotiationRepo: Send + Sync {
    async fn get(&self, id: NegotiationId) -> Result<Option<NegotiationSession>, RepoError>;
    async fn save(&self, session: &NegotiationSession) -> Result<(), RepoError>;
    async fn delete(&self, id: NegotiationId) -> Result<(), RepoError>;
    /// All sessions, most recently updated first.
    async fn list(&self) -> Result<Vec<NegotiationSession>, RepoError>;
}
