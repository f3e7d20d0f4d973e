//! Negotiation use cases.
//!
//! Each use case follows the same shape: load the session from the
//! repository, run one synchronous domain operation on it, save it back.
//! Nothing is saved when the domain operation fails, so a failed call
//! leaves the stored session untouched.

mod completion;
mod crud;
mod lifecycle;
mod record_argument;
mod reveal;

#[cfg(test)]
mod test_support;

pub use completion::CompletionNotifier;
pub use crud::NegotiationCrud;
pub use lifecycle::NegotiationLifecycle;
pub use record_argument::{ArgumentResult, RecordArgument};
pub use reveal::RevealInformation;

use parley_domain::{
    DomainError, DomainEvent, NegotiationId, NegotiationSession, NegotiationUpdate,
};

use crate::infrastructure::ports::{NegotiationRepo, RepoError};

/// Shared error type for negotiation use cases.
#[derive(Debug, thiserror::Error)]
pub enum NegotiationError {
    #[error("{entity_type} not found: {id}")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },
    #[error("Validation failed: {0}")]
    Validation(String),
    #[error("Invalid state: {0}")]
    InvalidState(String),
    #[error("Repository error: {0}")]
    Repo(RepoError),
}

impl NegotiationError {
    pub fn negotiation_not_found(id: NegotiationId) -> Self {
        Self::NotFound {
            entity_type: "Negotiation",
            id: id.to_string(),
        }
    }
}

impl From<DomainError> for NegotiationError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::NotFound { entity_type, id } => Self::NotFound { entity_type, id },
            DomainError::InvalidStateTransition(msg) => Self::InvalidState(msg),
            DomainError::Validation(msg) | DomainError::InvalidId(msg) | DomainError::Parse(msg) => {
                Self::Validation(msg)
            }
        }
    }
}

impl From<RepoError> for NegotiationError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound { entity_type, id } => Self::NotFound { entity_type, id },
            other => Self::Repo(other),
        }
    }
}

/// Container for negotiation use cases.
pub struct NegotiationUseCases {
    pub crud: NegotiationCrud,
    pub lifecycle: NegotiationLifecycle,
    pub record_argument: RecordArgument,
    pub reveal: RevealInformation,
}

impl NegotiationUseCases {
    pub fn new(
        crud: NegotiationCrud,
        lifecycle: NegotiationLifecycle,
        record_argument: RecordArgument,
        reveal: RevealInformation,
    ) -> Self {
        Self {
            crud,
            lifecycle,
            record_argument,
            reveal,
        }
    }
}

async fn load(
    repo: &dyn NegotiationRepo,
    id: NegotiationId,
) -> Result<NegotiationSession, NegotiationError> {
    repo.get(id)
        .await?
        .ok_or_else(|| NegotiationError::negotiation_not_found(id))
}

fn trace_update(id: NegotiationId, update: &NegotiationUpdate) {
    for event in DomainEvent::from_update(id, update) {
        tracing::info!(
            negotiation_id = %id,
            event = event.event_type(),
            "Negotiation event"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_errors_map_to_use_case_errors() {
        assert!(matches!(
            NegotiationError::from(DomainError::validation("bad tier")),
            NegotiationError::Validation(_)
        ));
        assert!(matches!(
            NegotiationError::from(DomainError::invalid_state_transition("not active")),
            NegotiationError::InvalidState(_)
        ));
        assert!(matches!(
            NegotiationError::from(DomainError::not_found("Pitfall", "taxes")),
            NegotiationError::NotFound {
                entity_type: "Pitfall",
                ..
            }
        ));
    }

    #[test]
    fn repo_not_found_is_surfaced_as_not_found() {
        let err = NegotiationError::from(RepoError::not_found("Negotiation", "abc"));
        assert!(matches!(err, NegotiationError::NotFound { .. }));

        let err = NegotiationError::from(RepoError::database("save", "disk full"));
        assert!(matches!(err, NegotiationError::Repo(_)));
        assert!(err.to_string().contains("disk full"));
    }
}
