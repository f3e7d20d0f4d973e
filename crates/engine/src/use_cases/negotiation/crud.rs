use std::sync::Arc;

use parley_domain::{
    CreateNegotiation, NegotiationId, NegotiationSession, NegotiationSetup, NegotiationUpdate,
};

use crate::infrastructure::ports::{ClockPort, NegotiationRepo};

use super::{load, trace_update, NegotiationError};

/// Create, read, setup-edit and delete operations for negotiation sessions.
pub struct NegotiationCrud {
    repo: Arc<dyn NegotiationRepo>,
    clock: Arc<dyn ClockPort>,
}

impl NegotiationCrud {
    pub fn new(repo: Arc<dyn NegotiationRepo>, clock: Arc<dyn ClockPort>) -> Self {
        Self { repo, clock }
    }

    pub async fn create(
        &self,
        input: CreateNegotiation,
    ) -> Result<NegotiationSession, NegotiationError> {
        let session = NegotiationSession::create(input, self.clock.now())?;
        self.repo.save(&session).await?;

        tracing::info!(
            negotiation_id = %session.id(),
            npc_name = %session.npc_name(),
            interest = session.interest().value(),
            patience = session.patience().max(),
            "Negotiation created"
        );
        Ok(session)
    }

    pub async fn get(&self, id: NegotiationId) -> Result<NegotiationSession, NegotiationError> {
        load(self.repo.as_ref(), id).await
    }

    pub async fn list(&self) -> Result<Vec<NegotiationSession>, NegotiationError> {
        Ok(self.repo.list().await?)
    }

    /// Apply setup-time edits. Fails unless the session is still preparing.
    pub async fn update(
        &self,
        id: NegotiationId,
        setup: NegotiationSetup,
    ) -> Result<NegotiationSession, NegotiationError> {
        let mut session = load(self.repo.as_ref(), id).await?;
        let update = session.update_setup(setup, self.clock.now())?;

        if matches!(&update, NegotiationUpdate::SetupUpdated { fields } if fields.is_empty()) {
            tracing::debug!(negotiation_id = %id, "Setup update with no fields, skipping save");
            return Ok(session);
        }

        self.repo.save(&session).await?;
        trace_update(id, &update);
        Ok(session)
    }

    pub async fn delete(&self, id: NegotiationId) -> Result<(), NegotiationError> {
        self.repo.delete(id).await?;
        tracing::info!(negotiation_id = %id, "Negotiation deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use parley_domain::{NegotiationId, NegotiationSetup, NegotiationStatus};

    use super::*;
    use crate::infrastructure::ports::{MockNegotiationRepo, RepoError};
    use crate::use_cases::negotiation::test_support::{
        active_session, create_input, fixed_clock, fixed_time, preparing_session,
    };

    fn crud(repo: MockNegotiationRepo) -> NegotiationCrud {
        NegotiationCrud::new(Arc::new(repo), Arc::new(fixed_clock()))
    }

    #[tokio::test]
    async fn create_saves_a_preparing_session() {
        let mut repo = MockNegotiationRepo::new();
        repo.expect_save()
            .withf(|s| s.status() == NegotiationStatus::Preparing && s.interest().value() == 2)
            .times(1)
            .returning(|_| Ok(()));

        let session = crud(repo).create(create_input(2, 4)).await.unwrap();

        assert_eq!(session.status(), NegotiationStatus::Preparing);
        assert_eq!(session.patience().current(), 4);
        assert_eq!(session.created_at(), fixed_time());
    }

    #[tokio::test]
    async fn create_with_invalid_input_saves_nothing() {
        let mut repo = MockNegotiationRepo::new();
        repo.expect_save().never();

        let err = crud(repo).create(create_input(9, 4)).await.unwrap_err();

        assert!(matches!(err, NegotiationError::Validation(_)));
    }

    #[tokio::test]
    async fn get_unknown_session_is_not_found() {
        let mut repo = MockNegotiationRepo::new();
        repo.expect_get().returning(|_| Ok(None));

        let err = crud(repo).get(NegotiationId::new()).await.unwrap_err();

        assert!(matches!(
            err,
            NegotiationError::NotFound {
                entity_type: "Negotiation",
                ..
            }
        ));
    }

    #[tokio::test]
    async fn update_while_preparing_saves_edits() {
        let session = preparing_session(2, 4);
        let id = session.id();

        let mut repo = MockNegotiationRepo::new();
        repo.expect_get().returning(move |_| Ok(Some(session.clone())));
        repo.expect_save()
            .withf(|s| s.description() == "A new angle" && s.patience().max() == 6)
            .times(1)
            .returning(|_| Ok(()));

        let setup = NegotiationSetup {
            description: Some("A new angle".to_string()),
            patience: Some(6),
            ..Default::default()
        };
        let updated = crud(repo).update(id, setup).await.unwrap();

        assert_eq!(updated.patience().current(), 6);
    }

    #[tokio::test]
    async fn update_with_no_fields_does_not_save() {
        let session = preparing_session(2, 4);
        let id = session.id();

        let mut repo = MockNegotiationRepo::new();
        repo.expect_get().returning(move |_| Ok(Some(session.clone())));
        repo.expect_save().never();

        crud(repo)
            .update(id, NegotiationSetup::default())
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn update_after_start_is_invalid_state() {
        let session = active_session(2, 4);
        let id = session.id();

        let mut repo = MockNegotiationRepo::new();
        repo.expect_get().returning(move |_| Ok(Some(session.clone())));
        repo.expect_save().never();

        let setup = NegotiationSetup {
            interest: Some(5),
            ..Default::default()
        };
        let err = crud(repo).update(id, setup).await.unwrap_err();

        assert!(matches!(err, NegotiationError::InvalidState(_)));
    }

    #[tokio::test]
    async fn delete_unknown_session_is_not_found() {
        let mut repo = MockNegotiationRepo::new();
        repo.expect_delete()
            .returning(|id| Err(RepoError::not_found("Negotiation", id)));

        let err = crud(repo).delete(NegotiationId::new()).await.unwrap_err();

        assert!(matches!(err, NegotiationError::NotFound { .. }));
    }

    #[tokio::test]
    async fn repository_failures_propagate() {
        let mut repo = MockNegotiationRepo::new();
        repo.expect_list()
            .returning(|| Err(RepoError::database("list", "connection reset")));

        let err = crud(repo).list().await.unwrap_err();

        assert!(matches!(err, NegotiationError::Repo(_)));
    }
}
