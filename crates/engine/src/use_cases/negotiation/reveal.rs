use std::sync::Arc;

use parley_domain::{NegotiationId, NegotiationSession, NegotiationUpdate};

use crate::infrastructure::ports::{ClockPort, NegotiationRepo};

use super::{load, NegotiationError};

/// Marks motivations and pitfalls as discovered by the players.
///
/// Allowed in any status. Revealing something already known is a no-op and
/// skips the save.
pub struct RevealInformation {
    repo: Arc<dyn NegotiationRepo>,
    clock: Arc<dyn ClockPort>,
}

impl RevealInformation {
    pub fn new(repo: Arc<dyn NegotiationRepo>, clock: Arc<dyn ClockPort>) -> Self {
        Self { repo, clock }
    }

    pub async fn reveal_motivation(
        &self,
        id: NegotiationId,
        motivation_type: &str,
    ) -> Result<NegotiationSession, NegotiationError> {
        let mut session = load(self.repo.as_ref(), id).await?;
        let update = session.reveal_motivation(motivation_type, self.clock.now())?;
        self.persist_if_revealed(&session, &update).await?;
        Ok(session)
    }

    pub async fn reveal_pitfall(
        &self,
        id: NegotiationId,
        description: &str,
    ) -> Result<NegotiationSession, NegotiationError> {
        let mut session = load(self.repo.as_ref(), id).await?;
        let update = session.reveal_pitfall(description, self.clock.now())?;
        self.persist_if_revealed(&session, &update).await?;
        Ok(session)
    }

    async fn persist_if_revealed(
        &self,
        session: &NegotiationSession,
        update: &NegotiationUpdate,
    ) -> Result<(), NegotiationError> {
        let (key, newly_revealed) = match update {
            NegotiationUpdate::MotivationRevealed {
                motivation_type,
                newly_revealed,
            } => (motivation_type.as_str(), *newly_revealed),
            NegotiationUpdate::PitfallRevealed {
                description,
                newly_revealed,
            } => (description.as_str(), *newly_revealed),
            _ => return Ok(()),
        };

        if !newly_revealed {
            tracing::debug!(negotiation_id = %session.id(), key, "Already revealed");
            return Ok(());
        }

        self.repo.save(session).await?;
        tracing::info!(negotiation_id = %session.id(), key, "Revealed to players");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use parley_domain::{NegotiationStatus, NegotiationSession};

    use super::*;
    use crate::infrastructure::ports::MockNegotiationRepo;
    use crate::use_cases::negotiation::test_support::{
        active_session, fixed_clock, fixed_time, preparing_session,
    };

    fn reveal(repo: MockNegotiationRepo) -> RevealInformation {
        RevealInformation::new(Arc::new(repo), Arc::new(fixed_clock()))
    }

    fn repo_with(session: NegotiationSession) -> MockNegotiationRepo {
        let mut repo = MockNegotiationRepo::new();
        repo.expect_get().returning(move |_| Ok(Some(session.clone())));
        repo
    }

    #[tokio::test]
    async fn reveal_motivation_is_case_insensitive_and_saved() {
        let session = preparing_session(2, 3);
        let id = session.id();
        let mut repo = repo_with(session);
        repo.expect_save()
            .withf(|s| s.find_motivation("Greed").is_some_and(|m| m.is_known()))
            .times(1)
            .returning(|_| Ok(()));

        let updated = reveal(repo).reveal_motivation(id, "GREED").await.unwrap();

        assert!(updated.find_motivation("greed").unwrap().is_known());
        assert!(!updated.find_motivation("protection").unwrap().is_known());
    }

    #[tokio::test]
    async fn revealing_a_known_motivation_skips_the_save() {
        let mut session = preparing_session(2, 3);
        session.reveal_motivation("Greed", fixed_time()).unwrap();
        let id = session.id();
        let mut repo = repo_with(session);
        repo.expect_save().never();

        let updated = reveal(repo).reveal_motivation(id, "greed").await.unwrap();

        assert!(updated.find_motivation("Greed").unwrap().is_known());
    }

    #[tokio::test]
    async fn reveal_unknown_pitfall_is_not_found() {
        let session = active_session(2, 3);
        let id = session.id();
        let mut repo = repo_with(session);
        repo.expect_save().never();

        let err = reveal(repo)
            .reveal_pitfall(id, "Mentioning the war")
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            NegotiationError::NotFound {
                entity_type: "Pitfall",
                ..
            }
        ));
    }

    #[tokio::test]
    async fn reveal_pitfall_after_completion_leaves_outcome_alone() {
        let mut session = active_session(3, 3);
        session.complete(fixed_time()).unwrap();
        let outcome = session.outcome();
        let id = session.id();
        let mut repo = repo_with(session);
        repo.expect_save().times(1).returning(|_| Ok(()));

        let updated = reveal(repo)
            .reveal_pitfall(id, "questioning her loyalty")
            .await
            .unwrap();

        assert_eq!(updated.status(), NegotiationStatus::Completed);
        assert_eq!(updated.outcome(), outcome);
        assert!(updated.pitfalls()[0].is_known());
    }
}
