use std::sync::Arc;

use parley_domain::{NegotiationId, NegotiationSession};

use crate::infrastructure::ports::{ClockPort, NegotiationRepo};

use super::{load, trace_update, CompletionNotifier, NegotiationError};

/// Status transitions: start, explicit completion and reopen.
pub struct NegotiationLifecycle {
    repo: Arc<dyn NegotiationRepo>,
    clock: Arc<dyn ClockPort>,
    notifier: Arc<CompletionNotifier>,
}

impl NegotiationLifecycle {
    pub fn new(
        repo: Arc<dyn NegotiationRepo>,
        clock: Arc<dyn ClockPort>,
        notifier: Arc<CompletionNotifier>,
    ) -> Self {
        Self {
            repo,
            clock,
            notifier,
        }
    }

    pub async fn start(&self, id: NegotiationId) -> Result<NegotiationSession, NegotiationError> {
        let mut session = load(self.repo.as_ref(), id).await?;
        let update = session.start(self.clock.now())?;
        self.repo.save(&session).await?;
        trace_update(id, &update);
        Ok(session)
    }

    /// End the negotiation and classify its outcome from the current interest.
    pub async fn complete(
        &self,
        id: NegotiationId,
    ) -> Result<NegotiationSession, NegotiationError> {
        let mut session = load(self.repo.as_ref(), id).await?;
        let update = session.complete(self.clock.now())?;
        self.repo.save(&session).await?;
        trace_update(id, &update);

        self.notifier.notify(&session).await;
        Ok(session)
    }

    pub async fn reopen(&self, id: NegotiationId) -> Result<NegotiationSession, NegotiationError> {
        let mut session = load(self.repo.as_ref(), id).await?;
        let update = session.reopen(self.clock.now())?;
        self.repo.save(&session).await?;
        trace_update(id, &update);
        Ok(session)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use parley_domain::{NegotiationOutcome, NegotiationStatus};

    use super::*;
    use crate::infrastructure::ports::{
        MockNarrativeLogPort, MockNegotiationRepo, NarrativeLogError, NarrativeLogPort,
    };
    use crate::use_cases::negotiation::test_support::{
        active_session, fixed_clock, fixed_time, preparing_session,
    };

    fn lifecycle(
        repo: MockNegotiationRepo,
        narrative_log: Option<MockNarrativeLogPort>,
    ) -> NegotiationLifecycle {
        let narrative_log =
            narrative_log.map(|log| Arc::new(log) as Arc<dyn NarrativeLogPort>);
        NegotiationLifecycle::new(
            Arc::new(repo),
            Arc::new(fixed_clock()),
            Arc::new(CompletionNotifier::new(narrative_log)),
        )
    }

    fn repo_with(session: NegotiationSession) -> MockNegotiationRepo {
        let mut repo = MockNegotiationRepo::new();
        repo.expect_get().returning(move |_| Ok(Some(session.clone())));
        repo
    }

    #[tokio::test]
    async fn start_activates_a_preparing_session() {
        let session = preparing_session(2, 3);
        let id = session.id();
        let mut repo = repo_with(session);
        repo.expect_save()
            .withf(|s| s.status() == NegotiationStatus::Active)
            .times(1)
            .returning(|_| Ok(()));

        let started = lifecycle(repo, None).start(id).await.unwrap();

        assert_eq!(started.status(), NegotiationStatus::Active);
        assert_eq!(started.interest().value(), 2);
        assert_eq!(started.patience().current(), 3);
    }

    #[tokio::test]
    async fn start_twice_is_invalid_state() {
        let session = active_session(2, 3);
        let id = session.id();
        let mut repo = repo_with(session);
        repo.expect_save().never();

        let err = lifecycle(repo, None).start(id).await.unwrap_err();

        assert!(matches!(err, NegotiationError::InvalidState(_)));
    }

    #[tokio::test]
    async fn complete_at_interest_four_is_full_success_and_notifies() {
        let session = active_session(4, 3);
        let id = session.id();
        let mut repo = repo_with(session);
        repo.expect_save().times(1).returning(|_| Ok(()));

        let mut narrative_log = MockNarrativeLogPort::new();
        narrative_log
            .expect_negotiation_completed()
            .withf(|s| s.outcome() == Some(NegotiationOutcome::SuccessFull))
            .times(1)
            .returning(|_| Ok(()));

        let completed = lifecycle(repo, Some(narrative_log))
            .complete(id)
            .await
            .unwrap();

        assert_eq!(completed.status(), NegotiationStatus::Completed);
        assert_eq!(completed.outcome(), Some(NegotiationOutcome::SuccessFull));
    }

    #[tokio::test]
    async fn narrative_log_failure_does_not_fail_completion() {
        let session = active_session(0, 3);
        let id = session.id();
        let mut repo = repo_with(session);
        repo.expect_save().times(1).returning(|_| Ok(()));

        let mut narrative_log = MockNarrativeLogPort::new();
        narrative_log
            .expect_negotiation_completed()
            .returning(|_| Err(NarrativeLogError::Unavailable("log offline".to_string())));

        let completed = lifecycle(repo, Some(narrative_log))
            .complete(id)
            .await
            .unwrap();

        assert_eq!(completed.outcome(), Some(NegotiationOutcome::Hostile));
    }

    #[tokio::test]
    async fn complete_when_already_completed_is_invalid_state() {
        let mut session = active_session(3, 3);
        session.complete(fixed_time()).unwrap();
        let id = session.id();
        let mut repo = repo_with(session);
        repo.expect_save().never();

        let mut narrative_log = MockNarrativeLogPort::new();
        narrative_log.expect_negotiation_completed().never();

        let err = lifecycle(repo, Some(narrative_log))
            .complete(id)
            .await
            .unwrap_err();

        assert!(matches!(err, NegotiationError::InvalidState(_)));
    }

    #[tokio::test]
    async fn reopen_clears_outcome_and_keeps_resources() {
        let mut session = active_session(3, 2);
        session.complete(fixed_time()).unwrap();
        let id = session.id();
        let mut repo = repo_with(session);
        repo.expect_save()
            .withf(|s| s.outcome().is_none())
            .times(1)
            .returning(|_| Ok(()));

        let reopened = lifecycle(repo, None).reopen(id).await.unwrap();

        assert_eq!(reopened.status(), NegotiationStatus::Active);
        assert_eq!(reopened.outcome(), None);
        assert_eq!(reopened.interest().value(), 3);
        assert_eq!(reopened.patience().current(), 2);
    }
}
