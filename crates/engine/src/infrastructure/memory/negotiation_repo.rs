//! In-memory negotiation session store.

use async_trait::async_trait;
use dashmap::DashMap;
use parley_domain::{NegotiationId, NegotiationSession};

use crate::infrastructure::ports::{NegotiationRepo, RepoError};

/// Session store backed by a concurrent map.
///
/// Stores clones, so a loaded session is privately owned by its caller until
/// it is saved back.
#[derive(Default)]
pub struct InMemoryNegotiationRepo {
    sessions: DashMap<NegotiationId, NegotiationSession>,
}

impl InMemoryNegotiationRepo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

#[async_trait]
impl NegotiationRepo for InMemoryNegotiationRepo {
    async fn get(&self, id: NegotiationId) -> Result<Option<NegotiationSession>, RepoError> {
        Ok(self.sessions.get(&id).map(|entry| entry.value().clone()))
    }

    async fn save(&self, session: &NegotiationSession) -> Result<(), RepoError> {
        tracing::debug!(
            negotiation_id = %session.id(),
            status = %session.status(),
            "Saving negotiation"
        );
        self.sessions.insert(session.id(), session.clone());
        Ok(())
    }

    async fn delete(&self, id: NegotiationId) -> Result<(), RepoError> {
        self.sessions
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| RepoError::not_found("Negotiation", id))
    }

    async fn list(&self) -> Result<Vec<NegotiationSession>, RepoError> {
        let mut sessions: Vec<_> = self
            .sessions
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        sessions.sort_by(|a, b| b.updated_at().cmp(&a.updated_at()));
        Ok(sessions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};
    use parley_domain::CreateNegotiation;

    fn session(name: &str, seconds: i64) -> NegotiationSession {
        let now = Utc.timestamp_opt(1_700_000_000, 0).unwrap() + Duration::seconds(seconds);
        NegotiationSession::create(
            CreateNegotiation {
                name: name.to_string(),
                npc_name: "Quartermaster Vey".to_string(),
                npc_entity_id: None,
                description: None,
                interest: 2,
                patience: 3,
                impression: 0,
                motivations: vec![],
                pitfalls: vec![],
            },
            now,
        )
        .unwrap()
    }

    #[tokio::test]
    async fn save_then_get_returns_a_copy() {
        let repo = InMemoryNegotiationRepo::new();
        let session = session("Supplies", 0);
        repo.save(&session).await.unwrap();

        let loaded = repo.get(session.id()).await.unwrap();
        assert_eq!(loaded, Some(session));
        assert_eq!(repo.len(), 1);
    }

    #[tokio::test]
    async fn get_unknown_returns_none() {
        let repo = InMemoryNegotiationRepo::new();
        assert!(repo.get(NegotiationId::new()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn delete_unknown_is_not_found() {
        let repo = InMemoryNegotiationRepo::new();
        let err = repo.delete(NegotiationId::new()).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn list_orders_most_recent_first() {
        let repo = InMemoryNegotiationRepo::new();
        let older = session("Older", 0);
        let newer = session("Newer", 60);
        repo.save(&older).await.unwrap();
        repo.save(&newer).await.unwrap();

        let names: Vec<_> = repo
            .list()
            .await
            .unwrap()
            .iter()
            .map(|s| s.name().to_string())
            .collect();
        assert_eq!(names, vec!["Newer", "Older"]);
    }
}
