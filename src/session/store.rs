// src/session/store.rs
// Session storage abstraction and the in-memory backend

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::debug;

use super::types::{Message, Session, SessionPatch};

/// Keyed table of assessment sessions.
///
/// Unknown identifiers are reported through `None`/`false`, never as errors:
/// callers validate input before reaching the store.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Create and persist a fresh session with a unique id
    async fn create(&self) -> Session;

    async fn get(&self, id: &str) -> Option<Session>;

    /// Merge `patch` into the session and refresh `updated_at`
    async fn update(&self, id: &str, patch: SessionPatch) -> Option<Session>;

    /// Append to the ordered message history
    async fn append_message(&self, id: &str, message: Message) -> Option<Session>;

    async fn list(&self) -> Vec<Session>;

    /// Remove a session, returning whether one existed
    async fn delete(&self, id: &str) -> bool;
}

/// Process-local store. Sessions are never evicted, so memory grows with
/// the number of assessments until the process restarts.
#[derive(Default)]
pub struct InMemorySessionStore {
    sessions: RwLock<HashMap<String, Session>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn create(&self) -> Session {
        let session = Session::new(uuid::Uuid::new_v4().to_string());
        self.sessions
            .write()
            .await
            .insert(session.id.clone(), session.clone());
        debug!("Created session {}", session.id);
        session
    }

    async fn get(&self, id: &str) -> Option<Session> {
        self.sessions.read().await.get(id).cloned()
    }

    async fn update(&self, id: &str, patch: SessionPatch) -> Option<Session> {
        let mut sessions = self.sessions.write().await;
        let session = sessions.get_mut(id)?;
        session.apply(patch);
        Some(session.clone())
    }

    async fn append_message(&self, id: &str, message: Message) -> Option<Session> {
        let mut sessions = self.sessions.write().await;
        let session = sessions.get_mut(id)?;
        session.messages.push(message);
        session.updated_at = Utc::now();
        Some(session.clone())
    }

    async fn list(&self) -> Vec<Session> {
        self.sessions.read().await.values().cloned().collect()
    }

    async fn delete(&self, id: &str) -> bool {
        self.sessions.write().await.remove(id).is_some()
    }
}
