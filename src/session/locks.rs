// src/session/locks.rs
// One async mutex per live session, so a chat turn and a report generation
// never write to the same history at once

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};

/// Session id to turn lock.
///
/// Entries are created lazily for sessions that exist in the store and are
/// dropped again when the session is deleted.
#[derive(Default)]
pub struct SessionLocks {
    by_session: RwLock<HashMap<String, Arc<Mutex<()>>>>,
}

impl SessionLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lock for `session_id`, created on first use
    pub async fn get_lock(&self, session_id: &str) -> Arc<Mutex<()>> {
        if let Some(lock) = self.by_session.read().await.get(session_id) {
            return Arc::clone(lock);
        }

        let mut by_session = self.by_session.write().await;
        Arc::clone(
            by_session
                .entry(session_id.to_string())
                .or_insert_with(|| Arc::new(Mutex::new(()))),
        )
    }

    /// Forget a session. Holders of its lock keep their guard.
    pub async fn remove(&self, session_id: &str) {
        self.by_session.write().await.remove(session_id);
    }

    /// Number of sessions with a lock entry
    pub async fn tracked(&self) -> usize {
        self.by_session.read().await.len()
    }
}
