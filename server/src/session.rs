//! Process-resident organiser sessions, keyed by an opaque cookie token.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::manager::ManagerIdentity;

#[derive(Debug, Clone)]
struct SessionEntry {
    identity: ManagerIdentity,
    last_seen: Instant,
}

#[derive(Clone)]
pub struct SessionStore {
    entries: Arc<RwLock<HashMap<String, SessionEntry>>>,
    idle_ttl: Duration,
}

impl SessionStore {
    pub fn new(idle_ttl: Duration) -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
            idle_ttl,
        }
    }

    /// Starts a session and returns its token.
    pub async fn create(&self, identity: ManagerIdentity) -> String {
        let token = Uuid::new_v4().simple().to_string();
        let now = Instant::now();

        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|_, entry| now.duration_since(entry.last_seen) < self.idle_ttl);
        if entries.len() < before {
            tracing::debug!(expired = before - entries.len(), "Pruned idle sessions");
        }

        entries.insert(
            token.clone(),
            SessionEntry {
                identity,
                last_seen: now,
            },
        );
        token
    }

    /// Looks a token up and marks the session as active. Idle sessions are dropped.
    pub async fn get(&self, token: &str) -> Option<ManagerIdentity> {
        let mut entries = self.entries.write().await;
        let entry = entries.get_mut(token)?;

        if entry.last_seen.elapsed() >= self.idle_ttl {
            entries.remove(token);
            return None;
        }

        entry.last_seen = Instant::now();
        Some(entry.identity.clone())
    }

    pub async fn remove(&self, token: &str) -> Option<ManagerIdentity> {
        self.entries
            .write()
            .await
            .remove(token)
            .map(|entry| entry.identity)
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}
