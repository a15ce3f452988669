use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::{debug, info};
use tripbook_core::TripSession;
use uuid::Uuid;

struct SessionEntry {
    session: TripSession,
    last_seen: DateTime<Utc>,
}

impl SessionEntry {
    fn new() -> Self {
        Self {
            session: TripSession::new(),
            last_seen: Utc::now(),
        }
    }

    fn touch(&mut self) {
        self.last_seen = Utc::now();
    }
}

/// One `TripSession` per browser session. Sessions never share state.
#[derive(Clone, Default)]
pub struct SessionRegistry {
    sessions: Arc<RwLock<HashMap<Uuid, SessionEntry>>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn create(&self) -> Uuid {
        let id = Uuid::new_v4();
        self.sessions.write().await.insert(id, SessionEntry::new());
        debug!(session = %id, "Session started");
        id
    }

    /// Returns `id` if it names a live session, otherwise starts a new one
    pub async fn resume_or_create(&self, id: Option<Uuid>) -> Uuid {
        if let Some(id) = id {
            if let Some(entry) = self.sessions.write().await.get_mut(&id) {
                entry.touch();
                return id;
            }
        }
        self.create().await
    }

    pub async fn contains(&self, id: &Uuid) -> bool {
        self.sessions.read().await.contains_key(id)
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }

    /// Runs `f` against the session under the write lock.
    /// `None` if the session does not exist.
    pub async fn with_session<F, R>(&self, id: &Uuid, f: F) -> Option<R>
    where
        F: FnOnce(&mut TripSession) -> R,
    {
        let mut sessions = self.sessions.write().await;
        let entry = sessions.get_mut(id)?;
        entry.touch();
        Some(f(&mut entry.session))
    }

    pub async fn read<F, R>(&self, id: &Uuid, f: F) -> Option<R>
    where
        F: FnOnce(&TripSession) -> R,
    {
        let sessions = self.sessions.read().await;
        sessions.get(id).map(|entry| f(&entry.session))
    }

    pub async fn end(&self, id: &Uuid) -> bool {
        let removed = self.sessions.write().await.remove(id).is_some();
        if removed {
            debug!(session = %id, "Session ended");
        }
        removed
    }

    /// Ends sessions idle for longer than `max_idle`
    pub async fn cleanup_idle(&self, max_idle: Duration) -> usize {
        let max_idle = chrono::Duration::from_std(max_idle).unwrap_or(chrono::Duration::MAX);
        let cutoff = Utc::now().checked_sub_signed(max_idle).unwrap_or(DateTime::<Utc>::MIN_UTC);
        self.cleanup_seen_before(cutoff).await
    }

    pub async fn cleanup_seen_before(&self, cutoff: DateTime<Utc>) -> usize {
        let mut sessions = self.sessions.write().await;
        let initial_count = sessions.len();
        sessions.retain(|_, entry| entry.last_seen >= cutoff);
        let removed = initial_count - sessions.len();
        if removed > 0 {
            info!("Expired {} idle sessions", removed);
        }
        removed
    }
}

/// Periodically ends idle sessions. Runs until the task is aborted.
pub async fn start_session_sweeper(registry: SessionRegistry, every: Duration, max_idle: Duration) {
    info!("Session sweeper started, idle timeout {:?}", max_idle);
    let mut ticker = tokio::time::interval(every);
    loop {
        ticker.tick().await;
        registry.cleanup_idle(max_idle).await;
    }
}
