//! Application State

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use advisor_core::LlmProvider;
use portfolio_advisor::{Advisor, AdvisorySession, SessionId};
use tokio::sync::{Mutex, RwLock};
use tokio::task::JoinHandle;
use tokio::time::Instant;

/// Idle time after which a session is ended when none is configured
pub const DEFAULT_SESSION_TTL: Duration = Duration::from_secs(30 * 60);

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Chat completion backend (for health reporting)
    pub provider: Arc<dyn LlmProvider>,

    /// Advisory operations with their collaborators
    pub advisor: Advisor,

    /// Live sessions
    pub sessions: Arc<SessionRegistry>,
}

/// One session, serialized behind its own lock
pub type SessionHandle = Arc<Mutex<AdvisorySession>>;

struct Entry {
    handle: SessionHandle,
    last_seen: Instant,
}

/// In-memory registry of live sessions; nothing outlives the process.
///
/// A session ends when it is removed or when it has gone `ttl` without a
/// lookup and no request is holding it.
pub struct SessionRegistry {
    sessions: RwLock<HashMap<SessionId, Entry>>,
    ttl: Duration,
}

impl Default for SessionRegistry {
    fn default() -> Self {
        Self::with_ttl(DEFAULT_SESSION_TTL)
    }
}

impl SessionRegistry {
    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            ttl,
        }
    }

    /// Start a new empty session
    pub async fn create(&self) -> SessionHandle {
        let session = AdvisorySession::new();
        let id = session.id().clone();
        let handle = Arc::new(Mutex::new(session));

        self.sessions.write().await.insert(
            id,
            Entry {
                handle: handle.clone(),
                last_seen: Instant::now(),
            },
        );
        handle
    }

    /// Look up a session and mark it active
    pub async fn get(&self, id: &SessionId) -> Option<SessionHandle> {
        let mut sessions = self.sessions.write().await;
        let entry = sessions.get_mut(id)?;
        entry.last_seen = Instant::now();
        Some(entry.handle.clone())
    }

    /// End a session; `false` if it did not exist
    pub async fn remove(&self, id: &SessionId) -> bool {
        self.sessions.write().await.remove(id).is_some()
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    /// End every idle session; returns how many were dropped
    pub async fn sweep_idle(&self) -> usize {
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();

        // a handle cloned out of the map means a request is still using it
        sessions.retain(|_, entry| {
            entry.last_seen.elapsed() < self.ttl || Arc::strong_count(&entry.handle) > 1
        });

        before - sessions.len()
    }

    /// Sweep idle sessions every `every` for as long as the registry lives
    pub fn spawn_sweeper(self: &Arc<Self>, every: Duration) -> JoinHandle<()> {
        let registry = Arc::downgrade(self);

        tokio::spawn(async move {
            let mut tick = tokio::time::interval(every);
            tick.tick().await;

            loop {
                tick.tick().await;
                let Some(registry) = registry.upgrade() else {
                    break;
                };

                let dropped = registry.sweep_idle().await;
                if dropped > 0 {
                    let remaining = registry.len().await;
                    tracing::info!(dropped, remaining, "idle sessions ended");
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_registry_lifecycle() {
        let registry = SessionRegistry::default();
        let handle = registry.create().await;
        let id = handle.lock().await.id().clone();
        drop(handle);

        assert_eq!(registry.len().await, 1);
        assert!(registry.get(&id).await.is_some());
        assert!(registry.remove(&id).await);
        assert!(!registry.remove(&id).await);
        assert!(registry.get(&id).await.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_idle_session_is_swept() {
        let registry = SessionRegistry::with_ttl(Duration::from_secs(60));
        let idle = registry.create().await.lock().await.id().clone();
        let active = registry.create().await.lock().await.id().clone();

        tokio::time::advance(Duration::from_secs(45)).await;
        assert!(registry.get(&active).await.is_some());
        assert_eq!(registry.sweep_idle().await, 0);

        tokio::time::advance(Duration::from_secs(30)).await;
        assert_eq!(registry.sweep_idle().await, 1);

        assert!(registry.get(&idle).await.is_none());
        assert!(registry.get(&active).await.is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn test_session_in_use_survives_sweep() {
        let registry = SessionRegistry::with_ttl(Duration::from_secs(60));
        let handle = registry.create().await;
        let id = handle.lock().await.id().clone();

        tokio::time::advance(Duration::from_secs(120)).await;
        assert_eq!(registry.sweep_idle().await, 0);

        drop(handle);
        assert_eq!(registry.sweep_idle().await, 1);
        assert!(registry.get(&id).await.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_sweeper_ends_abandoned_sessions() {
        let registry = Arc::new(SessionRegistry::with_ttl(Duration::from_secs(60)));
        registry.create().await;
        registry.create().await;

        let sweeper = registry.spawn_sweeper(Duration::from_secs(10));
        tokio::time::sleep(Duration::from_secs(75)).await;

        assert_eq!(registry.len().await, 0);
        sweeper.abort();
    }
}
