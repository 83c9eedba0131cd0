use std::sync::Arc;
use crate::errors::StoreResult;
use crate::models::AuthUser;
use super::store::{KeyValueStore, SESSION_KEY};

/// Where a login's session entry is kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Persistence {
    /// Long-lived store, survives restarts.
    Remember,
    /// Short-lived store, gone with the process.
    SessionOnly,
}

impl Persistence {
    pub fn from_remember(remember: bool) -> Self {
        if remember {
            Persistence::Remember
        } else {
            Persistence::SessionOnly
        }
    }
}

/// The pair of backends that may hold the current session.
/// At most one of them holds it at any time.
#[derive(Clone)]
pub struct SessionStorage {
    long_lived: Arc<dyn KeyValueStore>,
    short_lived: Arc<dyn KeyValueStore>,
}

impl SessionStorage {
    pub fn new(long_lived: Arc<dyn KeyValueStore>, short_lived: Arc<dyn KeyValueStore>) -> Self {
        Self { long_lived, short_lived }
    }

    fn backends(&self, persistence: Persistence) -> (&Arc<dyn KeyValueStore>, &Arc<dyn KeyValueStore>) {
        match persistence {
            Persistence::Remember => (&self.long_lived, &self.short_lived),
            Persistence::SessionOnly => (&self.short_lived, &self.long_lived),
        }
    }

    pub async fn persist(&self, user: &AuthUser, persistence: Persistence) -> StoreResult<()> {
        let (target, other) = self.backends(persistence);
        target.set(SESSION_KEY, serde_json::to_string(user)?).await?;
        other.remove(SESSION_KEY).await
    }

    /// Reads the session, preferring the long-lived store. An entry that no
    /// longer parses is treated as no session.
    pub async fn load(&self) -> StoreResult<Option<AuthUser>> {
        for store in [&self.long_lived, &self.short_lived] {
            if let Some(raw) = store.get(SESSION_KEY).await? {
                match serde_json::from_str(&raw) {
                    Ok(user) => return Ok(Some(user)),
                    Err(e) => tracing::warn!("Ignoring unreadable session entry: {}", e),
                }
            }
        }
        Ok(None)
    }

    pub async fn clear(&self) -> StoreResult<()> {
        self.long_lived.remove(SESSION_KEY).await?;
        self.short_lived.remove(SESSION_KEY).await
    }
}
