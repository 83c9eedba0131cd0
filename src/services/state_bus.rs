use parking_lot::Mutex;
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};
use crate::models::AuthUser;

/// Authentication state as seen by subscribers: the signed-in user, or none.
pub type AuthState = Option<AuthUser>;

struct Inner {
    latest: AuthState,
    subscribers: Vec<UnboundedSender<AuthState>>,
}

/// Publish/subscribe point for authentication state.
///
/// A new subscriber first receives the latest published state, then every
/// later transition in publish order. Nothing is coalesced.
pub struct StateBus {
    inner: Mutex<Inner>,
}

impl StateBus {
    pub fn new(initial: AuthState) -> Self {
        Self {
            inner: Mutex::new(Inner {
                latest: initial,
                subscribers: Vec::new(),
            }),
        }
    }

    pub fn publish(&self, state: AuthState) {
        let mut inner = self.inner.lock();
        // dropped receivers are pruned here
        inner.subscribers.retain(|tx| tx.send(state.clone()).is_ok());
        inner.latest = state;
    }

    pub fn subscribe(&self) -> Subscription {
        let (tx, rx) = unbounded_channel();
        let mut inner = self.inner.lock();
        // Seed with the latest state while holding the lock so no publish can
        // slip in between the replay and the live feed.
        let _ = tx.send(inner.latest.clone());
        inner.subscribers.push(tx);
        Subscription { rx }
    }

    #[cfg(test)]
    pub fn latest(&self) -> AuthState {
        self.inner.lock().latest.clone()
    }

    #[cfg(test)]
    pub fn subscriber_count(&self) -> usize {
        self.inner.lock().subscribers.len()
    }
}

pub struct Subscription {
    rx: UnboundedReceiver<AuthState>,
}

impl Subscription {
    /// Next state. Returns `None` once the bus is gone.
    pub async fn recv(&mut self) -> Option<AuthState> {
        self.rx.recv().await
    }

    /// Next state if one is already queued.
    #[cfg(test)]
    pub fn try_recv(&mut self) -> Option<AuthState> {
        self.rx.try_recv().ok()
    }
}
