// Session store - the one piece of shared mutable state
//
// Holds the bearer token, mirrors it into durable storage, and fans out
// changes to every subscriber through a watch channel. Consumers receive a
// cloned handle explicitly; there is no global.

mod persist;

pub use persist::{FileTokenStore, MemoryTokenStore, TokenStore, TOKEN_KEY};

use std::sync::Arc;
use tokio::sync::watch;

/// Shared handle to the authentication session
#[derive(Clone)]
pub struct SessionStore {
    inner: Arc<Inner>,
}

struct Inner {
    tx: watch::Sender<Option<String>>,
    store: Box<dyn TokenStore>,
}

impl SessionStore {
    /// Open a session backed by `store`, restoring any persisted token
    ///
    /// No expiry validation happens here: a stored token is trusted until a
    /// protected request fails.
    pub fn open(store: impl TokenStore + 'static) -> Self {
        let restored = match store.load() {
            Ok(token) => token,
            Err(e) => {
                tracing::warn!("Could not restore session: {}", e);
                None
            }
        };

        if restored.is_some() {
            tracing::debug!("Restored persisted session");
        }

        let (tx, _rx) = watch::channel(restored);
        Self {
            inner: Arc::new(Inner {
                tx,
                store: Box::new(store),
            }),
        }
    }

    /// Session with no durable backing
    pub fn in_memory() -> Self {
        Self::open(MemoryTokenStore::default())
    }

    /// Current token, if any
    pub fn token(&self) -> Option<String> {
        self.inner.tx.borrow().clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.inner.tx.borrow().is_some()
    }

    /// Store a new token and notify all subscribers
    pub fn login(&self, token: impl Into<String>) {
        let token = token.into();
        if let Err(e) = self.inner.store.save(&token) {
            tracing::warn!("Could not persist session token: {}", e);
        }
        self.inner.tx.send_replace(Some(token));
        tracing::info!("Session started");
    }

    /// Clear the token and notify all subscribers
    pub fn logout(&self) {
        if let Err(e) = self.inner.store.clear() {
            tracing::warn!("Could not clear persisted session: {}", e);
        }
        let previous = self.inner.tx.send_replace(None);
        if previous.is_some() {
            tracing::info!("Session ended");
        }
    }

    /// Subscribe to token changes
    pub fn subscribe(&self) -> watch::Receiver<Option<String>> {
        self.inner.tx.subscribe()
    }
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Never print the token itself
        f.debug_struct("SessionStore")
            .field("authenticated", &self.is_authenticated())
            .finish()
    }
}
