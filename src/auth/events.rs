// src/auth/events.rs

//! Push notifications for sign-in state changes.
//!
//! Handlers are registered with [`AuthEvents::subscribe`] and removed with
//! [`AuthEvents::unsubscribe`]. Every view or service that subscribes is
//! responsible for tearing its subscription down.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use tracing::error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthEvent {
    SignedIn { user_id: i64 },
    SignedUp { user_id: i64, role: String },
    SignedOut { user_id: i64 },
}

type Handler = Arc<dyn Fn(&AuthEvent) + Send + Sync>;

/// Token returned by `subscribe`; pass it back to `unsubscribe`.
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct Subscription(u64);

#[derive(Default)]
pub struct AuthEvents {
    next_id: AtomicU64,
    handlers: Mutex<HashMap<u64, Handler>>,
}

impl AuthEvents {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe<F>(&self, handler: F) -> Subscription
    where
        F: Fn(&AuthEvent) + Send + Sync + 'static,
    {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        match self.handlers.lock() {
            Ok(mut handlers) => {
                handlers.insert(id, Arc::new(handler));
            }
            Err(e) => error!("auth event registry poisoned: {e}"),
        }
        Subscription(id)
    }

    /// Returns false when the subscription was already gone.
    pub fn unsubscribe(&self, subscription: Subscription) -> bool {
        match self.handlers.lock() {
            Ok(mut handlers) => handlers.remove(&subscription.0).is_some(),
            Err(e) => {
                error!("auth event registry poisoned: {e}");
                false
            }
        }
    }

    pub fn emit(&self, event: &AuthEvent) {
        // Handlers run outside the lock so they may subscribe/unsubscribe.
        let handlers: Vec<Handler> = match self.handlers.lock() {
            Ok(handlers) => handlers.values().cloned().collect(),
            Err(e) => {
                error!("auth event registry poisoned: {e}");
                return;
            }
        };

        for handler in handlers {
            handler(event);
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.handlers.lock().map(|h| h.len()).unwrap_or(0)
    }
}
