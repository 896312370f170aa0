//! Session lifecycle events for whoever drives the UI.
//!
//! The client core never navigates anywhere itself. When the server
//! rejects the stored credential, the core clears the store and publishes
//! a [`SessionEvent`]; the application subscribes and decides what
//! "go back to the login page" means for it.

use std::time::Duration;

use tokio::sync::broadcast;

/// Capacity of the event channel. Events are rare; a lagging subscriber
/// only ever needs the latest one.
const EVENT_CAPACITY: usize = 16;

/// Something happened to the session that the application should react to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// The server rejected the credential. The store has already been
    /// cleared; the application should send the user to `redirect_to`.
    Expired {
        /// Path of the login entry point.
        redirect_to: String,
    },
}

/// Publishes [`SessionEvent`]s to any number of subscribers.
///
/// Clones publish on the same channel.
#[derive(Debug, Clone)]
pub struct SessionSignals {
    tx: broadcast::Sender<SessionEvent>,
}

impl SessionSignals {
    /// Creates a channel with no subscribers yet.
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(EVENT_CAPACITY);
        Self { tx }
    }

    /// Returns a receiver for events published from now on.
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.tx.subscribe()
    }

    /// Publishes `event` after `delay`, without blocking the caller.
    ///
    /// The delay lets the failing call finish unwinding (and its caller
    /// see the error) before the application reacts. Outside a Tokio
    /// runtime the event is published immediately.
    pub fn emit_after(&self, event: SessionEvent, delay: Duration) {
        let tx = self.tx.clone();
        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                handle.spawn(async move {
                    tokio::time::sleep(delay).await;
                    publish(&tx, event);
                });
            }
            Err(_) => publish(&tx, event),
        }
    }
}

impl Default for SessionSignals {
    fn default() -> Self {
        Self::new()
    }
}

fn publish(tx: &broadcast::Sender<SessionEvent>, event: SessionEvent) {
    tracing::debug!(?event, "publishing session event");
    if tx.send(event).is_err() {
        tracing::debug!("no session event subscribers");
    }
}
