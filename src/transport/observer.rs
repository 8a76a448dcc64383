//! Connection lifecycle observers.
//!
//! Observers are registered when the connection is initialized and receive
//! every lifecycle event in order: `Opened`, then any number of `Message` or
//! `Malformed`, then at most one `Closed`. A connection that fails before
//! opening emits only `Closed`.

// ============================================================================
// Imports
// ============================================================================

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::protocol::{InboundMessage, MessageKind};

// ============================================================================
// ConnectionEvent
// ============================================================================

/// A lifecycle event of the connection.
#[derive(Debug, Clone)]
pub enum ConnectionEvent {
    /// Handshake completed.
    Opened {
        /// The WebSocket URL.
        url: String,
    },
    /// A JSON frame arrived.
    Message(InboundMessage),
    /// A frame arrived that is not JSON. The connection stays open.
    Malformed {
        /// The raw frame text.
        raw: String,
        /// Parser message.
        reason: String,
    },
    /// The connection is gone for good.
    Closed {
        /// Transport failure description, `None` for a clean close.
        reason: Option<String>,
    },
}

impl ConnectionEvent {
    /// Returns `true` for [`ConnectionEvent::Closed`].
    #[inline]
    #[must_use]
    pub fn is_closed(&self) -> bool {
        matches!(self, Self::Closed { .. })
    }
}

// ============================================================================
// ConnectionObserver
// ============================================================================

/// Receives connection lifecycle events.
///
/// Called on the connection task; implementations must not block.
/// Closures of the right shape are observers too.
pub trait ConnectionObserver: Send + Sync {
    /// Handles one event.
    fn on_event(&self, event: &ConnectionEvent);
}

impl<F> ConnectionObserver for F
where
    F: Fn(&ConnectionEvent) + Send + Sync,
{
    fn on_event(&self, event: &ConnectionEvent) {
        self(event);
    }
}

/// Shared observer list.
pub(crate) type Observers = Arc<[Arc<dyn ConnectionObserver>]>;

/// Delivers an event to every observer.
pub(crate) fn notify(observers: &Observers, event: &ConnectionEvent) {
    for observer in observers.iter() {
        observer.on_event(event);
    }
}

// ============================================================================
// LogObserver
// ============================================================================

/// Logs every event through `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogObserver;

impl ConnectionObserver for LogObserver {
    fn on_event(&self, event: &ConnectionEvent) {
        match event {
            ConnectionEvent::Opened { url } => info!(url = %url, "Master connection open"),
            ConnectionEvent::Message(message) => match message.kind() {
                MessageKind::StatusUpdate => debug!(message = %message.value(), "Status update"),
                _ => debug!(
                    request_id = ?message.request_id(),
                    message = %message.value(),
                    "Master message"
                ),
            },
            ConnectionEvent::Malformed { raw, reason } => {
                warn!(raw = %raw, reason = %reason, "Malformed master message");
            }
            ConnectionEvent::Closed { reason: Some(reason) } => {
                warn!(reason = %reason, "Master connection closed");
            }
            ConnectionEvent::Closed { reason: None } => info!("Master connection closed"),
        }
    }
}

// ============================================================================
// ChannelObserver
// ============================================================================

/// Forwards events into an unbounded channel.
///
/// The bridge to a rendering layer that wants a stream instead of callbacks.
#[derive(Debug, Clone)]
pub struct ChannelObserver {
    tx: mpsc::UnboundedSender<ConnectionEvent>,
}

impl ChannelObserver {
    /// Creates the observer and its receiving end.
    #[must_use]
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<ConnectionEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl ConnectionObserver for ChannelObserver {
    fn on_event(&self, event: &ConnectionEvent) {
        // Receiver gone means nobody is rendering anymore.
        let _ = self.tx.send(event.clone());
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_closure_observer() {
        let seen = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&seen);
        let observers: Observers = Arc::from(vec![Arc::new(move |event: &ConnectionEvent| {
            if event.is_closed() {
                counter.fetch_add(1, Ordering::SeqCst);
            }
        }) as Arc<dyn ConnectionObserver>]);

        notify(&observers, &ConnectionEvent::Opened { url: "ws://h:1/websocket".into() });
        notify(&observers, &ConnectionEvent::Closed { reason: None });

        assert_eq!(seen.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_channel_observer() {
        let (observer, mut rx) = ChannelObserver::channel();
        observer.on_event(&ConnectionEvent::Malformed {
            raw: "oops".into(),
            reason: "expected value".into(),
        });

        match rx.try_recv().expect("event") {
            ConnectionEvent::Malformed { raw, .. } => assert_eq!(raw, "oops"),
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[test]
    fn test_channel_observer_after_receiver_dropped() {
        let (observer, rx) = ChannelObserver::channel();
        drop(rx);
        observer.on_event(&ConnectionEvent::Closed { reason: None });
    }

    #[test]
    fn test_log_observer_handles_every_event() {
        let message = InboundMessage::parse(r#"{"type":"statusUpdate"}"#).expect("parse");
        for event in [
            ConnectionEvent::Opened { url: "ws://h:1/websocket".into() },
            ConnectionEvent::Message(message),
            ConnectionEvent::Malformed { raw: "x".into(), reason: "y".into() },
            ConnectionEvent::Closed { reason: Some("reset".into()) },
            ConnectionEvent::Closed { reason: None },
        ] {
            LogObserver.on_event(&event);
        }
    }
}
