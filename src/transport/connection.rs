//! WebSocket connection and event loop.
//!
//! This module owns the single WebSocket between the console and the master,
//! including request/response correlation and lifecycle notification.
//!
//! # Event Loop
//!
//! [`Connection::initialize`] returns immediately in the `Connecting` state
//! and spawns a tokio task that:
//!
//! - performs the handshake (`Connecting → Open`, or `→ Closed` on failure)
//! - delivers inbound frames to observers in arrival order
//! - resolves correlated requests by `requestId`
//! - writes outbound frames queued by [`Connection::send`]
//! - fails pending requests and notifies observers once on close
//!
//! There is no reconnection; a closed connection stays closed.

// ============================================================================
// Imports
// ============================================================================

use std::sync::Arc;
use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use parking_lot::Mutex;
use rustc_hash::FxHashMap;
use serde_json::Value;
use tokio::sync::{mpsc, oneshot, watch};
use tokio::time::timeout;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;
use tracing::{debug, error, trace, warn};

use crate::console::ConsoleOptions;
use crate::error::{Error, Result};
use crate::identifiers::RequestId;
use crate::protocol::InboundMessage;

use super::observer::{ConnectionEvent, ConnectionObserver, Observers, notify};
use super::session::{ConnectionState, Session};
use super::target::ConnectionTarget;

// ============================================================================
// Types
// ============================================================================

/// Map of request IDs to reply channels.
type CorrelationMap = FxHashMap<RequestId, oneshot::Sender<Result<InboundMessage>>>;

/// State shared between handles and the event loop.
struct Shared {
    session: Mutex<Session>,
    correlation: Mutex<CorrelationMap>,
    state_tx: watch::Sender<ConnectionState>,
}

impl Shared {
    /// Publishes the session state to `wait_*` callers.
    fn publish_state(&self) {
        let state = self.session.lock().state();
        self.state_tx.send_replace(state);
    }

    /// Encodes a request and registers its reply channel.
    ///
    /// The cap check, encoding and insert happen under the correlation lock,
    /// so a concurrent close either rejects the encode or drains the entry.
    fn register(
        self: &Arc<Self>,
        kind: &str,
        data: Value,
        max_pending: usize,
    ) -> Result<(PendingRequest, String, oneshot::Receiver<Result<InboundMessage>>)> {
        let mut correlation = self.correlation.lock();
        if correlation.len() >= max_pending {
            warn!(
                pending = correlation.len(),
                max = max_pending,
                "Too many pending requests"
            );
            return Err(Error::protocol(format!(
                "Too many pending requests: {}/{}",
                correlation.len(),
                max_pending
            )));
        }

        let (request_id, frame) = self.session.lock().encode_request(kind, data)?;

        let (response_tx, response_rx) = oneshot::channel();
        correlation.insert(request_id.clone(), response_tx);

        let pending = PendingRequest {
            shared: Arc::clone(self),
            request_id,
        };
        Ok((pending, frame, response_rx))
    }
}

// ============================================================================
// PendingRequest
// ============================================================================

/// Correlation entry owned by a waiting request.
///
/// Dropping it removes the entry, whether the request completed, timed out
/// or its future was cancelled.
struct PendingRequest {
    shared: Arc<Shared>,
    request_id: RequestId,
}

impl Drop for PendingRequest {
    fn drop(&mut self) {
        if self
            .shared
            .correlation
            .lock()
            .remove(&self.request_id)
            .is_some()
        {
            trace!(request_id = %self.request_id, "Removed unanswered correlation");
        }
    }
}

// ============================================================================
// ConnectionCommand
// ============================================================================

/// Internal commands for the event loop.
enum ConnectionCommand {
    /// Write an encoded request.
    Frame { request_id: RequestId, frame: String },
    /// Close the socket.
    Shutdown,
}

// ============================================================================
// Connection
// ============================================================================

/// Handle to the master connection.
///
/// Cloning shares the same socket. This is the capability set handed to
/// consumers that only talk to the master: send, request, and state.
/// Lifecycle events go to the observers given at initialization.
#[derive(Clone)]
pub struct Connection {
    command_tx: mpsc::UnboundedSender<ConnectionCommand>,
    shared: Arc<Shared>,
    target: Arc<ConnectionTarget>,
    request_timeout: Duration,
    max_pending_requests: usize,
}

impl std::fmt::Debug for Connection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Connection")
            .field("target", &self.target)
            .field("state", &self.state())
            .finish_non_exhaustive()
    }
}

impl Connection {
    /// Opens a connection to `target`.
    ///
    /// Returns at once in [`ConnectionState::Connecting`]; the handshake runs
    /// on a spawned task. Must be called inside a tokio runtime.
    #[must_use]
    pub fn initialize(
        target: ConnectionTarget,
        options: &ConsoleOptions,
        observers: Vec<Arc<dyn ConnectionObserver>>,
    ) -> Self {
        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let (state_tx, _) = watch::channel(ConnectionState::Connecting);
        let shared = Arc::new(Shared {
            session: Mutex::new(Session::new()),
            correlation: Mutex::new(CorrelationMap::default()),
            state_tx,
        });
        let observers: Observers = observers.into();

        debug!(url = %target.ws_url(), "Opening master connection");

        tokio::spawn(Self::run_event_loop(
            target.ws_url(),
            command_rx,
            Arc::clone(&shared),
            observers,
        ));

        Self {
            command_tx,
            shared,
            target: Arc::new(target),
            request_timeout: options.request_timeout,
            max_pending_requests: options.max_pending_requests,
        }
    }

    /// Returns the connection target.
    #[inline]
    #[must_use]
    pub fn target(&self) -> &ConnectionTarget {
        &self.target
    }

    /// Returns the current lifecycle state.
    #[inline]
    #[must_use]
    pub fn state(&self) -> ConnectionState {
        self.shared.session.lock().state()
    }

    /// Returns the number of correlated requests awaiting a reply.
    #[inline]
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.shared.correlation.lock().len()
    }

    /// Waits until the handshake finishes.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConnectionClosed`] if the connection closed instead.
    pub async fn wait_open(&self) -> Result<()> {
        let mut state_rx = self.shared.state_tx.subscribe();
        let state = *state_rx
            .wait_for(|state| *state != ConnectionState::Connecting)
            .await
            .map_err(|_| Error::ConnectionClosed)?;

        if state.is_open() {
            Ok(())
        } else {
            Err(Error::ConnectionClosed)
        }
    }

    /// Waits until the connection is closed.
    pub async fn wait_closed(&self) {
        let mut state_rx = self.shared.state_tx.subscribe();
        let _ = state_rx.wait_for(|state| state.is_terminal()).await;
    }

    /// Subscribes to lifecycle state changes.
    ///
    /// The receiver starts at the current state. Intermediate states may be
    /// skipped by a slow reader; `Closed` is always the last value seen.
    #[must_use]
    pub fn subscribe_state(&self) -> watch::Receiver<ConnectionState> {
        self.shared.state_tx.subscribe()
    }

    /// Sends a request without waiting for a reply.
    ///
    /// Returns the assigned request id.
    ///
    /// # Errors
    ///
    /// - [`Error::NotConnected`] if not open; nothing is transmitted
    /// - [`Error::ConnectionClosed`] if the event loop is gone
    /// - [`Error::Json`] if `data` cannot be serialized
    pub fn send(&self, kind: impl AsRef<str>, data: Value) -> Result<RequestId> {
        let (request_id, frame) = self
            .shared
            .session
            .lock()
            .encode_request(kind.as_ref(), data)?;

        self.command_tx
            .send(ConnectionCommand::Frame {
                request_id: request_id.clone(),
                frame,
            })
            .map_err(|_| Error::ConnectionClosed)?;

        Ok(request_id)
    }

    /// Sends a request and waits for its reply with the default timeout.
    ///
    /// The reply is the first inbound message carrying the same `requestId`,
    /// interpreted as a command response.
    ///
    /// # Errors
    ///
    /// - [`Error::NotConnected`] if not open
    /// - [`Error::RequestTimeout`] if no reply arrives in time
    /// - [`Error::ConnectionClosed`] if the connection closes first
    /// - [`Error::CommandFailed`] if the master reports failure
    /// - [`Error::Protocol`] if too many requests are pending or the reply
    ///   is not a command response
    pub async fn request(&self, kind: impl AsRef<str>, data: Value) -> Result<Value> {
        self.request_with_timeout(kind, data, self.request_timeout)
            .await
    }

    /// Sends a request and waits for its reply with a custom timeout.
    ///
    /// # Errors
    ///
    /// See [`Connection::request`].
    pub async fn request_with_timeout(
        &self,
        kind: impl AsRef<str>,
        data: Value,
        request_timeout: Duration,
    ) -> Result<Value> {
        let (pending, frame, response_rx) =
            self.shared
                .register(kind.as_ref(), data, self.max_pending_requests)?;
        let request_id = pending.request_id.clone();

        self.command_tx
            .send(ConnectionCommand::Frame {
                request_id: request_id.clone(),
                frame,
            })
            .map_err(|_| Error::ConnectionClosed)?;

        let outcome = timeout(request_timeout, response_rx).await;
        drop(pending);

        match outcome {
            Ok(Ok(reply)) => reply?.to_command_response()?.into_result(),
            Ok(Err(_)) => Err(Error::ConnectionClosed),
            Err(_) => {
                debug!(%request_id, "Request timed out");
                Err(Error::request_timeout(
                    request_id,
                    request_timeout.as_millis() as u64,
                ))
            }
        }
    }

    /// Closes the connection from the console side.
    ///
    /// Observers receive `Closed` once the socket is down.
    pub fn shutdown(&self) {
        let _ = self.command_tx.send(ConnectionCommand::Shutdown);
    }

    /// Event loop that handles WebSocket I/O.
    async fn run_event_loop(
        url: String,
        mut command_rx: mpsc::UnboundedReceiver<ConnectionCommand>,
        shared: Arc<Shared>,
        observers: Observers,
    ) {
        let ws_stream = match connect_async(url.as_str()).await {
            Ok((ws_stream, _response)) => ws_stream,
            Err(e) => {
                error!(url = %url, error = %e, "WebSocket connection failed");
                Self::finish(
                    &shared,
                    &observers,
                    Some(Error::transport_failure(e.to_string())),
                );
                return;
            }
        };

        if shared.session.lock().open() {
            shared.publish_state();
            notify(&observers, &ConnectionEvent::Opened { url: url.clone() });
        }

        let (mut ws_write, mut ws_read) = ws_stream.split();
        let mut close_reason = None;

        loop {
            tokio::select! {
                // Incoming frames from the master
                message = ws_read.next() => {
                    match message {
                        Some(Ok(Message::Text(text))) => {
                            Self::handle_incoming_message(&text, &shared, &observers);
                        }

                        Some(Ok(Message::Close(_))) => {
                            debug!("WebSocket closed by remote");
                            break;
                        }

                        Some(Err(e)) => {
                            error!(error = %e, "WebSocket error");
                            close_reason = Some(Error::transport_failure(e.to_string()));
                            break;
                        }

                        None => {
                            debug!("WebSocket stream ended");
                            break;
                        }

                        // Ignore Binary, Ping, Pong
                        _ => {}
                    }
                }

                // Commands from handles
                command = command_rx.recv() => {
                    match command {
                        Some(ConnectionCommand::Frame { request_id, frame }) => {
                            if let Err(e) = ws_write.send(Message::Text(frame.into())).await {
                                error!(%request_id, error = %e, "Failed to send request");
                                close_reason = Some(Error::transport_failure(e.to_string()));
                                break;
                            }
                            trace!(%request_id, "Request sent");
                        }

                        Some(ConnectionCommand::Shutdown) => {
                            debug!("Shutdown command received");
                            let _ = ws_write.close().await;
                            break;
                        }

                        None => {
                            debug!("All connection handles dropped");
                            let _ = ws_write.close().await;
                            break;
                        }
                    }
                }
            }
        }

        Self::finish(&shared, &observers, close_reason);
        debug!("Event loop terminated");
    }

    /// Handles an incoming text frame.
    fn handle_incoming_message(text: &str, shared: &Arc<Shared>, observers: &Observers) {
        let decoded = shared.session.lock().decode_message(text);

        let message = match decoded {
            Ok(message) => message,
            Err(e) => {
                notify(
                    observers,
                    &ConnectionEvent::Malformed {
                        raw: text.to_string(),
                        reason: e.to_string(),
                    },
                );
                return;
            }
        };

        if let Some(request_id) = message.request_id() {
            let tx = shared.correlation.lock().remove(&request_id);
            match tx {
                Some(tx) => {
                    let _ = tx.send(Ok(message.clone()));
                }
                None => trace!(%request_id, "Reply without pending request"),
            }
        }

        notify(observers, &ConnectionEvent::Message(message));
    }

    /// Moves to `Closed`, fails pending requests and notifies once.
    fn finish(shared: &Arc<Shared>, observers: &Observers, reason: Option<Error>) {
        if !shared.session.lock().close() {
            return;
        }
        shared.publish_state();

        let pending: Vec<_> = shared.correlation.lock().drain().collect();
        let count = pending.len();
        for (_, tx) in pending {
            let _ = tx.send(Err(Error::ConnectionClosed));
        }
        if count > 0 {
            debug!(count, "Failed pending requests on close");
        }

        notify(
            observers,
            &ConnectionEvent::Closed {
                reason: reason.map(|e| e.to_string()),
            },
        );
    }
}

// ============================================================================
// Tests
// ============================================================================
