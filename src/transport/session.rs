//! Connection lifecycle state machine.
//!
//! [`Session`] holds everything about a connection that is not I/O: the
//! lifecycle state and the request id generator. The event loop in
//! [`super::Connection`] drives it; tests can drive it directly.
//!
//! ```text
//! Connecting ──open──► Open ──close──► Closed
//!      │                                  ▲
//!      └──────────── close ───────────────┘
//! ```

// ============================================================================
// Imports
// ============================================================================

use std::fmt;

use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::identifiers::{RequestId, RequestIdGenerator};
use crate::protocol::{InboundMessage, OutboundRequest};

// ============================================================================
// ConnectionState
// ============================================================================

/// Lifecycle state of a connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConnectionState {
    /// Handshake in progress.
    Connecting,
    /// Ready to send.
    Open,
    /// Terminal.
    Closed,
}

impl ConnectionState {
    /// Returns `true` if requests can be sent.
    #[inline]
    #[must_use]
    pub const fn is_open(self) -> bool {
        matches!(self, Self::Open)
    }

    /// Returns `true` once no further transition is possible.
    #[inline]
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Closed)
    }
}

impl fmt::Display for ConnectionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Connecting => "connecting",
            Self::Open => "open",
            Self::Closed => "closed",
        })
    }
}

// ============================================================================
// Session
// ============================================================================

/// Lifecycle and request numbering of one connection.
#[derive(Debug)]
pub struct Session {
    state: ConnectionState,
    ids: RequestIdGenerator,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    /// Creates a session in [`ConnectionState::Connecting`].
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            state: ConnectionState::Connecting,
            ids: RequestIdGenerator::new(),
        }
    }

    /// Returns the current state.
    #[inline]
    #[must_use]
    pub const fn state(&self) -> ConnectionState {
        self.state
    }

    /// Number of requests encoded so far.
    #[inline]
    #[must_use]
    pub const fn requests_issued(&self) -> u64 {
        self.ids.issued()
    }

    /// Handles the transport's open notification.
    ///
    /// Returns `true` if the state changed. Only `Connecting → Open` is
    /// accepted; anything else is logged and ignored.
    pub fn open(&mut self) -> bool {
        if self.state != ConnectionState::Connecting {
            warn!(state = %self.state, "Ignoring open notification");
            return false;
        }
        self.state = ConnectionState::Open;
        debug!("Session open");
        true
    }

    /// Handles the transport's close notification.
    ///
    /// Returns `true` the first time only.
    pub fn close(&mut self) -> bool {
        if self.state.is_terminal() {
            return false;
        }
        debug!(from = %self.state, "Session closed");
        self.state = ConnectionState::Closed;
        true
    }

    /// Assigns the next request id and serializes the envelope.
    ///
    /// # Errors
    ///
    /// - [`Error::NotConnected`] if the session is not open; no id is used
    /// - [`Error::Json`] if `data` cannot be serialized
    pub fn encode_request(&mut self, kind: &str, data: Value) -> Result<(RequestId, String)> {
        if !self.state.is_open() {
            return Err(Error::not_connected(self.state));
        }

        let request = OutboundRequest::new(kind, data, self.ids.next());
        let frame = request.to_frame()?;
        Ok((request.request_id, frame))
    }

    /// Parses an inbound frame.
    ///
    /// Never changes the state, even for malformed input.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedMessage`] if `raw` is not JSON.
    pub fn decode_message(&self, raw: &str) -> Result<InboundMessage> {
        InboundMessage::parse(raw)
    }
}

// ============================================================================
// Tests
// ============================================================================
