//! Error types for the master console.
//!
//! This module defines all error types used throughout the crate.
//!
//! # Usage
//!
//! All fallible operations return [`Result<T>`] which uses [`Error`]:
//!
//! ```ignore
//! use master_console::{Connection, Result};
//! use serde_json::json;
//!
//! async fn example(connection: &Connection) -> Result<()> {
//!     connection.wait_open().await?;
//!     connection.send("/liveactivity/all", json!({}))?;
//!     Ok(())
//! }
//! ```
//!
//! # Error Categories
//!
//! | Category | Variants |
//! |----------|----------|
//! | Configuration | [`Error::Config`], [`Error::InvalidUrl`] |
//! | Connection | [`Error::TransportFailure`], [`Error::ConnectionClosed`], [`Error::NotConnected`] |
//! | Protocol | [`Error::MalformedMessage`], [`Error::CommandFailed`], [`Error::Protocol`] |
//! | Execution | [`Error::RequestTimeout`] |
//! | External | [`Error::Json`] |

// ============================================================================
// Imports
// ============================================================================

use std::result::Result as StdResult;

use thiserror::Error;

use crate::identifiers::RequestId;
use crate::transport::ConnectionState;

// ============================================================================
// Result Alias
// ============================================================================

/// Result type alias using crate [`enum@Error`].
///
/// All fallible operations in this crate return this type.
pub type Result<T> = StdResult<T, Error>;

// ============================================================================
// Error Enum
// ============================================================================

/// Main error type for the crate.
///
/// Each variant includes relevant context for debugging.
#[derive(Error, Debug)]
pub enum Error {
    // ========================================================================
    // Configuration Errors
    // ========================================================================
    /// Configuration error.
    ///
    /// Returned when console options or builder input are invalid.
    #[error("Configuration error: {message}")]
    Config {
        /// Description of the configuration error.
        message: String,
    },

    /// Page location could not be parsed.
    #[error("Invalid URL '{url}': {message}")]
    InvalidUrl {
        /// The rejected URL text.
        url: String,
        /// Parser message.
        message: String,
    },

    // ========================================================================
    // Connection Errors
    // ========================================================================
    /// WebSocket transport failed.
    ///
    /// Returned (and reported as the close reason) when the connection could
    /// not be established or dropped unexpectedly. Never retried.
    #[error("Transport failure: {message}")]
    TransportFailure {
        /// Description of the transport error.
        message: String,
    },

    /// Connection closed.
    ///
    /// Returned when an operation outlives the connection.
    #[error("Connection closed")]
    ConnectionClosed,

    /// Send attempted while the connection is not open.
    #[error("Not connected (state: {state})")]
    NotConnected {
        /// State the connection was in.
        state: ConnectionState,
    },

    // ========================================================================
    // Protocol Errors
    // ========================================================================
    /// Inbound frame was not valid JSON.
    ///
    /// Reported to observers; never tears down the connection.
    #[error("Malformed message: {message}")]
    MalformedMessage {
        /// Parser message.
        message: String,
    },

    /// The master answered a command with a failure result.
    #[error("Command failed: {reason}")]
    CommandFailed {
        /// Failure reason code sent by the master.
        reason: String,
        /// Optional human readable detail.
        detail: Option<String>,
    },

    /// Protocol violation or unexpected response.
    #[error("Protocol error: {message}")]
    Protocol {
        /// Description of the protocol violation.
        message: String,
    },

    // ========================================================================
    // Execution Errors
    // ========================================================================
    /// Correlated request timed out.
    #[error("Request {request_id} timed out after {timeout_ms}ms")]
    RequestTimeout {
        /// The request ID that timed out.
        request_id: RequestId,
        /// Milliseconds waited before timeout.
        timeout_ms: u64,
    },

    // ========================================================================
    // External Errors
    // ========================================================================
    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

// ============================================================================
// Error Constructors
// ============================================================================

impl Error {
    /// Creates a configuration error.
    #[inline]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Creates an invalid URL error.
    #[inline]
    pub fn invalid_url(url: impl Into<String>, message: impl ToString) -> Self {
        Self::InvalidUrl {
            url: url.into(),
            message: message.to_string(),
        }
    }

    /// Creates a transport failure error.
    #[inline]
    pub fn transport_failure(message: impl Into<String>) -> Self {
        Self::TransportFailure {
            message: message.into(),
        }
    }

    /// Creates a not connected error.
    #[inline]
    pub fn not_connected(state: ConnectionState) -> Self {
        Self::NotConnected { state }
    }

    /// Creates a malformed message error.
    #[inline]
    pub fn malformed_message(message: impl ToString) -> Self {
        Self::MalformedMessage {
            message: message.to_string(),
        }
    }

    /// Creates a command failed error.
    #[inline]
    pub fn command_failed(reason: impl Into<String>, detail: Option<String>) -> Self {
        Self::CommandFailed {
            reason: reason.into(),
            detail,
        }
    }

    /// Creates a protocol error.
    #[inline]
    pub fn protocol(message: impl Into<String>) -> Self {
        Self::Protocol {
            message: message.into(),
        }
    }

    /// Creates a request timeout error.
    #[inline]
    pub fn request_timeout(request_id: RequestId, timeout_ms: u64) -> Self {
        Self::RequestTimeout {
            request_id,
            timeout_ms,
        }
    }
}

// ============================================================================
// Error Predicates
// ============================================================================

impl Error {
    /// Returns `true` if this is a timeout error.
    #[inline]
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::RequestTimeout { .. })
    }

    /// Returns `true` if this is a connection error.
    #[inline]
    #[must_use]
    pub fn is_connection_error(&self) -> bool {
        matches!(
            self,
            Self::TransportFailure { .. } | Self::ConnectionClosed | Self::NotConnected { .. }
        )
    }

    /// Returns `true` if this error is recoverable.
    ///
    /// Recoverable errors leave the connection usable. Anything else means
    /// the console is disconnected until the page is reloaded.
    #[inline]
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::RequestTimeout { .. } | Self::MalformedMessage { .. } | Self::CommandFailed { .. }
        )
    }
}

// ============================================================================
// Tests
// ============================================================================
