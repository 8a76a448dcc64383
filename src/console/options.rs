//! Console configuration.
//!
//! # Example
//!
//! ```ignore
//! use std::time::Duration;
//! use master_console::ConsoleOptions;
//!
//! let options = ConsoleOptions::new()
//!     .with_default_port(9000)
//!     .with_request_timeout(Duration::from_secs(5));
//! ```

// ============================================================================
// Imports
// ============================================================================

use std::time::Duration;

use crate::error::{Error, Result};
use crate::transport::target::DEFAULT_SOCKET_PATH;

// ============================================================================
// Constants
// ============================================================================

/// Master WebSocket port when the page does not override it.
pub const DEFAULT_PORT: u16 = 8090;

/// Query parameter carrying the port override.
pub const DEFAULT_PORT_PARAM: &str = "wsport";

/// Default time a correlated request waits for its reply.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Default cap on requests awaiting a reply.
pub const DEFAULT_MAX_PENDING_REQUESTS: usize = 100;

// ============================================================================
// ConsoleOptions
// ============================================================================

/// Connection and request settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsoleOptions {
    /// Port used when the page URL has no valid override.
    pub default_port: u16,

    /// Name of the query parameter overriding the port.
    pub port_param: String,

    /// Path of the master WebSocket endpoint.
    pub socket_path: String,

    /// Timeout for [`Connection::request`](crate::transport::Connection::request).
    pub request_timeout: Duration,

    /// Maximum number of correlated requests in flight.
    pub max_pending_requests: usize,
}

impl Default for ConsoleOptions {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Constructors
// ============================================================================

impl ConsoleOptions {
    /// Creates options with the master's defaults.
    #[must_use]
    pub fn new() -> Self {
        Self {
            default_port: DEFAULT_PORT,
            port_param: DEFAULT_PORT_PARAM.to_string(),
            socket_path: DEFAULT_SOCKET_PATH.to_string(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            max_pending_requests: DEFAULT_MAX_PENDING_REQUESTS,
        }
    }
}

// ============================================================================
// Builder Methods
// ============================================================================

impl ConsoleOptions {
    /// Sets the fallback port.
    #[inline]
    #[must_use]
    pub fn with_default_port(mut self, port: u16) -> Self {
        self.default_port = port;
        self
    }

    /// Sets the port override query parameter.
    #[inline]
    #[must_use]
    pub fn with_port_param(mut self, param: impl Into<String>) -> Self {
        self.port_param = param.into();
        self
    }

    /// Sets the endpoint path.
    #[inline]
    #[must_use]
    pub fn with_socket_path(mut self, path: impl Into<String>) -> Self {
        self.socket_path = path.into();
        self
    }

    /// Sets the request timeout.
    #[inline]
    #[must_use]
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Sets the pending request cap.
    #[inline]
    #[must_use]
    pub fn with_max_pending_requests(mut self, max: usize) -> Self {
        self.max_pending_requests = max;
        self
    }
}

// ============================================================================
// Validation
// ============================================================================

impl ConsoleOptions {
    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] for a zero port or timeout, an empty
    /// query parameter name, or a socket path not starting with `/`.
    pub fn validate(&self) -> Result<()> {
        if self.default_port == 0 {
            return Err(Error::config("Default port must be greater than zero"));
        }

        if self.port_param.is_empty() {
            return Err(Error::config("Port query parameter name must not be empty"));
        }

        if !self.socket_path.starts_with('/') {
            return Err(Error::config(format!(
                "Socket path must start with '/': {:?}",
                self.socket_path
            )));
        }

        if self.request_timeout.is_zero() {
            return Err(Error::config("Request timeout must be greater than zero"));
        }

        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
