//! Connection target resolution.
//!
//! The master's WebSocket lives on the console page's own host. The port is
//! fixed unless the page URL carries an override query parameter.

// ============================================================================
// Imports
// ============================================================================

use std::fmt;

use tracing::debug;

use crate::console::ConsoleOptions;
use crate::navigation::PageLocation;

// ============================================================================
// Constants
// ============================================================================

/// Path of the master WebSocket endpoint.
pub const DEFAULT_SOCKET_PATH: &str = "/websocket";

// ============================================================================
// ConnectionTarget
// ============================================================================

/// Where the connection goes: `ws://<host>:<port><path>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionTarget {
    host: String,
    port: u16,
    path: String,
}

impl ConnectionTarget {
    /// Creates a target on the default socket path.
    #[inline]
    #[must_use]
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            path: DEFAULT_SOCKET_PATH.to_string(),
        }
    }

    /// Resolves the port from an optional override.
    ///
    /// The override wins when present and parseable as a port; otherwise
    /// `default_port` is used. The host is not validated here, a bad host
    /// fails when the transport connects.
    #[must_use]
    pub fn resolve(host: impl Into<String>, default_port: u16, port_override: Option<&str>) -> Self {
        let port = match port_override {
            Some(raw) => raw.trim().parse::<u16>().unwrap_or_else(|_| {
                debug!(raw, default_port, "Ignoring unparseable port override");
                default_port
            }),
            None => default_port,
        };
        Self::new(host, port)
    }

    /// Resolves the target for a console page.
    #[must_use]
    pub fn from_location(location: &PageLocation, options: &ConsoleOptions) -> Self {
        let query = location.query();
        Self::resolve(
            location.hostname(),
            options.default_port,
            query.get(&options.port_param),
        )
        .with_path(options.socket_path.clone())
    }

    /// Replaces the endpoint path.
    #[inline]
    #[must_use]
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    /// Returns the host.
    #[inline]
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Returns the port.
    #[inline]
    #[must_use]
    pub const fn port(&self) -> u16 {
        self.port
    }

    /// Returns the endpoint path.
    #[inline]
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns the WebSocket URL.
    #[must_use]
    pub fn ws_url(&self) -> String {
        format!("ws://{}:{}{}", self.host, self.port, self.path)
    }
}

impl fmt::Display for ConnectionTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}

// ============================================================================
// Tests
// ============================================================================
