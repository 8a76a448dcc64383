//! Request identifiers.
//!
//! Every outbound request carries a `requestId`: a per-connection counter
//! rendered in lowercase base 16. The master echoes it back on the matching
//! command response.

// ============================================================================
// Imports
// ============================================================================

use std::fmt;

use serde::{Deserialize, Serialize};

// ============================================================================
// RequestId
// ============================================================================

/// Identifier attached to an outbound request.
///
/// Serializes as a plain JSON string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestId(String);

impl RequestId {
    /// Creates an identifier from a counter value.
    #[inline]
    #[must_use]
    pub fn from_counter(value: u64) -> Self {
        Self(format!("{value:x}"))
    }

    /// Wraps an identifier received on the wire.
    #[inline]
    #[must_use]
    pub fn from_wire(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the identifier text.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the counter value, if this identifier is base-16.
    #[inline]
    #[must_use]
    pub fn counter(&self) -> Option<u64> {
        u64::from_str_radix(&self.0, 16).ok()
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for RequestId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// ============================================================================
// RequestIdGenerator
// ============================================================================

/// Monotonic request identifier source, one per connection.
///
/// Starts at `0` and never resets; a new connection gets a new generator.
#[derive(Debug, Default)]
pub struct RequestIdGenerator {
    counter: u64,
}

impl RequestIdGenerator {
    /// Creates a generator starting at zero.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self { counter: 0 }
    }

    /// Returns the current counter as an identifier, then advances.
    pub fn next(&mut self) -> RequestId {
        let id = RequestId::from_counter(self.counter);
        self.counter += 1;
        id
    }

    /// Number of identifiers handed out so far.
    #[inline]
    #[must_use]
    pub const fn issued(&self) -> u64 {
        self.counter
    }
}

// ============================================================================
// Tests
// ============================================================================
