//! Outbound request envelope.

// ============================================================================
// Imports
// ============================================================================

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Result;
use crate::identifiers::RequestId;

// ============================================================================
// OutboundRequest
// ============================================================================

/// A command request from the console to the master.
///
/// Transient: serialized, sent, then dropped.
///
/// # Format
///
/// ```json
/// {
///   "type": "/liveactivity/view",
///   "data": { "id": "42" },
///   "requestId": "1f"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutboundRequest {
    /// Command name.
    #[serde(rename = "type")]
    pub kind: String,

    /// Command arguments.
    pub data: Value,

    /// Identifier for correlating the reply.
    #[serde(rename = "requestId")]
    pub request_id: RequestId,
}

impl OutboundRequest {
    /// Creates a new request.
    #[inline]
    #[must_use]
    pub fn new(kind: impl Into<String>, data: Value, request_id: RequestId) -> Self {
        Self {
            kind: kind.into(),
            data,
            request_id,
        }
    }

    /// Serializes the request to a text frame.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Json`] if the payload cannot be serialized.
    pub fn to_frame(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

// ============================================================================
// Tests
// ============================================================================
