//! Inbound message types.
//!
//! The core enforces no schema on inbound frames: anything that parses as
//! JSON is an [`InboundMessage`]. Typed views exist for the two envelopes the
//! master emits.
//!
//! | `type` | View | Meaning |
//! |--------|------|---------|
//! | `commandResponse` | [`CommandResponse`] | Reply to a request, carries `requestId` |
//! | `statusUpdate` | [`StatusUpdate`] | Unsolicited live activity state change |

// ============================================================================
// Imports
// ============================================================================

use serde::Deserialize;
use serde_json::Value;

use crate::error::{Error, Result};
use crate::identifiers::RequestId;

// ============================================================================
// Constants
// ============================================================================

/// `type` value of a command reply.
pub const TYPE_COMMAND_RESPONSE: &str = "commandResponse";

/// `type` value of a status broadcast.
pub const TYPE_STATUS_UPDATE: &str = "statusUpdate";

/// Status `type` for live activity updates.
pub const STATUS_TYPE_LIVE_ACTIVITY: &str = "liveactivity";

// ============================================================================
// InboundMessage
// ============================================================================

/// A parsed inbound frame.
#[derive(Debug, Clone, PartialEq)]
pub struct InboundMessage(Value);

impl InboundMessage {
    /// Parses a raw text frame.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedMessage`] if `raw` is not JSON.
    pub fn parse(raw: &str) -> Result<Self> {
        serde_json::from_str(raw)
            .map(Self)
            .map_err(|e| Error::malformed_message(e))
    }

    /// Returns the parsed JSON.
    #[inline]
    #[must_use]
    pub fn value(&self) -> &Value {
        &self.0
    }

    /// Consumes the message, returning the parsed JSON.
    #[inline]
    #[must_use]
    pub fn into_value(self) -> Value {
        self.0
    }

    /// Returns the envelope `type`, if present.
    #[inline]
    #[must_use]
    pub fn message_type(&self) -> Option<&str> {
        self.0.get("type").and_then(Value::as_str)
    }

    /// Returns the `requestId` the message answers, if any.
    #[must_use]
    pub fn request_id(&self) -> Option<RequestId> {
        self.0
            .get("requestId")
            .and_then(Value::as_str)
            .map(RequestId::from_wire)
    }

    /// Classifies the envelope.
    #[must_use]
    pub fn kind(&self) -> MessageKind {
        match self.message_type() {
            Some(TYPE_COMMAND_RESPONSE) => MessageKind::CommandResponse,
            Some(TYPE_STATUS_UPDATE) => MessageKind::StatusUpdate,
            _ => MessageKind::Other,
        }
    }

    /// Interprets the message as a command response.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Protocol`] if the message has no `result` field.
    pub fn to_command_response(&self) -> Result<CommandResponse> {
        CommandResponse::deserialize(&self.0)
            .map_err(|e| Error::protocol(format!("Not a command response: {e}")))
    }

    /// Interprets the message as a status update.
    ///
    /// Returns `None` for any other envelope.
    #[must_use]
    pub fn to_status_update(&self) -> Option<StatusUpdate> {
        if self.kind() != MessageKind::StatusUpdate {
            return None;
        }
        StatusUpdate::deserialize(&self.0).ok()
    }
}

// ============================================================================
// MessageKind
// ============================================================================

/// Envelope classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    /// `commandResponse`.
    CommandResponse,
    /// `statusUpdate`.
    StatusUpdate,
    /// Anything else.
    Other,
}

// ============================================================================
// CommandResponse
// ============================================================================

/// A reply to a console request.
///
/// # Format
///
/// Success:
/// ```json
/// { "type": "commandResponse", "requestId": "3", "result": "success", "data": { ... } }
/// ```
///
/// Failure:
/// ```json
/// { "type": "commandResponse", "requestId": "3", "result": "failure",
///   "reason": "space.command.unknown", "detail": "..." }
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct CommandResponse {
    /// Echoed request identifier.
    #[serde(rename = "requestId", default)]
    pub request_id: Option<RequestId>,

    /// Outcome.
    pub result: CommandResult,

    /// Result payload (if success).
    #[serde(default)]
    pub data: Option<Value>,

    /// Failure reason code (if failure).
    #[serde(default)]
    pub reason: Option<String>,

    /// Failure detail (if failure).
    #[serde(default)]
    pub detail: Option<String>,
}

impl CommandResponse {
    /// Returns `true` if the master reported success.
    #[inline]
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.result == CommandResult::Success
    }

    /// Extracts the payload, returning an error for failures.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CommandFailed`] if the result was `failure`.
    pub fn into_result(self) -> Result<Value> {
        match self.result {
            CommandResult::Success => Ok(self.data.unwrap_or(Value::Null)),
            CommandResult::Failure => Err(Error::command_failed(
                self.reason.unwrap_or_else(|| "unknown".to_string()),
                self.detail,
            )),
        }
    }
}

/// Command outcome discriminator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommandResult {
    /// Command succeeded.
    Success,
    /// Command failed.
    Failure,
}

// ============================================================================
// StatusUpdate
// ============================================================================

/// Unsolicited status broadcast.
#[derive(Debug, Clone, Deserialize)]
pub struct StatusUpdate {
    /// Status body.
    pub data: LiveActivityStatus,
}

/// Runtime state change of a live activity.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LiveActivityStatus {
    /// Status type, `liveactivity` for now.
    #[serde(rename = "type")]
    pub status_type: String,
    /// Live activity UUID.
    pub uuid: String,
    /// Live activity database ID.
    #[serde(default)]
    pub id: Option<String>,
    /// Runtime state name.
    pub runtime_state: String,
    /// Localizable description of the runtime state.
    #[serde(default)]
    pub runtime_state_description: Option<String>,
    /// Extra detail reported by the controller.
    #[serde(default)]
    pub runtime_state_detail: Option<String>,
    /// Time of the change, as sent by the master.
    #[serde(default)]
    pub status_time: Option<Value>,
}

impl LiveActivityStatus {
    /// Returns `true` if this is a live activity update.
    #[inline]
    #[must_use]
    pub fn is_live_activity(&self) -> bool {
        self.status_type == STATUS_TYPE_LIVE_ACTIVITY
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_arbitrary_json() {
        let message = InboundMessage::parse("[1, 2, 3]").expect("parse");
        assert_eq!(message.value(), &json!([1, 2, 3]));
        assert_eq!(message.kind(), MessageKind::Other);
        assert!(message.request_id().is_none());
    }

    #[test]
    fn test_parse_malformed() {
        let err = InboundMessage::parse("{not json").unwrap_err();
        assert!(matches!(err, Error::MalformedMessage { .. }));
    }

    #[test]
    fn test_success_response() {
        let message = InboundMessage::parse(
            r#"{"type":"commandResponse","requestId":"2","result":"success","data":{"name":"lobby"}}"#,
        )
        .expect("parse");

        assert_eq!(message.kind(), MessageKind::CommandResponse);
        assert_eq!(message.request_id(), Some(RequestId::from_counter(2)));

        let response = message.to_command_response().expect("response");
        assert!(response.is_success());
        assert_eq!(response.into_result().expect("ok"), json!({"name": "lobby"}));
    }

    #[test]
    fn test_failure_response() {
        let message = InboundMessage::parse(
            r#"{"type":"commandResponse","result":"failure","reason":"space.domain.space.unknown","detail":"No space 9"}"#,
        )
        .expect("parse");

        let err = message
            .to_command_response()
            .expect("response")
            .into_result()
            .unwrap_err();
        match err {
            Error::CommandFailed { reason, detail } => {
                assert_eq!(reason, "space.domain.space.unknown");
                assert_eq!(detail.as_deref(), Some("No space 9"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_not_a_command_response() {
        let message = InboundMessage::parse(r#"{"type":"statusUpdate"}"#).expect("parse");
        assert!(matches!(
            message.to_command_response(),
            Err(Error::Protocol { .. })
        ));
    }

    #[test]
    fn test_status_update() {
        let message = InboundMessage::parse(
            &json!({
                "type": "statusUpdate",
                "data": {
                    "type": "liveactivity",
                    "uuid": "b7f6",
                    "id": "42",
                    "runtimeState": "RUNNING",
                    "runtimeStateDescription": "space.activity.state.running",
                    "runtimeStateDetail": null,
                    "statusTime": 1_700_000_000_000_u64
                }
            })
            .to_string(),
        )
        .expect("parse");

        let update = message.to_status_update().expect("status update");
        assert!(update.data.is_live_activity());
        assert_eq!(update.data.uuid, "b7f6");
        assert_eq!(update.data.id.as_deref(), Some("42"));
        assert_eq!(update.data.runtime_state, "RUNNING");
        assert!(update.data.runtime_state_detail.is_none());
    }

    #[test]
    fn test_status_update_wrong_kind() {
        let message = InboundMessage::parse(r#"{"type":"commandResponse","result":"success"}"#)
            .expect("parse");
        assert!(message.to_status_update().is_none());
    }
}
