//! WebSocket protocol message types.
//!
//! This module defines the message format for communication between the
//! console and the master.
//!
//! # Protocol Overview
//!
//! | Message Type | Direction | Purpose |
//! |--------------|-----------|---------|
//! | `OutboundRequest` | Console → Master | Command request |
//! | `CommandResponse` | Master → Console | Command reply, echoes `requestId` |
//! | `StatusUpdate` | Master → Console | Live activity state broadcast |
//!
//! Inbound frames are not validated against any schema; the typed views are
//! opt-in.
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `command` | Master API command names |
//! | `message` | Inbound message and typed views |
//! | `request` | Outbound request envelope |

// ============================================================================
// Submodules
// ============================================================================

/// Master API command catalog.
pub mod command;

/// Inbound message types.
pub mod message;

/// Outbound request envelope.
pub mod request;

// ============================================================================
// Re-exports
// ============================================================================

pub use command::{
    ActivityCommand, Command, DomainModelCommand, LiveActivityCommand, LiveActivityGroupCommand,
    NamedScriptCommand, SpaceCommand, SpaceControllerCommand, args,
};
pub use message::{
    CommandResponse, CommandResult, InboundMessage, LiveActivityStatus, MessageKind, StatusUpdate,
};
pub use request::OutboundRequest;
