//! WebSocket transport layer.
//!
//! This module handles communication between the console and the master via
//! a single WebSocket.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐                              ┌─────────────────┐
//! │  Console        │                              │  Master         │
//! │                 │         WebSocket            │                 │
//! │  Connection     │─────────────────────────────►│  /websocket     │
//! │  (event loop)   │◄─────────────────────────────│                 │
//! │                 │     <page host>:<port>       │                 │
//! └─────────────────┘                              └─────────────────┘
//! ```
//!
//! # Connection Lifecycle
//!
//! 1. `ConnectionTarget::from_location` - host from the page, port from options or query
//! 2. `Connection::initialize` - state `Connecting`, handshake on a spawned task
//! 3. `Open` - send requests, receive messages
//! 4. `Closed` - terminal, no reconnect
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `connection` | WebSocket connection and event loop |
//! | `observer` | Lifecycle events and observers |
//! | `session` | Lifecycle state machine |
//! | `target` | Endpoint resolution |

// ============================================================================
// Submodules
// ============================================================================

/// WebSocket connection and event loop.
pub mod connection;

/// Lifecycle events and observers.
pub mod observer;

/// Lifecycle state machine.
pub mod session;

/// Endpoint resolution.
pub mod target;

// ============================================================================
// Re-exports
// ============================================================================

pub use connection::Connection;
pub use observer::{ChannelObserver, ConnectionEvent, ConnectionObserver, LogObserver};
pub use session::{ConnectionState, Session};
pub use target::ConnectionTarget;
