//! Master Console - browser-side shell for an Interactive Spaces master.
//!
//! This library holds the two pieces of plumbing every console page needs:
//! one persistent WebSocket to the master, and the synchronization between
//! the outer page's URL fragment and the embedded content frame.
//!
//! # Architecture
//!
//! - **Connection**: one socket per console, opened on the page's own host;
//!   requests are tagged with a hex `requestId` and replies can be awaited
//! - **Navigation**: the outer fragment `#<path>` mirrors the inner page so
//!   it can be bookmarked; modifier clicks open the console in a new context
//!
//! Key design principles:
//!
//! - The connection is a handle passed to consumers, never a global
//! - Lifecycle events are ordered: open, messages, at most one close
//! - No reconnection; `Closed` is terminal
//! - The page is reached only through host-implemented traits
//!
//! # Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use master_console::{Console, ContentFrame, OuterPage, PageLocation, Result};
//! use serde_json::json;
//!
//! # struct Page;
//! # impl OuterPage for Page {
//! #     fn location(&self) -> PageLocation { PageLocation::parse("http://master/").unwrap() }
//! #     fn set_fragment(&self, _: &str) {}
//! # }
//! # struct Frame;
//! # impl ContentFrame for Frame { fn set_source(&self, _: &str) {} }
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let console = Console::builder()
//!         .page(Arc::new(Page))
//!         .frame(Arc::new(Frame))
//!         .start()?;
//!
//!     console.connection().wait_open().await?;
//!     let spaces = console.connection().request("/space/all", json!({})).await?;
//!     println!("Spaces: {spaces}");
//!
//!     Ok(())
//! }
//! ```
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`console`] | Composition root: [`Console`], [`ConsoleOptions`] |
//! | [`error`] | Error types and [`Result`] alias |
//! | [`identifiers`] | Request identifiers |
//! | [`navigation`] | Fragment/frame sync and page changes |
//! | [`protocol`] | Wire messages and command catalog |
//! | [`transport`] | WebSocket connection and lifecycle |

// ============================================================================
// Modules
// ============================================================================

/// Console startup and configuration.
///
/// Use [`Console::builder()`] to start a session.
pub mod console;

/// Error types and result aliases.
///
/// All fallible operations return [`Result<T>`] which uses [`Error`].
pub mod error;

/// Request identifiers and their generator.
pub mod identifiers;

/// Navigation sync between the outer page and the content frame.
pub mod navigation;

/// WebSocket protocol message types.
///
/// Outbound envelope, inbound views and master command names.
pub mod protocol;

/// WebSocket transport layer.
///
/// The single master connection, its state machine and observers.
pub mod transport;

#[cfg(test)]
mod testing;

// ============================================================================
// Re-exports
// ============================================================================

// Console types
pub use console::{Console, ConsoleBuilder, ConsoleOptions};

// Error types
pub use error::{Error, Result};

// Identifier types
pub use identifiers::{RequestId, RequestIdGenerator};

// Navigation types
pub use navigation::{
    Anchor, ClickEvent, ContentFrame, Modifiers, NavigationBridge, OuterPage, PageChange,
    PageController, PageLocation, QueryParams,
};

// Protocol types
pub use protocol::{Command, CommandResponse, InboundMessage, OutboundRequest, StatusUpdate};

// Transport types
pub use transport::{
    ChannelObserver, Connection, ConnectionEvent, ConnectionObserver, ConnectionState,
    ConnectionTarget, LogObserver,
};
