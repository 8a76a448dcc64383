//! Builder pattern for console startup.
//!
//! # Example
//!
//! ```ignore
//! let console = Console::builder()
//!     .page(page)
//!     .frame(frame)
//!     .observer(|event: &ConnectionEvent| println!("{event:?}"))
//!     .start()?;
//! ```

// ============================================================================
// Imports
// ============================================================================

use std::sync::Arc;

use crate::error::{Error, Result};
use crate::navigation::{ContentFrame, OuterPage};
use crate::transport::ConnectionObserver;

use super::core::Console;
use super::options::ConsoleOptions;

// ============================================================================
// ConsoleBuilder
// ============================================================================

/// Builder for a [`Console`].
///
/// Use [`Console::builder()`] to create a new builder.
#[derive(Default)]
pub struct ConsoleBuilder {
    page: Option<Arc<dyn OuterPage>>,
    frame: Option<Arc<dyn ContentFrame>>,
    options: ConsoleOptions,
    observers: Vec<Arc<dyn ConnectionObserver>>,
}

impl std::fmt::Debug for ConsoleBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConsoleBuilder")
            .field("has_page", &self.page.is_some())
            .field("has_frame", &self.frame.is_some())
            .field("options", &self.options)
            .field("observers", &self.observers.len())
            .finish()
    }
}

// ============================================================================
// ConsoleBuilder Implementation
// ============================================================================

impl ConsoleBuilder {
    /// Creates an empty builder.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the outer page.
    #[inline]
    #[must_use]
    pub fn page(mut self, page: Arc<dyn OuterPage>) -> Self {
        self.page = Some(page);
        self
    }

    /// Sets the content frame.
    #[inline]
    #[must_use]
    pub fn frame(mut self, frame: Arc<dyn ContentFrame>) -> Self {
        self.frame = Some(frame);
        self
    }

    /// Replaces the options.
    #[inline]
    #[must_use]
    pub fn options(mut self, options: ConsoleOptions) -> Self {
        self.options = options;
        self
    }

    /// Adds a connection observer. May be called repeatedly.
    #[inline]
    #[must_use]
    pub fn observer(mut self, observer: impl ConnectionObserver + 'static) -> Self {
        self.observers.push(Arc::new(observer));
        self
    }

    /// Adds a shared connection observer.
    #[inline]
    #[must_use]
    pub fn observer_arc(mut self, observer: Arc<dyn ConnectionObserver>) -> Self {
        self.observers.push(observer);
        self
    }

    /// Connects to the master and applies the initial fragment.
    ///
    /// Must be called inside a tokio runtime. Returns once the connection
    /// is initiated; use [`Connection::wait_open`](crate::transport::Connection::wait_open)
    /// to wait for the handshake.
    ///
    /// # Errors
    ///
    /// - [`Error::Config`] if page or frame is missing or options are invalid
    pub fn start(self) -> Result<Console> {
        self.options.validate()?;

        let page = self.page.ok_or_else(|| {
            Error::config("Outer page is required. Use .page() to set it.")
        })?;
        let frame = self.frame.ok_or_else(|| {
            Error::config("Content frame is required. Use .frame() to set it.")
        })?;

        Ok(Console::start(page, frame, &self.options, self.observers))
    }
}

// ============================================================================
// Tests
// ============================================================================
