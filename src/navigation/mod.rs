//! Navigation sync between the outer page and the content frame.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`NavigationBridge`] | Fragment ⇄ frame synchronization |
//! | [`PageController`] | In-place frame swap vs. native link handling |
//! | [`PageLocation`] | Outer page location snapshot |
//! | [`OuterPage`], [`ContentFrame`], [`Anchor`] | Host-implemented surfaces |
//!
//! # Example
//!
//! ```ignore
//! let controller = PageController::new(page.clone(), frame);
//! let bridge = NavigationBridge::new(page, controller.clone());
//!
//! // Startup: honor a bookmarked fragment.
//! bridge.apply_initial_fragment();
//!
//! // Link click in the navigation menu.
//! let allow_default = controller
//!     .change_page("/space/7", Some(&ClickEvent::on_anchor(&link, modifiers)))
//!     .allows_default();
//!
//! // Frame finished loading.
//! bridge.on_frame_loaded(Some("/space/7"));
//! ```

// ============================================================================
// Submodules
// ============================================================================

/// Fragment/frame synchronization.
pub mod bridge;

/// Page change decisions.
pub mod controller;

/// Location snapshot and query parsing.
pub mod location;

/// Host-implemented page surfaces.
pub mod surface;

// ============================================================================
// Re-exports
// ============================================================================

pub use bridge::NavigationBridge;
pub use controller::{PageChange, PageController};
pub use location::{PageLocation, QueryParams};
pub use surface::{Anchor, ClickEvent, ContentFrame, Modifiers, OuterPage};
