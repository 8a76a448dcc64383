//! Fragment/frame synchronization.
//!
//! Two entry points, no watcher:
//!
//! - frame finished loading → copy its path into the outer fragment
//! - console started → navigate the frame to the path in the fragment
//!
//! Writing the fragment never feeds back into frame navigation because
//! nothing here observes fragment changes.

// ============================================================================
// Imports
// ============================================================================

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::debug;
use url::Url;

use super::controller::{PageChange, PageController};
use super::surface::OuterPage;

// ============================================================================
// NavigationBridge
// ============================================================================

/// Keeps the outer URL fragment and the content frame consistent.
pub struct NavigationBridge {
    page: Arc<dyn OuterPage>,
    controller: PageController,
    initial_applied: AtomicBool,
}

impl std::fmt::Debug for NavigationBridge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NavigationBridge")
            .field("initial_applied", &self.initial_applied.load(Ordering::Relaxed))
            .finish_non_exhaustive()
    }
}

impl NavigationBridge {
    /// Creates a bridge for `page`, navigating through `controller`.
    #[must_use]
    pub fn new(page: Arc<dyn OuterPage>, controller: PageController) -> Self {
        Self {
            page,
            controller,
            initial_applied: AtomicBool::new(false),
        }
    }

    /// Mirrors a loaded frame path into the outer fragment.
    ///
    /// Returns `true` if the fragment was written. A frame without a path
    /// yet is ignored.
    pub fn on_frame_loaded(&self, frame_path: Option<&str>) -> bool {
        let Some(path) = frame_path.filter(|path| !path.is_empty()) else {
            debug!("Frame loaded without a path");
            return false;
        };

        debug!(path, "Mirroring frame path into fragment");
        self.page.set_fragment(path);
        true
    }

    /// Same as [`NavigationBridge::on_frame_loaded`] for hosts that report
    /// the frame's full URL.
    pub fn on_frame_url_loaded(&self, frame_url: &str) -> bool {
        match Url::parse(frame_url) {
            Ok(url) => self.on_frame_loaded(Some(url.path())),
            Err(e) => {
                debug!(frame_url, error = %e, "Ignoring unparseable frame URL");
                false
            }
        }
    }

    /// Opens the page named by the outer fragment, once.
    ///
    /// Returns the navigation outcome, or `None` when the fragment is empty
    /// or the fragment was already applied.
    pub fn apply_initial_fragment(&self) -> Option<PageChange> {
        if self.initial_applied.swap(true, Ordering::SeqCst) {
            return None;
        }

        let hash = self.page.location().hash();
        let path = hash.strip_prefix('#').unwrap_or(&hash);
        if path.is_empty() {
            debug!("No initial fragment, keeping frame home page");
            return None;
        }

        debug!(path, "Applying initial fragment");
        Some(self.controller.change_page(path, None))
    }

    /// The controller used for navigation.
    #[inline]
    #[must_use]
    pub fn controller(&self) -> &PageController {
        &self.controller
    }
}

// ============================================================================
// Tests
// ============================================================================
