//! Page change decisions.
//!
//! A page change either swaps the frame in place or, when the user asked for
//! a new tab or window, hands the click back to the browser with a link that
//! reopens the console on the requested page.

// ============================================================================
// Imports
// ============================================================================

use std::borrow::Cow;
use std::sync::Arc;

use tracing::debug;

use super::PageLocation;
use super::surface::{ClickEvent, ContentFrame, OuterPage};

// ============================================================================
// PageChange
// ============================================================================

/// Outcome of [`PageController::change_page`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageChange {
    /// The frame was navigated; the click's default action must be suppressed.
    Handled,
    /// The browser should follow the (rewritten) link itself.
    ContinueDefault,
}

impl PageChange {
    /// Value for an event handler's return: `true` lets the default run.
    #[inline]
    #[must_use]
    pub const fn allows_default(self) -> bool {
        matches!(self, Self::ContinueDefault)
    }
}

// ============================================================================
// PageController
// ============================================================================

/// Routes page changes to the content frame or the browser.
#[derive(Clone)]
pub struct PageController {
    page: Arc<dyn OuterPage>,
    frame: Arc<dyn ContentFrame>,
}

impl std::fmt::Debug for PageController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PageController").finish_non_exhaustive()
    }
}

impl PageController {
    /// Creates a controller over the outer page and its frame.
    #[must_use]
    pub fn new(page: Arc<dyn OuterPage>, frame: Arc<dyn ContentFrame>) -> Self {
        Self { page, frame }
    }

    /// Shows `path` in the frame, or defers to the browser.
    ///
    /// With a new-context modifier held, the clicked anchor (if any) is
    /// pointed at the console itself with `path` as fragment and the frame
    /// is left alone. Otherwise the frame is navigated to origin + `path`.
    pub fn change_page(&self, path: &str, event: Option<&ClickEvent<'_>>) -> PageChange {
        let path = rooted(path);
        let path = path.as_ref();
        let location = self.page.location();

        if let Some(event) = event.filter(|event| event.opens_new_context()) {
            let href = Self::console_link(&location, path);
            debug!(path, href = %href, "Deferring page change to browser");

            if let Some(anchor) = event.anchor {
                anchor.set_href(&href);
            }
            return PageChange::ContinueDefault;
        }

        let url = Self::frame_url(&location, path);
        debug!(path, url = %url, "Navigating content frame");
        self.frame.set_source(&url);
        PageChange::Handled
    }

    /// Link that opens the console on `path`, for new tabs and bookmarks.
    #[must_use]
    pub fn new_context_href(&self, path: &str) -> String {
        Self::console_link(&self.page.location(), &rooted(path))
    }

    fn frame_url(location: &PageLocation, path: &str) -> String {
        format!("{}{}", location.origin(), path)
    }

    fn console_link(location: &PageLocation, path: &str) -> String {
        format!(
            "{}{}{}#{}",
            location.origin(),
            location.path(),
            location.search(),
            path
        )
    }
}

/// Prefixes `/` so the path can never extend the origin's authority.
fn rooted(path: &str) -> Cow<'_, str> {
    if path.starts_with('/') {
        Cow::Borrowed(path)
    } else {
        Cow::Owned(format!("/{path}"))
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use crate::navigation::Modifiers;
    use crate::testing::{MemoryAnchor, MemoryFrame, MemoryPage};

    const CONSOLE: &str = "http://master:8080/console/index.html?wsport=9000";

    fn controller() -> (PageController, Arc<MemoryFrame>) {
        let page = Arc::new(MemoryPage::new(CONSOLE));
        let frame = Arc::new(MemoryFrame::default());
        (PageController::new(page, frame.clone()), frame)
    }

    #[test]
    fn test_plain_click_navigates_frame() {
        let (controller, frame) = controller();
        let anchor = MemoryAnchor::default();
        let event = ClickEvent::on_anchor(&anchor, Modifiers::NONE);

        let outcome = controller.change_page("/space/7", Some(&event));

        assert_eq!(outcome, PageChange::Handled);
        assert!(!outcome.allows_default());
        assert_eq!(frame.sources(), vec!["http://master:8080/space/7"]);
        assert_eq!(anchor.href(), None);
    }

    #[test]
    fn test_no_event_navigates_frame() {
        let (controller, frame) = controller();
        assert_eq!(
            controller.change_page("/liveactivity/42", None),
            PageChange::Handled
        );
        assert_eq!(frame.sources(), vec!["http://master:8080/liveactivity/42"]);
    }

    #[test]
    fn test_modifier_click_defers_to_browser() {
        let (controller, frame) = controller();
        let anchor = MemoryAnchor::default();
        let event = ClickEvent::on_anchor(&anchor, Modifiers::CTRL);

        let outcome = controller.change_page("/space/7", Some(&event));

        assert_eq!(outcome, PageChange::ContinueDefault);
        assert!(outcome.allows_default());
        assert!(frame.sources().is_empty());
        assert_eq!(
            anchor.href().as_deref(),
            Some("http://master:8080/console/index.html?wsport=9000#/space/7")
        );
    }

    #[test]
    fn test_every_new_context_modifier() {
        for modifiers in [
            Modifiers { ctrl: true, ..Modifiers::NONE },
            Modifiers { meta: true, ..Modifiers::NONE },
            Modifiers { shift: true, ..Modifiers::NONE },
        ] {
            let (controller, frame) = controller();
            let event = ClickEvent { modifiers, anchor: None };
            assert_eq!(
                controller.change_page("/space/7", Some(&event)),
                PageChange::ContinueDefault
            );
            assert!(frame.sources().is_empty());
        }
    }

    #[test]
    fn test_path_without_leading_slash_stays_on_origin() {
        let (controller, frame) = controller();

        assert_eq!(controller.change_page("space/7", None), PageChange::Handled);
        assert_eq!(frame.sources(), vec!["http://master:8080/space/7"]);
        assert_eq!(
            controller.new_context_href("space/7"),
            "http://master:8080/console/index.html?wsport=9000#/space/7"
        );
    }

    #[test]
    fn test_new_context_href() {
        let (controller, _) = controller();
        assert_eq!(
            controller.new_context_href("/spacecontroller/3"),
            "http://master:8080/console/index.html?wsport=9000#/spacecontroller/3"
        );
    }
}
