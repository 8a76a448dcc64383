//! Host-provided page surfaces.
//!
//! The navigation core never holds a browser object. Hosts implement these
//! traits over whatever they embed (a webview, wasm bindings, test doubles)
//! and the core reads snapshots and issues writes through them.

use super::PageLocation;

/// The outer console page.
pub trait OuterPage: Send + Sync {
    /// Current location snapshot.
    fn location(&self) -> PageLocation;

    /// Replaces the URL fragment. `fragment` has no leading `#`.
    fn set_fragment(&self, fragment: &str);
}

/// The embedded frame showing the inner page.
pub trait ContentFrame: Send + Sync {
    /// Navigates the frame to an absolute URL.
    fn set_source(&self, url: &str);
}

/// The link element a navigation click came from.
pub trait Anchor {
    /// Replaces the link destination.
    fn set_href(&self, href: &str);
}

/// Keyboard modifiers held during a click.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    /// Control key.
    pub ctrl: bool,
    /// Command / Windows key.
    pub meta: bool,
    /// Shift key.
    pub shift: bool,
}

impl Modifiers {
    /// No modifiers held.
    pub const NONE: Self = Self {
        ctrl: false,
        meta: false,
        shift: false,
    };

    /// Only control held.
    pub const CTRL: Self = Self {
        ctrl: true,
        meta: false,
        shift: false,
    };

    /// Returns `true` if the browser would open the link in a new tab or window.
    #[inline]
    #[must_use]
    pub const fn opens_new_context(self) -> bool {
        self.ctrl || self.meta || self.shift
    }
}

/// The click that triggered a page change.
#[derive(Clone, Copy)]
pub struct ClickEvent<'a> {
    /// Modifiers held.
    pub modifiers: Modifiers,
    /// The clicked link, if the click came from one.
    pub anchor: Option<&'a dyn Anchor>,
}

impl<'a> ClickEvent<'a> {
    /// Creates an event for a click on `anchor`.
    #[inline]
    #[must_use]
    pub fn on_anchor(anchor: &'a dyn Anchor, modifiers: Modifiers) -> Self {
        Self {
            modifiers,
            anchor: Some(anchor),
        }
    }

    /// Returns `true` if the browser should handle this click natively.
    #[inline]
    #[must_use]
    pub fn opens_new_context(&self) -> bool {
        self.modifiers.opens_new_context()
    }
}

impl std::fmt::Debug for ClickEvent<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClickEvent")
            .field("modifiers", &self.modifiers)
            .field("has_anchor", &self.anchor.is_some())
            .finish()
    }
}
