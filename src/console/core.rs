//! Console composition root.
//!
//! The [`Console`] wires one master connection to the navigation bridge of
//! one outer page. Nothing here is global: every consumer receives the
//! handle it needs.

// ============================================================================
// Imports
// ============================================================================

use std::sync::Arc;

use tracing::info;

use crate::navigation::{ContentFrame, NavigationBridge, OuterPage, PageController};
use crate::transport::{Connection, ConnectionObserver, ConnectionTarget, LogObserver};

use super::builder::ConsoleBuilder;
use super::options::ConsoleOptions;

// ============================================================================
// Console
// ============================================================================

/// A running console session.
///
/// Dropping the console does not close the connection while other
/// [`Connection`] clones are alive; call [`Console::shutdown`] to close it.
#[derive(Debug)]
pub struct Console {
    connection: Connection,
    navigation: Arc<NavigationBridge>,
}

impl Console {
    /// Creates a builder.
    #[inline]
    #[must_use]
    pub fn builder() -> ConsoleBuilder {
        ConsoleBuilder::new()
    }

    /// Starts a session. Options are already validated.
    pub(crate) fn start(
        page: Arc<dyn OuterPage>,
        frame: Arc<dyn ContentFrame>,
        options: &ConsoleOptions,
        observers: Vec<Arc<dyn ConnectionObserver>>,
    ) -> Self {
        let location = page.location();
        let target = ConnectionTarget::from_location(&location, options);
        info!(page = %location.href(), target = %target, "Starting console");

        let mut all_observers: Vec<Arc<dyn ConnectionObserver>> =
            Vec::with_capacity(observers.len() + 1);
        all_observers.push(Arc::new(LogObserver));
        all_observers.extend(observers);

        let connection = Connection::initialize(target, options, all_observers);

        let controller = PageController::new(Arc::clone(&page), frame);
        let navigation = Arc::new(NavigationBridge::new(page, controller));
        navigation.apply_initial_fragment();

        Self {
            connection,
            navigation,
        }
    }

    /// The master connection handle.
    #[inline]
    #[must_use]
    pub fn connection(&self) -> &Connection {
        &self.connection
    }

    /// The fragment/frame bridge.
    #[inline]
    #[must_use]
    pub fn navigation(&self) -> &Arc<NavigationBridge> {
        &self.navigation
    }

    /// The page controller, for link handlers.
    #[inline]
    #[must_use]
    pub fn controller(&self) -> &PageController {
        self.navigation.controller()
    }

    /// Closes the master connection.
    pub fn shutdown(&self) {
        self.connection.shutdown();
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use serde_json::json;

    use crate::navigation::{ClickEvent, Modifiers, PageChange};
    use crate::testing::{MemoryAnchor, MemoryFrame, MemoryPage, MockMaster, recv_event};
    use crate::transport::{ChannelObserver, ConnectionEvent, ConnectionState};

    fn start(
        master: &MockMaster,
        fragment: &str,
    ) -> (Console, Arc<MemoryPage>, Arc<MemoryFrame>) {
        let page = Arc::new(MemoryPage::new(&format!(
            "http://127.0.0.1:8080/console/index.html?wsport={}{fragment}",
            master.port()
        )));
        let frame = Arc::new(MemoryFrame::default());
        let console = Console::builder()
            .page(page.clone())
            .frame(frame.clone())
            .start()
            .expect("console starts");
        (console, page, frame)
    }

    #[tokio::test]
    async fn test_start_connects_to_page_host() {
        let mut master = MockMaster::start().await;
        let (console, _, _) = start(&master, "");

        assert_eq!(console.connection().target().host(), "127.0.0.1");
        assert_eq!(console.connection().target().port(), master.port());

        console.connection().wait_open().await.expect("open");
        let id = console
            .connection()
            .send("/space/all", json!({}))
            .expect("send");

        let frame = master.recv().await;
        assert_eq!(frame["type"], "/space/all");
        assert_eq!(frame["requestId"], id.as_str());
    }

    #[tokio::test]
    async fn test_start_applies_initial_fragment() {
        let master = MockMaster::start().await;
        let (_console, _, frame) = start(&master, "#/liveactivity/42");

        assert_eq!(frame.sources(), vec!["http://127.0.0.1:8080/liveactivity/42"]);
    }

    #[tokio::test]
    async fn test_navigation_round_trip() {
        let master = MockMaster::start().await;
        let (console, page, frame) = start(&master, "");

        let anchor = MemoryAnchor::default();
        let event = ClickEvent::on_anchor(&anchor, Modifiers::NONE);
        assert_eq!(
            console.controller().change_page("/space/7", Some(&event)),
            PageChange::Handled
        );
        assert_eq!(frame.sources(), vec!["http://127.0.0.1:8080/space/7"]);

        assert!(console.navigation().on_frame_loaded(Some("/space/7")));
        assert_eq!(page.location().hash(), "#/space/7");
        assert_eq!(frame.sources().len(), 1);
    }

    #[tokio::test]
    async fn test_observers_and_shutdown() {
        let master = MockMaster::start().await;
        let (observer, mut events) = ChannelObserver::channel();
        let page = Arc::new(MemoryPage::new(&format!(
            "http://127.0.0.1/?wsport={}",
            master.port()
        )));

        let console = Console::builder()
            .page(page)
            .frame(Arc::new(MemoryFrame::default()))
            .observer(observer)
            .start()
            .expect("console starts");

        assert!(matches!(
            recv_event(&mut events).await,
            ConnectionEvent::Opened { .. }
        ));

        console.shutdown();
        console.connection().wait_closed().await;
        assert_eq!(console.connection().state(), ConnectionState::Closed);
        assert!(recv_event(&mut events).await.is_closed());
    }
}
