//! Test doubles shared by the unit tests.

use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use parking_lot::Mutex;
use serde_json::Value;
use tokio::net::TcpListener;
use tokio::sync::mpsc;
use tokio::time::timeout;
use tokio_tungstenite::tungstenite::Message;

use crate::navigation::{Anchor, ContentFrame, OuterPage, PageLocation};
use crate::transport::ConnectionEvent;

const WAIT: Duration = Duration::from_secs(5);

// ============================================================================
// MockMaster
// ============================================================================

enum MasterAction {
    Send(String),
    Close,
}

/// In-process WebSocket server accepting a single console.
pub(crate) struct MockMaster {
    port: u16,
    actions: mpsc::UnboundedSender<MasterAction>,
    received: mpsc::UnboundedReceiver<Value>,
}

impl MockMaster {
    pub(crate) async fn start() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let port = listener.local_addr().expect("local addr").port();
        let (actions, mut action_rx) = mpsc::unbounded_channel();
        let (received_tx, received) = mpsc::unbounded_channel();

        tokio::spawn(async move {
            let Ok((stream, _)) = listener.accept().await else {
                return;
            };
            let Ok(ws_stream) = tokio_tungstenite::accept_async(stream).await else {
                return;
            };
            let (mut write, mut read) = ws_stream.split();

            loop {
                tokio::select! {
                    frame = read.next() => match frame {
                        Some(Ok(Message::Text(text))) => {
                            if let Ok(value) = serde_json::from_str::<Value>(&text) {
                                let _ = received_tx.send(value);
                            }
                        }
                        Some(Ok(_)) => {}
                        _ => break,
                    },
                    action = action_rx.recv() => match action {
                        Some(MasterAction::Send(text)) => {
                            if write.send(Message::Text(text.into())).await.is_err() {
                                break;
                            }
                        }
                        Some(MasterAction::Close) | None => {
                            let _ = write.close().await;
                            break;
                        }
                    },
                }
            }
        });

        Self {
            port,
            actions,
            received,
        }
    }

    pub(crate) fn port(&self) -> u16 {
        self.port
    }

    pub(crate) fn push(&self, value: Value) {
        self.push_raw(&value.to_string());
    }

    pub(crate) fn push_raw(&self, raw: &str) {
        let _ = self.actions.send(MasterAction::Send(raw.to_string()));
    }

    pub(crate) fn close(&self) {
        let _ = self.actions.send(MasterAction::Close);
    }

    /// Next JSON frame sent by the console.
    pub(crate) async fn recv(&mut self) -> Value {
        timeout(WAIT, self.received.recv())
            .await
            .expect("frame in time")
            .expect("master alive")
    }

    /// Returns `true` if no frame is waiting.
    pub(crate) fn is_idle(&mut self) -> bool {
        self.received.try_recv().is_err()
    }
}

/// A port nothing listens on.
pub(crate) async fn closed_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    listener.local_addr().expect("local addr").port()
}

/// Next observer event, failing the test after a while.
pub(crate) async fn recv_event(
    events: &mut mpsc::UnboundedReceiver<ConnectionEvent>,
) -> ConnectionEvent {
    timeout(WAIT, events.recv())
        .await
        .expect("event in time")
        .expect("observer alive")
}

// ============================================================================
// Page doubles
// ============================================================================

/// Outer page whose fragment writes are recorded.
pub(crate) struct MemoryPage {
    location: Mutex<PageLocation>,
    fragment_writes: Mutex<Vec<String>>,
}

impl MemoryPage {
    pub(crate) fn new(href: &str) -> Self {
        Self {
            location: Mutex::new(PageLocation::parse(href).expect("valid page url")),
            fragment_writes: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn fragment_writes(&self) -> Vec<String> {
        self.fragment_writes.lock().clone()
    }
}

impl OuterPage for MemoryPage {
    fn location(&self) -> PageLocation {
        self.location.lock().clone()
    }

    fn set_fragment(&self, fragment: &str) {
        let mut location = self.location.lock();
        *location = location.with_fragment(fragment);
        self.fragment_writes.lock().push(fragment.to_string());
    }
}

/// Content frame recording every source assignment.
#[derive(Default)]
pub(crate) struct MemoryFrame {
    sources: Mutex<Vec<String>>,
}

impl MemoryFrame {
    pub(crate) fn sources(&self) -> Vec<String> {
        self.sources.lock().clone()
    }
}

impl ContentFrame for MemoryFrame {
    fn set_source(&self, url: &str) {
        self.sources.lock().push(url.to_string());
    }
}

/// Anchor element remembering its href.
#[derive(Default)]
pub(crate) struct MemoryAnchor {
    href: Mutex<Option<String>>,
}

impl MemoryAnchor {
    pub(crate) fn href(&self) -> Option<String> {
        self.href.lock().clone()
    }
}

impl Anchor for MemoryAnchor {
    fn set_href(&self, href: &str) {
        *self.href.lock() = Some(href.to_string());
    }
}
