//! Headless console session against a running master.
//!
//! Demonstrates:
//! - Starting a console from a page URL
//! - Waiting for the master connection
//! - A correlated request and a fire-and-forget request
//! - Fragment/frame sync with stdout-backed page doubles
//! - Watching status updates until Ctrl+C
//!
//! Usage:
//!   cargo run --example console -- http://localhost:8080/interactivespaces/?wsport=8090#/space/all
//!   cargo run --example console -- --debug
//!   cargo run --example console -- --no-wait

// ============================================================================
// Imports
// ============================================================================

use std::sync::Arc;

use anyhow::Context;
use master_console::protocol::{SpaceCommand, args as command_args};
use master_console::{
    ChannelObserver, Console, ConnectionEvent, ContentFrame, OuterPage, PageLocation,
};
use parking_lot::Mutex;
use serde_json::json;
use tracing_subscriber::EnvFilter;

// ============================================================================
// Constants
// ============================================================================

const DEFAULT_PAGE: &str = "http://localhost:8080/interactivespaces/";

// ============================================================================
// Arguments
// ============================================================================

struct Args {
    page: String,
    debug: bool,
    no_wait: bool,
}

impl Args {
    fn parse() -> Self {
        let args: Vec<String> = std::env::args().skip(1).collect();
        Self {
            page: args
                .iter()
                .find(|a| !a.starts_with("--"))
                .cloned()
                .unwrap_or_else(|| DEFAULT_PAGE.to_string()),
            debug: args.iter().any(|a| a == "--debug"),
            no_wait: args.iter().any(|a| a == "--no-wait"),
        }
    }
}

fn init_logging(debug: bool) {
    let filter = if debug {
        "master_console=debug"
    } else {
        "master_console=info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .init();
}

// ============================================================================
// Page doubles
// ============================================================================

struct PrintedPage {
    location: Mutex<PageLocation>,
}

impl OuterPage for PrintedPage {
    fn location(&self) -> PageLocation {
        self.location.lock().clone()
    }

    fn set_fragment(&self, fragment: &str) {
        println!("    [page] #{fragment}");
        let mut location = self.location.lock();
        *location = location.with_fragment(fragment);
    }
}

struct PrintedFrame;

impl ContentFrame for PrintedFrame {
    fn set_source(&self, url: &str) {
        println!("    [frame] {url}");
    }
}

// ============================================================================
// Main
// ============================================================================

#[tokio::main]
async fn main() {
    let args = Args::parse();
    init_logging(args.debug);

    if let Err(e) = run(args).await {
        eprintln!("\n[ERROR] {e:#}");
        std::process::exit(1);
    }
}

async fn run(args: Args) -> anyhow::Result<()> {
    println!("=== Master Console ===\n");

    // ========================================================================
    // Start
    // ========================================================================

    println!("[1] Starting console for {}", args.page);

    let page = Arc::new(PrintedPage {
        location: Mutex::new(PageLocation::parse(&args.page)?),
    });
    let (observer, mut events) = ChannelObserver::channel();

    let console = Console::builder()
        .page(page.clone())
        .frame(Arc::new(PrintedFrame))
        .observer(observer)
        .start()?;

    println!("    Target: {}", console.connection().target().ws_url());

    console
        .connection()
        .wait_open()
        .await
        .context("master did not accept the connection")?;

    println!("    ✓ Connected\n");

    // ========================================================================
    // Requests
    // ========================================================================

    println!("[2] Requesting master version...");
    match console
        .connection()
        .request(master_console::Command::Version, json!({}))
        .await
    {
        Ok(version) => println!("    ✓ {version}\n"),
        Err(e) => println!("    ✗ {e}\n"),
    }

    println!("[3] Listing spaces (fire and forget)...");
    let id = console
        .connection()
        .send(SpaceCommand::All.as_str(), command_args::filter(None))?;
    println!("    ✓ Sent as request {id}\n");

    // ========================================================================
    // Navigation
    // ========================================================================

    println!("[4] Navigating to /space/all...");
    console.controller().change_page("/space/all", None);
    console.navigation().on_frame_loaded(Some("/space/all"));
    println!("    Page now at {}\n", page.location().href());

    if args.no_wait {
        console.shutdown();
        console.connection().wait_closed().await;
        return Ok(());
    }

    // ========================================================================
    // Events
    // ========================================================================

    println!("[5] Watching master messages, Ctrl+C to exit...");
    loop {
        tokio::select! {
            event = events.recv() => match event {
                Some(ConnectionEvent::Message(message)) => {
                    if let Some(update) = message.to_status_update() {
                        println!(
                            "    [status] {} {}",
                            update.data.uuid, update.data.runtime_state,
                        );
                    } else {
                        println!("    [message] {}", message.value());
                    }
                }
                Some(ConnectionEvent::Closed { reason }) => {
                    println!("    Connection closed: {}", reason.as_deref().unwrap_or("normal"));
                    break;
                }
                Some(_) => {}
                None => break,
            },
            _ = tokio::signal::ctrl_c() => {
                console.shutdown();
                console.connection().wait_closed().await;
                break;
            }
        }
    }

    Ok(())
}
