// Copyright 2025 the Keycopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A copy request relayed from the background to the page in the active tab.
//!
//! The page side decodes the forwarded message and writes it through its hint
//! session, so the user sees the same "Copied!" notice as for a hint copy.
//! The session loads its configuration from `demos/config/vim_home_row.json`.
//!
//! Run:
//! - `cargo run -p keycopy_demos --example relay_copy`

use core::time::Duration;

use keycopy_demos::{ConsoleNotifier, PendingClipboard, article, init_logging};
use keycopy_dom::DomTree;
use keycopy_hints::{HintConfig, RecordingSurface, Session};
use keycopy_relay::{Relay, RelayError, RelayMessage, Relayed, TabMessenger};
use tracing::info;

type PageSession = Session<DomTree, RecordingSurface, PendingClipboard, ConsoleNotifier>;

/// One window with a single tab, whose content script owns a hint session.
struct Window {
    tab: Option<PageSession>,
}

impl TabMessenger for Window {
    type Tab = u32;
    type Error = String;

    fn active_tab(&self) -> Option<u32> {
        self.tab.as_ref().map(|_| 1)
    }

    fn send(&mut self, _tab: u32, message: &str) -> Result<(), String> {
        let session = self.tab.as_mut().ok_or("tab closed")?;
        if let Some(RelayMessage::Copy { text }) =
            RelayMessage::parse(message).map_err(|e| e.to_string())?
        {
            session.copy_text(&text);
        }
        Ok(())
    }
}

const CONFIG: &str = include_str!("../config/vim_home_row.json");

fn main() {
    init_logging();
    let config: HintConfig = serde_json::from_str(CONFIG).expect("demo config is valid");
    info!(alphabet = %config.alphabet, "config loaded");

    let (page, ids) = article();
    let session = Session::new(
        page,
        RecordingSurface::new(),
        PendingClipboard::default(),
        ConsoleNotifier,
        config,
    )
    .with_overlay_container(ids.overlay);
    let mut relay = Relay::new(Window { tab: Some(session) });

    info!("relay copy");
    let out = relay
        .handle_json(r#"{"action":"copy","text":"relayed text"}"#)
        .expect("delivered");
    assert!(matches!(out, Relayed::Forwarded(_)));

    info!("unknown action");
    assert_eq!(
        relay.handle_json(r#"{"action":"highlight"}"#),
        Ok(Relayed::Ignored)
    );

    info!("page reports the clipboard write");
    let mut window = relay.into_inner();
    let session = window.tab.as_mut().expect("tab still open");
    let (ticket, text) = session.clipboard_mut().pending.remove(0);
    assert_eq!(text, "relayed text");
    session
        .clipboard_completed(ticket, Ok(()), Duration::from_millis(1))
        .expect("write succeeded");

    info!("tab closed");
    let mut relay = Relay::new(Window { tab: None });
    assert_eq!(
        relay.handle_json(r#"{"action":"copy","text":"lost"}"#),
        Err(RelayError::NoActiveTab)
    );
}
