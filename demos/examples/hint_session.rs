// Copyright 2025 the Keycopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A full hint-mode round trip over the sample article.
//!
//! Activates direct-text mode, cycles to the outer layer and back, narrows by
//! typing, copies, then lets the notice and flash expire.
//!
//! Run:
//! - `cargo run -p keycopy_demos --example hint_session`
//! - `RUST_LOG=keycopy_hints=trace cargo run -p keycopy_demos --example hint_session`

use core::time::Duration;

use keycopy_demos::{ConsoleNotifier, PendingClipboard, article, init_logging};
use keycopy_hints::{HintConfig, Key, KeyEvent, Modifiers, RecordingSurface, Session};
use tracing::info;

fn show_labels(session: &Session<keycopy_dom::DomTree, RecordingSurface, PendingClipboard, ConsoleNotifier>) {
    println!("  painted: {:?}", session.surface().texts());
}

fn main() {
    init_logging();
    let (page, ids) = article();
    let mut session = Session::new(
        page,
        RecordingSurface::new(),
        PendingClipboard::default(),
        ConsoleNotifier,
        HintConfig::default(),
    )
    .with_overlay_container(ids.overlay);
    let mut now = Duration::ZERO;

    info!("y: direct text");
    session.key_down(KeyEvent::char('y'), now);
    show_labels(&session);
    let hints = session.active().expect("article has text");
    for layer in hints.layers().iter() {
        println!("  layer {}: {} hints", layer.number(), layer.members().len());
    }

    info!("space: outer layer only");
    session.key_down(KeyEvent::new(Key::Space), now);
    show_labels(&session);

    info!("ctrl+space: back to every layer");
    session.key_down(
        KeyEvent::new(Key::Space).with_modifiers(Modifiers::CTRL),
        now,
    );
    show_labels(&session);

    info!("2: copy");
    session.key_down(KeyEvent::char('2'), now);
    assert!(!session.is_active());

    let (ticket, _) = session.clipboard_mut().pending.remove(0);
    now += Duration::from_millis(5);
    session
        .clipboard_completed(ticket, Ok(()), now)
        .expect("write succeeded");
    info!(flash = ?session.surface().flash(), "copy confirmed");

    while let Some(deadline) = session.next_deadline() {
        now = deadline;
        info!(?now, "advancing clock");
        session.advance(now);
    }
    assert_eq!(session.surface().flash(), None);
}
