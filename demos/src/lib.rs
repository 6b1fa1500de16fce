// Copyright 2025 the Keycopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared pieces for the runnable demos: logging setup, a sample article page,
//! and console-backed host capabilities.

use keycopy_dom::{DomTree, ElementId, LocalElement, Viewport};
use keycopy_hints::{ClipboardSink, CopyTicket, Notifier};
use kurbo::Rect;
use tracing_subscriber::EnvFilter;

/// Install a `fmt` subscriber. `RUST_LOG` overrides the `debug` default.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

fn block(x0: f64, y0: f64, x1: f64, y1: f64) -> LocalElement {
    LocalElement {
        bounds: Rect::new(x0, y0, x1, y1),
        ..Default::default()
    }
}

/// Elements of interest in [`article`].
#[derive(Clone, Copy, Debug)]
pub struct Article {
    /// Document element.
    pub body: ElementId,
    /// Section with a heading text and two nested paragraphs.
    pub section: ElementId,
    /// Paragraphs in the section.
    pub paragraphs: [ElementId; 2],
    /// A footer below the fold.
    pub footer: ElementId,
    /// Host container for the overlay and notice.
    pub overlay: ElementId,
}

/// An 800x600 page: a section holding a heading and two paragraphs, a sidebar
/// note, a footer below the fold, and the overlay container.
pub fn article() -> (DomTree, Article) {
    let mut page = DomTree::new(Viewport::new(800.0, 600.0));
    let body = page.insert(None, block(0.0, 0.0, 800.0, 1400.0));

    let section = page.insert(Some(body), block(20.0, 20.0, 560.0, 320.0));
    page.push_text(section, "Release notes");
    let first = page.insert(Some(section), block(40.0, 80.0, 540.0, 180.0));
    page.push_text(first, "Hints are now grouped by nesting depth.");
    let second = page.insert(Some(section), block(40.0, 200.0, 540.0, 300.0));
    page.push_text(second, "Press space to reach the outer containers.");

    let sidebar = page.insert(Some(body), block(580.0, 20.0, 780.0, 200.0));
    page.push_text(sidebar, "Tip: Y copies everything inside a box.");

    let footer = page.insert(Some(body), block(20.0, 1200.0, 780.0, 1260.0));
    page.push_text(footer, "Copyright notice");

    let overlay = page.insert(
        Some(body),
        LocalElement {
            z_index: i32::MAX,
            ..block(0.0, 0.0, 0.0, 0.0)
        },
    );

    (
        page,
        Article {
            body,
            section,
            paragraphs: [first, second],
            footer,
            overlay,
        },
    )
}

/// Clipboard that records writes; completions are delivered by the demo.
#[derive(Debug, Default)]
pub struct PendingClipboard {
    /// Writes started and not yet completed.
    pub pending: Vec<(CopyTicket, String)>,
}

impl ClipboardSink for PendingClipboard {
    fn write(&mut self, ticket: CopyTicket, text: &str) {
        println!("  clipboard <- {text:?}");
        self.pending.push((ticket, text.to_owned()));
    }
}

/// Prints notices to stdout.
#[derive(Debug, Default)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn show(&mut self, text: &str) {
        println!("  [notice] {text}");
    }

    fn hide(&mut self) {
        println!("  [notice hidden]");
    }
}
