// Copyright 2025 the Keycopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Keycopy Hints: keyboard hint mode for copying text off a page.
//!
//! Pressing `y` (direct text) or `Y` (all text) scans the page for visible
//! elements carrying text, paints a short label over each, and copies the text of
//! the element whose label the user types.
//!
//! ## Pipeline
//!
//! - [`collect`]: one depth-first pass over a [`Page`](keycopy_dom::Page), keeping
//!   elements that qualify for the [`Mode`] and pass [`is_visible`]. The result is a
//!   [`CandidateForest`] whose edges skip non-candidate ancestors.
//! - [`assign_layers`]: leaves are layer 1, each parent one above its deepest child.
//! - [`assign_labels`]: fixed-length labels over an [`Alphabet`] in document order.
//! - [`HintIndex`]: the shown labels, prefix matching, and paint order.
//! - [`OverlayRenderer`]: paints onto a host [`Surface`].
//! - [`Session`]: the modal state machine tying it together with a [`ClipboardSink`]
//!   and a [`Notifier`].
//!
//! Nested content produces stacked hints. Space hides the innermost remaining
//! layer so outer containers can be picked; Ctrl+Space goes back.
//!
//! ## Example
//!
//! ```
//! use core::time::Duration;
//! use keycopy_dom::{DomTree, LocalElement, Viewport};
//! use keycopy_hints::{
//!     ClipboardSink, CopyTicket, HintConfig, KeyEvent, RecordingSurface, Session,
//! };
//! use kurbo::Rect;
//!
//! #[derive(Default)]
//! struct Clipboard(Vec<(CopyTicket, String)>);
//!
//! impl ClipboardSink for Clipboard {
//!     fn write(&mut self, ticket: CopyTicket, text: &str) {
//!         self.0.push((ticket, text.to_string()));
//!     }
//! }
//!
//! let mut page = DomTree::new(Viewport::new(400.0, 300.0));
//! let body = page.insert(
//!     None,
//!     LocalElement { bounds: Rect::new(0.0, 0.0, 400.0, 300.0), ..Default::default() },
//! );
//! for (i, text) in ["alpha", "beta", "gamma"].into_iter().enumerate() {
//!     let y = 40.0 * i as f64;
//!     let p = page.insert(
//!         Some(body),
//!         LocalElement { bounds: Rect::new(0.0, y, 200.0, y + 30.0), ..Default::default() },
//!     );
//!     page.push_text(p, text);
//! }
//!
//! let mut session = Session::new(
//!     page,
//!     RecordingSurface::new(),
//!     Clipboard::default(),
//!     (),
//!     HintConfig::default(),
//! );
//! let now = Duration::ZERO;
//! session.key_down(KeyEvent::char('y'), now);
//! assert_eq!(session.surface().texts(), ["0", "1", "2"]);
//!
//! session.key_down(KeyEvent::char('1'), now);
//! assert!(!session.is_active());
//! let (ticket, text) = &session.clipboard().0[0];
//! assert_eq!(text, "beta");
//!
//! let ticket = *ticket;
//! session.clipboard_completed(ticket, Ok(()), now).unwrap();
//! assert!(session.surface().flash().is_some());
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod collect;
mod config;
mod copy;
mod error;
mod forest;
mod hint_index;
mod labels;
mod layers;
mod notice;
mod render;
mod session;
mod timer;
mod types;
mod visibility;

pub use collect::{collect, qualifies};
pub use config::{FontSpec, HintConfig, NoticeTexts, ScrollPolicy};
pub use copy::{ClipboardSink, CopyTicket, MAX_PENDING_COPIES, extract_text};
pub use error::{ClipboardError, HintError};
pub use forest::{Candidate, CandidateForest};
pub use hint_index::{HintIndex, Matches};
pub use labels::{Alphabet, allocate, assign_labels, label_length};
pub use layers::{Layer, LayerIndex, assign_layers};
pub use notice::Notifier;
pub use render::{DrawOp, OverlayRenderer, RecordingSurface, Surface, assign_colors, hint_color};
pub use session::{Activation, ActiveHints, Session};
pub use timer::{Debounce, Timer};
pub use types::{CandidateId, Hsla, Key, KeyDisposition, KeyEvent, Mode, Modifiers};
pub use visibility::is_visible;
