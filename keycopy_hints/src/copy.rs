// Copyright 2025 the Keycopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Text extraction and clipboard writes.

use alloc::string::String;
use alloc::vec::Vec;

use keycopy_dom::{ChildNode, Page};
use tracing::debug;

use crate::types::Mode;

/// Text that copying `element` in `mode` puts on the clipboard.
///
/// - [`Mode::AllText`]: the element's full text content, as is.
/// - [`Mode::DirectText`]: only the element's own text-node children, joined by
///   a single space, with surrounding whitespace trimmed.
pub fn extract_text<P: Page>(page: &P, element: P::Element, mode: Mode) -> String {
    match mode {
        Mode::AllText => page.text_content(element),
        Mode::DirectText => {
            let parts: Vec<&str> = page.child_nodes(element).filter_map(ChildNode::text).collect();
            String::from(parts.join(" ").trim())
        }
    }
}

/// Identifies one clipboard write so its completion can be matched up later.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct CopyTicket(pub u64);

/// Asynchronous clipboard writer.
///
/// `write` only starts the operation. The host reports the outcome through
/// [`Session::clipboard_completed`](crate::Session::clipboard_completed) with the
/// same ticket, exactly once per write. Only the most recent
/// [`MAX_PENDING_COPIES`] writes are remembered; a completion for an older
/// ticket is ignored.
pub trait ClipboardSink {
    /// Begin writing `text` to the system clipboard.
    fn write(&mut self, ticket: CopyTicket, text: &str);
}

/// How many unfinished writes are tracked before the oldest is forgotten.
pub const MAX_PENDING_COPIES: usize = 16;

/// A started write, remembered until its completion arrives.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) struct PendingCopy<E> {
    pub(crate) ticket: CopyTicket,
    /// Element to flash on success; `None` for relayed copies.
    pub(crate) element: Option<E>,
}

/// Issues tickets and tracks writes in flight.
#[derive(Clone, Debug)]
pub(crate) struct CopyExecutor<E> {
    next: u64,
    pending: Vec<PendingCopy<E>>,
}

impl<E> Default for CopyExecutor<E> {
    fn default() -> Self {
        Self {
            next: 0,
            pending: Vec::new(),
        }
    }
}

impl<E: Copy> CopyExecutor<E> {
    /// Start writing `text`, flashing `element` once the write succeeds.
    pub(crate) fn start<C: ClipboardSink + ?Sized>(
        &mut self,
        clipboard: &mut C,
        text: &str,
        element: Option<E>,
    ) -> CopyTicket {
        let ticket = CopyTicket(self.next);
        self.next += 1;
        if self.pending.len() == MAX_PENDING_COPIES {
            let dropped = self.pending.remove(0);
            debug!(ticket = ?dropped.ticket, "oldest clipboard write forgotten");
        }
        self.pending.push(PendingCopy { ticket, element });
        clipboard.write(ticket, text);
        ticket
    }

    /// Forget and return the write for `ticket`, if it is still pending.
    pub(crate) fn complete(&mut self, ticket: CopyTicket) -> Option<PendingCopy<E>> {
        let at = self.pending.iter().position(|p| p.ticket == ticket)?;
        Some(self.pending.remove(at))
    }

    pub(crate) fn in_flight(&self) -> usize {
        self.pending.len()
    }
}
