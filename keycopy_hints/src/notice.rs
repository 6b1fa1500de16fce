// Copyright 2025 the Keycopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The single on-screen notice.

use core::time::Duration;

use crate::timer::Timer;

/// Displays a short text message to the user, e.g. a small floating box.
///
/// There is only ever one notice. Showing a new one replaces the old text.
pub trait Notifier {
    /// Show `text`, replacing whatever is shown.
    fn show(&mut self, text: &str);
    /// Hide the notice.
    fn hide(&mut self);
}

/// A [`Notifier`] that does nothing.
impl Notifier for () {
    fn show(&mut self, _text: &str) {}
    fn hide(&mut self) {}
}

/// Drives a [`Notifier`], tracking when a transient notice expires.
#[derive(Clone, Debug, Default)]
pub(crate) struct NoticeBoard {
    expiry: Timer,
}

impl NoticeBoard {
    /// Show `text` until replaced or hidden.
    pub(crate) fn sticky<N: Notifier + ?Sized>(&mut self, notifier: &mut N, text: &str) {
        self.expiry.cancel();
        notifier.show(text);
    }

    /// Show `text` and hide it `duration` after `now`.
    pub(crate) fn transient<N: Notifier + ?Sized>(
        &mut self,
        notifier: &mut N,
        text: &str,
        now: Duration,
        duration: Duration,
    ) {
        notifier.show(text);
        self.expiry.arm(now, duration);
    }

    /// Hide immediately.
    pub(crate) fn hide<N: Notifier + ?Sized>(&mut self, notifier: &mut N) {
        self.expiry.cancel();
        notifier.hide();
    }

    /// Hide the notice if its time is up.
    pub(crate) fn advance<N: Notifier + ?Sized>(&mut self, notifier: &mut N, now: Duration) {
        if self.expiry.fire(now) {
            notifier.hide();
        }
    }

    pub(crate) fn deadline(&self) -> Option<Duration> {
        self.expiry.deadline()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::String;

    #[derive(Default)]
    struct Shown(Option<String>);

    impl Notifier for Shown {
        fn show(&mut self, text: &str) {
            self.0 = Some(text.into());
        }
        fn hide(&mut self) {
            self.0 = None;
        }
    }

    #[test]
    fn transient_notice_expires() {
        let mut board = NoticeBoard::default();
        let mut shown = Shown::default();
        board.transient(&mut shown, "Copied!", Duration::ZERO, Duration::from_millis(1500));
        board.advance(&mut shown, Duration::from_millis(1499));
        assert_eq!(shown.0.as_deref(), Some("Copied!"));
        board.advance(&mut shown, Duration::from_millis(1500));
        assert_eq!(shown.0, None);
    }

    #[test]
    fn sticky_notice_cancels_pending_expiry() {
        let mut board = NoticeBoard::default();
        let mut shown = Shown::default();
        board.transient(&mut shown, "Copied!", Duration::ZERO, Duration::from_millis(10));
        board.sticky(&mut shown, "Yank All Text");
        board.advance(&mut shown, Duration::from_secs(60));
        assert_eq!(shown.0.as_deref(), Some("Yank All Text"));
        assert_eq!(board.deadline(), None);
    }
}
