// Copyright 2025 the Keycopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Deadline timers on a host-supplied monotonic clock.
//!
//! Nothing here sleeps or spawns. The host passes the current time with every
//! event and asks [`Session::next_deadline`](crate::Session::next_deadline) when
//! it should call back.

use core::time::Duration;

/// A one-shot timer. Re-arming replaces the previous deadline.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct Timer {
    deadline: Option<Duration>,
}

impl Timer {
    /// Fire `delay` after `now`.
    pub fn arm(&mut self, now: Duration, delay: Duration) {
        self.deadline = Some(now.saturating_add(delay));
    }

    /// Disarm without firing.
    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    /// When the timer fires, if armed.
    pub fn deadline(&self) -> Option<Duration> {
        self.deadline
    }

    /// Whether the timer is armed.
    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    /// Disarm and return `true` if the deadline has passed at `now`.
    pub fn fire(&mut self, now: Duration) -> bool {
        match self.deadline {
            Some(at) if at <= now => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

/// Trailing-edge debounce: only the last of a burst of triggers fires, once the
/// burst has been quiet for the configured delay.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct Debounce {
    timer: Timer,
}

impl Debounce {
    /// Record a trigger at `now`, pushing the deadline out to `now + quiet`.
    pub fn trigger(&mut self, now: Duration, quiet: Duration) {
        self.timer.arm(now, quiet);
    }

    /// Drop a pending trigger.
    pub fn cancel(&mut self) {
        self.timer.cancel();
    }

    /// When the pending trigger fires.
    pub fn deadline(&self) -> Option<Duration> {
        self.timer.deadline()
    }

    /// Whether the burst settled by `now`; clears the pending trigger if so.
    pub fn settle(&mut self, now: Duration) -> bool {
        self.timer.fire(now)
    }
}

/// Earliest of several optional deadlines.
pub(crate) fn earliest(deadlines: impl IntoIterator<Item = Option<Duration>>) -> Option<Duration> {
    deadlines.into_iter().flatten().min()
}
