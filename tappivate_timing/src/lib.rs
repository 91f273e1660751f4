// Copyright 2026 the Tappivate Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tappivate Timing: a host-agnostic queue of one-shot, cancelable timers.
//!
//! UI runtimes all have some way to say "run this later", but they disagree on
//! how: browser `setTimeout`, a winit `ControlFlow::WaitUntil`, a frame clock.
//! This crate keeps the bookkeeping out of the host. Callers schedule an
//! action payload against a deadline, get back a [`TimerToken`], and later ask
//! the queue which actions are due for a given `now`.
//!
//! Time is an opaque, monotonically increasing `u64`. The rest of Tappivate
//! uses milliseconds, but the queue itself does not care about units.
//!
//! ## Minimal example
//!
//! ```rust
//! use tappivate_timing::TimerQueue;
//!
//! let mut timers = TimerQueue::new();
//! let flash = timers.schedule(100, "deactivate");
//! let stale = timers.schedule(50, "activate");
//!
//! // Cancel before it fires: the action never comes back out.
//! assert_eq!(timers.cancel(stale), Some("activate"));
//! assert_eq!(timers.next_deadline(), Some(100));
//!
//! assert_eq!(timers.pop_due(99), None);
//! assert_eq!(timers.pop_due(100), Some((flash, "deactivate")));
//! assert!(timers.is_empty());
//! ```
//!
//! ## Ordering
//!
//! Entries fire in deadline order. Entries that share a deadline fire in the
//! order they were scheduled, so a run of [`TimerQueue::pop_due`] calls is
//! deterministic.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

use alloc::vec::Vec;

/// Opaque handle to a scheduled timer.
///
/// Tokens are unique within the [`TimerQueue`] that issued them and are never
/// reused, so a stale token held after its timer fired can be canceled safely.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerToken(u64);

impl TimerToken {
    /// Returns the raw id of this token.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

#[derive(Clone, Debug)]
struct Entry<A> {
    deadline: u64,
    token: TimerToken,
    action: A,
}

/// A queue of one-shot timers carrying an action payload of type `A`.
#[derive(Clone, Debug)]
pub struct TimerQueue<A> {
    // Sorted by (deadline, token); tokens increase monotonically so ties keep
    // scheduling order.
    entries: Vec<Entry<A>>,
    next_token: u64,
}

impl<A> Default for TimerQueue<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A> TimerQueue<A> {
    /// Creates an empty queue.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
            next_token: 0,
        }
    }

    /// Returns `true` if no timers are pending.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the number of pending timers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Schedules `action` to become due at `deadline`.
    pub fn schedule(&mut self, deadline: u64, action: A) -> TimerToken {
        let token = TimerToken(self.next_token);
        self.next_token += 1;
        let at = self
            .entries
            .partition_point(|e| (e.deadline, e.token) <= (deadline, token));
        self.entries.insert(
            at,
            Entry {
                deadline,
                token,
                action,
            },
        );
        token
    }

    /// Cancels the timer for `token`, returning its action if it was still pending.
    ///
    /// Canceling a token that already fired or was already canceled is a no-op.
    pub fn cancel(&mut self, token: TimerToken) -> Option<A> {
        let index = self.entries.iter().position(|e| e.token == token)?;
        Some(self.entries.remove(index).action)
    }

    /// Returns `true` if `token` is still pending.
    #[must_use]
    pub fn contains(&self, token: TimerToken) -> bool {
        self.entries.iter().any(|e| e.token == token)
    }

    /// Returns the earliest pending deadline, if any.
    #[must_use]
    pub fn next_deadline(&self) -> Option<u64> {
        self.entries.first().map(|e| e.deadline)
    }

    /// Removes and returns the earliest timer whose deadline is at or before `now`.
    pub fn pop_due(&mut self, now: u64) -> Option<(TimerToken, A)> {
        if self.entries.first()?.deadline > now {
            return None;
        }
        let entry = self.entries.remove(0);
        Some((entry.token, entry.action))
    }

    /// Drops every pending timer.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokens_are_never_reused() {
        let mut q = TimerQueue::new();
        let a = q.schedule(10, ());
        assert_eq!(q.pop_due(10), Some((a, ())));
        let b = q.schedule(10, ());
        assert_ne!(a, b);
        assert!(b.get() > a.get());
    }

    #[test]
    fn cancel_is_idempotent() {
        let mut q = TimerQueue::new();
        let t = q.schedule(5, 'x');
        assert_eq!(q.cancel(t), Some('x'));
        assert_eq!(q.cancel(t), None);
        assert!(q.is_empty());
    }

    #[test]
    fn insertion_keeps_deadline_order() {
        let mut q = TimerQueue::new();
        q.schedule(30, 3);
        q.schedule(10, 1);
        q.schedule(20, 2);
        assert_eq!(q.next_deadline(), Some(10));
        assert_eq!(q.pop_due(100).map(|(_, a)| a), Some(1));
        assert_eq!(q.pop_due(100).map(|(_, a)| a), Some(2));
        assert_eq!(q.pop_due(100).map(|(_, a)| a), Some(3));
        assert_eq!(q.pop_due(100), None);
    }
}
