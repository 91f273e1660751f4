// Copyright 2026 the Tappivate Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The delay discipline shared by every handler.
//!
//! A [`DelaySlot`] owns at most one outstanding [`TimerToken`] in a shared
//! [`TimerQueue`]. Both ways of acting, deferred and immediate, first cancel
//! whatever the slot was waiting on:
//!
//! - [`DelaySlot::schedule_after_delay`] queues an action for `now + delay`.
//! - [`DelaySlot::run_now_canceling_pending`] runs a closure synchronously.
//!
//! ```
//! use tappivate::delay::DelaySlot;
//! use tappivate_timing::TimerQueue;
//!
//! let mut timers = TimerQueue::new();
//! let mut slot = DelaySlot::new(100);
//!
//! slot.schedule_after_delay(&mut timers, 0, "deactivate");
//! slot.schedule_after_delay(&mut timers, 40, "deactivate again");
//! // The second call replaced the first.
//! assert_eq!(timers.len(), 1);
//! assert_eq!(timers.next_deadline(), Some(140));
//!
//! let ran = slot.run_now_canceling_pending(&mut timers, || "activate");
//! assert_eq!(ran, "activate");
//! assert!(timers.is_empty());
//! assert!(!slot.is_pending());
//! ```

use tappivate_timing::{TimerQueue, TimerToken};

/// A single pending-timer slot with a fixed delay.
#[derive(Clone, Debug)]
pub struct DelaySlot {
    delay: u64,
    pending: Option<TimerToken>,
}

impl DelaySlot {
    /// Creates an idle slot that defers actions by `delay`.
    #[must_use]
    pub const fn new(delay: u64) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    /// Returns the configured delay.
    #[must_use]
    pub const fn delay(&self) -> u64 {
        self.delay
    }

    /// Returns `true` while an action scheduled through this slot has not fired.
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Returns the token of the pending action, if any.
    #[must_use]
    pub const fn pending(&self) -> Option<TimerToken> {
        self.pending
    }

    /// Cancels any pending action, then schedules `action` for `now + delay`.
    pub fn schedule_after_delay<A>(
        &mut self,
        timers: &mut TimerQueue<A>,
        now: u64,
        action: A,
    ) -> TimerToken {
        self.cancel_pending(timers);
        let token = timers.schedule(now.saturating_add(self.delay), action);
        log::trace!("scheduled {token:?} in {}ms", self.delay);
        self.pending = Some(token);
        token
    }

    /// Cancels any pending action, then runs `action` immediately.
    pub fn run_now_canceling_pending<A, R>(
        &mut self,
        timers: &mut TimerQueue<A>,
        action: impl FnOnce() -> R,
    ) -> R {
        self.cancel_pending(timers);
        action()
    }

    /// Cancels the pending action, if any.
    ///
    /// Returns `true` if something was canceled. Calling this on an idle slot
    /// is a no-op.
    pub fn cancel_pending<A>(&mut self, timers: &mut TimerQueue<A>) -> bool {
        let Some(token) = self.pending.take() else {
            return false;
        };
        let canceled = timers.cancel(token).is_some();
        if canceled {
            log::trace!("canceled {token:?}");
        }
        canceled
    }

    /// Records that the timer for `token` fired.
    ///
    /// Returns `false` if `token` is not the one this slot is waiting on, in
    /// which case the fired action is stale and should be dropped.
    pub fn settle(&mut self, token: TimerToken) -> bool {
        if self.pending == Some(token) {
            self.pending = None;
            true
        } else {
            false
        }
    }
}
