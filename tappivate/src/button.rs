// Copyright 2026 the Tappivate Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Press feedback for a single button.
//!
//! A button has two states, idle and pressed. Pressing activates it
//! immediately, and also cancels a deactivation still pending from a previous
//! quick tap. Releasing, leaving or canceling deactivates it only after the
//! configured delay. Without that delay, a fast tap would flash the active
//! state too briefly to see.
//!
//! ```
//! use tappivate::button::{ButtonAction, ButtonHandler};
//! use tappivate::config::Callbacks;
//! use tappivate::host::{ACTIVE, Document};
//! use tappivate::memory::{MemoryDocument, NodeId};
//! use tappivate_timing::TimerQueue;
//!
//! let mut doc = MemoryDocument::new();
//! let btn = doc.append(doc.root(), Some("btn"));
//! let mut timers = TimerQueue::<ButtonAction<NodeId>>::new();
//! let mut button = ButtonHandler::new(100, Callbacks::default());
//!
//! button.gesture_start(&mut doc, &mut timers, btn);
//! button.gesture_end(&mut timers, 5, btn);
//! assert!(doc.has_marker(btn, ACTIVE));
//!
//! // Still active just before the delay elapses.
//! assert!(timers.pop_due(104).is_none());
//! let (token, action) = timers.pop_due(105).unwrap();
//! button.fire(&mut doc, token, action);
//! assert!(!doc.has_marker(btn, ACTIVE));
//! ```

use core::fmt;

use tappivate_timing::{TimerQueue, TimerToken};

use crate::config::Callbacks;
use crate::delay::DelaySlot;
use crate::host::Document;

/// A deferred button effect.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ButtonAction<E> {
    /// Remove press feedback from the element.
    Deactivate(E),
}

/// Button press state machine.
pub struct ButtonHandler<D: Document> {
    slot: DelaySlot,
    callbacks: Callbacks<D>,
}

impl<D: Document> fmt::Debug for ButtonHandler<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ButtonHandler")
            .field("slot", &self.slot)
            .finish_non_exhaustive()
    }
}

impl<D: Document> ButtonHandler<D> {
    /// Creates a handler that deactivates `delay` milliseconds after release.
    #[must_use]
    pub fn new(delay: u64, callbacks: Callbacks<D>) -> Self {
        Self {
            slot: DelaySlot::new(delay),
            callbacks,
        }
    }

    /// Returns the handler's delay slot.
    #[must_use]
    pub fn slot(&self) -> &DelaySlot {
        &self.slot
    }

    /// Drops the pending deferred action, if any.
    pub fn cancel_pending<A>(&mut self, timers: &mut TimerQueue<A>) -> bool {
        self.slot.cancel_pending(timers)
    }

    /// Runs the activate callback on `el`.
    pub fn activate(&self, doc: &mut D, el: D::Element) {
        self.callbacks.activate(doc, el);
    }

    /// Runs the deactivate callback on `el`.
    pub fn deactivate(&self, doc: &mut D, el: D::Element) {
        self.callbacks.deactivate(doc, el);
    }

    /// Press: activate `el` now, dropping any pending deactivation.
    pub fn gesture_start<A>(&mut self, doc: &mut D, timers: &mut TimerQueue<A>, el: D::Element) {
        log::trace!("button {el:?} pressed");
        let callbacks = &self.callbacks;
        self.slot
            .run_now_canceling_pending(timers, || callbacks.activate(doc, el));
    }

    /// Release: deactivate `el` once the delay has elapsed.
    pub fn gesture_end<A>(&mut self, timers: &mut TimerQueue<A>, now: u64, el: D::Element)
    where
        ButtonAction<D::Element>: Into<A>,
    {
        log::trace!("button {el:?} released");
        self.slot
            .schedule_after_delay(timers, now, ButtonAction::Deactivate(el).into());
    }

    /// The contact left `el`; treated as a release.
    pub fn gesture_leave<A>(&mut self, timers: &mut TimerQueue<A>, now: u64, el: D::Element)
    where
        ButtonAction<D::Element>: Into<A>,
    {
        self.gesture_end(timers, now, el);
    }

    /// The system canceled the gesture on `el`; treated as a release.
    pub fn gesture_cancel<A>(&mut self, timers: &mut TimerQueue<A>, now: u64, el: D::Element)
    where
        ButtonAction<D::Element>: Into<A>,
    {
        self.gesture_end(timers, now, el);
    }

    /// Runs a deferred action whose timer fired.
    ///
    /// Returns `false` and does nothing if `token` is not this handler's
    /// pending timer.
    pub fn fire(
        &mut self,
        doc: &mut D,
        token: TimerToken,
        action: ButtonAction<D::Element>,
    ) -> bool {
        if !self.slot.settle(token) {
            return false;
        }
        match action {
            ButtonAction::Deactivate(el) => {
                log::trace!("button {el:?} deactivated after delay");
                self.callbacks.deactivate(doc, el);
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::ACTIVE;
    use crate::memory::MemoryDocument;

    type Timers = TimerQueue<ButtonAction<crate::memory::NodeId>>;

    fn fire_due(
        button: &mut ButtonHandler<MemoryDocument>,
        doc: &mut MemoryDocument,
        timers: &mut Timers,
        now: u64,
    ) {
        while let Some((token, action)) = timers.pop_due(now) {
            button.fire(doc, token, action);
        }
    }

    #[test]
    fn press_activates_immediately() {
        let mut doc = MemoryDocument::new();
        let btn = doc.append(doc.root(), Some("btn"));
        let mut timers = Timers::new();
        let mut button = ButtonHandler::new(100, Callbacks::default());

        button.gesture_start(&mut doc, &mut timers, btn);
        assert!(doc.has_marker(btn, ACTIVE));
        assert!(timers.is_empty());
    }

    #[test]
    fn second_press_cancels_pending_deactivation() {
        let mut doc = MemoryDocument::new();
        let btn = doc.append(doc.root(), Some("btn"));
        let mut timers = Timers::new();
        let mut button = ButtonHandler::new(100, Callbacks::default());

        button.gesture_start(&mut doc, &mut timers, btn);
        button.gesture_end(&mut timers, 10, btn);
        button.gesture_start(&mut doc, &mut timers, btn);
        assert!(timers.is_empty());

        fire_due(&mut button, &mut doc, &mut timers, 1_000);
        assert!(doc.has_marker(btn, ACTIVE));
    }

    #[test]
    fn leave_and_cancel_deactivate_after_delay() {
        let mut doc = MemoryDocument::new();
        let btn = doc.append(doc.root(), Some("btn"));
        let mut timers = Timers::new();
        let mut button = ButtonHandler::new(30, Callbacks::default());

        button.gesture_start(&mut doc, &mut timers, btn);
        button.gesture_leave(&mut timers, 0, btn);
        fire_due(&mut button, &mut doc, &mut timers, 29);
        assert!(doc.has_marker(btn, ACTIVE));
        fire_due(&mut button, &mut doc, &mut timers, 30);
        assert!(!doc.has_marker(btn, ACTIVE));

        button.gesture_start(&mut doc, &mut timers, btn);
        button.gesture_cancel(&mut timers, 100, btn);
        fire_due(&mut button, &mut doc, &mut timers, 130);
        assert!(!doc.has_marker(btn, ACTIVE));
    }

    #[test]
    fn stale_token_is_ignored() {
        let mut doc = MemoryDocument::new();
        let btn = doc.append(doc.root(), Some("btn"));
        let mut timers = Timers::new();
        let mut button = ButtonHandler::new(10, Callbacks::default());

        button.gesture_start(&mut doc, &mut timers, btn);
        let stale = timers.schedule(0, ButtonAction::Deactivate(btn));
        assert!(!button.fire(&mut doc, stale, ButtonAction::Deactivate(btn)));
        assert!(doc.has_marker(btn, ACTIVE));
    }
}
