// Copyright 2026 the Tappivate Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-item feedback and selection inside a list container.
//!
//! A list item moves through four states: idle, pending-active, active and
//! selected. The transitions resolve an ambiguous touch sequence into one of
//! three outcomes.
//!
//! - **Tap**: start, then end with no move in between. The item becomes the
//!   list's single selected item and its single active item.
//! - **Scroll or drag-off**: start, then move. The pending activation is
//!   dropped, and the visuals of any selected sibling are restored.
//! - **System cancel**: the item soft-deactivates after the delay, the same
//!   way a released button does. Items of `nav` containers use this.
//!
//! Activation on start is deferred by the list delay, so a finger that only
//! passes over an item on its way into a scroll never lights it up.
//!
//! "Exclusive activation" means deactivating every active sibling before
//! activating the item, which keeps at most one active item per container.

use alloc::vec::Vec;
use core::fmt;

use tappivate_timing::{TimerQueue, TimerToken};

use crate::config::Callbacks;
use crate::delay::DelaySlot;
use crate::host::Document;

/// A deferred list item effect.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ListAction<E> {
    /// Deactivate all active siblings, then activate the item.
    ActivateExclusive(E),
    /// Remove press feedback from the item.
    Deactivate(E),
}

/// List item state machine, shared by every item of the bound containers.
pub struct ListHandler<D: Document> {
    slot: DelaySlot,
    callbacks: Callbacks<D>,
    touching: bool,
}

impl<D: Document> fmt::Debug for ListHandler<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListHandler")
            .field("slot", &self.slot)
            .field("touching", &self.touching)
            .finish_non_exhaustive()
    }
}

impl<D: Document> ListHandler<D> {
    /// Creates a handler that activates items `delay` milliseconds after touch.
    #[must_use]
    pub fn new(delay: u64, callbacks: Callbacks<D>) -> Self {
        Self {
            slot: DelaySlot::new(delay),
            callbacks,
            touching: false,
        }
    }

    /// Returns the handler's delay slot.
    #[must_use]
    pub fn slot(&self) -> &DelaySlot {
        &self.slot
    }

    /// Returns `true` between a start and the next move, end or cancel.
    #[must_use]
    pub fn is_touching(&self) -> bool {
        self.touching
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

    /// Deactivates every active sibling of `el`, then activates `el`.
    pub fn activate_exclusive(&self, doc: &mut D, el: D::Element) {
        activate_exclusive(&self.callbacks, doc, el);
    }

    /// Touch: activate `el` exclusively once the delay has elapsed.
    ///
    /// A second start before the activation fires restarts the delay.
    pub fn gesture_start<A>(&mut self, timers: &mut TimerQueue<A>, now: u64, el: D::Element)
    where
        ListAction<D::Element>: Into<A>,
    {
        log::trace!("list item {el:?} touched");
        self.touching = true;
        self.slot
            .schedule_after_delay(timers, now, ListAction::ActivateExclusive(el).into());
    }

    /// Move: drop the pending activation and restore selection visuals.
    ///
    /// Every selected sibling is re-activated, and any other active sibling
    /// (an abandoned press on a different item) is deactivated. `el` keeps
    /// feedback only if it is itself selected.
    pub fn gesture_move<A>(&mut self, doc: &mut D, timers: &mut TimerQueue<A>, el: D::Element) {
        self.touching = false;
        let callbacks = &self.callbacks;
        self.slot.run_now_canceling_pending(timers, || {
            for sibling in doc.siblings(el, None) {
                if callbacks.is_selected(doc, sibling) {
                    callbacks.activate(doc, sibling);
                } else if callbacks.is_active(doc, sibling) {
                    callbacks.deactivate(doc, sibling);
                }
            }
            if callbacks.is_selected(doc, el) {
                callbacks.activate(doc, el);
            } else {
                callbacks.deactivate(doc, el);
            }
        });
    }

    /// Release: commit a tap on `el` as the list's selection.
    ///
    /// Does nothing unless the touch that started on this handler is still
    /// live, that is, no move or cancel came in between. Returns `true` if the
    /// selection was committed.
    pub fn gesture_end<A>(
        &mut self,
        doc: &mut D,
        timers: &mut TimerQueue<A>,
        el: D::Element,
    ) -> bool {
        if !self.touching {
            return false;
        }
        self.touching = false;
        let callbacks = &self.callbacks;
        self.slot.run_now_canceling_pending(timers, || {
            for sibling in siblings_where(doc, el, |doc, s| callbacks.is_selected(doc, s)) {
                callbacks.deselect(doc, sibling);
            }
            callbacks.select(doc, el);
            activate_exclusive(callbacks, doc, el);
        });
        log::debug!("list item {el:?} selected");
        true
    }

    /// System cancel: deactivate `el` once the delay has elapsed.
    pub fn gesture_cancel<A>(&mut self, timers: &mut TimerQueue<A>, now: u64, el: D::Element)
    where
        ListAction<D::Element>: Into<A>,
    {
        log::trace!("list item {el:?} canceled");
        self.touching = false;
        self.slot
            .schedule_after_delay(timers, now, ListAction::Deactivate(el).into());
    }

    /// Runs a deferred action whose timer fired.
    ///
    /// Returns `false` and does nothing if `token` is not this handler's
    /// pending timer.
    pub fn fire(
        &mut self,
        doc: &mut D,
        token: TimerToken,
        action: ListAction<D::Element>,
    ) -> bool {
        if !self.slot.settle(token) {
            return false;
        }
        match action {
            ListAction::ActivateExclusive(el) => {
                log::trace!("list item {el:?} activated after delay");
                activate_exclusive(&self.callbacks, doc, el);
            }
            ListAction::Deactivate(el) => {
                log::trace!("list item {el:?} deactivated after delay");
                self.callbacks.deactivate(doc, el);
            }
        }
        true
    }
}

fn activate_exclusive<D: Document>(callbacks: &Callbacks<D>, doc: &mut D, el: D::Element) {
    for sibling in siblings_where(doc, el, |doc, s| callbacks.is_active(doc, s)) {
        callbacks.deactivate(doc, sibling);
    }
    callbacks.activate(doc, el);
}

// Collected up front: callers mutate the document while walking the result.
fn siblings_where<D: Document>(
    doc: &D,
    el: D::Element,
    pred: impl Fn(&D, D::Element) -> bool,
) -> Vec<D::Element> {
    doc.siblings(el, None)
        .into_iter()
        .filter(|&s| pred(doc, s))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{ACTIVE, SELECTED};
    use crate::memory::{MemoryDocument, NodeId};
    use alloc::vec;

    type Timers = TimerQueue<ListAction<NodeId>>;

    fn list_of(n: usize) -> (MemoryDocument, Vec<NodeId>) {
        let mut doc = MemoryDocument::new();
        let list = doc.append(doc.root(), Some("list"));
        let items = (0..n).map(|_| doc.append(list, None)).collect();
        (doc, items)
    }

    fn fire_due(
        list: &mut ListHandler<MemoryDocument>,
        doc: &mut MemoryDocument,
        timers: &mut Timers,
        now: u64,
    ) {
        while let Some((token, action)) = timers.pop_due(now) {
            list.fire(doc, token, action);
        }
    }

    #[test]
    fn activation_waits_for_the_delay() {
        let (mut doc, items) = list_of(2);
        let mut timers = Timers::new();
        let mut list = ListHandler::new(150, Callbacks::default());

        list.gesture_start(&mut timers, 0, items[0]);
        assert!(list.is_touching());
        fire_due(&mut list, &mut doc, &mut timers, 149);
        assert!(!doc.has_marker(items[0], ACTIVE));
        fire_due(&mut list, &mut doc, &mut timers, 150);
        assert!(doc.has_marker(items[0], ACTIVE));
    }

    #[test]
    fn restarting_the_touch_restarts_the_delay() {
        let (mut doc, items) = list_of(1);
        let mut timers = Timers::new();
        let mut list = ListHandler::new(150, Callbacks::default());

        list.gesture_start(&mut timers, 0, items[0]);
        list.gesture_start(&mut timers, 100, items[0]);
        assert_eq!(timers.len(), 1);
        fire_due(&mut list, &mut doc, &mut timers, 200);
        assert!(!doc.has_marker(items[0], ACTIVE));
        fire_due(&mut list, &mut doc, &mut timers, 250);
        assert!(doc.has_marker(items[0], ACTIVE));
    }

    #[test]
    fn exclusive_activation_clears_active_siblings() {
        let (mut doc, items) = list_of(3);
        doc.add_marker(items[0], ACTIVE);
        doc.add_marker(items[2], ACTIVE);
        let list = ListHandler::new(150, Callbacks::default());

        list.activate_exclusive(&mut doc, items[1]);
        assert_eq!(doc.with_marker(ACTIVE), vec![items[1]]);
    }

    #[test]
    fn end_without_touch_is_ignored() {
        let (mut doc, items) = list_of(2);
        let mut timers = Timers::new();
        let mut list = ListHandler::new(150, Callbacks::default());

        assert!(!list.gesture_end(&mut doc, &mut timers, items[0]));
        assert!(!doc.has_marker(items[0], SELECTED));
    }

    #[test]
    fn move_keeps_selected_item_active() {
        let (mut doc, items) = list_of(2);
        let mut timers = Timers::new();
        let mut list = ListHandler::new(150, Callbacks::default());

        list.gesture_start(&mut timers, 0, items[0]);
        assert!(list.gesture_end(&mut doc, &mut timers, items[0]));

        // Scroll starting on the selected item itself.
        list.gesture_start(&mut timers, 500, items[0]);
        list.gesture_move(&mut doc, &mut timers, items[0]);
        assert!(timers.is_empty());
        assert!(doc.has_marker(items[0], ACTIVE));
        assert!(doc.has_marker(items[0], SELECTED));
    }

    #[test]
    fn move_onto_another_item_releases_the_abandoned_press() {
        let (mut doc, items) = list_of(3);
        let mut timers = Timers::new();
        let mut list = ListHandler::new(150, Callbacks::default());
        doc.add_marker(items[2], SELECTED);

        list.gesture_start(&mut timers, 0, items[0]);
        fire_due(&mut list, &mut doc, &mut timers, 150);
        assert_eq!(doc.with_marker(ACTIVE), vec![items[0]]);

        list.gesture_move(&mut doc, &mut timers, items[1]);
        assert_eq!(doc.with_marker(ACTIVE), vec![items[2]]);
    }

    #[test]
    fn cancel_soft_deactivates() {
        let (mut doc, items) = list_of(1);
        let mut timers = Timers::new();
        let mut list = ListHandler::new(150, Callbacks::default());
        doc.add_marker(items[0], ACTIVE);

        list.gesture_start(&mut timers, 0, items[0]);
        list.gesture_cancel(&mut timers, 10, items[0]);
        assert!(!list.is_touching());
        fire_due(&mut list, &mut doc, &mut timers, 159);
        assert!(doc.has_marker(items[0], ACTIVE));
        fire_due(&mut list, &mut doc, &mut timers, 160);
        assert!(!doc.has_marker(items[0], ACTIVE));

        // The canceled touch cannot commit a selection.
        assert!(!list.gesture_end(&mut doc, &mut timers, items[0]));
    }
}
