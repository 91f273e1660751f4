// Copyright 2026 the Tappivate Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Binding handlers to a container and routing gestures to them.
//!
//! A [`Binder`] plays the part of delegated event listeners on one container.
//! For each gesture, it walks from the event target up to the container,
//! looking for two kinds of match:
//!
//! - the deepest element declaring the `btn` role, which receives start, end,
//!   leave and cancel;
//! - the deepest element whose parent declares `list` or `nav`. Items of a
//!   `list` receive start, move and end. Items of a `nav` receive cancel.
//!
//! Each match is then checked by the nested-role guard, which drops the event
//! if any element from the target up to (but excluding) the matched element
//! declares a role attribute. A button inside a list item therefore takes the
//! press for itself, and the item does not react.
//!
//! Deferred effects live in one [`TimerQueue`] owned by the binder. The host
//! calls [`Binder::advance`] whenever its clock moves, typically at
//! [`Binder::next_deadline`].
//!
//! ## Minimal example
//!
//! ```
//! use tappivate::binder::Binder;
//! use tappivate::config::Config;
//! use tappivate::gesture::Gesture;
//! use tappivate::host::{ACTIVE, Document, SELECTED};
//! use tappivate::memory::MemoryDocument;
//!
//! let mut doc = MemoryDocument::new();
//! let list = doc.append(doc.root(), Some("list"));
//! let a = doc.append(list, None);
//! let b = doc.append(list, None);
//!
//! let mut binder = Binder::new(doc.root(), Config::default());
//!
//! // Tap on `a`: touch, wait past the activation delay, lift.
//! binder.handle(&mut doc, Gesture::Start, a, 0);
//! binder.advance(&mut doc, 150);
//! assert!(doc.has_marker(a, ACTIVE));
//! binder.handle(&mut doc, Gesture::End, a, 200);
//! assert!(doc.has_marker(a, SELECTED));
//!
//! // Tap on `b` moves both markers over.
//! binder.handle(&mut doc, Gesture::Start, b, 1_000);
//! binder.handle(&mut doc, Gesture::End, b, 1_020);
//! assert!(doc.has_marker(b, SELECTED) && doc.has_marker(b, ACTIVE));
//! assert!(!doc.has_marker(a, SELECTED) && !doc.has_marker(a, ACTIVE));
//! ```

use core::fmt;

use tappivate_timing::{TimerQueue, TimerToken};

use crate::button::{ButtonAction, ButtonHandler};
use crate::config::Config;
use crate::gesture::{EventName, Gesture, ParseGestureError};
use crate::host::Document;
use crate::list::{ListAction, ListHandler};
use crate::role::{Role, Roles};

/// A deferred effect waiting in the binder's timer queue.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Deferred<E> {
    /// Owned by the button handler.
    Button(ButtonAction<E>),
    /// Owned by the list handler.
    List(ListAction<E>),
}

impl<E> From<ButtonAction<E>> for Deferred<E> {
    fn from(action: ButtonAction<E>) -> Self {
        Self::Button(action)
    }
}

impl<E> From<ListAction<E>> for Deferred<E> {
    fn from(action: ListAction<E>) -> Self {
        Self::List(action)
    }
}

/// Where a gesture was delivered.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Routed<E> {
    /// The button whose handler received the gesture.
    pub button: Option<E>,
    /// The list item whose handler received the gesture.
    pub item: Option<E>,
}

impl<E> Routed<E> {
    /// Returns `true` if no handler received the gesture.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.button.is_none() && self.item.is_none()
    }
}

#[derive(Copy, Clone, Debug)]
struct ItemMatch<E> {
    item: E,
    container: Roles,
}

/// Button and list handlers bound to one container.
pub struct Binder<D: Document> {
    container: D::Element,
    guard_nested_roles: bool,
    button: ButtonHandler<D>,
    list: ListHandler<D>,
    timers: TimerQueue<Deferred<D::Element>>,
}

impl<D: Document> fmt::Debug for Binder<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Binder")
            .field("container", &self.container)
            .field("guard_nested_roles", &self.guard_nested_roles)
            .field("button", &self.button)
            .field("list", &self.list)
            .field("pending", &self.timers.len())
            .finish()
    }
}

impl<D: Document + 'static> Binder<D> {
    /// Binds a fresh button/list handler pair to `container`.
    ///
    /// Callback overrides in `config` are resolved once, here.
    pub fn new(container: D::Element, config: Config<D>) -> Self {
        let callbacks = config.resolve();
        Self {
            container,
            guard_nested_roles: config.guard_nested_roles,
            button: ButtonHandler::new(config.button_delay, callbacks.clone()),
            list: ListHandler::new(config.list_delay, callbacks),
            timers: TimerQueue::new(),
        }
    }
}

impl<D: Document> Binder<D> {
    /// Returns the bound container.
    #[must_use]
    pub fn container(&self) -> D::Element {
        self.container
    }

    /// Returns the button handler.
    #[must_use]
    pub fn button(&self) -> &ButtonHandler<D> {
        &self.button
    }

    /// Returns the list handler.
    #[must_use]
    pub fn list(&self) -> &ListHandler<D> {
        &self.list
    }

    /// Returns the earliest time at which [`Binder::advance`] has work to do.
    #[must_use]
    pub fn next_deadline(&self) -> Option<u64> {
        self.timers.next_deadline()
    }

    /// Parses a host event name, then routes it like [`Binder::handle`].
    pub fn handle_named(
        &mut self,
        doc: &mut D,
        name: &str,
        target: D::Element,
        now: u64,
    ) -> Result<Routed<D::Element>, ParseGestureError> {
        let name: EventName = name.parse()?;
        Ok(self.handle(doc, name.gesture, target, now))
    }

    /// Routes `gesture` on `target` to the matching handlers.
    ///
    /// Timers that are already due at `now` are run first, so the gesture sees
    /// the document as it would have been had the host fired them on time.
    pub fn handle(
        &mut self,
        doc: &mut D,
        gesture: Gesture,
        target: D::Element,
        now: u64,
    ) -> Routed<D::Element> {
        self.advance(doc, now);

        let mut routed = Routed {
            button: None,
            item: None,
        };
        let Some((button, item)) = self.matches(doc, target) else {
            return routed;
        };

        if let Some(btn) = button.filter(|&btn| self.passes_guard(doc, target, btn)) {
            let delivered = match gesture {
                Gesture::Start => {
                    self.button.gesture_start(doc, &mut self.timers, btn);
                    true
                }
                Gesture::End => {
                    self.button.gesture_end(&mut self.timers, now, btn);
                    true
                }
                Gesture::Leave => {
                    self.button.gesture_leave(&mut self.timers, now, btn);
                    true
                }
                Gesture::Cancel => {
                    self.button.gesture_cancel(&mut self.timers, now, btn);
                    true
                }
                Gesture::Move => false,
            };
            if delivered {
                routed.button = Some(btn);
            }
        }

        if let Some(m) = item.filter(|m| self.passes_guard(doc, target, m.item)) {
            let list = m.container.has(Role::List);
            let nav = m.container.has(Role::Nav);
            let delivered = match gesture {
                Gesture::Start if list => {
                    self.list.gesture_start(&mut self.timers, now, m.item);
                    true
                }
                Gesture::Move if list => {
                    self.list.gesture_move(doc, &mut self.timers, m.item);
                    true
                }
                Gesture::End if list => {
                    self.list.gesture_end(doc, &mut self.timers, m.item);
                    true
                }
                Gesture::Cancel if nav => {
                    self.list.gesture_cancel(&mut self.timers, now, m.item);
                    true
                }
                _ => false,
            };
            if delivered {
                routed.item = Some(m.item);
            }
        }

        routed
    }

    /// Runs every deferred effect due at or before `now`, in deadline order.
    ///
    /// Returns the number of effects run.
    pub fn advance(&mut self, doc: &mut D, now: u64) -> usize {
        let mut ran = 0;
        while let Some((token, deferred)) = self.timers.pop_due(now) {
            if self.fire(doc, token, deferred) {
                ran += 1;
            }
        }
        ran
    }

    /// Drops every pending deferred effect without running it.
    pub fn cancel_all(&mut self) {
        self.button.cancel_pending(&mut self.timers);
        self.list.cancel_pending(&mut self.timers);
        debug_assert!(self.timers.is_empty(), "every timer belongs to a handler slot");
    }

    fn fire(&mut self, doc: &mut D, token: TimerToken, deferred: Deferred<D::Element>) -> bool {
        match deferred {
            Deferred::Button(action) => self.button.fire(doc, token, action),
            Deferred::List(action) => self.list.fire(doc, token, action),
        }
    }

    /// Finds the deepest button and list item between `target` and the container.
    ///
    /// Returns `None` if `target` is not a descendant of the container.
    fn matches(
        &self,
        doc: &D,
        target: D::Element,
    ) -> Option<(Option<D::Element>, Option<ItemMatch<D::Element>>)> {
        let mut button = None;
        let mut item = None;
        let mut current = target;
        while current != self.container {
            let parent = doc.parent(current)?;
            if button.is_none() && roles_of(doc, current).has(Role::Button) {
                button = Some(current);
            }
            if item.is_none() {
                let container = roles_of(doc, parent);
                if container.is_container() {
                    item = Some(ItemMatch {
                        item: current,
                        container,
                    });
                }
            }
            current = parent;
        }
        Some((button, item))
    }

    /// Walks from `target` up to `matched` (exclusive) looking for a nested role.
    fn passes_guard(&self, doc: &D, target: D::Element, matched: D::Element) -> bool {
        if !self.guard_nested_roles {
            return true;
        }
        let mut current = target;
        while current != matched {
            if doc.role_attr(current).is_some() {
                log::debug!(
                    "{target:?} is inside a nested role at {current:?}; ignored by {matched:?}"
                );
                return false;
            }
            match doc.parent(current) {
                Some(parent) => current = parent,
                None => return true,
            }
        }
        true
    }
}

fn roles_of<D: Document>(doc: &D, el: D::Element) -> Roles {
    doc.role_attr(el).map(Roles::parse).unwrap_or_default()
}
