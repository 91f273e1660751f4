// Copyright 2026 the Tappivate Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Configuration for a [`Binder`](crate::binder::Binder).
//!
//! Every field has a concrete default, so `Config::default()` gives the stock
//! behavior: buttons deactivate 100 ms after release, list items activate
//! 150 ms after touch, and feedback is expressed as the [`ACTIVE`] and
//! [`SELECTED`] markers.
//!
//! Overrides replace a default callback wholesale. They are resolved into
//! [`Callbacks`] once, when the binder is built.
//!
//! ```
//! use tappivate::config::Config;
//! use tappivate::host::Document;
//! use tappivate::memory::MemoryDocument;
//!
//! let config = Config::<MemoryDocument>::default()
//!     .with_delay(80)
//!     .with_activate(|doc, el| doc.add_marker(el, "pressed"))
//!     .with_deactivate(|doc, el| doc.remove_marker(el, "pressed"));
//! assert_eq!(config.button_delay, 80);
//! assert_eq!(config.list_delay, 80);
//! ```

use alloc::rc::Rc;
use core::fmt;

use crate::host::{ACTIVE, Document, SELECTED};

/// Default delay before a released button loses its active marker, in milliseconds.
pub const BUTTON_DEACTIVATION_DELAY: u64 = 100;

/// Default delay before a touched list item gains its active marker, in milliseconds.
pub const LIST_ITEM_ACTIVATION_DELAY: u64 = 150;

/// A callback that mutates one element.
pub type Effect<D> = Rc<dyn Fn(&mut D, <D as Document>::Element)>;

/// A callback that queries one element.
pub type Query<D> = Rc<dyn Fn(&D, <D as Document>::Element) -> bool>;

/// Binder configuration: delays plus optional callback overrides.
pub struct Config<D: Document> {
    /// Delay between a button's release and its deactivation, in milliseconds.
    pub button_delay: u64,
    /// Delay between a list item's touch and its activation, in milliseconds.
    pub list_delay: u64,
    /// Ignore events whose target sits inside a nested role element.
    ///
    /// When set, an event only reaches a handler if no element between the
    /// event target (inclusive) and the matched element (exclusive) declares
    /// a role attribute, so inner roles take precedence over outer ones.
    pub guard_nested_roles: bool,
    activate: Option<Effect<D>>,
    deactivate: Option<Effect<D>>,
    select: Option<Effect<D>>,
    deselect: Option<Effect<D>>,
    is_active: Option<Query<D>>,
    is_selected: Option<Query<D>>,
}

impl<D: Document> Default for Config<D> {
    fn default() -> Self {
        Self {
            button_delay: BUTTON_DEACTIVATION_DELAY,
            list_delay: LIST_ITEM_ACTIVATION_DELAY,
            guard_nested_roles: true,
            activate: None,
            deactivate: None,
            select: None,
            deselect: None,
            is_active: None,
            is_selected: None,
        }
    }
}

impl<D: Document> fmt::Debug for Config<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("button_delay", &self.button_delay)
            .field("list_delay", &self.list_delay)
            .field("guard_nested_roles", &self.guard_nested_roles)
            .field("activate", &self.activate.is_some())
            .field("deactivate", &self.deactivate.is_some())
            .field("select", &self.select.is_some())
            .field("deselect", &self.deselect.is_some())
            .field("is_active", &self.is_active.is_some())
            .field("is_selected", &self.is_selected.is_some())
            .finish()
    }
}

impl<D: Document> Config<D> {
    /// Sets both the button and the list delay.
    #[must_use]
    pub fn with_delay(mut self, delay: u64) -> Self {
        self.button_delay = delay;
        self.list_delay = delay;
        self
    }

    /// Sets the button deactivation delay.
    #[must_use]
    pub fn with_button_delay(mut self, delay: u64) -> Self {
        self.button_delay = delay;
        self
    }

    /// Sets the list item activation delay.
    #[must_use]
    pub fn with_list_delay(mut self, delay: u64) -> Self {
        self.list_delay = delay;
        self
    }

    /// Enables or disables the nested-role guard.
    #[must_use]
    pub fn with_nested_role_guard(mut self, enabled: bool) -> Self {
        self.guard_nested_roles = enabled;
        self
    }

    /// Overrides how an element is activated.
    #[must_use]
    pub fn with_activate(mut self, f: impl Fn(&mut D, D::Element) + 'static) -> Self {
        self.activate = Some(Rc::new(f));
        self
    }

    /// Overrides how an element is deactivated.
    #[must_use]
    pub fn with_deactivate(mut self, f: impl Fn(&mut D, D::Element) + 'static) -> Self {
        self.deactivate = Some(Rc::new(f));
        self
    }

    /// Overrides how a list item is selected.
    #[must_use]
    pub fn with_select(mut self, f: impl Fn(&mut D, D::Element) + 'static) -> Self {
        self.select = Some(Rc::new(f));
        self
    }

    /// Overrides how a list item is deselected.
    #[must_use]
    pub fn with_deselect(mut self, f: impl Fn(&mut D, D::Element) + 'static) -> Self {
        self.deselect = Some(Rc::new(f));
        self
    }

    /// Overrides how a list item's active state is queried.
    #[must_use]
    pub fn with_is_active(mut self, f: impl Fn(&D, D::Element) -> bool + 'static) -> Self {
        self.is_active = Some(Rc::new(f));
        self
    }

    /// Overrides how a list item's selected state is queried.
    #[must_use]
    pub fn with_is_selected(mut self, f: impl Fn(&D, D::Element) -> bool + 'static) -> Self {
        self.is_selected = Some(Rc::new(f));
        self
    }

    /// Fills every unset callback with its default.
    #[must_use]
    pub fn resolve(&self) -> Callbacks<D>
    where
        D: 'static,
    {
        Callbacks {
            activate: effect_or(&self.activate, |doc, el| doc.add_marker(el, ACTIVE)),
            deactivate: effect_or(&self.deactivate, |doc, el| doc.remove_marker(el, ACTIVE)),
            select: effect_or(&self.select, |doc, el| doc.add_marker(el, SELECTED)),
            deselect: effect_or(&self.deselect, |doc, el| doc.remove_marker(el, SELECTED)),
            is_active: query_or(&self.is_active, |doc, el| doc.has_marker(el, ACTIVE)),
            is_selected: query_or(&self.is_selected, |doc, el| doc.has_marker(el, SELECTED)),
        }
    }
}

fn effect_or<D: Document + 'static>(
    over: &Option<Effect<D>>,
    default: fn(&mut D, D::Element),
) -> Effect<D> {
    match over {
        Some(f) => f.clone(),
        None => Rc::new(default),
    }
}

fn query_or<D: Document + 'static>(
    over: &Option<Query<D>>,
    default: fn(&D, D::Element) -> bool,
) -> Query<D> {
    match over {
        Some(f) => f.clone(),
        None => Rc::new(default),
    }
}

/// Resolved callbacks shared by the button and list handlers.
pub struct Callbacks<D: Document> {
    activate: Effect<D>,
    deactivate: Effect<D>,
    select: Effect<D>,
    deselect: Effect<D>,
    is_active: Query<D>,
    is_selected: Query<D>,
}

impl<D: Document> Clone for Callbacks<D> {
    fn clone(&self) -> Self {
        Self {
            activate: self.activate.clone(),
            deactivate: self.deactivate.clone(),
            select: self.select.clone(),
            deselect: self.deselect.clone(),
            is_active: self.is_active.clone(),
            is_selected: self.is_selected.clone(),
        }
    }
}

impl<D: Document> fmt::Debug for Callbacks<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Callbacks").finish_non_exhaustive()
    }
}

impl<D: Document + 'static> Default for Callbacks<D> {
    fn default() -> Self {
        Config::default().resolve()
    }
}

impl<D: Document> Callbacks<D> {
    /// Runs the activate callback on `el`.
    pub fn activate(&self, doc: &mut D, el: D::Element) {
        (self.activate)(doc, el);
    }

    /// Runs the deactivate callback on `el`.
    pub fn deactivate(&self, doc: &mut D, el: D::Element) {
        (self.deactivate)(doc, el);
    }

    /// Runs the select callback on `el`.
    pub fn select(&self, doc: &mut D, el: D::Element) {
        (self.select)(doc, el);
    }

    /// Runs the deselect callback on `el`.
    pub fn deselect(&self, doc: &mut D, el: D::Element) {
        (self.deselect)(doc, el);
    }

    /// Returns whether `el` counts as active.
    #[must_use]
    pub fn is_active(&self, doc: &D, el: D::Element) -> bool {
        (self.is_active)(doc, el)
    }

    /// Returns whether `el` counts as selected.
    #[must_use]
    pub fn is_selected(&self, doc: &D, el: D::Element) -> bool {
        (self.is_selected)(doc, el)
    }
}
