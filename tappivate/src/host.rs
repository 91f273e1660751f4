// Copyright 2026 the Tappivate Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The host document contract.
//!
//! Tappivate never owns elements. It reads structure (parents, children, role
//! attributes) and reads or writes named markers through [`Document`], which
//! the embedding toolkit implements over its own tree.

use alloc::vec::Vec;
use core::fmt::Debug;

/// Marker set on an element that is showing press feedback.
pub const ACTIVE: &str = "active";

/// Marker set on the list item that holds the current selection.
pub const SELECTED: &str = "selected";

/// A host document that Tappivate can query and mark up.
///
/// Marker operations must be idempotent: adding a marker that is already
/// present, or removing one that is absent, leaves the element unchanged.
pub trait Document {
    /// Host handle for an element.
    type Element: Copy + Eq + Debug;

    /// Returns the parent of `element`, or `None` at the root.
    fn parent(&self, element: Self::Element) -> Option<Self::Element>;

    /// Returns the children of `element` in document order.
    fn children(&self, element: Self::Element) -> impl Iterator<Item = Self::Element> + '_;

    /// Returns the raw role attribute of `element`, if it declares one.
    ///
    /// The value is a space-separated list of role words, for example
    /// `"list nav"`. See [`Roles::parse`](crate::role::Roles::parse).
    fn role_attr(&self, element: Self::Element) -> Option<&str>;

    /// Returns `true` if `element` currently bears the marker `name`.
    fn has_marker(&self, element: Self::Element, name: &str) -> bool;

    /// Sets the marker `name` on `element`.
    fn add_marker(&mut self, element: Self::Element, name: &str);

    /// Clears the marker `name` from `element`.
    fn remove_marker(&mut self, element: Self::Element, name: &str);

    /// Returns the siblings of `element` (same parent, excluding `element`).
    ///
    /// When `marker` is set, only siblings currently bearing it are returned.
    /// An element without a parent has no siblings.
    fn siblings(&self, element: Self::Element, marker: Option<&str>) -> Vec<Self::Element> {
        let Some(parent) = self.parent(element) else {
            return Vec::new();
        };
        self.children(parent)
            .filter(|&sibling| sibling != element)
            .filter(|&sibling| marker.is_none_or(|name| self.has_marker(sibling, name)))
            .collect()
    }
}
