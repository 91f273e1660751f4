// Copyright 2026 the Tappivate Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! An in-memory [`Document`] for tests and headless hosts.
//!
//! [`MemoryDocument`] is a plain arena tree: every node has an optional role
//! attribute and a set of markers. Nodes are never removed.
//!
//! ```
//! use tappivate::host::{ACTIVE, Document};
//! use tappivate::memory::MemoryDocument;
//!
//! let mut doc = MemoryDocument::new();
//! let list = doc.append(doc.root(), Some("list"));
//! let a = doc.append(list, None);
//! let b = doc.append(list, None);
//!
//! doc.add_marker(b, ACTIVE);
//! assert_eq!(doc.siblings(a, Some(ACTIVE)), vec![b]);
//! assert_eq!(doc.siblings(a, None), vec![b]);
//! ```

use alloc::string::String;
use alloc::vec::Vec;

use crate::host::Document;

/// Handle to a node in a [`MemoryDocument`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

#[derive(Clone, Debug, Default)]
struct Node {
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    role: Option<String>,
    markers: Vec<String>,
}

/// An arena-backed element tree.
#[derive(Clone, Debug)]
pub struct MemoryDocument {
    nodes: Vec<Node>,
}

impl Default for MemoryDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryDocument {
    /// Creates a document holding only a root node.
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: alloc::vec![Node::default()],
        }
    }

    /// Returns the root node.
    #[must_use]
    pub const fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Appends a new last child to `parent`, with an optional role attribute.
    ///
    /// # Panics
    ///
    /// Panics if `parent` does not belong to this document.
    pub fn append(&mut self, parent: NodeId, role: Option<&str>) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes[parent.0].children.push(id);
        self.nodes.push(Node {
            parent: Some(parent),
            role: role.map(String::from),
            ..Node::default()
        });
        id
    }

    /// Replaces the role attribute of `node`.
    pub fn set_role(&mut self, node: NodeId, role: Option<&str>) {
        self.nodes[node.0].role = role.map(String::from);
    }

    /// Returns the markers on `node`, in the order they were added.
    #[must_use]
    pub fn markers(&self, node: NodeId) -> Vec<&str> {
        self.nodes[node.0].markers.iter().map(String::as_str).collect()
    }

    /// Returns every node bearing `name`, in creation order.
    #[must_use]
    pub fn with_marker(&self, name: &str) -> Vec<NodeId> {
        (0..self.nodes.len())
            .map(NodeId)
            .filter(|&id| self.has_marker(id, name))
            .collect()
    }
}

impl Document for MemoryDocument {
    type Element = NodeId;

    fn parent(&self, element: NodeId) -> Option<NodeId> {
        self.nodes[element.0].parent
    }

    fn children(&self, element: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes[element.0].children.iter().copied()
    }

    fn role_attr(&self, element: NodeId) -> Option<&str> {
        self.nodes[element.0].role.as_deref()
    }

    fn has_marker(&self, element: NodeId, name: &str) -> bool {
        self.nodes[element.0].markers.iter().any(|m| m == name)
    }

    fn add_marker(&mut self, element: NodeId, name: &str) {
        if !self.has_marker(element, name) {
            self.nodes[element.0].markers.push(name.into());
        }
    }

    fn remove_marker(&mut self, element: NodeId, name: &str) {
        self.nodes[element.0].markers.retain(|m| m != name);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{ACTIVE, SELECTED};
    use alloc::vec;

    #[test]
    fn markers_are_idempotent() {
        let mut doc = MemoryDocument::new();
        let n = doc.append(doc.root(), None);
        doc.add_marker(n, ACTIVE);
        doc.add_marker(n, ACTIVE);
        assert_eq!(doc.markers(n), vec![ACTIVE]);
        doc.remove_marker(n, ACTIVE);
        doc.remove_marker(n, ACTIVE);
        assert!(doc.markers(n).is_empty());
    }

    #[test]
    fn root_has_no_siblings() {
        let doc = MemoryDocument::new();
        assert!(doc.siblings(doc.root(), None).is_empty());
    }

    #[test]
    fn siblings_filter_by_marker() {
        let mut doc = MemoryDocument::new();
        let list = doc.append(doc.root(), Some("list"));
        let a = doc.append(list, None);
        let b = doc.append(list, None);
        let c = doc.append(list, None);
        doc.add_marker(c, SELECTED);

        assert_eq!(doc.siblings(a, None), vec![b, c]);
        assert_eq!(doc.siblings(a, Some(SELECTED)), vec![c]);
        assert!(doc.siblings(c, Some(SELECTED)).is_empty());
    }

    #[test]
    fn roles_can_change() {
        let mut doc = MemoryDocument::new();
        let n = doc.append(doc.root(), Some("btn"));
        assert_eq!(doc.role_attr(n), Some("btn"));
        doc.set_role(n, None);
        assert_eq!(doc.role_attr(n), None);
    }
}
