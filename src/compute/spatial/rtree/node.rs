//! Arena-allocated tree nodes.
//!
//! Nodes are addressed by [`NodeId`] handles into the tree's arena. Child
//! handles stored in internal entries are the ownership edges of the tree;
//! the `parent` handle is a back-reference used only while propagating a
//! split upward.

use geosearch_types::{GeoPoint, Mbr};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub(crate) struct NodeId(usize);

impl NodeId {
    pub(crate) const fn new(i: usize) -> Self {
        Self(i)
    }

    pub(crate) const fn get(self) -> usize {
        self.0
    }
}

/// Whether a node stores points directly or child nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum NodeKind {
    Leaf,
    Internal,
}

#[derive(Debug, Clone)]
pub(crate) enum EntryItem<T> {
    Point(GeoPoint<T>),
    Child(NodeId),
}

/// One slot of a node: a rectangle paired with a point or a child handle.
#[derive(Debug, Clone)]
pub(crate) struct Entry<T> {
    pub(crate) mbr: Mbr,
    pub(crate) item: EntryItem<T>,
}

impl<T> Entry<T> {
    pub(crate) fn point(point: GeoPoint<T>) -> Self {
        Self {
            mbr: Mbr::from_point(&point),
            item: EntryItem::Point(point),
        }
    }

    pub(crate) fn child(id: NodeId, mbr: Mbr) -> Self {
        Self {
            mbr,
            item: EntryItem::Child(id),
        }
    }

    pub(crate) fn child_id(&self) -> Option<NodeId> {
        match self.item {
            EntryItem::Child(id) => Some(id),
            EntryItem::Point(_) => None,
        }
    }

    pub(crate) fn as_point(&self) -> Option<&GeoPoint<T>> {
        match &self.item {
            EntryItem::Point(point) => Some(point),
            EntryItem::Child(_) => None,
        }
    }
}

#[derive(Debug, Clone)]
pub(crate) struct Node<T> {
    pub(crate) kind: NodeKind,
    pub(crate) entries: Vec<Entry<T>>,
    /// Union of all entry rectangles; `None` while the node is empty.
    pub(crate) mbr: Option<Mbr>,
    pub(crate) parent: Option<NodeId>,
}

impl<T> Node<T> {
    pub(crate) fn new(kind: NodeKind, parent: Option<NodeId>) -> Self {
        Self {
            kind,
            entries: Vec::new(),
            mbr: None,
            parent,
        }
    }

    pub(crate) fn with_entries(kind: NodeKind, parent: Option<NodeId>, entries: Vec<Entry<T>>) -> Self {
        let mbr = union_of(&entries);
        Self {
            kind,
            entries,
            mbr,
            parent,
        }
    }

    pub(crate) fn is_leaf(&self) -> bool {
        self.kind == NodeKind::Leaf
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    /// Recompute the cached rectangle from the current entries.
    pub(crate) fn update_mbr(&mut self) {
        self.mbr = union_of(&self.entries);
    }

    /// Position of the entry pointing at `child`, if any.
    pub(crate) fn position_of(&self, child: NodeId) -> Option<usize> {
        self.entries.iter().position(|e| e.child_id() == Some(child))
    }
}

pub(crate) fn union_of<T>(entries: &[Entry<T>]) -> Option<Mbr> {
    entries
        .iter()
        .map(|e| e.mbr)
        .reduce(|acc, mbr| acc.union(&mbr))
}
