//! Read-only diagnostics: height, node counts and invariant checks.

use super::RTree;
use super::node::{EntryItem, NodeId, union_of};
use crate::error::{GeoSearchError, Result};
use serde::Serialize;

/// Node and entry tallies for a tree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct NodeCounts {
    pub leaf_count: usize,
    pub internal_count: usize,
    /// Point entries summed over all leaves.
    pub total_point_entries: usize,
}

/// Summary used when tuning `max_entries`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TreeStats {
    pub height: usize,
    pub counts: NodeCounts,
    pub max_entries: usize,
    pub min_entries: usize,
    pub points: usize,
}

impl<T> RTree<T> {
    /// Number of levels; a lone leaf root has height 1.
    pub fn height(&self) -> usize {
        self.height_of(self.root)
    }

    fn height_of(&self, id: NodeId) -> usize {
        let node = self.node(id);
        if node.is_leaf() {
            return 1;
        }
        1 + node
            .entries
            .iter()
            .filter_map(|e| e.child_id())
            .map(|child| self.height_of(child))
            .max()
            .unwrap_or(0)
    }

    pub fn count_nodes(&self) -> NodeCounts {
        let mut counts = NodeCounts::default();
        self.count_from(self.root, &mut counts);
        counts
    }

    fn count_from(&self, id: NodeId, counts: &mut NodeCounts) {
        let node = self.node(id);
        if node.is_leaf() {
            counts.leaf_count += 1;
            counts.total_point_entries += node.len();
            return;
        }
        counts.internal_count += 1;
        for child in node.entries.iter().filter_map(|e| e.child_id()) {
            self.count_from(child, counts);
        }
    }

    pub fn stats(&self) -> TreeStats {
        TreeStats {
            height: self.height(),
            counts: self.count_nodes(),
            max_entries: self.max_entries(),
            min_entries: self.min_entries(),
            points: self.len,
        }
    }

    /// Walk the whole tree and verify its structural invariants:
    ///
    /// - every cached rectangle is the union of its entries (absent when empty)
    /// - every child entry's rectangle equals the child's cached rectangle
    /// - no node holds more than `max_entries` entries
    /// - leaves hold only points, internal nodes only children
    /// - child parent handles point back at the holder, the root has none
    /// - all leaves sit at the same depth
    /// - every arena slot is reachable and the point count matches `len()`
    pub fn check_invariants(&self) -> Result<()> {
        if self.node(self.root).parent.is_some() {
            return Err(corrupt("root has a parent handle".to_string()));
        }

        let mut walk = Walk::default();
        self.check_node(self.root, 1, &mut walk)?;

        if walk.points != self.len {
            return Err(corrupt(format!(
                "found {} points, expected {}",
                walk.points, self.len
            )));
        }
        if walk.visited != self.arena.len() {
            return Err(corrupt(format!(
                "{} of {} nodes reachable from the root",
                walk.visited,
                self.arena.len()
            )));
        }
        Ok(())
    }

    fn check_node(&self, id: NodeId, depth: usize, walk: &mut Walk) -> Result<()> {
        let node = self.node(id);
        walk.visited += 1;

        if node.mbr != union_of(&node.entries) {
            return Err(corrupt(format!(
                "node {} caches {:?}, entries cover {:?}",
                id.get(),
                node.mbr,
                union_of(&node.entries)
            )));
        }
        if node.len() > self.config.max_entries {
            return Err(corrupt(format!(
                "node {} holds {} entries, max is {}",
                id.get(),
                node.len(),
                self.config.max_entries
            )));
        }
        if node.entries.is_empty() && id != self.root {
            return Err(corrupt(format!("non-root node {} is empty", id.get())));
        }

        if node.is_leaf() {
            match walk.leaf_depth {
                Some(expected) if expected != depth => {
                    return Err(corrupt(format!(
                        "leaf {} at depth {}, other leaves at {}",
                        id.get(),
                        depth,
                        expected
                    )));
                }
                _ => walk.leaf_depth = Some(depth),
            }
        }

        for entry in &node.entries {
            match (&entry.item, node.is_leaf()) {
                (EntryItem::Point(_), true) => walk.points += 1,
                (EntryItem::Child(child), false) => {
                    let child_node = self.node(*child);
                    if child_node.parent != Some(id) {
                        return Err(corrupt(format!(
                            "node {} has parent {:?}, held by {}",
                            child.get(),
                            child_node.parent.map(NodeId::get),
                            id.get()
                        )));
                    }
                    if child_node.mbr != Some(entry.mbr) {
                        return Err(corrupt(format!(
                            "entry for node {} is stale: {:?} vs {:?}",
                            child.get(),
                            entry.mbr,
                            child_node.mbr
                        )));
                    }
                    self.check_node(*child, depth + 1, walk)?;
                }
                _ => {
                    return Err(corrupt(format!(
                        "node {} mixes point and child entries",
                        id.get()
                    )));
                }
            }
        }
        Ok(())
    }
}

#[derive(Default)]
struct Walk {
    visited: usize,
    points: usize,
    leaf_depth: Option<usize>,
}

fn corrupt(msg: String) -> GeoSearchError {
    GeoSearchError::CorruptIndex(msg)
}
