//! ChooseLeaf, overflow propagation and rectangle refresh.

use super::RTree;
use super::node::{Entry, Node, NodeId, NodeKind};
use geosearch_types::{GeoPoint, Mbr};

impl<T> RTree<T> {
    /// Insert a point.
    ///
    /// Coordinates must be finite; use [`RTree::try_insert`] to validate them
    /// first. Never fails otherwise.
    pub fn insert(&mut self, point: GeoPoint<T>) {
        debug_assert!(
            point.is_finite(),
            "inserted coordinates must be finite: ({}, {})",
            point.latitude(),
            point.longitude()
        );

        let entry = Entry::point(point);
        let mbr = entry.mbr;
        let leaf = self.choose_leaf(&mbr);

        let node = self.node_mut(leaf);
        node.entries.push(entry);
        node.update_mbr();
        self.len += 1;

        let refresh_from = if self.node(leaf).len() > self.config.max_entries {
            self.handle_overflow(leaf)
        } else {
            Some(leaf)
        };
        if let Some(id) = refresh_from {
            self.refresh_ancestors(id);
        }

        debug_assert!(
            self.root_mbr().is_some_and(|root| root.contains(&mbr)),
            "root rectangle does not cover the inserted point"
        );
    }

    /// Descend to the leaf whose rectangle needs the least enlargement.
    fn choose_leaf(&self, mbr: &Mbr) -> NodeId {
        let mut current = self.root;
        loop {
            let node = self.node(current);
            if node.is_leaf() {
                return current;
            }

            // (child, enlargement, original area); first entry wins full ties
            let mut best: Option<(NodeId, f64, f64)> = None;
            for entry in &node.entries {
                let Some(child) = entry.child_id() else {
                    continue;
                };
                let area = entry.mbr.area();
                let enlargement = entry.mbr.enlargement(mbr);
                let better = match best {
                    None => true,
                    Some((_, best_enlargement, best_area)) => {
                        enlargement < best_enlargement
                            || (enlargement == best_enlargement && area < best_area)
                    }
                };
                if better {
                    best = Some((child, enlargement, area));
                }
            }

            match best {
                Some((child, _, _)) => current = child,
                None => return current,
            }
        }
    }

    /// Split `overflowing` and push the halves upward until a node has room.
    ///
    /// Returns the node from which ancestor rectangles still need refreshing,
    /// or `None` when the cascade created a new root.
    fn handle_overflow(&mut self, overflowing: NodeId) -> Option<NodeId> {
        let mut current = overflowing;
        loop {
            let parent = self.node(current).parent;
            let (first, second) = self.split_node(current);
            let first_mbr = self.covering_mbr(first);
            let second_mbr = self.covering_mbr(second);

            let Some(parent_id) = parent else {
                let root = Node::with_entries(
                    NodeKind::Internal,
                    None,
                    vec![
                        Entry::child(first, first_mbr),
                        Entry::child(second, second_mbr),
                    ],
                );
                let root_id = self.alloc(root);
                self.node_mut(first).parent = Some(root_id);
                self.node_mut(second).parent = Some(root_id);
                self.root = root_id;
                log::debug!(
                    "root split: tree height is now {} with {} points",
                    self.height(),
                    self.len
                );
                return None;
            };

            let parent_node = self.node_mut(parent_id);
            // The first half reuses the old node's slot, so drop the stale
            // entry before appending the halves.
            parent_node.entries.retain(|e| e.child_id() != Some(current));
            parent_node.entries.push(Entry::child(first, first_mbr));
            parent_node.entries.push(Entry::child(second, second_mbr));
            parent_node.update_mbr();
            let parent_len = parent_node.len();

            self.node_mut(first).parent = Some(parent_id);
            self.node_mut(second).parent = Some(parent_id);

            if parent_len > self.config.max_entries {
                current = parent_id;
            } else {
                return Some(parent_id);
            }
        }
    }

    /// Copy `start`'s rectangle into its parent entry and recompute every
    /// ancestor's cached rectangle up to the root.
    fn refresh_ancestors(&mut self, start: NodeId) {
        let mut current = start;
        while let Some(parent_id) = self.node(current).parent {
            let mbr = self.covering_mbr(current);
            let parent = self.node_mut(parent_id);
            let pos = parent
                .position_of(current)
                .expect("node must appear in its parent's entries");
            parent.entries[pos].mbr = mbr;
            parent.update_mbr();
            current = parent_id;
        }
    }

    /// Cached rectangle of a node that is known to be non-empty.
    fn covering_mbr(&self, id: NodeId) -> Mbr {
        self.node(id)
            .mbr
            .expect("non-empty node must cache a rectangle")
    }
}
