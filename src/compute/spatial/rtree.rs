//! Dynamic R-tree over geographic points with linear-split overflow handling.
//!
//! The tree answers "which points lie within R km of this coordinate" without
//! scanning every point. Every node caches the minimum bounding rectangle
//! (MBR) of its entries; queries skip any subtree whose rectangle misses the
//! query window.
//!
//! ## Insertion
//!
//! 1. **ChooseLeaf**: descend from the root, at each level following the entry
//!    whose rectangle grows the least (ties go to the smaller rectangle).
//! 2. **Append**: the point is added to the chosen leaf.
//! 3. **Overflow**: a node holding more than `max_entries` entries is split in
//!    two with the linear split heuristic. The parent's entry for the node is
//!    replaced by the two halves, which may overflow the parent in turn. A
//!    root split grows the tree by one level, so all leaves stay at the same
//!    depth.
//! 4. **Refresh**: ancestor rectangles are widened along the insertion path.
//!
//! ## Radius search
//!
//! 1. **Candidate window**: the radius is converted to a rectangle in degrees
//!    that circumscribes the query circle (see [`SearchWindow`]).
//! 2. **Pruning**: depth-first descent skipping subtrees that miss the window.
//! 3. **Exact filtering**: surviving points are re-checked with the haversine
//!    distance and sorted nearest first.
//!
//! ## Example
//!
//! ```rust
//! use geosearch::{GeoPoint, RTree};
//!
//! let mut tree = RTree::with_max_entries(4)?;
//! tree.insert(GeoPoint::new(10.776, 106.700, "Ben Thanh"));
//! tree.insert(GeoPoint::new(10.823, 106.629, "Tan Son Nhat"));
//! tree.insert(GeoPoint::new(21.028, 105.854, "Hoan Kiem"));
//!
//! let hits = tree.search(&GeoPoint::at(10.78, 106.69), 15.0)?;
//! assert_eq!(hits.len(), 2);
//! assert_eq!(*hits[0].point.payload(), "Ben Thanh");
//! # Ok::<(), geosearch::GeoSearchError>(())
//! ```
//!
//! [`SearchWindow`]: crate::compute::spatial::distance::SearchWindow

mod insert;
mod node;
mod search;
mod split;
mod stats;

pub use search::SearchHit;
pub use stats::{NodeCounts, TreeStats};

use crate::compute::validation::{validate_point, validate_points};
use crate::config::TreeConfig;
use crate::error::Result;
use geosearch_types::{GeoPoint, Mbr};
use node::{Node, NodeId, NodeKind};

/// R-tree index of [`GeoPoint`]s supporting insertion and radius search.
///
/// The tree is a plain single-owner value. It can be shared read-only across
/// threads once built (for example behind an `Arc`); concurrent mutation needs
/// external locking such as [`SyncRTree`](crate::sync::SyncRTree).
#[derive(Debug, Clone)]
pub struct RTree<T> {
    config: TreeConfig,
    root: NodeId,
    arena: Vec<Node<T>>,
    len: usize,
}

impl<T> RTree<T> {
    /// Create an empty tree. Fails when `config.max_entries < 2`.
    pub fn new(config: TreeConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::with_valid_config(config))
    }

    /// Create an empty tree holding at most `max_entries` entries per node.
    pub fn with_max_entries(max_entries: usize) -> Result<Self> {
        Self::new(TreeConfig::new(max_entries))
    }

    fn with_valid_config(config: TreeConfig) -> Self {
        Self {
            config,
            root: NodeId::new(0),
            arena: vec![Node::new(NodeKind::Leaf, None)],
            len: 0,
        }
    }

    /// Insert a point after checking that its coordinates are finite and in range.
    pub fn try_insert(&mut self, point: GeoPoint<T>) -> Result<()> {
        validate_point(&point)?;
        self.insert(point);
        Ok(())
    }

    /// Number of points stored in the tree.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn config(&self) -> &TreeConfig {
        &self.config
    }

    pub fn max_entries(&self) -> usize {
        self.config.max_entries
    }

    pub fn min_entries(&self) -> usize {
        self.config.min_entries()
    }

    /// Rectangle covering every stored point, `None` for an empty tree.
    pub fn root_mbr(&self) -> Option<Mbr> {
        self.node(self.root).mbr
    }

    /// Insert every point, or none of them when any point fails validation.
    ///
    /// The error names the index of the first bad point.
    pub fn try_extend(&mut self, points: Vec<GeoPoint<T>>) -> Result<()> {
        validate_points(&points)?;
        self.extend(points);
        Ok(())
    }

    /// Iterate over every stored point in depth-first traversal order.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            tree: self,
            stack: vec![(self.root, 0)],
        }
    }

    pub(crate) fn node(&self, id: NodeId) -> &Node<T> {
        &self.arena[id.get()]
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut Node<T> {
        &mut self.arena[id.get()]
    }

    pub(crate) fn alloc(&mut self, node: Node<T>) -> NodeId {
        let id = NodeId::new(self.arena.len());
        self.arena.push(node);
        id
    }
}

/// Depth-first iterator over the points of an [`RTree`].
pub struct Iter<'a, T> {
    tree: &'a RTree<T>,
    /// (node, next entry index) for each level of the current path
    stack: Vec<(NodeId, usize)>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a GeoPoint<T>;

    fn next(&mut self) -> Option<Self::Item> {
        let tree = self.tree;
        while let Some((id, pos)) = self.stack.last_mut() {
            let node = tree.node(*id);
            let Some(entry) = node.entries.get(*pos) else {
                self.stack.pop();
                continue;
            };
            *pos += 1;
            match entry.child_id() {
                Some(child) => self.stack.push((child, 0)),
                None => return entry.as_point(),
            }
        }
        None
    }
}

impl<'a, T> IntoIterator for &'a RTree<T> {
    type Item = &'a GeoPoint<T>;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T> Default for RTree<T> {
    fn default() -> Self {
        Self::with_valid_config(TreeConfig::default())
    }
}

impl<T> Extend<GeoPoint<T>> for RTree<T> {
    fn extend<I: IntoIterator<Item = GeoPoint<T>>>(&mut self, iter: I) {
        for point in iter {
            self.insert(point);
        }
    }
}

impl<T> FromIterator<GeoPoint<T>> for RTree<T> {
    fn from_iter<I: IntoIterator<Item = GeoPoint<T>>>(iter: I) -> Self {
        let mut tree = Self::default();
        tree.extend(iter);
        tree
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GeoSearchError;

    #[test]
    fn test_new_tree_is_single_empty_leaf() {
        let tree: RTree<()> = RTree::default();
        assert!(tree.is_empty());
        assert_eq!(tree.len(), 0);
        assert_eq!(tree.height(), 1);
        assert!(tree.root_mbr().is_none());
        assert_eq!(tree.max_entries(), 5);
        assert_eq!(tree.min_entries(), 2);
        tree.check_invariants().unwrap();
    }

    #[test]
    fn test_rejects_bad_capacity() {
        assert!(matches!(
            RTree::<()>::with_max_entries(0),
            Err(GeoSearchError::InvalidConfig(_))
        ));
        assert!(RTree::<()>::with_max_entries(1).is_err());
        assert!(RTree::<()>::with_max_entries(2).is_ok());
    }

    #[test]
    fn test_try_insert_validates() {
        let mut tree = RTree::default();
        assert!(tree.try_insert(GeoPoint::new(10.0, 106.0, 1)).is_ok());
        assert!(matches!(
            tree.try_insert(GeoPoint::new(f64::NAN, 106.0, 2)),
            Err(GeoSearchError::InvalidInput(_))
        ));
        assert!(tree.try_insert(GeoPoint::new(10.0, 190.0, 3)).is_err());
        assert_eq!(tree.len(), 1);
    }

    #[test]
    fn test_iter_and_from_iterator() {
        let tree: RTree<u32> = (0..40)
            .map(|i| GeoPoint::new(10.0 + i as f64 * 0.01, 106.0, i))
            .collect();
        assert_eq!(tree.len(), 40);
        let mut payloads: Vec<u32> = tree.iter().map(|p| *p.payload()).collect();
        payloads.sort_unstable();
        assert_eq!(payloads, (0..40).collect::<Vec<_>>());
        tree.check_invariants().unwrap();
    }

    #[test]
    fn test_iter_follows_traversal_order() {
        let mut tree = RTree::with_max_entries(2).unwrap();
        tree.insert(GeoPoint::new(10.0, 106.0, 0));
        tree.insert(GeoPoint::new(10.01, 106.0, 1));
        tree.insert(GeoPoint::new(20.0, 110.0, 2));
        // Root split: the leaf keeping the old slot holds the far point.
        let order: Vec<i32> = tree.iter().map(|p| *p.payload()).collect();
        assert_eq!(order, vec![2, 0, 1]);
        let everything = Mbr::new(-90.0, 90.0, -180.0, 180.0);
        let by_rect: Vec<i32> = tree.search_rect(&everything).iter().map(|p| *p.payload()).collect();
        assert_eq!(order, by_rect);
    }

    #[test]
    fn test_try_extend_is_all_or_nothing() {
        let mut tree = RTree::default();
        let err = tree
            .try_extend(vec![
                GeoPoint::new(10.0, 106.0, 'a'),
                GeoPoint::new(95.0, 106.0, 'b'),
            ])
            .unwrap_err();
        assert!(err.to_string().contains("index 1"));
        assert!(tree.is_empty());

        tree.try_extend(vec![GeoPoint::new(10.0, 106.0, 'a')]).unwrap();
        assert_eq!(tree.len(), 1);
    }

    #[test]
    fn test_root_mbr_tracks_points() {
        let mut tree = RTree::with_max_entries(3).unwrap();
        tree.extend([
            GeoPoint::new(10.0, 106.0, ()),
            GeoPoint::new(12.0, 104.0, ()),
            GeoPoint::new(11.0, 108.0, ()),
            GeoPoint::new(9.0, 105.0, ()),
        ]);
        assert_eq!(tree.root_mbr(), Some(Mbr::new(9.0, 12.0, 104.0, 108.0)));
    }
}
