//! Thread-safe wrapper for concurrent tree access.
//!
//! `SyncRTree` wraps an [`RTree`] in `Arc<RwLock<_>>`: inserts (including any
//! split cascade) take the exclusive lock, queries take the shared one.
//!
//! Enable the `sync` feature (on by default) to use this module.
//!
//! # Examples
//!
//! ```rust
//! use geosearch::{GeoPoint, SyncRTree, TreeConfig};
//! use std::thread;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let tree = SyncRTree::new(TreeConfig::new(8))?;
//!
//! let writer = tree.clone();
//! let handle = thread::spawn(move || {
//!     for i in 0..100 {
//!         writer.insert(GeoPoint::new(10.0 + i as f64 * 0.001, 106.0, i));
//!     }
//! });
//! handle.join().unwrap();
//!
//! let hits = tree.search(&GeoPoint::at(10.05, 106.0), 1.0)?;
//! assert!(!hits.is_empty());
//! # Ok(())
//! # }
//! ```

use crate::compute::spatial::{NodeCounts, RTree, TreeStats};
use crate::config::TreeConfig;
use crate::error::Result;
use geosearch_types::{GeoPoint, Mbr};
use parking_lot::RwLock;
use std::sync::Arc;

/// Thread-safe handle to a shared [`RTree`].
///
/// Cloning is cheap and yields another handle to the same tree. Query results
/// are returned owned because they cannot borrow past the read guard.
pub struct SyncRTree<T> {
    inner: Arc<RwLock<RTree<T>>>,
}

impl<T> Clone for SyncRTree<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> SyncRTree<T> {
    pub fn new(config: TreeConfig) -> Result<Self> {
        Ok(Self::from_tree(RTree::new(config)?))
    }

    /// Share an already built tree.
    pub fn from_tree(tree: RTree<T>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(tree)),
        }
    }

    pub fn insert(&self, point: GeoPoint<T>) {
        self.inner.write().insert(point);
    }

    pub fn try_insert(&self, point: GeoPoint<T>) -> Result<()> {
        self.inner.write().try_insert(point)
    }

    pub fn count_within_radius<C>(&self, center: &GeoPoint<C>, radius_km: f64) -> Result<usize> {
        self.inner.read().count_within_radius(center, radius_km)
    }

    /// Run `f` against the tree under the shared lock.
    ///
    /// Use this to consume borrowed results such as [`RTree::search`] hits
    /// without cloning payloads.
    pub fn read<R>(&self, f: impl FnOnce(&RTree<T>) -> R) -> R {
        f(&self.inner.read())
    }

    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    pub fn height(&self) -> usize {
        self.inner.read().height()
    }

    pub fn count_nodes(&self) -> NodeCounts {
        self.inner.read().count_nodes()
    }

    pub fn stats(&self) -> TreeStats {
        self.inner.read().stats()
    }

    /// Take the tree back if this is the last handle.
    pub fn into_inner(self) -> Option<RTree<T>> {
        Arc::into_inner(self.inner).map(RwLock::into_inner)
    }
}

impl<T: Clone> SyncRTree<T> {
    /// Radius search returning owned `(point, distance_km)` pairs, nearest first.
    pub fn search<C>(&self, center: &GeoPoint<C>, radius_km: f64) -> Result<Vec<(GeoPoint<T>, f64)>> {
        let tree = self.inner.read();
        let hits = tree.search(center, radius_km)?;
        Ok(hits
            .into_iter()
            .map(|hit| (hit.point.clone(), hit.distance_km))
            .collect())
    }

    pub fn search_rect(&self, rect: &Mbr) -> Vec<GeoPoint<T>> {
        self.inner
            .read()
            .search_rect(rect)
            .into_iter()
            .cloned()
            .collect()
    }
}
