//! Rectangle range queries and exact-radius search.

use super::RTree;
use super::node::{EntryItem, NodeId};
use crate::compute::spatial::distance::{SearchWindow, distance_km};
use crate::compute::validation::{validate_point, validate_radius};
use crate::error::Result;
use geosearch_types::{GeoPoint, Mbr};

/// A point returned by a radius search together with its distance to the center.
#[derive(Debug, PartialEq)]
pub struct SearchHit<'a, T> {
    pub point: &'a GeoPoint<T>,
    /// Great-circle distance to the query center in kilometers.
    pub distance_km: f64,
}

impl<T> Clone for SearchHit<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for SearchHit<'_, T> {}

impl<T> RTree<T> {
    /// Find every point within `radius_km` of `center`, nearest first.
    ///
    /// # Algorithm
    ///
    /// 1. Size a candidate window that circumscribes the circle
    /// 2. Descend the tree, skipping subtrees whose rectangle misses the window
    /// 3. Keep window candidates whose haversine distance is `<= radius_km`
    /// 4. Stable sort by distance
    ///
    /// # Errors
    ///
    /// `InvalidInput` when the radius is not a positive finite number or the
    /// center lies outside the valid coordinate ranges. An empty tree or a
    /// query that matches nothing returns an empty vector.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use geosearch::{GeoPoint, RTree};
    ///
    /// let mut tree = RTree::default();
    /// tree.insert(GeoPoint::new(10.776, 106.700, 1));
    ///
    /// let hits = tree.search(&GeoPoint::at(10.776, 106.700), 0.001)?;
    /// assert_eq!(hits.len(), 1);
    /// assert!(hits[0].distance_km < 1e-9);
    ///
    /// assert!(tree.search(&GeoPoint::at(10.776, 106.700), 0.0).is_err());
    /// # Ok::<(), geosearch::GeoSearchError>(())
    /// ```
    pub fn search<C>(&self, center: &GeoPoint<C>, radius_km: f64) -> Result<Vec<SearchHit<'_, T>>> {
        let window = self.radius_window(center, radius_km)?;

        let mut hits = Vec::new();
        self.visit_window(self.root, &window.rects(), &mut |point| {
            let distance = distance_km(center, point);
            if distance <= radius_km {
                hits.push(SearchHit {
                    point,
                    distance_km: distance,
                });
            }
        });

        hits.sort_by(|a, b| a.distance_km.total_cmp(&b.distance_km));
        Ok(hits)
    }

    /// Count the points within `radius_km` of `center` without sorting them.
    pub fn count_within_radius<C>(&self, center: &GeoPoint<C>, radius_km: f64) -> Result<usize> {
        let window = self.radius_window(center, radius_km)?;

        let mut count = 0;
        self.visit_window(self.root, &window.rects(), &mut |point| {
            if distance_km(center, point) <= radius_km {
                count += 1;
            }
        });
        Ok(count)
    }

    /// Every point inside `rect` (closed bounds), in traversal order.
    ///
    /// This is the coarse phase of [`RTree::search`] exposed on its own: no
    /// distance filtering or sorting happens.
    pub fn search_rect(&self, rect: &Mbr) -> Vec<&GeoPoint<T>> {
        let mut points = Vec::new();
        self.visit_window(self.root, std::slice::from_ref(rect), &mut |point| {
            points.push(point)
        });
        points
    }

    fn radius_window<C>(&self, center: &GeoPoint<C>, radius_km: f64) -> Result<SearchWindow> {
        if let Err(e) = validate_radius(radius_km).and_then(|()| validate_point(center)) {
            log::warn!("Rejecting radius query: {}", e);
            return Err(e);
        }
        Ok(SearchWindow::new(
            center.latitude(),
            center.longitude(),
            radius_km,
        ))
    }

    /// Depth-first walk calling `visit` for every point inside any of `rects`.
    fn visit_window<'a, F>(&'a self, id: NodeId, rects: &[Mbr], visit: &mut F)
    where
        F: FnMut(&'a GeoPoint<T>),
    {
        let node = self.node(id);
        let Some(mbr) = node.mbr else {
            return;
        };
        if !rects.iter().any(|rect| rect.intersects(&mbr)) {
            return;
        }

        for entry in &node.entries {
            match &entry.item {
                EntryItem::Point(point) => {
                    if rects
                        .iter()
                        .any(|rect| rect.contains_point(point.latitude(), point.longitude()))
                    {
                        visit(point);
                    }
                }
                EntryItem::Child(child) => self.visit_window(*child, rects, visit),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GeoSearchError;

    fn grid_tree() -> RTree<(i32, i32)> {
        let mut tree = RTree::with_max_entries(4).unwrap();
        for i in 0..20 {
            for j in 0..20 {
                tree.insert(GeoPoint::new(
                    10.0 + i as f64 * 0.01,
                    106.0 + j as f64 * 0.01,
                    (i, j),
                ));
            }
        }
        tree
    }

    #[test]
    fn test_search_empty_tree() {
        let tree: RTree<()> = RTree::default();
        let hits = tree.search(&GeoPoint::at(0.0, 0.0), 5.0).unwrap();
        assert!(hits.is_empty());
        assert!(tree.search_rect(&Mbr::new(-90.0, 90.0, -180.0, 180.0)).is_empty());
    }

    #[test]
    fn test_search_rejects_bad_radius_and_center() {
        let tree = grid_tree();
        let center = GeoPoint::at(10.1, 106.1);
        assert!(matches!(
            tree.search(&center, 0.0),
            Err(GeoSearchError::InvalidInput(_))
        ));
        assert!(tree.search(&center, -3.0).is_err());
        assert!(tree.search(&center, f64::NAN).is_err());
        assert!(tree.search(&GeoPoint::at(f64::NAN, 106.1), 1.0).is_err());
        assert!(tree.count_within_radius(&center, 0.0).is_err());
    }

    #[test]
    fn test_search_sorted_and_within_radius() {
        let tree = grid_tree();
        let center = GeoPoint::at(10.1, 106.1);
        let hits = tree.search(&center, 3.0).unwrap();

        assert!(!hits.is_empty());
        assert!(hits.windows(2).all(|w| w[0].distance_km <= w[1].distance_km));
        assert!(hits.iter().all(|h| h.distance_km <= 3.0));
        assert_eq!(*hits[0].point.payload(), (10, 10));
        assert!(hits[0].distance_km < 1e-6);
    }

    #[test]
    fn test_search_excludes_window_corners() {
        let tree = grid_tree();
        let center = GeoPoint::at(10.1, 106.1);
        let radius = 5.0;
        let hits = tree.search(&center, radius).unwrap();
        let window = SearchWindow::new(10.1, 106.1, radius).rects()[0];
        let in_window = tree.search_rect(&window);
        // The square holds corner points that the circle does not.
        assert!(in_window.len() > hits.len());
        assert_eq!(tree.count_within_radius(&center, radius).unwrap(), hits.len());
    }

    #[test]
    fn test_search_rect() {
        let tree = grid_tree();
        let rect = Mbr::new(9.999, 10.021, 105.999, 106.011);
        let mut found: Vec<(i32, i32)> = tree.search_rect(&rect).iter().map(|p| *p.payload()).collect();
        found.sort_unstable();
        assert_eq!(found, vec![(0, 0), (0, 1), (1, 0), (1, 1), (2, 0), (2, 1)]);
    }

    #[test]
    fn test_hit_is_copy() {
        let tree = grid_tree();
        let hits = tree.search(&GeoPoint::at(10.0, 106.0), 0.5).unwrap();
        let first = hits[0];
        let copy = first;
        assert_eq!(first, copy);
    }
}
