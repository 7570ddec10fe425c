//! Spatial indexing and great-circle distance.

pub mod distance;
pub mod rtree;

pub use distance::{EARTH_RADIUS_KM, KM_PER_DEGREE, SearchWindow, distance_km, haversine_km};
pub use rtree::{NodeCounts, RTree, SearchHit, TreeStats};
