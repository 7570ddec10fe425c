//! # geosearch-types
//!
//! Core geometry types for the geosearch R-tree.
//!
//! - **Point type**: `GeoPoint<T>`, a latitude/longitude pair carrying an opaque payload
//! - **Rectangle type**: `Mbr`, the minimum bounding rectangle used by every tree node
//!
//! Both types are serializable with Serde and convert to the `geo` crate's
//! primitives (`geo::Point`, `geo::Rect`) using the usual x = longitude,
//! y = latitude convention.
//!
//! ## Examples
//!
//! ```rust
//! use geosearch_types::{GeoPoint, Mbr};
//!
//! let station = GeoPoint::new(10.776, 106.700, "Station A");
//! let mbr = Mbr::from_point(&station);
//! assert_eq!(mbr.area(), 0.0);
//! assert!(mbr.contains_point(10.776, 106.700));
//! ```

pub mod bbox;
pub mod point;

pub use bbox::Mbr;
pub use point::GeoPoint;
