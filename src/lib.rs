//! In-memory R-tree for "what is within R km of here" queries over geographic points.
//!
//! ```rust
//! use geosearch::{GeoPoint, RTree};
//!
//! let mut tree = RTree::with_max_entries(8)?;
//! tree.insert(GeoPoint::new(21.0285, 105.8542, "Hanoi"));
//! tree.insert(GeoPoint::new(10.7769, 106.7009, "Ho Chi Minh City"));
//! tree.insert(GeoPoint::new(16.0544, 108.2022, "Da Nang"));
//!
//! let nearby = tree.search(&GeoPoint::at(21.0, 105.8), 50.0)?;
//! assert_eq!(nearby.len(), 1);
//! assert_eq!(*nearby[0].point.payload(), "Hanoi");
//!
//! let stats = tree.stats();
//! assert_eq!(stats.points, 3);
//! # Ok::<(), geosearch::GeoSearchError>(())
//! ```

pub mod compute;
pub mod config;
pub mod error;
#[cfg(feature = "sync")]
pub mod sync;

pub use compute::spatial::{NodeCounts, RTree, SearchHit, SearchWindow, TreeStats};
pub use compute::spatial::{distance_km, haversine_km};
pub use config::TreeConfig;
pub use error::{GeoSearchError, Result};
pub use geosearch_types::{GeoPoint, Mbr};

#[cfg(feature = "sync")]
pub use sync::SyncRTree;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Common imports
pub mod prelude {
    pub use crate::{GeoPoint, GeoSearchError, Mbr, RTree, Result, SearchHit, TreeConfig};

    pub use crate::{distance_km, haversine_km};

    #[cfg(feature = "sync")]
    pub use crate::SyncRTree;
}
