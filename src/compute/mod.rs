//! Compute layer: the spatial index and its input checks.
//!
//! Algorithms here are independent of how points are loaded or displayed.

pub mod spatial;
pub mod validation;
