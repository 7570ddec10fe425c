//! Great-circle distance and the candidate window derived from it.
//!
//! Radius queries run in two phases. The tree is pruned with a rectangle in
//! degrees (the candidate window), then every surviving point is re-checked
//! with the exact haversine distance. The window is only a filter, so it must
//! circumscribe the query circle: a point inside the circle but outside the
//! window would be silently lost.
//!
//! ## Window sizing
//!
//! The planar approximation uses 111 km per degree of latitude and
//! `111 * cos(lat)` km per degree of longitude. Because `111.0` is slightly
//! below the true length of a degree on a 6371 km sphere (about 111.19 km),
//! the latitude half-extent always over-covers. The longitude half-extent is
//! widened to the exact spherical value `asin(sin(d) / cos(lat))` when that is
//! larger, which happens for big radii at high latitudes. Circles that reach a
//! pole cover every longitude. Windows crossing the antimeridian are split in
//! two rectangles.

use geo::{Distance, HaversineMeasure};
use geosearch_types::{GeoPoint, Mbr};
use smallvec::SmallVec;
use std::f64::consts::FRAC_PI_2;

/// Mean Earth radius used by every distance computation, in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Approximate length of one degree of latitude, in kilometers.
pub const KM_PER_DEGREE: f64 = 111.0;

/// Great-circle distance between two coordinates in kilometers.
///
/// # Examples
///
/// ```rust
/// use geosearch::compute::spatial::distance::haversine_km;
///
/// // Hanoi to Ho Chi Minh City
/// let d = haversine_km(21.0285, 105.8542, 10.7769, 106.7009);
/// assert!(d > 1130.0 && d < 1150.0);
/// ```
pub fn haversine_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let origin = geo::Point::new(lon1, lat1);
    let destination = geo::Point::new(lon2, lat2);
    HaversineMeasure::new(EARTH_RADIUS_KM).distance(origin, destination)
}

/// Great-circle distance between two points in kilometers.
pub fn distance_km<A, B>(a: &GeoPoint<A>, b: &GeoPoint<B>) -> f64 {
    haversine_km(a.latitude(), a.longitude(), b.latitude(), b.longitude())
}

/// Planar half-extents `(half_lat, half_lon)` in degrees for a radius.
///
/// `half_lat = radius / 111`, `half_lon = radius / (111 * cos(lat))`.
pub fn half_extents(radius_km: f64, center_lat: f64) -> (f64, f64) {
    let half_lat = radius_km / KM_PER_DEGREE;
    let half_lon = radius_km / (KM_PER_DEGREE * center_lat.to_radians().cos());
    (half_lat, half_lon)
}

/// Widest longitude offset reached by a circle on the sphere, in degrees.
/// Returns 180 when the circle contains a pole.
fn spherical_half_lon(radius_km: f64, center_lat: f64) -> f64 {
    let angular = radius_km / EARTH_RADIUS_KM;
    if angular >= FRAC_PI_2 {
        return 180.0;
    }
    let ratio = angular.sin() / center_lat.to_radians().cos();
    if !(0.0..1.0).contains(&ratio) {
        return 180.0;
    }
    ratio.asin().to_degrees()
}

/// Candidate rectangle(s) for a radius query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchWindow {
    pub center_lat: f64,
    pub center_lon: f64,
    pub half_lat: f64,
    pub half_lon: f64,
}

impl SearchWindow {
    /// Build the window circumscribing a circle of `radius_km` around the center.
    pub fn new(center_lat: f64, center_lon: f64, radius_km: f64) -> Self {
        let (half_lat, planar_lon) = half_extents(radius_km, center_lat);
        let half_lon = planar_lon.max(spherical_half_lon(radius_km, center_lat));
        Self {
            center_lat,
            center_lon,
            half_lat,
            half_lon,
        }
    }

    /// Returns true when the window spans every longitude.
    pub fn covers_all_longitudes(&self) -> bool {
        self.half_lon >= 180.0
    }

    /// The window as one rectangle, or two when it wraps across the antimeridian.
    ///
    /// Latitude bounds are clamped to [-90, 90].
    pub fn rects(&self) -> SmallVec<[Mbr; 2]> {
        let min_lat = (self.center_lat - self.half_lat).max(-90.0);
        let max_lat = (self.center_lat + self.half_lat).min(90.0);
        let mut rects = SmallVec::new();

        if self.covers_all_longitudes() {
            rects.push(Mbr::new(min_lat, max_lat, -180.0, 180.0));
            return rects;
        }

        let min_lon = self.center_lon - self.half_lon;
        let max_lon = self.center_lon + self.half_lon;
        if min_lon < -180.0 {
            rects.push(Mbr::new(min_lat, max_lat, min_lon + 360.0, 180.0));
            rects.push(Mbr::new(min_lat, max_lat, -180.0, max_lon));
        } else if max_lon > 180.0 {
            rects.push(Mbr::new(min_lat, max_lat, min_lon, 180.0));
            rects.push(Mbr::new(min_lat, max_lat, -180.0, max_lon - 360.0));
        } else {
            rects.push(Mbr::new(min_lat, max_lat, min_lon, max_lon));
        }
        rects
    }
}
