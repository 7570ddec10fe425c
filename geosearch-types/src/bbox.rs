use crate::point::GeoPoint;
use geo::Rect;
use serde::{Deserialize, Serialize};

/// A minimum bounding rectangle over latitude/longitude.
///
/// Always satisfies `min_lat <= max_lat` and `min_lon <= max_lon`. A point's
/// rectangle is degenerate (zero width on both axes, zero area). Rectangles
/// only ever grow through [`Mbr::union`] and [`Mbr::expand_to_include`], each
/// of which returns the smallest rectangle covering its inputs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Mbr {
    min_lat: f64,
    max_lat: f64,
    min_lon: f64,
    max_lon: f64,
}

impl Mbr {
    /// Create a rectangle from its bounds.
    ///
    /// Swapped bounds are reordered so the rectangle is always well formed.
    ///
    /// # Examples
    ///
    /// ```
    /// use geosearch_types::bbox::Mbr;
    ///
    /// let mbr = Mbr::new(10.0, 11.0, 106.0, 107.0);
    /// assert_eq!(mbr.area(), 1.0);
    ///
    /// let swapped = Mbr::new(11.0, 10.0, 107.0, 106.0);
    /// assert_eq!(swapped, mbr);
    /// ```
    pub fn new(min_lat: f64, max_lat: f64, min_lon: f64, max_lon: f64) -> Self {
        Self {
            min_lat: min_lat.min(max_lat),
            max_lat: max_lat.max(min_lat),
            min_lon: min_lon.min(max_lon),
            max_lon: max_lon.max(min_lon),
        }
    }

    /// Degenerate rectangle covering a single coordinate.
    pub fn from_coords(latitude: f64, longitude: f64) -> Self {
        Self {
            min_lat: latitude,
            max_lat: latitude,
            min_lon: longitude,
            max_lon: longitude,
        }
    }

    /// Degenerate rectangle covering a single point.
    pub fn from_point<T>(point: &GeoPoint<T>) -> Self {
        Self::from_coords(point.latitude(), point.longitude())
    }

    /// Smallest rectangle covering every point, or `None` for an empty input.
    pub fn from_points<'a, T: 'a>(points: impl IntoIterator<Item = &'a GeoPoint<T>>) -> Option<Self> {
        points
            .into_iter()
            .map(Self::from_point)
            .reduce(|acc, mbr| acc.union(&mbr))
    }

    pub fn min_lat(&self) -> f64 {
        self.min_lat
    }

    pub fn max_lat(&self) -> f64 {
        self.max_lat
    }

    pub fn min_lon(&self) -> f64 {
        self.min_lon
    }

    pub fn max_lon(&self) -> f64 {
        self.max_lon
    }

    /// Extent along the latitude axis in degrees.
    pub fn lat_span(&self) -> f64 {
        self.max_lat - self.min_lat
    }

    /// Extent along the longitude axis in degrees.
    pub fn lon_span(&self) -> f64 {
        self.max_lon - self.min_lon
    }

    /// Area in square degrees. Zero for degenerate rectangles.
    pub fn area(&self) -> f64 {
        self.lat_span() * self.lon_span()
    }

    /// Smallest rectangle covering both `self` and `other`.
    pub fn union(&self, other: &Mbr) -> Mbr {
        Mbr {
            min_lat: self.min_lat.min(other.min_lat),
            max_lat: self.max_lat.max(other.max_lat),
            min_lon: self.min_lon.min(other.min_lon),
            max_lon: self.max_lon.max(other.max_lon),
        }
    }

    /// Smallest rectangle covering `self` and the given coordinate.
    pub fn expand_to_include(&self, latitude: f64, longitude: f64) -> Mbr {
        self.union(&Mbr::from_coords(latitude, longitude))
    }

    /// Area growth needed for `self` to also cover `other`.
    pub fn enlargement(&self, other: &Mbr) -> f64 {
        self.union(other).area() - self.area()
    }

    /// Closed-interval containment test on both axes.
    pub fn contains_point(&self, latitude: f64, longitude: f64) -> bool {
        latitude >= self.min_lat
            && latitude <= self.max_lat
            && longitude >= self.min_lon
            && longitude <= self.max_lon
    }

    /// Returns true when `other` lies entirely inside `self`.
    pub fn contains(&self, other: &Mbr) -> bool {
        other.min_lat >= self.min_lat
            && other.max_lat <= self.max_lat
            && other.min_lon >= self.min_lon
            && other.max_lon <= self.max_lon
    }

    /// Separating-axis overlap test. Touching edges count as intersecting.
    pub fn intersects(&self, other: &Mbr) -> bool {
        !(self.max_lat < other.min_lat
            || self.min_lat > other.max_lat
            || self.max_lon < other.min_lon
            || self.min_lon > other.max_lon)
    }

    /// Center of the rectangle as a bare location.
    pub fn center(&self) -> GeoPoint<()> {
        GeoPoint::at(
            (self.min_lat + self.max_lat) / 2.0,
            (self.min_lon + self.max_lon) / 2.0,
        )
    }
}

impl From<Mbr> for Rect {
    fn from(mbr: Mbr) -> Self {
        Rect::new(
            geo::coord! { x: mbr.min_lon, y: mbr.min_lat },
            geo::coord! { x: mbr.max_lon, y: mbr.max_lat },
        )
    }
}

impl From<Rect> for Mbr {
    fn from(rect: Rect) -> Self {
        Mbr::new(rect.min().y, rect.max().y, rect.min().x, rect.max().x)
    }
}
