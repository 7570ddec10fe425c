use geo::Point;
use serde::{Deserialize, Serialize};

/// A geographic point with latitude, longitude and an attached payload.
///
/// The payload is opaque to the index: it can be a full record (name, brand,
/// address) or just an identifier into some other store. Points are immutable
/// once constructed.
///
/// # Examples
///
/// ```
/// use geosearch_types::point::GeoPoint;
///
/// let point = GeoPoint::new(21.0285, 105.8542, 42u32);
/// assert_eq!(point.latitude(), 21.0285);
/// assert_eq!(point.longitude(), 105.8542);
/// assert_eq!(*point.payload(), 42);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint<T> {
    latitude: f64,
    longitude: f64,
    payload: T,
}

impl<T> GeoPoint<T> {
    /// Create a new point.
    ///
    /// # Arguments
    ///
    /// * `latitude` - Latitude in degrees
    /// * `longitude` - Longitude in degrees
    /// * `payload` - Data carried alongside the coordinates
    pub fn new(latitude: f64, longitude: f64, payload: T) -> Self {
        Self {
            latitude,
            longitude,
            payload,
        }
    }

    /// Create a point from a `geo::Point` (x = longitude, y = latitude).
    pub fn from_geo(point: Point<f64>, payload: T) -> Self {
        Self::new(point.y(), point.x(), payload)
    }

    /// Get the latitude in degrees.
    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Get the longitude in degrees.
    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Get a reference to the payload.
    pub fn payload(&self) -> &T {
        &self.payload
    }

    /// Consume the point and return its payload.
    pub fn into_payload(self) -> T {
        self.payload
    }

    /// Convert the coordinates to a `geo::Point` (x = longitude, y = latitude).
    pub fn to_geo(&self) -> Point<f64> {
        Point::new(self.longitude, self.latitude)
    }

    /// Returns true when both coordinates are finite numbers.
    pub fn is_finite(&self) -> bool {
        self.latitude.is_finite() && self.longitude.is_finite()
    }

    /// Drop the payload, keeping only the coordinates.
    pub fn location(&self) -> GeoPoint<()> {
        GeoPoint::new(self.latitude, self.longitude, ())
    }
}

impl GeoPoint<()> {
    /// Create a bare location, typically a query center.
    pub fn at(latitude: f64, longitude: f64) -> Self {
        Self::new(latitude, longitude, ())
    }
}
