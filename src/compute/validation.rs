//! Validation for geographic coordinates and query parameters.

use crate::error::{GeoSearchError, Result};
use geosearch_types::point::GeoPoint;

/// Validates a latitude/longitude pair.
///
/// Latitude: [-90.0, 90.0], Longitude: [-180.0, 180.0]
///
/// # Examples
///
/// ```
/// use geosearch::compute::validation::validate_coordinates;
///
/// assert!(validate_coordinates(10.776, 106.700).is_ok());
///
/// // Invalid latitude
/// assert!(validate_coordinates(95.0, 106.0).is_err());
///
/// // Invalid longitude
/// assert!(validate_coordinates(10.0, 200.0).is_err());
/// ```
pub fn validate_coordinates(latitude: f64, longitude: f64) -> Result<()> {
    if !latitude.is_finite() {
        return Err(GeoSearchError::InvalidInput(format!(
            "Latitude must be finite, got: {}",
            latitude
        )));
    }

    if !longitude.is_finite() {
        return Err(GeoSearchError::InvalidInput(format!(
            "Longitude must be finite, got: {}",
            longitude
        )));
    }

    if !(-90.0..=90.0).contains(&latitude) {
        return Err(GeoSearchError::InvalidInput(format!(
            "Latitude out of range [-90.0, 90.0]: {}",
            latitude
        )));
    }

    if !(-180.0..=180.0).contains(&longitude) {
        return Err(GeoSearchError::InvalidInput(format!(
            "Longitude out of range [-180.0, 180.0]: {}",
            longitude
        )));
    }

    Ok(())
}

/// Validates the coordinates of a point. The payload is not inspected.
pub fn validate_point<T>(point: &GeoPoint<T>) -> Result<()> {
    validate_coordinates(point.latitude(), point.longitude())
}

/// Validates multiple points.
///
/// # Examples
///
/// ```
/// use geosearch::compute::validation::validate_points;
/// use geosearch::GeoPoint;
///
/// let points = vec![
///     GeoPoint::new(10.0, 106.0, "a"),
///     GeoPoint::new(10.1, 106.1, "b"),
///     GeoPoint::new(10.0, 999.0, "c"), // Invalid
/// ];
///
/// assert!(validate_points(&points).is_err());
/// ```
pub fn validate_points<T>(points: &[GeoPoint<T>]) -> Result<()> {
    for (idx, point) in points.iter().enumerate() {
        validate_point(point)
            .map_err(|e| GeoSearchError::InvalidInput(format!("Point at index {}: {}", idx, e)))?;
    }
    Ok(())
}

/// Validates a search radius in kilometers. It must be finite and positive.
pub fn validate_radius(radius_km: f64) -> Result<()> {
    if !radius_km.is_finite() {
        return Err(GeoSearchError::InvalidInput(format!(
            "Radius must be finite, got: {}",
            radius_km
        )));
    }

    if radius_km <= 0.0 {
        return Err(GeoSearchError::InvalidInput(format!(
            "Radius must be positive, got: {}",
            radius_km
        )));
    }

    Ok(())
}
