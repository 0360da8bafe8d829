//! Great-circle distance and radius filtering.

use serde::{Deserialize, Serialize};

/// Mean Earth radius in meters.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// A WGS-84 position in decimal degrees. Ranges are not validated.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lon: f64) -> Self {
        GeoPoint { lat, lon }
    }

    /// Haversine distance to `other` in meters.
    pub fn distance_to(&self, other: &GeoPoint) -> f64 {
        haversine_distance_meters(self.lat, self.lon, other.lat, other.lon)
    }
}

/// Haversine great-circle distance in meters between two points given in
/// degrees.
///
/// NaN coordinates yield NaN; callers drop points without coordinates
/// before calling.
pub fn haversine_distance_meters(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let lat1 = lat1.to_radians();
    let lat2 = lat2.to_radians();
    let d_lat = lat2 - lat1;
    let d_lon = lon2.to_radians() - lon1.to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
    // rounding can push antipodal h a hair past 1; NaN must survive the clamp
    let h = if h > 1.0 { 1.0 } else { h };

    2.0 * EARTH_RADIUS_M * h.sqrt().asin()
}

/// True when `p1` and `p2` are at most `max_km` kilometers apart.
pub fn is_within_distance(p1: &GeoPoint, p2: &GeoPoint, max_km: f64) -> bool {
    p1.distance_to(p2) <= max_km * 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn test_zero_at_identity() {
        let p = GeoPoint::new(-0.2105, -78.4935);
        assert_eq!(p.distance_to(&p), 0.0);
    }

    #[test]
    fn test_one_degree_at_equator() {
        let d = haversine_distance_meters(0.0, 0.0, 0.0, 1.0);
        assert!((d - 111_195.0).abs() < 1000.0, "got {}", d);
    }

    #[test]
    fn test_symmetry() {
        let pairs = [
            (GeoPoint::new(40.0, -83.0), GeoPoint::new(-33.45, -70.66)),
            (GeoPoint::new(89.9, 179.0), GeoPoint::new(-89.9, -179.0)),
            (GeoPoint::new(0.1, 0.2), GeoPoint::new(0.3, -0.4)),
        ];
        for (a, b) in pairs {
            assert_eq!(a.distance_to(&b), b.distance_to(&a));
        }
    }

    #[test]
    fn test_antipodes() {
        let d = haversine_distance_meters(0.0, 0.0, 0.0, 180.0);
        assert!((d - PI * EARTH_RADIUS_M).abs() < 1.0);
        let d = haversine_distance_meters(90.0, 0.0, -90.0, 0.0);
        assert!((d - PI * EARTH_RADIUS_M).abs() < 1.0);
    }

    #[test]
    fn test_nan_propagates() {
        assert!(haversine_distance_meters(f64::NAN, 0.0, 0.0, 0.0).is_nan());
    }

    #[test]
    fn test_is_within_distance() {
        let origin = GeoPoint::new(0.0, 0.0);
        let east = GeoPoint::new(0.0, 1.0);
        assert!(is_within_distance(&origin, &east, 112.0));
        assert!(!is_within_distance(&origin, &east, 111.0));
        assert!(is_within_distance(&origin, &origin, 0.0));
        assert!(!is_within_distance(&origin, &GeoPoint::new(f64::NAN, 0.0), 1e9));
    }
}
