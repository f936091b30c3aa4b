//! Great-circle navigation mathematics.
//!
//! Distances use a spherical earth approximation, which is accurate to a
//! fraction of a percent over the ranges that matter for launcher
//! attribution (a weapon appears within a few nautical miles of its
//! launching platform).
//!
//! # Coordinate System
//!
//! - Latitude: degrees north (-90 to 90)
//! - Longitude: degrees east (-180 to 180)
//! - Distance: nautical miles (1 nm = 1852 meters)

use std::f64::consts::PI;

/// Earth's radius in nautical miles.
const EARTH_RADIUS_NM: f64 = 3440.065;

/// Degrees to radians conversion factor.
const DEG_TO_RAD: f64 = PI / 180.0;

/// Calculate the great-circle distance between two points in nautical miles.
///
/// Points are `(latitude, longitude)` in degrees. Uses the haversine
/// formula, which stays numerically stable for nearby points (the common
/// case when attributing a newly launched weapon to its platform).
///
/// # Example
///
/// ```
/// use acmitrace::geo::great_circle_nm;
///
/// // One degree of latitude is 60 nautical miles by definition
/// let d = great_circle_nm((0.0, 0.0), (1.0, 0.0));
/// assert!((d - 60.0).abs() < 0.1);
/// ```
pub fn great_circle_nm(a: (f64, f64), b: (f64, f64)) -> f64 {
    let (lat1, lon1) = a;
    let (lat2, lon2) = b;

    let lat1_rad = lat1 * DEG_TO_RAD;
    let lat2_rad = lat2 * DEG_TO_RAD;
    let dlat = (lat2 - lat1) * DEG_TO_RAD;
    let dlon = (lon2 - lon1) * DEG_TO_RAD;

    let h = (dlat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (dlon / 2.0).sin().powi(2);
    let angular_distance = 2.0 * h.sqrt().asin();

    angular_distance * EARTH_RADIUS_NM
}
