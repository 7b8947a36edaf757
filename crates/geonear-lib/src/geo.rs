//! Great-circle distance helpers.
//!
//! Two Earth radii are in play and both are kept as-is:
//!
//! - [`STORE_EARTH_RADIUS_KM`] converts a linear search radius into the
//!   angular radius the store's spherical-cap filter expects.
//! - [`EARTH_MEAN_RADIUS_KM`] scales the haversine central angle into the
//!   distance reported to callers.
//!
//! Because the cap uses the larger radius, a 10 km cap covers roughly
//! 9.989 km of haversine distance. Points right at the 10 km boundary may
//! therefore be missing from results.

use crate::point::Coordinates;

/// Earth radius (km) used to express search radii in radians for the store.
pub const STORE_EARTH_RADIUS_KM: f64 = 6378.1;

/// Mean Earth radius (km) used for haversine distances.
pub const EARTH_MEAN_RADIUS_KM: f64 = 6371.0;

/// Convert a linear radius in kilometres into an angular radius in radians.
pub fn angular_radius(radius_km: f64) -> f64 {
    radius_km / STORE_EARTH_RADIUS_KM
}

/// Central angle in radians between two coordinates (haversine formula).
pub fn central_angle(from: Coordinates, to: Coordinates) -> f64 {
    let lat1 = from.latitude().to_radians();
    let lat2 = to.latitude().to_radians();
    let d_lat = (to.latitude() - from.latitude()).to_radians();
    let d_lon = (to.longitude() - from.longitude()).to_radians();

    // Rounding can push `a` a hair past 1 for near-antipodal pairs.
    let a = ((d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2))
        .clamp(0.0, 1.0);

    2.0 * a.sqrt().atan2((1.0 - a).sqrt())
}

/// Great-circle distance in kilometres between two coordinates.
pub fn haversine_km(from: Coordinates, to: Coordinates) -> f64 {
    EARTH_MEAN_RADIUS_KM * central_angle(from, to)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coords(lat: f64, lon: f64) -> Coordinates {
        Coordinates::new(lat, lon).unwrap()
    }

    #[test]
    fn angular_radius_uses_store_radius() {
        assert_eq!(angular_radius(10.0), 10.0 / 6378.1);
        assert_eq!(angular_radius(0.0), 0.0);
    }

    #[test]
    fn distance_to_self_is_zero() {
        let p = coords(40.0, -74.0);
        assert!(haversine_km(p, p).abs() < 1e-12);
    }

    #[test]
    fn distance_is_symmetric() {
        let a = coords(48.8566, 2.3522);
        let b = coords(51.5074, -0.1278);
        assert!((haversine_km(a, b) - haversine_km(b, a)).abs() < 1e-9);
    }

    #[test]
    fn one_degree_of_latitude() {
        // 2πR / 360
        let expected = EARTH_MEAN_RADIUS_KM * std::f64::consts::PI / 180.0;
        let d = haversine_km(coords(0.0, 0.0), coords(1.0, 0.0));
        assert!((d - expected).abs() < 1e-9, "got {d}, expected {expected}");
    }

    #[test]
    fn antipodal_points_are_half_circumference_apart() {
        let d = haversine_km(coords(0.0, 0.0), coords(0.0, 180.0));
        assert!((d - EARTH_MEAN_RADIUS_KM * std::f64::consts::PI).abs() < 1e-6);
    }
}
