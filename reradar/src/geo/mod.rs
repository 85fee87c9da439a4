//! Geodesic helpers
//!
//! Great-circle distance between observer and aircraft, and the square
//! bounding zone used to query the live feed around a point.

mod types;

pub use types::{Bounds, Coordinate, GeoError, MAX_LAT, MAX_LON, MIN_LAT, MIN_LON};

/// Mean Earth radius in nautical miles used for display distances.
pub const EARTH_RADIUS_NM: f64 = 3440.069;

/// Mean Earth radius in kilometres used for zone construction.
const EARTH_RADIUS_KM: f64 = 6371.0;

/// Metres per nautical mile.
pub const METERS_PER_NM: f64 = 1852.0;

/// Great-circle distance in nautical miles using the haversine formula.
///
/// Inputs are decimal degrees and are not range-checked; callers that
/// need validation use [`Coordinate::validated`] first.
#[inline]
pub fn haversine_nm(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let lat1_rad = lat1.to_radians();
    let lat2_rad = lat2.to_radians();
    let delta_lat = lat2_rad - lat1_rad;
    let delta_lon = lon2.to_radians() - lon1.to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_NM * c
}

/// Distance in nautical miles between two coordinates.
#[inline]
pub fn distance_nm(from: Coordinate, to: Coordinate) -> f64 {
    haversine_nm(from.latitude, from.longitude, to.latitude, to.longitude)
}

/// Builds a square zone centred on a point.
///
/// The corners sit `radius·√2` away along bearings 225° (south-west) and
/// 45° (north-east), so each side is `2 × radius_m` long.
pub fn bounds_from_point(latitude: f64, longitude: f64, radius_m: f64) -> Bounds {
    let half_side_km = radius_m.abs() / 1000.0;
    let lat = latitude.to_radians();
    let lon = longitude.to_radians();
    let angular = (2.0 * half_side_km.powi(2)).sqrt() / EARTH_RADIUS_KM;

    let (south, west) = destination(lat, lon, angular, 225.0_f64.to_radians());
    let (north, east) = destination(lat, lon, angular, 45.0_f64.to_radians());

    Bounds {
        north: north.to_degrees(),
        south: south.to_degrees(),
        west: normalize_lon(west.to_degrees()),
        east: normalize_lon(east.to_degrees()),
    }
}

/// Destination point from a start, angular distance and initial bearing (radians).
fn destination(lat: f64, lon: f64, angular: f64, bearing: f64) -> (f64, f64) {
    let sin_dest_lat = lat.sin() * angular.cos() + lat.cos() * angular.sin() * bearing.cos();
    let dest_lat = sin_dest_lat.asin();
    let dest_lon = lon
        + (bearing.sin() * angular.sin() * lat.cos())
            .atan2(angular.cos() - lat.sin() * dest_lat.sin());
    (dest_lat, dest_lon)
}

fn normalize_lon(lon: f64) -> f64 {
    (lon + 540.0).rem_euclid(360.0) - 180.0
}
