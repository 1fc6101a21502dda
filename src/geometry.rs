//! Great-circle distance between coordinates.
//!
//! Used as the fallback when the port graph has no direct edge for a pair.
//! Less accurate than surveyed edge distances but always available when
//! both ports carry a position.

use crate::error::RoutingError;
use crate::model::Coordinate;

/// Mean Earth radius in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Haversine distance between two coordinates in kilometers, rounded to
/// two decimal places to line up with the stored edge distances.
pub fn haversine_km(from: Coordinate, to: Coordinate) -> Result<f64, RoutingError> {
    check(from)?;
    check(to)?;

    let lat1_rad = from.latitude.to_radians();
    let lat2_rad = to.latitude.to_radians();
    let delta_lat = (to.latitude - from.latitude).to_radians();
    let delta_lng = (to.longitude - from.longitude).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lng / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().min(1.0).asin();

    Ok(round_km(EARTH_RADIUS_KM * c))
}

fn check(coordinate: Coordinate) -> Result<(), RoutingError> {
    if coordinate.latitude.is_finite() && coordinate.longitude.is_finite() {
        Ok(())
    } else {
        Err(RoutingError::InvalidCoordinate {
            latitude: coordinate.latitude,
            longitude: coordinate.longitude,
        })
    }
}

fn round_km(km: f64) -> f64 {
    (km * 100.0).round() / 100.0
}
