//! Great-circle distance and the spatial falloff
use locstamp_core::Point;

/// Mean Earth radius in meters
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Haversine distance in meters.
pub fn haversine_distance(a: Point, b: Point) -> f64 {
    let lat1 = a.latitude.to_radians();
    let lat2 = b.latitude.to_radians();
    let d_lat = (b.latitude - a.latitude).to_radians();
    let d_lon = (b.longitude - a.longitude).to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().min(1.0).asin();
    EARTH_RADIUS_M * c
}

/// Linear falloff to the edge of tolerance, then a gentler decay reaching
/// zero at `decay_factor × effective_radius`.
pub fn spatial_score(distance: f64, effective_radius: f64, decay_factor: f64) -> f64 {
    if !(distance.is_finite() && effective_radius.is_finite()) || effective_radius <= 0.0 {
        return if distance <= 0.0 { 1.0 } else { 0.0 };
    }

    if distance <= effective_radius {
        1.0 - distance / effective_radius
    } else {
        (1.0 - distance / (decay_factor * effective_radius)).max(0.0)
    }
}
