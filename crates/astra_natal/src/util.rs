//! Shared angle utilities for natal calculations.

/// Normalize an angle to [0, 360) degrees.
pub fn normalize_360(deg: f64) -> f64 {
    let r = deg % 360.0;
    if r < 0.0 { r + 360.0 } else { r }
}

/// Minimum angular separation between two longitudes, in [0, 180].
///
/// Symmetric: `angle_between(a, b) == angle_between(b, a)`.
pub fn angle_between(lon_a: f64, lon_b: f64) -> f64 {
    let raw = (lon_a - lon_b).abs();
    if raw > 180.0 { 360.0 - raw } else { raw }
}
