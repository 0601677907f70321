//! Part of Fortune derivation.
//!
//! The Part of Fortune is not returned by the ephemeris; it is derived
//! from the Sun, Moon, and Ascendant, with the day/night branch decided
//! by the Sun's continuous house position. A chart is a day chart when
//! the Sun sits in houses 7-12 (above the horizon in the standard
//! counter-clockwise numbering).

use astra_core::{Body, EphemerisProvider, GeoLocation, HouseSystem, ReferenceFrame};

use crate::error::NatalError;
use crate::registry::{BodyPosition, FORTUNA_KEY};
use crate::util::normalize_360;

/// Fixed mean obliquity used for the Sun's house-position computation.
///
/// Deliberately NOT the instant's true obliquity; the reference system
/// uses this constant and changing it would shift day/night
/// classification near the horizon.
pub const MEAN_OBLIQUITY_DEG: f64 = 23.4393;

/// Provider body code sentinel for derived points.
pub const FORTUNA_ID: i32 = -1;

/// True when the Sun's continuous house position marks a day chart.
pub fn is_day_chart(sun_house_position: f64) -> bool {
    sun_house_position >= 7.0
}

/// The Part of Fortune formula.
///
/// `normalize_360(ascendant + (moon - sun))` by day,
/// `normalize_360(ascendant + (sun - moon))` by night.
pub fn part_of_fortune(sun_lon: f64, moon_lon: f64, ascendant: f64, is_day: bool) -> f64 {
    let arc = if is_day {
        moon_lon - sun_lon
    } else {
        sun_lon - moon_lon
    };
    normalize_360(ascendant + arc)
}

/// Wrap a fortuna longitude as a zero-speed point position.
pub fn fortuna_position(longitude_deg: f64) -> BodyPosition {
    BodyPosition::point(FORTUNA_ID, FORTUNA_KEY, "Fortuna", longitude_deg)
}

/// Derive the Part of Fortune at an instant and location.
///
/// Queries Sun and Moon under the given frame, the Ascendant from the
/// house computation, and the Sun's continuous house position via
/// ARMC = sidereal time (hours) * 15 with the fixed mean obliquity.
pub fn derive_fortuna<P: EphemerisProvider + ?Sized>(
    provider: &P,
    jd: f64,
    location: GeoLocation,
    frame: ReferenceFrame,
    system: HouseSystem,
) -> Result<BodyPosition, NatalError> {
    let sun = provider.body_position(jd, Body::Sun, frame)?;
    let moon = provider.body_position(jd, Body::Moon, frame)?;
    let houses = provider.houses(jd, location, system)?;

    let armc = provider.sidereal_time(jd)? * 15.0;
    let sun_house = provider.house_position(
        armc,
        location.latitude_deg,
        MEAN_OBLIQUITY_DEG,
        system,
        sun.longitude_deg,
        sun.latitude_deg,
    )?;

    let lon = part_of_fortune(
        sun.longitude_deg,
        moon.longitude_deg,
        houses.angles.ascendant,
        is_day_chart(sun_house),
    );
    Ok(fortuna_position(lon))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::{BodyKind, ZodiacSign};

    const EPS: f64 = 1e-10;

    #[test]
    fn day_chart_threshold() {
        assert!(is_day_chart(7.0));
        assert!(is_day_chart(12.99));
        assert!(!is_day_chart(6.999));
        assert!(!is_day_chart(1.0));
    }

    #[test]
    fn day_formula() {
        // Asc 0, Sun 10, Moon 100, day: 0 + (100 - 10) = 90.
        let lon = part_of_fortune(10.0, 100.0, 0.0, true);
        assert!((lon - 90.0).abs() < EPS);
    }

    #[test]
    fn night_formula() {
        // Asc 0, Sun 10, Moon 100, night: 0 + (10 - 100) = -90 → 270.
        let lon = part_of_fortune(10.0, 100.0, 0.0, false);
        assert!((lon - 270.0).abs() < EPS);
    }

    #[test]
    fn formula_wraps() {
        let lon = part_of_fortune(10.0, 100.0, 300.0, true);
        assert!((lon - 30.0).abs() < EPS); // 300 + 90 = 390 → 30
    }

    #[test]
    fn fortuna_position_shape() {
        let p = fortuna_position(90.0);
        assert_eq!(p.id, FORTUNA_ID);
        assert_eq!(p.key, "fortuna");
        assert_eq!(p.name, "Fortuna");
        assert_eq!(p.kind, BodyKind::Point);
        assert!(p.speed.abs() < EPS);
        assert!(!p.retrograde);
        // Cancer boundary: degree 0 of Cancer.
        assert_eq!(p.sign, ZodiacSign::Cancer);
        assert!(p.sign_degree.abs() < EPS);
    }

    #[test]
    fn obliquity_constant_preserved() {
        assert!((MEAN_OBLIQUITY_DEG - 23.4393).abs() < EPS);
    }
}
