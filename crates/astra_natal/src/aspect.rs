//! Aspect catalogue and the pairwise aspect engine.
//!
//! The catalogue is a fixed table of 11 named aspects with default orbs.
//! The engine enumerates unordered pairs of positioned bodies, reduces
//! their separation to [0, 180], matches it against the requested aspects
//! within orb, and classifies each hit as applying or separating.
//!
//! Pure and stateless: nothing is retained across invocations.

use crate::registry::{BodyKind, BodyPosition};
use crate::util::angle_between;

/// Tolerance added to every orb comparison so borderline exact matches
/// are not lost to floating-point rounding.
pub const ASPECT_EPSILON: f64 = 0.01;

/// The 11 named aspects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Aspect {
    Conjunction,
    Opposition,
    Trine,
    Square,
    Sextile,
    Quincunx,
    Semisextile,
    Semisquare,
    Sesquisquare,
    Quintile,
    Biquintile,
}

/// All 11 aspects in catalogue order.
///
/// This order is an observable contract: result sequences iterate the
/// catalogue in this order for each body pair.
pub const ALL_ASPECTS: [Aspect; 11] = [
    Aspect::Conjunction,
    Aspect::Opposition,
    Aspect::Trine,
    Aspect::Square,
    Aspect::Sextile,
    Aspect::Quincunx,
    Aspect::Semisextile,
    Aspect::Semisquare,
    Aspect::Sesquisquare,
    Aspect::Quintile,
    Aspect::Biquintile,
];

impl Aspect {
    /// Lowercase catalogue name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Conjunction => "conjunction",
            Self::Opposition => "opposition",
            Self::Trine => "trine",
            Self::Square => "square",
            Self::Sextile => "sextile",
            Self::Quincunx => "quincunx",
            Self::Semisextile => "semisextile",
            Self::Semisquare => "semisquare",
            Self::Sesquisquare => "sesquisquare",
            Self::Quintile => "quintile",
            Self::Biquintile => "biquintile",
        }
    }

    /// Exact angle of the aspect in degrees, in [0, 180].
    pub const fn exact_angle(self) -> f64 {
        match self {
            Self::Conjunction => 0.0,
            Self::Opposition => 180.0,
            Self::Trine => 120.0,
            Self::Square => 90.0,
            Self::Sextile => 60.0,
            Self::Quincunx => 150.0,
            Self::Semisextile => 30.0,
            Self::Semisquare => 45.0,
            Self::Sesquisquare => 135.0,
            Self::Quintile => 72.0,
            Self::Biquintile => 144.0,
        }
    }

    /// Default orb (matching tolerance) in degrees.
    pub const fn default_orb(self) -> f64 {
        match self {
            Self::Conjunction | Self::Opposition => 10.0,
            Self::Trine | Self::Square => 8.0,
            Self::Sextile => 6.0,
            Self::Quincunx => 3.0,
            Self::Semisextile
            | Self::Semisquare
            | Self::Sesquisquare
            | Self::Quintile
            | Self::Biquintile => 2.0,
        }
    }

    /// Look up an aspect by name, case- and whitespace-insensitive.
    ///
    /// Unknown names return `None` and are silently skipped by the
    /// engine, matching the registry's unknown-key policy.
    pub fn from_key(raw: &str) -> Option<Self> {
        let key = raw.trim().to_lowercase();
        ALL_ASPECTS.iter().copied().find(|a| a.name() == key)
    }
}

/// One classified aspect between two bodies.
#[derive(Debug, Clone, PartialEq)]
pub struct AspectMatch {
    /// Display name of the first body (pair order follows input order).
    pub body_a: String,
    /// Display name of the second body.
    pub body_b: String,
    pub aspect: Aspect,
    /// Exact angle of the matched aspect, unrounded.
    pub exact_angle: f64,
    /// Reduced separation of the pair in [0, 180], unrounded.
    pub actual_angle: f64,
    /// Deviation from exact, rounded to 3 decimals.
    pub orb: f64,
    /// True when the pair is tightening toward exact.
    pub applying: bool,
}

/// Effective orb for an aspect: per-request override if present, else the
/// catalogue default. Override names resolve like aspect keys; entries
/// that name no catalogue aspect are ignored.
fn orb_for(aspect: Aspect, orb_overrides: &[(&str, f64)]) -> f64 {
    orb_overrides
        .iter()
        .find(|(name, _)| Aspect::from_key(name) == Some(aspect))
        .map(|&(_, orb)| orb)
        .unwrap_or_else(|| aspect.default_orb())
}

/// Applying/separating classification for one matched pair.
///
/// `speed_diff = speed_a - speed_b`. The conjunction is special: when the
/// raw (pre-reduction) separation exceeds 180 degrees the bodies close
/// the long way around the circle, which flips the sign test.
fn is_applying(aspect: Aspect, raw_diff: f64, reduced_angle: f64, speed_diff: f64) -> bool {
    if aspect.exact_angle() == 0.0 {
        if raw_diff > 180.0 {
            speed_diff > 0.0
        } else {
            speed_diff < 0.0
        }
    } else if reduced_angle < aspect.exact_angle() {
        speed_diff < 0.0
    } else {
        speed_diff > 0.0
    }
}

/// Find all aspects among the given bodies.
///
/// Pairs are enumerated in input order (i < j); for each pair the wanted
/// aspects are tried in the order given. Pairs where both members are
/// points (angle-to-angle) are never evaluated. Unknown aspect names are
/// skipped. A pair may match more than one aspect under overlapping orbs;
/// every match is emitted.
pub fn find_aspects(
    bodies: &[BodyPosition],
    aspect_keys: &[&str],
    orb_overrides: &[(&str, f64)],
) -> Vec<AspectMatch> {
    let wanted: Vec<Aspect> = aspect_keys.iter().filter_map(|k| Aspect::from_key(k)).collect();

    let mut results = Vec::new();
    for i in 0..bodies.len() {
        for j in (i + 1)..bodies.len() {
            let a = &bodies[i];
            let b = &bodies[j];
            if a.kind == BodyKind::Point && b.kind == BodyKind::Point {
                continue;
            }

            let raw_diff = (a.longitude - b.longitude).abs();
            let angle = angle_between(a.longitude, b.longitude);

            for &aspect in &wanted {
                let orb = (angle - aspect.exact_angle()).abs();
                if orb > orb_for(aspect, orb_overrides) + ASPECT_EPSILON {
                    continue;
                }
                let speed_diff = a.speed - b.speed;
                results.push(AspectMatch {
                    body_a: a.name.clone(),
                    body_b: b.name.clone(),
                    aspect,
                    exact_angle: aspect.exact_angle(),
                    actual_angle: angle,
                    orb: (orb * 1000.0).round() / 1000.0,
                    applying: is_applying(aspect, raw_diff, angle, speed_diff),
                });
            }
        }
    }
    results
}

/// [`find_aspects`] over the full catalogue with default orbs.
pub fn find_aspects_default(bodies: &[BodyPosition]) -> Vec<AspectMatch> {
    let keys: Vec<&str> = ALL_ASPECTS.iter().map(|a| a.name()).collect();
    find_aspects(bodies, &keys, &[])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::BodyPosition;
    use astra_core::{Body, EclipticState};

    const EPS: f64 = 1e-10;

    fn planet(body: Body, lon: f64, speed: f64) -> BodyPosition {
        BodyPosition::planet(
            body,
            EclipticState {
                longitude_deg: lon,
                latitude_deg: 0.0,
                distance_au: 1.0,
                speed_deg_per_day: speed,
            },
        )
    }

    fn point(key: &str, lon: f64) -> BodyPosition {
        BodyPosition::point(-1, key, key, lon)
    }

    #[test]
    fn all_aspects_count() {
        assert_eq!(ALL_ASPECTS.len(), 11);
    }

    #[test]
    fn aspect_names_round_trip() {
        for a in ALL_ASPECTS {
            assert_eq!(Aspect::from_key(a.name()), Some(a));
        }
        assert_eq!(Aspect::from_key("grand_trine"), None);
    }

    #[test]
    fn aspect_key_case_insensitive() {
        assert_eq!(Aspect::from_key(" Square "), Some(Aspect::Square));
        assert_eq!(Aspect::from_key("TRINE"), Some(Aspect::Trine));
    }

    #[test]
    fn default_orb_table() {
        assert!((Aspect::Conjunction.default_orb() - 10.0).abs() < EPS);
        assert!((Aspect::Opposition.default_orb() - 10.0).abs() < EPS);
        assert!((Aspect::Trine.default_orb() - 8.0).abs() < EPS);
        assert!((Aspect::Square.default_orb() - 8.0).abs() < EPS);
        assert!((Aspect::Sextile.default_orb() - 6.0).abs() < EPS);
        assert!((Aspect::Quincunx.default_orb() - 3.0).abs() < EPS);
        for a in [
            Aspect::Semisextile,
            Aspect::Semisquare,
            Aspect::Sesquisquare,
            Aspect::Quintile,
            Aspect::Biquintile,
        ] {
            assert!((a.default_orb() - 2.0).abs() < EPS);
        }
    }

    #[test]
    fn exact_square_single_match() {
        let bodies = [planet(Body::Sun, 0.0, 1.0), planet(Body::Saturn, 90.0, 0.1)];
        let matches = find_aspects(&bodies, &["square"], &[]);
        assert_eq!(matches.len(), 1);
        let m = &matches[0];
        assert_eq!(m.aspect, Aspect::Square);
        assert!((m.exact_angle - 90.0).abs() < EPS);
        assert!((m.actual_angle - 90.0).abs() < EPS);
        assert!(m.orb.abs() < EPS);
        assert_eq!(m.body_a, "Sun");
        assert_eq!(m.body_b, "Saturn");
    }

    #[test]
    fn within_orb_matches() {
        // Separation 85, square orb 8 → orb 5, match.
        let bodies = [planet(Body::Sun, 0.0, 1.0), planet(Body::Mars, 85.0, 0.5)];
        let matches = find_aspects(&bodies, &["square"], &[]);
        assert_eq!(matches.len(), 1);
        assert!((matches[0].orb - 5.0).abs() < EPS);
    }

    #[test]
    fn outside_orb_no_match() {
        let bodies = [planet(Body::Sun, 0.0, 1.0), planet(Body::Mars, 79.0, 0.5)];
        assert!(find_aspects(&bodies, &["square"], &[]).is_empty());
    }

    #[test]
    fn epsilon_keeps_borderline_match() {
        // Exactly orb + 0.005 past the edge: still within epsilon.
        let bodies = [
            planet(Body::Sun, 0.0, 1.0),
            planet(Body::Mars, 98.005, 0.5),
        ];
        let matches = find_aspects(&bodies, &["square"], &[]);
        assert_eq!(matches.len(), 1);
        assert!((matches[0].orb - 8.005).abs() < EPS);
    }

    #[test]
    fn epsilon_does_not_stretch_further() {
        // orb + 0.02 past the edge: rejected.
        let bodies = [planet(Body::Sun, 0.0, 1.0), planet(Body::Mars, 98.02, 0.5)];
        assert!(find_aspects(&bodies, &["square"], &[]).is_empty());
    }

    #[test]
    fn orb_override_wins() {
        // Separation 75: outside square's default 8, inside an override of 16.
        let bodies = [planet(Body::Sun, 0.0, 1.0), planet(Body::Mars, 75.0, 0.5)];
        assert!(find_aspects(&bodies, &["square"], &[]).is_empty());
        let matches = find_aspects(&bodies, &["square"], &[("square", 16.0)]);
        assert_eq!(matches.len(), 1);
        assert!((matches[0].orb - 15.0).abs() < EPS);
    }

    #[test]
    fn orb_override_leaves_other_aspects_default() {
        // Trine at separation 117 still matches under its default 8 while
        // square's orb is tightened to 1.
        let bodies = [
            planet(Body::Sun, 0.0, 1.0),
            planet(Body::Jupiter, 117.0, 0.08),
        ];
        let matches = find_aspects(&bodies, &["square", "trine"], &[("square", 1.0)]);
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].aspect, Aspect::Trine);
    }

    #[test]
    fn unknown_aspect_names_skipped() {
        let bodies = [planet(Body::Sun, 0.0, 1.0), planet(Body::Saturn, 90.0, 0.1)];
        let matches = find_aspects(&bodies, &["novile", "square", ""], &[]);
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].aspect, Aspect::Square);
    }

    #[test]
    fn unknown_override_names_ignored() {
        let bodies = [planet(Body::Sun, 0.0, 1.0), planet(Body::Saturn, 90.0, 0.1)];
        let matches = find_aspects(&bodies, &["square"], &[("novile", 30.0)]);
        assert_eq!(matches.len(), 1);
    }

    #[test]
    fn point_point_pairs_excluded() {
        // Ascendant vs MC at an exact square: never an aspect.
        let bodies = [point("ascendant", 0.0), point("mc", 90.0)];
        assert!(find_aspects_default(&bodies).is_empty());
    }

    #[test]
    fn planet_point_pairs_included() {
        let bodies = [planet(Body::Sun, 0.0, 1.0), point("ascendant", 90.0)];
        let matches = find_aspects(&bodies, &["square"], &[]);
        assert_eq!(matches.len(), 1);
    }

    #[test]
    fn applying_when_faster_body_behind() {
        // Moon at 85 closing on a square to Sun at 0: angle 85 < 90 and
        // speed_diff = 1 - 13 < 0, so the pair is applying.
        let bodies = [planet(Body::Sun, 0.0, 1.0), planet(Body::Moon, 85.0, 13.0)];
        let matches = find_aspects(&bodies, &["square"], &[]);
        assert!(matches[0].applying);
    }

    #[test]
    fn separating_past_exact() {
        // Angle 95 > 90 and speed_diff < 0 → separating.
        let bodies = [planet(Body::Sun, 0.0, 1.0), planet(Body::Moon, 95.0, 13.0)];
        let matches = find_aspects(&bodies, &["square"], &[]);
        assert!(!matches[0].applying);
    }

    #[test]
    fn conjunction_short_way() {
        // Raw diff 5 (≤ 180): applying ⇔ speed_diff < 0.
        let bodies = [planet(Body::Sun, 0.0, 1.0), planet(Body::Moon, 5.0, 13.0)];
        let matches = find_aspects(&bodies, &["conjunction"], &[]);
        assert_eq!(matches.len(), 1);
        assert!(matches[0].applying); // 1 - 13 < 0
    }

    #[test]
    fn conjunction_long_way_around() {
        // Sun 359, Moon 1: raw diff 358 > 180, reduced angle 2.
        // speed_diff = 1 - 13 = -12, long-way branch wants > 0 → separating.
        let bodies = [planet(Body::Sun, 359.0, 1.0), planet(Body::Moon, 1.0, 13.0)];
        let matches = find_aspects(&bodies, &["conjunction"], &[]);
        assert_eq!(matches.len(), 1);
        assert!((matches[0].actual_angle - 2.0).abs() < EPS);
        assert!(!matches[0].applying);

        // Swap input order: raw diff still 358, speed_diff = 13 - 1 > 0 → applying.
        let bodies = [planet(Body::Moon, 1.0, 13.0), planet(Body::Sun, 359.0, 1.0)];
        let matches = find_aspects(&bodies, &["conjunction"], &[]);
        assert!(matches[0].applying);
    }

    #[test]
    fn orb_rounded_to_3_decimals() {
        let bodies = [
            planet(Body::Sun, 0.0, 1.0),
            planet(Body::Mars, 85.123456, 0.5),
        ];
        let matches = find_aspects(&bodies, &["square"], &[]);
        assert!((matches[0].orb - 4.877).abs() < 1e-9);
        // actual_angle stays unrounded.
        assert!((matches[0].actual_angle - 85.123456).abs() < EPS);
    }

    #[test]
    fn pair_and_catalogue_ordering() {
        // Three bodies all conjunct; matches come out in (0,1), (0,2), (1,2)
        // order, and within a pair in catalogue order.
        let bodies = [
            planet(Body::Sun, 0.0, 1.0),
            planet(Body::Mercury, 1.0, 1.2),
            planet(Body::Venus, 2.0, 1.1),
        ];
        let matches = find_aspects_default(&bodies);
        assert_eq!(matches.len(), 3);
        assert_eq!((matches[0].body_a.as_str(), matches[0].body_b.as_str()), ("Sun", "Mercury"));
        assert_eq!((matches[1].body_a.as_str(), matches[1].body_b.as_str()), ("Sun", "Venus"));
        assert_eq!((matches[2].body_a.as_str(), matches[2].body_b.as_str()), ("Mercury", "Venus"));
    }

    #[test]
    fn overlapping_orbs_emit_multiple_matches() {
        // With an absurd override, one pair can match two aspects; both emit.
        let bodies = [planet(Body::Sun, 0.0, 1.0), planet(Body::Mars, 37.5, 0.5)];
        let matches = find_aspects(
            &bodies,
            &["semisextile", "semisquare"],
            &[("semisextile", 8.0), ("semisquare", 8.0)],
        );
        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0].aspect, Aspect::Semisextile);
        assert_eq!(matches[1].aspect, Aspect::Semisquare);
    }

    #[test]
    fn empty_inputs() {
        assert!(find_aspects(&[], &["square"], &[]).is_empty());
        let bodies = [planet(Body::Sun, 0.0, 1.0)];
        assert!(find_aspects(&bodies, &["square"], &[]).is_empty());
        let bodies = [planet(Body::Sun, 0.0, 1.0), planet(Body::Moon, 90.0, 13.0)];
        assert!(find_aspects(&bodies, &[], &[]).is_empty());
    }
}
