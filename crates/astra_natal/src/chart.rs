//! Natal chart synthesis.
//!
//! Orchestrates the registry, provider queries, the Part of Fortune
//! deriver, and the pairwise aspect engine into one immutable chart
//! result. Also exposes the standalone position and aspect queries.

use astra_core::{EphemerisProvider, GeoLocation, HouseData, HouseSystem, ReferenceFrame};

use crate::aspect::{ALL_ASPECTS, AspectMatch, find_aspects};
use crate::error::NatalError;
use crate::fortuna::derive_fortuna;
use crate::registry::{BodyPosition, body_from_key, is_point_key};

/// Default body selection for a chart request.
pub const DEFAULT_BODIES: [&str; 13] = [
    "sun",
    "moon",
    "mercury",
    "venus",
    "mars",
    "jupiter",
    "saturn",
    "uranus",
    "neptune",
    "pluto",
    "true_node",
    "mean_apogee",
    "chiron",
];

/// Birth datum: civil date-time, raw UTC offset, and location.
///
/// The offset is a plain numeric hour value, not a timezone name; local
/// civil time converts to UT by simple subtraction.
#[derive(Debug, Clone, PartialEq)]
pub struct BirthInput {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
    pub second: f64,
    /// Hours east of UTC.
    pub utc_offset_hours: f64,
    /// Geographic latitude, degrees north. Required for houses/fortuna.
    pub latitude: Option<f64>,
    /// Geographic longitude, degrees east. Required for houses/fortuna.
    pub longitude: Option<f64>,
}

impl BirthInput {
    /// Universal time as a fractional hour.
    pub fn ut_hour(&self) -> f64 {
        self.hour as f64 + self.minute as f64 / 60.0 + self.second / 3600.0
            - self.utc_offset_hours
    }

    /// Geographic location, or the missing field named.
    ///
    /// Checked before any provider call is made.
    pub fn location(&self) -> Result<GeoLocation, NatalError> {
        let latitude = self.latitude.ok_or(NatalError::MissingField("latitude"))?;
        let longitude = self
            .longitude
            .ok_or(NatalError::MissingField("longitude"))?;
        Ok(GeoLocation::new(latitude, longitude))
    }
}

/// Per-request chart options.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ChartConfig {
    pub house_system: HouseSystem,
    pub frame: ReferenceFrame,
    /// Body keys to place; `None` = [`DEFAULT_BODIES`]. Unknown keys are
    /// silently skipped.
    pub bodies: Option<Vec<String>>,
    /// Aspect names to match; `None` = the full catalogue. Unknown names
    /// are silently skipped.
    pub aspects: Option<Vec<String>>,
    /// Per-aspect orb overrides, merged over catalogue defaults.
    pub orb_overrides: Vec<(String, f64)>,
}

/// A fully synthesized natal chart. Constructed once, never mutated.
#[derive(Debug, Clone, PartialEq)]
pub struct NatalChart {
    pub input: BirthInput,
    pub julian_day: f64,
    /// Placed bodies in request order, derived points appended last.
    pub bodies: Vec<BodyPosition>,
    pub houses: HouseData,
    pub aspects: Vec<AspectMatch>,
}

/// Positions for the requested bodies at an instant.
///
/// Keys resolve through the registry; keys that name no provider body
/// (including derived-point keys) are skipped. A provider failure on a
/// recognized body fails the whole query.
pub fn planet_positions<P: EphemerisProvider + ?Sized>(
    provider: &P,
    jd: f64,
    body_keys: &[&str],
    frame: ReferenceFrame,
) -> Result<Vec<BodyPosition>, NatalError> {
    let mut positions = Vec::new();
    for key in body_keys {
        let Some(body) = body_from_key(key) else {
            continue;
        };
        let state = provider.body_position(jd, body, frame)?;
        positions.push(BodyPosition::planet(body, state));
    }
    Ok(positions)
}

/// Standalone aspect query: place the requested bodies, then classify.
pub fn compute_aspects<P: EphemerisProvider + ?Sized>(
    provider: &P,
    jd: f64,
    body_keys: &[&str],
    aspect_keys: &[&str],
    orb_overrides: &[(&str, f64)],
) -> Result<Vec<AspectMatch>, NatalError> {
    let positions = planet_positions(provider, jd, body_keys, ReferenceFrame::Tropical)?;
    Ok(find_aspects(&positions, aspect_keys, orb_overrides))
}

/// Synthesize a complete natal chart.
pub fn compute_chart<P: EphemerisProvider + ?Sized>(
    provider: &P,
    input: BirthInput,
    config: &ChartConfig,
) -> Result<NatalChart, NatalError> {
    let location = input.location()?;
    let jd = provider.julian_day(input.year, input.month, input.day, input.ut_hour());

    let default_keys: Vec<String> = DEFAULT_BODIES.iter().map(|k| (*k).to_owned()).collect();
    let body_keys = config.bodies.as_ref().unwrap_or(&default_keys);

    let mut planets = Vec::new();
    let mut want_fortuna = false;
    for key in body_keys {
        if is_point_key(key) {
            want_fortuna = true;
            continue;
        }
        let Some(body) = body_from_key(key) else {
            continue;
        };
        let state = provider.body_position(jd, body, config.frame)?;
        planets.push(BodyPosition::planet(body, state));
    }

    let houses = provider.houses(jd, location, config.house_system)?;

    let fortuna = if want_fortuna {
        Some(derive_fortuna(
            provider,
            jd,
            location,
            config.frame,
            config.house_system,
        )?)
    } else {
        None
    };

    // Comparison set: planets, then Ascendant and MC as zero-speed
    // points, then derived points. Angle-to-angle pairs are excluded by
    // the engine itself.
    let mut comparison = planets.clone();
    comparison.push(BodyPosition::point(
        -1,
        "ascendant",
        "Ascendant",
        houses.angles.ascendant,
    ));
    comparison.push(BodyPosition::point(-1, "mc", "MC", houses.angles.mc));
    if let Some(f) = &fortuna {
        comparison.push(f.clone());
    }

    let default_aspects: Vec<String> =
        ALL_ASPECTS.iter().map(|a| a.name().to_owned()).collect();
    let aspect_names = config.aspects.as_ref().unwrap_or(&default_aspects);
    let aspect_keys: Vec<&str> = aspect_names.iter().map(String::as_str).collect();
    let overrides: Vec<(&str, f64)> = config
        .orb_overrides
        .iter()
        .map(|(name, orb)| (name.as_str(), *orb))
        .collect();
    let aspects = find_aspects(&comparison, &aspect_keys, &overrides);

    let mut bodies = planets;
    if let Some(f) = fortuna {
        bodies.push(f);
    }

    Ok(NatalChart {
        input,
        julian_day: jd,
        bodies,
        houses,
        aspects,
    })
}
