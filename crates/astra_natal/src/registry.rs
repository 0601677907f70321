//! Body registry: alias resolution, zodiac sign decomposition, and the
//! position record shared by the aspect engine and chart synthesizer.
//!
//! Resolution is deliberately forgiving: a key that resolves to nothing
//! known is skipped by consumers, never an error, so a typo in a request
//! degrades that one entry instead of failing the whole request.

use astra_core::{Body, EclipticState};

use crate::util::normalize_360;

/// The 12 zodiac signs starting from Aries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ZodiacSign {
    Aries,
    Taurus,
    Gemini,
    Cancer,
    Leo,
    Virgo,
    Libra,
    Scorpio,
    Sagittarius,
    Capricorn,
    Aquarius,
    Pisces,
}

/// All 12 signs in order (0 = Aries .. 11 = Pisces).
pub const ALL_SIGNS: [ZodiacSign; 12] = [
    ZodiacSign::Aries,
    ZodiacSign::Taurus,
    ZodiacSign::Gemini,
    ZodiacSign::Cancer,
    ZodiacSign::Leo,
    ZodiacSign::Virgo,
    ZodiacSign::Libra,
    ZodiacSign::Scorpio,
    ZodiacSign::Sagittarius,
    ZodiacSign::Capricorn,
    ZodiacSign::Aquarius,
    ZodiacSign::Pisces,
];

impl ZodiacSign {
    /// English name of the sign.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Aries => "Aries",
            Self::Taurus => "Taurus",
            Self::Gemini => "Gemini",
            Self::Cancer => "Cancer",
            Self::Leo => "Leo",
            Self::Virgo => "Virgo",
            Self::Libra => "Libra",
            Self::Scorpio => "Scorpio",
            Self::Sagittarius => "Sagittarius",
            Self::Capricorn => "Capricorn",
            Self::Aquarius => "Aquarius",
            Self::Pisces => "Pisces",
        }
    }

    /// 0-based index (Aries=0 .. Pisces=11).
    pub const fn index(self) -> u8 {
        match self {
            Self::Aries => 0,
            Self::Taurus => 1,
            Self::Gemini => 2,
            Self::Cancer => 3,
            Self::Leo => 4,
            Self::Virgo => 5,
            Self::Libra => 6,
            Self::Scorpio => 7,
            Self::Sagittarius => 8,
            Self::Capricorn => 9,
            Self::Aquarius => 10,
            Self::Pisces => 11,
        }
    }
}

/// Sign decomposition of an ecliptic longitude.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SignPosition {
    pub sign: ZodiacSign,
    /// 0-based sign index (0 = Aries).
    pub sign_index: u8,
    /// Decimal degrees within the sign, [0, 30).
    pub degree_in_sign: f64,
}

/// Decompose a longitude into sign + degree-within-sign.
///
/// Each sign spans exactly 30 degrees: Aries = [0, 30), Taurus = [30, 60), etc.
pub fn sign_of(longitude_deg: f64) -> SignPosition {
    let lon = normalize_360(longitude_deg);
    let sign_index = ((lon / 30.0).floor() as u8).min(11);
    SignPosition {
        sign: ALL_SIGNS[sign_index as usize],
        sign_index,
        degree_in_sign: lon - sign_index as f64 * 30.0,
    }
}

/// Degrees-minutes-seconds representation of an angle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dms {
    /// Whole degrees.
    pub degrees: u16,
    /// Arc-minutes (0..59).
    pub minutes: u8,
    /// Arc-seconds (0.0..60.0), may include fractional part.
    pub seconds: f64,
}

/// Convert decimal degrees to degrees-minutes-seconds.
///
/// Handles negative input by taking absolute value.
pub fn deg_to_dms(deg: f64) -> Dms {
    let d = deg.abs();
    let degrees = d.floor() as u16;
    let remainder = (d - degrees as f64) * 60.0;
    let minutes = remainder.floor() as u8;
    let seconds = (remainder - minutes as f64) * 60.0;
    Dms {
        degrees,
        minutes,
        seconds,
    }
}

/// Convert DMS back to decimal degrees.
pub fn dms_to_deg(dms: &Dms) -> f64 {
    dms.degrees as f64 + dms.minutes as f64 / 60.0 + dms.seconds / 3600.0
}

/// Canonical key of the Part of Fortune.
pub const FORTUNA_KEY: &str = "fortuna";

/// Synonyms for derived points. Checked before planet aliases.
fn point_alias(key: &str) -> Option<&'static str> {
    match key {
        "fortuna" | "fortune" | "part_of_fortune" | "pars_fortuna" => Some(FORTUNA_KEY),
        _ => None,
    }
}

/// Synonyms for provider bodies.
fn planet_alias(key: &str) -> Option<&'static str> {
    match key {
        "lilith" => Some("mean_apogee"),
        "true_lilith" => Some("oscu_apogee"),
        "quiron" => Some("chiron"),
        _ => None,
    }
}

/// Resolve a raw body key to its canonical form.
///
/// Trims and lowercases, then checks point aliases, then planet aliases;
/// anything else passes through unchanged. Idempotent and pure. Unknown
/// keys are not rejected here — consumers that do not recognize the
/// resolved key drop it silently.
pub fn resolve_key(raw: &str) -> String {
    let key = raw.trim().to_lowercase();
    match point_alias(&key).or_else(|| planet_alias(&key)) {
        Some(canonical) => canonical.to_owned(),
        None => key,
    }
}

/// Resolve a raw key to a provider [`Body`], if it names one.
///
/// Returns `None` for derived-point keys and unknown keys.
pub fn body_from_key(raw: &str) -> Option<Body> {
    Body::from_key(&resolve_key(raw))
}

/// True when a raw key resolves to a derived point rather than a body.
pub fn is_point_key(raw: &str) -> bool {
    resolve_key(raw) == FORTUNA_KEY
}

/// How a position entry participates in aspect classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BodyKind {
    /// A provider-computed body with real daily motion.
    Planet,
    /// A derived point or chart angle; zero speed, never retrograde.
    Point,
}

/// One positioned entry in a chart or aspect query.
#[derive(Debug, Clone, PartialEq)]
pub struct BodyPosition {
    /// Provider body code, or -1 for derived points.
    pub id: i32,
    /// Canonical lowercase key.
    pub key: String,
    /// Display name.
    pub name: String,
    /// Ecliptic longitude, normalized to [0, 360).
    pub longitude: f64,
    /// Ecliptic latitude in degrees.
    pub latitude: f64,
    /// Distance in AU.
    pub distance: f64,
    /// Daily motion in longitude, degrees/day.
    pub speed: f64,
    pub sign: ZodiacSign,
    /// Decimal degrees within the sign, [0, 30).
    pub sign_degree: f64,
    pub retrograde: bool,
    pub kind: BodyKind,
}

impl BodyPosition {
    /// Build a planet entry from a provider state.
    pub fn planet(body: Body, state: EclipticState) -> Self {
        let longitude = normalize_360(state.longitude_deg);
        let sp = sign_of(longitude);
        Self {
            id: body.code(),
            key: body.key().to_owned(),
            name: body.display_name().to_owned(),
            longitude,
            latitude: state.latitude_deg,
            distance: state.distance_au,
            speed: state.speed_deg_per_day,
            sign: sp.sign,
            sign_degree: sp.degree_in_sign,
            retrograde: state.speed_deg_per_day < 0.0,
            kind: BodyKind::Planet,
        }
    }

    /// Build a zero-speed point entry (chart angle or derived point).
    pub fn point(id: i32, key: &str, name: &str, longitude_deg: f64) -> Self {
        let longitude = normalize_360(longitude_deg);
        let sp = sign_of(longitude);
        Self {
            id,
            key: key.to_owned(),
            name: name.to_owned(),
            longitude,
            latitude: 0.0,
            distance: 0.0,
            speed: 0.0,
            sign: sp.sign,
            sign_degree: sp.degree_in_sign,
            retrograde: false,
            kind: BodyKind::Point,
        }
    }
}
