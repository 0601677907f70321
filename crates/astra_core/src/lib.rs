//! Ephemeris provider contract and core value types.
//!
//! This crate defines the abstract interface the natal engine consumes:
//! body identifiers, house systems, sidereal reference frames, and the
//! [`EphemerisProvider`] trait a concrete ephemeris backend implements.
//! No ephemeris physics lives here — positions, house cusps, and sidereal
//! time are supplied by the provider and treated as opaque numeric inputs.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Celestial bodies addressable through the provider contract.
///
/// These are the bodies the provider computes directly. Derived points
/// (the Part of Fortune, chart angles) are NOT included here — they are
/// computed downstream in `astra_natal` from provider outputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Body {
    Sun,
    Moon,
    Mercury,
    Venus,
    Mars,
    Jupiter,
    Saturn,
    Uranus,
    Neptune,
    Pluto,
    MeanNode,
    TrueNode,
    MeanApogee,
    OscuApogee,
    Earth,
    Chiron,
    Pholus,
    Ceres,
    Pallas,
    Juno,
    Vesta,
}

/// All 21 bodies in stable code order (0 = Sun .. 20 = Vesta).
pub const ALL_BODIES: [Body; 21] = [
    Body::Sun,
    Body::Moon,
    Body::Mercury,
    Body::Venus,
    Body::Mars,
    Body::Jupiter,
    Body::Saturn,
    Body::Uranus,
    Body::Neptune,
    Body::Pluto,
    Body::MeanNode,
    Body::TrueNode,
    Body::MeanApogee,
    Body::OscuApogee,
    Body::Earth,
    Body::Chiron,
    Body::Pholus,
    Body::Ceres,
    Body::Pallas,
    Body::Juno,
    Body::Vesta,
];

impl Body {
    /// Stable numeric body code used by the provider.
    pub const fn code(self) -> i32 {
        match self {
            Self::Sun => 0,
            Self::Moon => 1,
            Self::Mercury => 2,
            Self::Venus => 3,
            Self::Mars => 4,
            Self::Jupiter => 5,
            Self::Saturn => 6,
            Self::Uranus => 7,
            Self::Neptune => 8,
            Self::Pluto => 9,
            Self::MeanNode => 10,
            Self::TrueNode => 11,
            Self::MeanApogee => 12,
            Self::OscuApogee => 13,
            Self::Earth => 14,
            Self::Chiron => 15,
            Self::Pholus => 16,
            Self::Ceres => 17,
            Self::Pallas => 18,
            Self::Juno => 19,
            Self::Vesta => 20,
        }
    }

    /// Canonical lowercase key for this body.
    pub const fn key(self) -> &'static str {
        match self {
            Self::Sun => "sun",
            Self::Moon => "moon",
            Self::Mercury => "mercury",
            Self::Venus => "venus",
            Self::Mars => "mars",
            Self::Jupiter => "jupiter",
            Self::Saturn => "saturn",
            Self::Uranus => "uranus",
            Self::Neptune => "neptune",
            Self::Pluto => "pluto",
            Self::MeanNode => "mean_node",
            Self::TrueNode => "true_node",
            Self::MeanApogee => "mean_apogee",
            Self::OscuApogee => "oscu_apogee",
            Self::Earth => "earth",
            Self::Chiron => "chiron",
            Self::Pholus => "pholus",
            Self::Ceres => "ceres",
            Self::Pallas => "pallas",
            Self::Juno => "juno",
            Self::Vesta => "vesta",
        }
    }

    /// Human-readable display name.
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Sun => "Sun",
            Self::Moon => "Moon",
            Self::Mercury => "Mercury",
            Self::Venus => "Venus",
            Self::Mars => "Mars",
            Self::Jupiter => "Jupiter",
            Self::Saturn => "Saturn",
            Self::Uranus => "Uranus",
            Self::Neptune => "Neptune",
            Self::Pluto => "Pluto",
            Self::MeanNode => "Mean Node",
            Self::TrueNode => "True Node",
            Self::MeanApogee => "Mean Apogee",
            Self::OscuApogee => "Osculating Apogee",
            Self::Earth => "Earth",
            Self::Chiron => "Chiron",
            Self::Pholus => "Pholus",
            Self::Ceres => "Ceres",
            Self::Pallas => "Pallas",
            Self::Juno => "Juno",
            Self::Vesta => "Vesta",
        }
    }

    /// Convert a numeric body code into a [`Body`].
    pub const fn from_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(Self::Sun),
            1 => Some(Self::Moon),
            2 => Some(Self::Mercury),
            3 => Some(Self::Venus),
            4 => Some(Self::Mars),
            5 => Some(Self::Jupiter),
            6 => Some(Self::Saturn),
            7 => Some(Self::Uranus),
            8 => Some(Self::Neptune),
            9 => Some(Self::Pluto),
            10 => Some(Self::MeanNode),
            11 => Some(Self::TrueNode),
            12 => Some(Self::MeanApogee),
            13 => Some(Self::OscuApogee),
            14 => Some(Self::Earth),
            15 => Some(Self::Chiron),
            16 => Some(Self::Pholus),
            17 => Some(Self::Ceres),
            18 => Some(Self::Pallas),
            19 => Some(Self::Juno),
            20 => Some(Self::Vesta),
            _ => None,
        }
    }

    /// Look up a body by its canonical key. Aliases are resolved one
    /// layer up, in the `astra_natal` registry.
    pub fn from_key(key: &str) -> Option<Self> {
        ALL_BODIES.iter().copied().find(|b| b.key() == key)
    }
}

/// House systems supported by the provider contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HouseSystem {
    #[default]
    Placidus,
    Koch,
    Porphyrius,
    Regiomontanus,
    Campanus,
    Equal,
    WholeSign,
    Alcabitius,
    Morinus,
    Topocentric,
}

/// All 10 house systems in catalogue order.
pub const ALL_HOUSE_SYSTEMS: [HouseSystem; 10] = [
    HouseSystem::Placidus,
    HouseSystem::Koch,
    HouseSystem::Porphyrius,
    HouseSystem::Regiomontanus,
    HouseSystem::Campanus,
    HouseSystem::Equal,
    HouseSystem::WholeSign,
    HouseSystem::Alcabitius,
    HouseSystem::Morinus,
    HouseSystem::Topocentric,
];

impl HouseSystem {
    /// Single-character system code passed to the provider.
    pub const fn code(self) -> char {
        match self {
            Self::Placidus => 'P',
            Self::Koch => 'K',
            Self::Porphyrius => 'O',
            Self::Regiomontanus => 'R',
            Self::Campanus => 'C',
            Self::Equal => 'E',
            Self::WholeSign => 'W',
            Self::Alcabitius => 'B',
            Self::Morinus => 'M',
            Self::Topocentric => 'T',
        }
    }

    /// Display name of the house system.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Placidus => "Placidus",
            Self::Koch => "Koch",
            Self::Porphyrius => "Porphyrius",
            Self::Regiomontanus => "Regiomontanus",
            Self::Campanus => "Campanus",
            Self::Equal => "Equal",
            Self::WholeSign => "Whole Sign",
            Self::Alcabitius => "Alcabitius",
            Self::Morinus => "Morinus",
            Self::Topocentric => "Polich/Page (Topocentric)",
        }
    }

    /// Convert a system code character into a [`HouseSystem`].
    pub const fn from_code(code: char) -> Option<Self> {
        match code {
            'P' => Some(Self::Placidus),
            'K' => Some(Self::Koch),
            'O' => Some(Self::Porphyrius),
            'R' => Some(Self::Regiomontanus),
            'C' => Some(Self::Campanus),
            'E' => Some(Self::Equal),
            'W' => Some(Self::WholeSign),
            'B' => Some(Self::Alcabitius),
            'M' => Some(Self::Morinus),
            'T' => Some(Self::Topocentric),
            _ => None,
        }
    }
}

/// Sidereal reference systems (ayanamsas) supported by the contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Ayanamsa {
    FaganBradley,
    #[default]
    Lahiri,
    Deluce,
    Raman,
    Ushashashi,
    Krishnamurti,
    DjwhalKhul,
    Yukteshwar,
    JnBhasin,
    BabylKugler1,
    BabylKugler2,
    BabylKugler3,
    BabylHuber,
    BabylEtpsc,
    Aldebaran15Tau,
    Hipparchos,
    Sassanian,
    Galcent0Sag,
    J2000,
    J1900,
    B1950,
    Suryasiddhanta,
    SuryasiddhantaMsun,
    Aryabhata,
    AryabhataMsun,
    SsRevati,
    SsCitra,
    TrueCitra,
    TrueRevati,
    TruePushya,
}

/// All 30 ayanamsas in stable code order (0 = Fagan/Bradley .. 29 = True Pushya).
pub const ALL_AYANAMSAS: [Ayanamsa; 30] = [
    Ayanamsa::FaganBradley,
    Ayanamsa::Lahiri,
    Ayanamsa::Deluce,
    Ayanamsa::Raman,
    Ayanamsa::Ushashashi,
    Ayanamsa::Krishnamurti,
    Ayanamsa::DjwhalKhul,
    Ayanamsa::Yukteshwar,
    Ayanamsa::JnBhasin,
    Ayanamsa::BabylKugler1,
    Ayanamsa::BabylKugler2,
    Ayanamsa::BabylKugler3,
    Ayanamsa::BabylHuber,
    Ayanamsa::BabylEtpsc,
    Ayanamsa::Aldebaran15Tau,
    Ayanamsa::Hipparchos,
    Ayanamsa::Sassanian,
    Ayanamsa::Galcent0Sag,
    Ayanamsa::J2000,
    Ayanamsa::J1900,
    Ayanamsa::B1950,
    Ayanamsa::Suryasiddhanta,
    Ayanamsa::SuryasiddhantaMsun,
    Ayanamsa::Aryabhata,
    Ayanamsa::AryabhataMsun,
    Ayanamsa::SsRevati,
    Ayanamsa::SsCitra,
    Ayanamsa::TrueCitra,
    Ayanamsa::TrueRevati,
    Ayanamsa::TruePushya,
];

impl Ayanamsa {
    /// Stable numeric mode code used by the provider.
    pub const fn code(self) -> i32 {
        match self {
            Self::FaganBradley => 0,
            Self::Lahiri => 1,
            Self::Deluce => 2,
            Self::Raman => 3,
            Self::Ushashashi => 4,
            Self::Krishnamurti => 5,
            Self::DjwhalKhul => 6,
            Self::Yukteshwar => 7,
            Self::JnBhasin => 8,
            Self::BabylKugler1 => 9,
            Self::BabylKugler2 => 10,
            Self::BabylKugler3 => 11,
            Self::BabylHuber => 12,
            Self::BabylEtpsc => 13,
            Self::Aldebaran15Tau => 14,
            Self::Hipparchos => 15,
            Self::Sassanian => 16,
            Self::Galcent0Sag => 17,
            Self::J2000 => 18,
            Self::J1900 => 19,
            Self::B1950 => 20,
            Self::Suryasiddhanta => 21,
            Self::SuryasiddhantaMsun => 22,
            Self::Aryabhata => 23,
            Self::AryabhataMsun => 24,
            Self::SsRevati => 25,
            Self::SsCitra => 26,
            Self::TrueCitra => 27,
            Self::TrueRevati => 28,
            Self::TruePushya => 29,
        }
    }

    /// Canonical lowercase key for this ayanamsa.
    pub const fn key(self) -> &'static str {
        match self {
            Self::FaganBradley => "fagan_bradley",
            Self::Lahiri => "lahiri",
            Self::Deluce => "deluce",
            Self::Raman => "raman",
            Self::Ushashashi => "ushashashi",
            Self::Krishnamurti => "krishnamurti",
            Self::DjwhalKhul => "djwhal_khul",
            Self::Yukteshwar => "yukteshwar",
            Self::JnBhasin => "jn_bhasin",
            Self::BabylKugler1 => "babyl_kugler1",
            Self::BabylKugler2 => "babyl_kugler2",
            Self::BabylKugler3 => "babyl_kugler3",
            Self::BabylHuber => "babyl_huber",
            Self::BabylEtpsc => "babyl_etpsc",
            Self::Aldebaran15Tau => "aldebaran_15tau",
            Self::Hipparchos => "hipparchos",
            Self::Sassanian => "sassanian",
            Self::Galcent0Sag => "galcent_0sag",
            Self::J2000 => "j2000",
            Self::J1900 => "j1900",
            Self::B1950 => "b1950",
            Self::Suryasiddhanta => "suryasiddhanta",
            Self::SuryasiddhantaMsun => "suryasiddhanta_msun",
            Self::Aryabhata => "aryabhata",
            Self::AryabhataMsun => "aryabhata_msun",
            Self::SsRevati => "ss_revati",
            Self::SsCitra => "ss_citra",
            Self::TrueCitra => "true_citra",
            Self::TrueRevati => "true_revati",
            Self::TruePushya => "true_pushya",
        }
    }

    /// Look up an ayanamsa by its canonical key.
    pub fn from_key(key: &str) -> Option<Self> {
        ALL_AYANAMSAS.iter().copied().find(|a| a.key() == key)
    }
}

/// Zodiac reference frame for a position query.
///
/// The sidereal mode is an explicit per-call parameter, never a global
/// provider switch: two concurrent computations can use different frames
/// without observing each other's settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ReferenceFrame {
    #[default]
    Tropical,
    Sidereal(Ayanamsa),
}

impl ReferenceFrame {
    /// True for any sidereal variant.
    pub const fn is_sidereal(self) -> bool {
        matches!(self, Self::Sidereal(_))
    }
}

/// Geocentric ecliptic state of one body at one instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EclipticState {
    /// Ecliptic longitude in degrees.
    pub longitude_deg: f64,
    /// Ecliptic latitude in degrees.
    pub latitude_deg: f64,
    /// Distance in AU.
    pub distance_au: f64,
    /// Daily motion in longitude, degrees/day. Negative = retrograde.
    pub speed_deg_per_day: f64,
}

/// The eight chart angles returned by the house computation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartAngles {
    pub ascendant: f64,
    pub mc: f64,
    pub armc: f64,
    pub vertex: f64,
    pub equatorial_ascendant: f64,
    pub co_ascendant1: f64,
    pub co_ascendant2: f64,
    pub polar_ascendant: f64,
}

/// House cusps and angles for one chart, immutable once retrieved.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HouseData {
    /// Cusps of houses 1..12, degrees. `cusps[0]` is house 1.
    pub cusps: [f64; 12],
    pub angles: ChartAngles,
}

/// Geographic location of the observer, degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoLocation {
    /// Latitude in degrees, north positive.
    pub latitude_deg: f64,
    /// Longitude in degrees, east positive.
    pub longitude_deg: f64,
}

impl GeoLocation {
    pub const fn new(latitude_deg: f64, longitude_deg: f64) -> Self {
        Self {
            latitude_deg,
            longitude_deg,
        }
    }
}

/// Errors surfaced by an ephemeris provider.
///
/// Provider failures are deterministic: a failed call fails the enclosing
/// request immediately and is never retried.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum EphemerisError {
    /// The provider has no ephemeris data for this body code.
    UnsupportedBody(i32),
    /// The instant is outside the provider's ephemeris range.
    EpochOutOfRange(f64),
    /// Provider-internal calculation failure.
    Calculation(String),
}

impl Display for EphemerisError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnsupportedBody(code) => write!(f, "unsupported body code {code}"),
            Self::EpochOutOfRange(jd) => write!(f, "epoch out of range: JD {jd}"),
            Self::Calculation(msg) => write!(f, "calculation failed: {msg}"),
        }
    }
}

impl Error for EphemerisError {}

/// Abstract ephemeris backend the natal engine computes against.
///
/// Implementations must be pure with respect to their inputs: no call may
/// observe configuration set by another call (the reference frame travels
/// as an argument, see [`ReferenceFrame`]).
pub trait EphemerisProvider {
    /// Julian Day for a civil UT date. `ut_hour` is a fractional hour.
    fn julian_day(&self, year: i32, month: u32, day: u32, ut_hour: f64) -> f64;

    /// Geocentric ecliptic position and daily speed of one body.
    fn body_position(
        &self,
        jd: f64,
        body: Body,
        frame: ReferenceFrame,
    ) -> Result<EclipticState, EphemerisError>;

    /// House cusps and chart angles for a location and house system.
    fn houses(
        &self,
        jd: f64,
        location: GeoLocation,
        system: HouseSystem,
    ) -> Result<HouseData, EphemerisError>;

    /// Apparent sidereal time at Greenwich, in hours.
    fn sidereal_time(&self, jd: f64) -> Result<f64, EphemerisError>;

    /// Continuous house position of an ecliptic point, in [1, 13).
    ///
    /// `armc_deg` is the sidereal time expressed in degrees (hours * 15).
    fn house_position(
        &self,
        armc_deg: f64,
        geo_lat_deg: f64,
        obliquity_deg: f64,
        system: HouseSystem,
        lon_deg: f64,
        lat_deg: f64,
    ) -> Result<f64, EphemerisError>;
}
