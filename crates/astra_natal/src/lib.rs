//! Derived natal calculations built on an abstract ephemeris provider.
//!
//! This crate provides:
//! - Body-key alias resolution and zodiac sign decomposition
//! - The 11-aspect catalogue with configurable orbs
//! - The pairwise aspect engine (applying/separating classification)
//! - Part of Fortune derivation with day/night determination
//! - Natal chart synthesis over any [`astra_core::EphemerisProvider`]
//!
//! All calculations are pure and stateless per call; the provider's
//! sidereal reference frame travels as an explicit parameter, so
//! concurrent computations never observe each other's settings.

pub mod aspect;
pub mod chart;
pub mod error;
pub mod fortuna;
pub mod registry;
pub mod util;

pub use aspect::{
    ALL_ASPECTS, ASPECT_EPSILON, Aspect, AspectMatch, find_aspects, find_aspects_default,
};
pub use chart::{
    BirthInput, ChartConfig, DEFAULT_BODIES, NatalChart, compute_aspects, compute_chart,
    planet_positions,
};
pub use error::NatalError;
pub use fortuna::{
    FORTUNA_ID, MEAN_OBLIQUITY_DEG, derive_fortuna, fortuna_position, is_day_chart,
    part_of_fortune,
};
pub use registry::{
    ALL_SIGNS, BodyKind, BodyPosition, Dms, FORTUNA_KEY, SignPosition, ZodiacSign, body_from_key,
    deg_to_dms, dms_to_deg, is_point_key, resolve_key, sign_of,
};
pub use util::{angle_between, normalize_360};
