//! Error types for natal calculations.

use std::error::Error;
use std::fmt::{Display, Formatter};

use astra_core::EphemerisError;

/// Errors from the natal engine.
///
/// Unknown body or aspect keys are NOT errors — they are silently dropped
/// from the corresponding result set.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum NatalError {
    /// A required input field is absent, named here. Raised before any
    /// provider call is made.
    MissingField(&'static str),
    /// The ephemeris provider rejected the request.
    Ephemeris(EphemerisError),
}

impl Display for NatalError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingField(field) => write!(f, "missing required field: {field}"),
            Self::Ephemeris(e) => write!(f, "ephemeris error: {e}"),
        }
    }
}

impl Error for NatalError {}

impl From<EphemerisError> for NatalError {
    fn from(e: EphemerisError) -> Self {
        Self::Ephemeris(e)
    }
}
