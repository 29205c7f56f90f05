use std::f64::consts::TAU;

use serde::{Deserialize, Serialize};

use crate::ParameterError;

/// Length of the seasonal cycle, in days.
pub const SEASON_DAYS: f64 = 365.0;

/// Annual sinusoidal modulation of the contact rate.
///
/// The contact rate is multiplied by
///
/// ```text
/// 1 + strength * cos(2π / 365 * (t - shift))
/// ```
///
/// which peaks at `1 + strength` on day `shift` (mod 365) and bottoms out at
/// `1 - strength` half a year later. A strength of one or more drives the
/// contact rate to zero or below at the trough; such values are accepted but
/// are physically meaningless.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawSeasonality", into = "RawSeasonality")]
pub struct Seasonality {
    strength: f64,
    shift: f64,
}

impl Seasonality {
    /// Creates a validated seasonal modulation.
    ///
    /// # Errors
    ///
    /// Returns an error if `strength` is negative or non-finite, or if
    /// `shift` is non-finite.
    pub fn new(strength: f64, shift: f64) -> Result<Self, ParameterError> {
        if !strength.is_finite() || strength < 0.0 {
            return Err(ParameterError::SeasonalityStrength { value: strength });
        }
        if !shift.is_finite() {
            return Err(ParameterError::SeasonalityShift { value: shift });
        }
        if strength >= 1.0 {
            log::warn!("seasonality strength {strength} makes the contact rate non-positive at the trough");
        }

        Ok(Self { strength, shift })
    }

    /// Returns the relative amplitude of the cycle.
    #[must_use]
    pub fn strength(&self) -> f64 {
        self.strength
    }

    /// Returns the day on which the contact rate peaks.
    #[must_use]
    pub fn shift(&self) -> f64 {
        self.shift
    }

    /// Returns the contact-rate multiplier at time `t` (days).
    #[must_use]
    pub fn factor(&self, t: f64) -> f64 {
        1.0 + self.strength * (TAU / SEASON_DAYS * (t - self.shift)).cos()
    }
}

#[derive(Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawSeasonality {
    strength: f64,
    #[serde(default)]
    shift: f64,
}

impl TryFrom<RawSeasonality> for Seasonality {
    type Error = ParameterError;

    fn try_from(raw: RawSeasonality) -> Result<Self, Self::Error> {
        Self::new(raw.strength, raw.shift)
    }
}

impl From<Seasonality> for RawSeasonality {
    fn from(s: Seasonality) -> Self {
        Self {
            strength: s.strength,
            shift: s.shift,
        }
    }
}
