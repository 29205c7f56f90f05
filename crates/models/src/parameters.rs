use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::Seasonality;

/// Errors that can occur when validating epidemic parameters.
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum ParameterError {
    #[error("population must be finite and greater than one, got {value}")]
    Population { value: f64 },

    #[error("transmissibility must lie in [0, 1], got {value}")]
    Transmissibility { value: f64 },

    #[error("contact rate must be finite and positive, got {value}")]
    ContactRate { value: f64 },

    #[error("infection duration must be finite and positive, got {value}")]
    InfectionDuration { value: f64 },

    #[error("waning time must be positive, got {value}")]
    WaningTime { value: f64 },

    #[error("seasonality strength must be finite and non-negative, got {value}")]
    SeasonalityStrength { value: f64 },

    #[error("seasonality shift must be finite, got {value}")]
    SeasonalityShift { value: f64 },

    #[error("initial compartments must be non-negative and sum to {population}, got {total}")]
    InitialState { total: f64, population: f64 },
}

/// A tunable parameter, for sweeps and interactive changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[warn(missing_docs)]
pub enum Knob {
    /// Population size N.
    Population,
    /// Per-contact infection probability p.
    Transmissibility,
    /// Mean contacts per individual per day c.
    ContactRate,
    /// Mean infectious period D, in days.
    InfectionDuration,
    /// Mean immune period W, in days.
    WaningTime,
    /// Relative amplitude of the yearly contact-rate cycle.
    SeasonalityStrength,
    /// Day of the year on which the contact rate peaks.
    SeasonalityShift,
}

impl Knob {
    /// All knobs, in declaration order.
    pub const ALL: [Knob; 7] = [
        Knob::Population,
        Knob::Transmissibility,
        Knob::ContactRate,
        Knob::InfectionDuration,
        Knob::WaningTime,
        Knob::SeasonalityStrength,
        Knob::SeasonalityShift,
    ];

    /// Returns a human-readable label.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Knob::Population => "Population",
            Knob::Transmissibility => "Transmissibility",
            Knob::ContactRate => "Contact rate",
            Knob::InfectionDuration => "Average infection duration (days)",
            Knob::WaningTime => "Average waning time (days)",
            Knob::SeasonalityStrength => "Seasonality strength",
            Knob::SeasonalityShift => "Seasonality shift (days)",
        }
    }
}

/// The epidemiological parameters of one integration run.
///
/// Every field is validated on construction, so model evaluation never divides
/// by zero:
///
/// - `population` (N) is finite and greater than one
/// - `transmissibility` (p) is the per-contact infection probability, in [0, 1]
/// - `contact_rate` (c) is mean contacts per individual per day, positive
/// - `infection_duration` (D) is the mean infectious period in days, positive
/// - `waning_time` (W), if present, is the mean immune period in days; absent
///   means permanent immunity
/// - `seasonality`, if present, modulates the contact rate over the year
///
/// Deserializing goes through the same validation. Missing fields take the
/// [`Default`] values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawParameters", into = "RawParameters")]
pub struct Parameters {
    population: f64,
    transmissibility: f64,
    contact_rate: f64,
    infection_duration: f64,
    waning_time: Option<f64>,
    seasonality: Option<Seasonality>,
}

impl Default for Parameters {
    /// A town of 1000 with a 14-day infection, one contact a day and a 10%
    /// chance of transmission per contact.
    fn default() -> Self {
        // Known-good values, unwrap is safe
        Self::new(1000.0, 0.1, 1.0, 14.0).unwrap()
    }
}

impl Parameters {
    /// Creates parameters with permanent immunity and no seasonality.
    ///
    /// # Errors
    ///
    /// Returns a [`ParameterError`] naming the first invalid argument.
    pub fn new(
        population: f64,
        transmissibility: f64,
        contact_rate: f64,
        infection_duration: f64,
    ) -> Result<Self, ParameterError> {
        if !population.is_finite() || population <= 1.0 {
            return Err(ParameterError::Population { value: population });
        }
        if !(0.0..=1.0).contains(&transmissibility) {
            return Err(ParameterError::Transmissibility {
                value: transmissibility,
            });
        }
        if !contact_rate.is_finite() || contact_rate <= 0.0 {
            return Err(ParameterError::ContactRate {
                value: contact_rate,
            });
        }
        if !infection_duration.is_finite() || infection_duration <= 0.0 {
            return Err(ParameterError::InfectionDuration {
                value: infection_duration,
            });
        }

        Ok(Self {
            population,
            transmissibility,
            contact_rate,
            infection_duration,
            waning_time: None,
            seasonality: None,
        })
    }

    /// Sets the mean time before a recovered individual becomes susceptible.
    ///
    /// An infinite waning time is the same as permanent immunity.
    ///
    /// # Errors
    ///
    /// Returns [`ParameterError::WaningTime`] if `waning_time` is not positive.
    pub fn with_waning_time(self, waning_time: f64) -> Result<Self, ParameterError> {
        if waning_time.is_nan() || waning_time <= 0.0 {
            return Err(ParameterError::WaningTime { value: waning_time });
        }

        Ok(Self {
            waning_time: waning_time.is_finite().then_some(waning_time),
            ..self
        })
    }

    /// Removes waning, making immunity permanent.
    #[must_use]
    pub fn without_waning(self) -> Self {
        Self {
            waning_time: None,
            ..self
        }
    }

    /// Sets the seasonal modulation of the contact rate.
    #[must_use]
    pub fn with_seasonality(self, seasonality: Seasonality) -> Self {
        Self {
            seasonality: Some(seasonality),
            ..self
        }
    }

    /// Removes the seasonal modulation.
    #[must_use]
    pub fn without_seasonality(self) -> Self {
        Self {
            seasonality: None,
            ..self
        }
    }

    /// Returns a copy with one knob set to `value`, revalidated.
    ///
    /// Setting a seasonality knob when no seasonality is present starts from
    /// zero strength and zero shift.
    ///
    /// # Errors
    ///
    /// Returns a [`ParameterError`] if `value` is invalid for `knob`.
    pub fn with_knob(self, knob: Knob, value: f64) -> Result<Self, ParameterError> {
        let Self {
            population,
            transmissibility,
            contact_rate,
            infection_duration,
            ..
        } = self;
        let seasonality = self.seasonality.map_or((0.0, 0.0), |s| (s.strength(), s.shift()));

        let rebuilt = |population, transmissibility, contact_rate, infection_duration| {
            Self::new(population, transmissibility, contact_rate, infection_duration).map(
                |params| Self {
                    waning_time: self.waning_time,
                    seasonality: self.seasonality,
                    ..params
                },
            )
        };

        match knob {
            Knob::Population => {
                rebuilt(value, transmissibility, contact_rate, infection_duration)
            }
            Knob::Transmissibility => {
                rebuilt(population, value, contact_rate, infection_duration)
            }
            Knob::ContactRate => rebuilt(population, transmissibility, value, infection_duration),
            Knob::InfectionDuration => {
                rebuilt(population, transmissibility, contact_rate, value)
            }
            Knob::WaningTime => self.with_waning_time(value),
            Knob::SeasonalityStrength => {
                Ok(self.with_seasonality(Seasonality::new(value, seasonality.1)?))
            }
            Knob::SeasonalityShift => {
                Ok(self.with_seasonality(Seasonality::new(seasonality.0, value)?))
            }
        }
    }

    /// Returns the current value of a knob, or `None` if it is unset.
    #[must_use]
    pub fn knob(&self, knob: Knob) -> Option<f64> {
        match knob {
            Knob::Population => Some(self.population),
            Knob::Transmissibility => Some(self.transmissibility),
            Knob::ContactRate => Some(self.contact_rate),
            Knob::InfectionDuration => Some(self.infection_duration),
            Knob::WaningTime => self.waning_time,
            Knob::SeasonalityStrength => self.seasonality.map(|s| s.strength()),
            Knob::SeasonalityShift => self.seasonality.map(|s| s.shift()),
        }
    }

    /// Returns the population size N.
    #[must_use]
    pub fn population(&self) -> f64 {
        self.population
    }

    /// Returns the per-contact transmission probability p.
    #[must_use]
    pub fn transmissibility(&self) -> f64 {
        self.transmissibility
    }

    /// Returns the base contact rate c, in contacts per day.
    #[must_use]
    pub fn contact_rate(&self) -> f64 {
        self.contact_rate
    }

    /// Returns the mean infectious period D, in days.
    #[must_use]
    pub fn infection_duration(&self) -> f64 {
        self.infection_duration
    }

    /// Returns the mean immune period W, in days, if immunity wanes.
    #[must_use]
    pub fn waning_time(&self) -> Option<f64> {
        self.waning_time
    }

    /// Returns the seasonal modulation, if any.
    #[must_use]
    pub fn seasonality(&self) -> Option<Seasonality> {
        self.seasonality
    }

    /// Returns the basic reproduction number, approximated as `p * c * D`.
    #[must_use]
    pub fn basic_reproduction_number(&self) -> f64 {
        self.transmissibility * self.contact_rate * self.infection_duration
    }
}

#[derive(Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct RawParameters {
    population: f64,
    transmissibility: f64,
    contact_rate: f64,
    infection_duration: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    waning_time: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    seasonality: Option<Seasonality>,
}

impl Default for RawParameters {
    fn default() -> Self {
        Parameters::default().into()
    }
}

impl TryFrom<RawParameters> for Parameters {
    type Error = ParameterError;

    fn try_from(raw: RawParameters) -> Result<Self, Self::Error> {
        let params = Self::new(
            raw.population,
            raw.transmissibility,
            raw.contact_rate,
            raw.infection_duration,
        )?;

        let params = match raw.waning_time {
            Some(waning_time) => params.with_waning_time(waning_time)?,
            None => params,
        };

        Ok(match raw.seasonality {
            Some(seasonality) => params.with_seasonality(seasonality),
            None => params,
        })
    }
}

impl From<Parameters> for RawParameters {
    fn from(p: Parameters) -> Self {
        Self {
            population: p.population,
            transmissibility: p.transmissibility,
            contact_rate: p.contact_rate,
            infection_duration: p.infection_duration,
            waning_time: p.waning_time,
            seasonality: p.seasonality,
        }
    }
}
