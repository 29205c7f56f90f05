use thiserror::Error;

/// Configuration for the fixed-step Runge–Kutta solver.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Config {
    max_step: f64,
    max_steps: u32,
}

/// Errors that can occur when validating a Runge–Kutta solver config.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    #[error("max_step must be finite and positive")]
    MaxStep,

    #[error("max_steps must be at least one")]
    MaxSteps,
}

impl Default for Config {
    fn default() -> Self {
        // Known-good value, unwrap is safe
        Self::new(0.25).unwrap()
    }
}

impl Config {
    /// Creates a new config with a validated maximum sub-step.
    ///
    /// Each grid interval may take up to 100 000 sub-steps; see
    /// [`Config::with_max_steps`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MaxStep`] if `max_step` is non-positive or
    /// non-finite.
    pub fn new(max_step: f64) -> Result<Self, ConfigError> {
        if !max_step.is_finite() || max_step <= 0.0 {
            return Err(ConfigError::MaxStep);
        }

        Ok(Self {
            max_step,
            max_steps: 100_000,
        })
    }

    /// Limits the number of sub-steps in any one grid interval.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MaxSteps`] if `max_steps` is zero.
    pub fn with_max_steps(self, max_steps: u32) -> Result<Self, ConfigError> {
        if max_steps == 0 {
            return Err(ConfigError::MaxSteps);
        }

        Ok(Self { max_steps, ..self })
    }

    /// Returns the longest sub-step taken between grid points.
    #[must_use]
    pub fn max_step(&self) -> f64 {
        self.max_step
    }

    /// Returns the budget of sub-steps between two grid points.
    #[must_use]
    pub fn max_steps(&self) -> u32 {
        self.max_steps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        let config = Config::default();

        assert_eq!(config.max_step(), 0.25);
        assert_eq!(config.max_steps(), 100_000);
    }

    #[test]
    fn rejects_empty_step_budget() {
        assert_eq!(Config::default().with_max_steps(0), Err(ConfigError::MaxSteps));
        assert_eq!(
            Config::default().with_max_steps(10).map(|c| c.max_steps()),
            Ok(10)
        );
    }
}
