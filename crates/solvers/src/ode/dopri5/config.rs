use thiserror::Error;

/// Configuration for the Dormand–Prince solver.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Config {
    rel_tol: f64,
    abs_tol: f64,
    max_steps: u32,
    max_step: f64,
}

/// Errors that can occur when validating a Dormand–Prince solver config.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    #[error("rel_tol must be finite and positive")]
    RelTol,

    #[error("abs_tol must be finite and positive")]
    AbsTol,

    #[error("max_steps must be at least one")]
    MaxSteps,

    #[error("max_step must be positive")]
    MaxStep,
}

impl Default for Config {
    fn default() -> Self {
        // Known-good values, unwrap is safe
        Self::new(1e-8, 1e-8, 100_000).unwrap()
    }
}

impl Config {
    /// Creates a new config with validated tolerances and step budget.
    ///
    /// The budget applies to each grid interval separately, so long grids do
    /// not need a larger budget.
    ///
    /// The maximum step size is unbounded; see [`Config::with_max_step`].
    ///
    /// # Errors
    ///
    /// Returns an error if a tolerance is non-positive or non-finite, or if
    /// `max_steps` is zero.
    pub fn new(rel_tol: f64, abs_tol: f64, max_steps: u32) -> Result<Self, ConfigError> {
        if !rel_tol.is_finite() || rel_tol <= 0.0 {
            return Err(ConfigError::RelTol);
        }
        if !abs_tol.is_finite() || abs_tol <= 0.0 {
            return Err(ConfigError::AbsTol);
        }
        if max_steps == 0 {
            return Err(ConfigError::MaxSteps);
        }

        Ok(Self {
            rel_tol,
            abs_tol,
            max_steps,
            max_step: f64::INFINITY,
        })
    }

    /// Limits the size of any single step.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MaxStep`] if `max_step` is not positive.
    pub fn with_max_step(self, max_step: f64) -> Result<Self, ConfigError> {
        if max_step.is_nan() || max_step <= 0.0 {
            return Err(ConfigError::MaxStep);
        }

        Ok(Self { max_step, ..self })
    }

    /// Returns the relative error tolerance.
    #[must_use]
    pub fn rel_tol(&self) -> f64 {
        self.rel_tol
    }

    /// Returns the absolute error tolerance.
    #[must_use]
    pub fn abs_tol(&self) -> f64 {
        self.abs_tol
    }

    /// Returns the budget of steps allowed between two grid points.
    #[must_use]
    pub fn max_steps(&self) -> u32 {
        self.max_steps
    }

    /// Returns the largest allowed step size.
    #[must_use]
    pub fn max_step(&self) -> f64 {
        self.max_step
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        let config = Config::default();

        assert_eq!(config.max_steps(), 100_000);
        assert!(config.max_step().is_infinite());
    }

    #[test]
    fn rejects_bad_tolerances() {
        assert_eq!(Config::new(0.0, 1e-8, 10), Err(ConfigError::RelTol));
        assert_eq!(Config::new(1e-8, f64::NAN, 10), Err(ConfigError::AbsTol));
        assert_eq!(Config::new(1e-8, 1e-8, 0), Err(ConfigError::MaxSteps));
    }

    #[test]
    fn rejects_non_positive_max_step() {
        let config = Config::default();

        assert_eq!(config.with_max_step(0.0), Err(ConfigError::MaxStep));
        assert_eq!(config.with_max_step(f64::NAN), Err(ConfigError::MaxStep));
        assert!(config.with_max_step(1.0).is_ok());
    }
}
