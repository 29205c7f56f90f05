//! Scenario files.
//!
//! A scenario file is TOML. Every section is optional:
//!
//! ```toml
//! variant = "waning"
//!
//! [parameters]
//! population = 1e7
//! transmissibility = 0.1
//! contact_rate = 1.0
//! infection_duration = 14.0
//! waning_time = 90.0
//!
//! [grid]
//! days = 730
//!
//! [solver]
//! method = "dopri5"
//! rel_tol = 1e-6
//! ```
//!
//! Missing parameters take their defaults, the variant is inferred from the
//! parameters, and the grid defaults to one year of daily samples.

use std::{fs, path::Path, str::FromStr};

use contagion_core::TimeGrid;
use contagion_models::{Compartments, Parameters, Variant};
use contagion_solvers::ode::{Method, dopri5, rk4};
use serde::Deserialize;
use thiserror::Error;

use crate::{Error, Scenario};

/// Errors that can occur when loading a scenario file.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("failed to parse scenario: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid dopri5 settings: {0}")]
    Dopri5(#[from] dopri5::ConfigError),

    #[error("invalid rk4 settings: {0}")]
    Rk4(#[from] rk4::ConfigError),

    #[error(transparent)]
    Scenario(#[from] Error),
}

/// The contents of a scenario file.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScenarioFile {
    pub variant: Option<Variant>,
    pub parameters: Parameters,
    pub initial: Option<Compartments>,
    pub grid: GridSettings,
    pub solver: SolverSettings,
}

/// How the sampling times are given.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GridSettings {
    /// Daily samples `0, 1, ..., days - 1`.
    Days(u32),
    /// `count` evenly spaced samples from `start` to `end`.
    Linspace { start: f64, end: f64, count: usize },
    /// Explicit sample times.
    Points(Vec<f64>),
}

impl Default for GridSettings {
    fn default() -> Self {
        Self::Days(365)
    }
}

impl GridSettings {
    /// Builds the time grid.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidTimeGrid`] if the times are not a valid grid.
    pub fn build(&self) -> Result<TimeGrid, Error> {
        let grid = match self {
            Self::Days(days) => TimeGrid::days(*days)?,
            Self::Linspace { start, end, count } => TimeGrid::linspace(*start, *end, *count)?,
            Self::Points(points) => TimeGrid::new(points.clone())?,
        };
        Ok(grid)
    }
}

/// Integration method settings; omitted values take the solver defaults.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(tag = "method", rename_all = "snake_case", deny_unknown_fields)]
pub enum SolverSettings {
    Dopri5 {
        rel_tol: Option<f64>,
        abs_tol: Option<f64>,
        max_steps: Option<u32>,
        max_step: Option<f64>,
    },
    Rk4 {
        max_step: Option<f64>,
        max_steps: Option<u32>,
    },
}

impl Default for SolverSettings {
    fn default() -> Self {
        Self::Dopri5 {
            rel_tol: None,
            abs_tol: None,
            max_steps: None,
            max_step: None,
        }
    }
}

impl SolverSettings {
    /// Builds the validated integration method.
    ///
    /// # Errors
    ///
    /// Returns a [`LoadError`] if a setting is out of range.
    pub fn build(&self) -> Result<Method, LoadError> {
        match *self {
            Self::Dopri5 {
                rel_tol,
                abs_tol,
                max_steps,
                max_step,
            } => {
                let defaults = dopri5::Config::default();
                let config = dopri5::Config::new(
                    rel_tol.unwrap_or(defaults.rel_tol()),
                    abs_tol.unwrap_or(defaults.abs_tol()),
                    max_steps.unwrap_or(defaults.max_steps()),
                )?;
                let config = match max_step {
                    Some(max_step) => config.with_max_step(max_step)?,
                    None => config,
                };
                Ok(Method::Dopri5(config))
            }
            Self::Rk4 {
                max_step,
                max_steps,
            } => {
                let config = match max_step {
                    Some(max_step) => rk4::Config::new(max_step)?,
                    None => rk4::Config::default(),
                };
                let config = match max_steps {
                    Some(max_steps) => config.with_max_steps(max_steps)?,
                    None => config,
                };
                Ok(Method::Rk4(config))
            }
        }
    }
}

impl ScenarioFile {
    /// Reads and parses a scenario file.
    ///
    /// # Errors
    ///
    /// Returns a [`LoadError`] if the file cannot be read or parsed.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| LoadError::Read {
            path: path.display().to_string(),
            source,
        })?;
        text.parse()
    }

    /// Builds the scenario described by the file.
    ///
    /// # Errors
    ///
    /// Returns a [`LoadError`] if the grid, the initial state or the solver
    /// settings are invalid.
    pub fn to_scenario(&self) -> Result<Scenario, LoadError> {
        let mut scenario = Scenario::new(self.parameters, self.grid.build()?)
            .with_method(self.solver.build()?);

        if let Some(variant) = self.variant {
            scenario = scenario.with_variant(variant);
        }
        if let Some(initial) = self.initial {
            scenario = scenario.with_initial(initial)?;
        }

        Ok(scenario)
    }
}

impl FromStr for ScenarioFile {
    type Err = LoadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(toml::from_str(s)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use contagion_models::ParameterError;

    #[test]
    fn empty_file_uses_defaults() {
        let file: ScenarioFile = "".parse().unwrap();
        let scenario = file.to_scenario().unwrap();

        assert_eq!(scenario.variant(), Variant::Basic);
        assert_eq!(scenario.parameters(), &Parameters::default());
        assert_eq!(scenario.grid().len(), 365);
        assert_eq!(scenario.method(), &Method::default());
    }

    #[test]
    fn parses_a_full_scenario() {
        let text = r#"
            variant = "waning_seasonal"
            initial = { infected = 10.0, recovered = 0.0, susceptible = 9990.0 }

            [parameters]
            population = 1e4
            transmissibility = 0.2
            waning_time = 90.0
            seasonality = { strength = 0.3, shift = 30.0 }

            [grid.linspace]
            start = 0.0
            end = 100.0
            count = 201

            [solver]
            method = "rk4"
            max_step = 0.5
            max_steps = 1000
        "#;

        let scenario = text.parse::<ScenarioFile>().unwrap().to_scenario().unwrap();

        assert_eq!(scenario.variant(), Variant::WaningSeasonal);
        assert_relative_eq!(scenario.parameters().population(), 1e4);
        assert_eq!(scenario.parameters().waning_time(), Some(90.0));
        assert_relative_eq!(scenario.initial().infected, 10.0);
        assert_eq!(scenario.grid().len(), 201);
        assert_eq!(
            scenario.method(),
            &Method::Rk4(rk4::Config::new(0.5).unwrap().with_max_steps(1000).unwrap())
        );
    }

    #[test]
    fn daily_grid_and_dopri5_overrides() {
        let text = r#"
            grid = { days = 730 }

            [solver]
            method = "dopri5"
            rel_tol = 1e-6
            max_step = 2.0
        "#;

        let scenario = text.parse::<ScenarioFile>().unwrap().to_scenario().unwrap();

        assert_eq!(scenario.grid().end(), 729.0);
        let Method::Dopri5(config) = scenario.method() else {
            panic!("expected dopri5");
        };
        assert_relative_eq!(config.rel_tol(), 1e-6);
        assert_relative_eq!(config.abs_tol(), 1e-8);
        assert_relative_eq!(config.max_step(), 2.0);
    }

    #[test]
    fn rejects_invalid_parameters() {
        let result = "[parameters]\ninfection_duration = 0.0".parse::<ScenarioFile>();

        assert!(matches!(result, Err(LoadError::Parse(_))));
    }

    #[test]
    fn rejects_unknown_keys() {
        assert!("populaton = 5".parse::<ScenarioFile>().is_err());
        assert!("[parameters]\npopulaton = 5.0".parse::<ScenarioFile>().is_err());
    }

    #[test]
    fn rejects_initial_state_off_population() {
        let text = "initial = { infected = 1.0, recovered = 0.0, susceptible = 1.0 }";

        let result = text.parse::<ScenarioFile>().unwrap().to_scenario();

        assert!(matches!(
            result,
            Err(LoadError::Scenario(Error::InvalidParameter(
                ParameterError::InitialState { .. }
            )))
        ));
    }

    #[test]
    fn rejects_bad_solver_settings() {
        let text = "[solver]\nmethod = \"rk4\"\nmax_step = -1.0";

        let result = text.parse::<ScenarioFile>().unwrap().to_scenario();

        assert!(matches!(result, Err(LoadError::Rk4(_))));

        let text = "[solver]\nmethod = \"rk4\"\nmax_steps = 0";
        let result = text.parse::<ScenarioFile>().unwrap().to_scenario();
        assert!(matches!(result, Err(LoadError::Rk4(_))));
    }
}
