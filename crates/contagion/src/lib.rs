//! Explore SIR-family epidemic models by integrating them over time.
//!
//! A [`Scenario`] bundles a model [`Variant`], validated [`Parameters`], an
//! initial state and a sampling grid. Running it integrates the model from the
//! first grid point and returns an [`Outcome`] holding the trajectory:
//!
//! ```
//! use contagion::{Parameters, Scenario, TimeGrid};
//!
//! let params = Parameters::new(1e4, 0.2, 1.0, 14.0)?;
//! let outcome = Scenario::new(params, TimeGrid::days(365)?).run()?;
//!
//! let peak = outcome.peak().expect("grid is not empty");
//! assert!(peak.time > 30.0 && peak.time < 90.0);
//! # Ok::<(), contagion::Error>(())
//! ```
//!
//! A [`Sweep`] repeats a scenario for each value of one [`Knob`], producing a
//! [`Frame`] per value. Each frame is a fresh integration.

pub mod analysis;
pub mod config;
mod error;
mod outcome;
mod scenario;
mod sweep;

#[cfg(feature = "plot")]
pub mod plot;

pub use analysis::{Extremum, ExtremumKind, Peak};
pub use error::{Error, IntegrationError};
pub use outcome::Outcome;
pub use scenario::{Scenario, integrate};
pub use sweep::{Frame, Sweep, inclusive_range, ping_pong};

pub use contagion_core::{GridError, TimeGrid, Trajectory};
pub use contagion_models::{
    Compartments, Knob, ParameterError, Parameters, RateModel, Seasonality, Sir, SirWaning,
    SirWaningSeasonal, Variant,
};
pub use contagion_solvers::ode::{Method, Status};
