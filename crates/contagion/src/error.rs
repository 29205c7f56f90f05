use contagion_core::GridError;
use contagion_models::ParameterError;
use thiserror::Error;

/// Failure while integrating a scenario.
pub type IntegrationError = contagion_solvers::ode::Error;

/// Errors that can occur when building or running a scenario.
///
/// Parameter and grid problems are reported before any integration starts.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid parameter: {0}")]
    InvalidParameter(#[from] ParameterError),

    #[error("invalid time grid: {0}")]
    InvalidTimeGrid(#[from] GridError),

    #[error("integration failed: {0}")]
    Integration(#[from] IntegrationError),
}
