use std::error::Error as StdError;

use ode_solvers::dop_shared::IntegrationError;

/// Errors that can occur during fixed-step Runge–Kutta integration.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("system error: {0}")]
    System(#[source] Box<dyn StdError + Send + Sync>),

    #[error("initial state is not finite")]
    NonFiniteInitialState,

    #[error("state is not finite at t = {t}")]
    NonFiniteState { t: f64 },

    #[error("interval starting at t = {t} needs more than {max_steps} sub-steps")]
    MaxStepsReached { t: f64, max_steps: u32 },

    #[error(transparent)]
    Integration(#[from] IntegrationError),
}

impl Error {
    pub(crate) fn system<E: StdError + Send + Sync + 'static>(err: E) -> Self {
        Self::System(Box::new(err))
    }
}
