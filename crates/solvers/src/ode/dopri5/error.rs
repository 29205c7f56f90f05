use std::error::Error as StdError;

use ode_solvers::dop_shared::IntegrationError;

/// Errors that can occur during Dormand–Prince integration.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("system error: {0}")]
    System(#[source] Box<dyn StdError + Send + Sync>),

    #[error("initial state is not finite")]
    NonFiniteInitialState,

    #[error("derivative is not finite at t = {t}")]
    NonFiniteDerivative { t: f64 },

    #[error("state is not finite at t = {t}")]
    NonFiniteState { t: f64 },

    /// The step budget ran out, the step size underflowed, or the problem
    /// turned stiff inside one grid interval.
    #[error(transparent)]
    Integration(#[from] IntegrationError),
}

impl Error {
    pub(crate) fn system<E: StdError + Send + Sync + 'static>(err: E) -> Self {
        Self::System(Box::new(err))
    }
}
