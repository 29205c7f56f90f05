//! Solvers for initial-value problems of ordinary differential equations.
//!
//! Every solver in this module takes an [`OdeSystem`], the state at the first
//! point of a [`TimeGrid`], and returns the state at every grid point:
//!
//! ```text
//! y(t_0) = initial,  dy/dt = f(t, y)  →  [y(t_0), y(t_1), ..., y(t_n)]
//! ```
//!
//! Steps are taken by the `ode_solvers` crate, one grid interval at a time.
//! Solvers emit an [`Event`] for every grid point reached. An observer may return
//! [`Action::StopEarly`] to end the integration, which is reported through
//! [`Status::StoppedByObserver`].
//!
//! # Solvers
//!
//! - [`dopri5`] — adaptive Dormand–Prince 5(4) with error control
//! - [`rk4`] — classic Runge–Kutta 4 with fixed sub-steps
//!
//! [`Method`] selects between them at runtime.

mod action;
mod event;
mod solution;
mod stepper;

pub mod dopri5;
pub mod rk4;

pub use action::Action;
pub use event::Event;
pub use solution::{Solution, Stats, Status};

use contagion_core::{Observer, OdeSystem, TimeGrid};

/// Integration method and its configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Method {
    /// Classic fixed-step 4th-order Runge–Kutta method.
    ///
    /// Each grid interval is split into equal sub-steps no longer than the
    /// configured maximum. Does not adapt to local error, so accuracy depends
    /// entirely on the chosen step.
    Rk4(rk4::Config),

    /// Adaptive Dormand–Prince 5(4) Runge–Kutta method.
    ///
    /// An explicit embedded method that computes both 5th and 4th order
    /// solutions to estimate the local truncation error, and adjusts the step
    /// size to keep it within the configured tolerances.
    Dopri5(dopri5::Config),
}

impl Default for Method {
    fn default() -> Self {
        Self::Dopri5(dopri5::Config::default())
    }
}

/// Errors from any of the ODE solvers.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("dopri5: {0}")]
    Dopri5(#[from] dopri5::Error),

    #[error("rk4: {0}")]
    Rk4(#[from] rk4::Error),
}

/// Integrates `system` from `initial` over `grid` with the chosen method.
///
/// # Errors
///
/// Returns an error if the selected solver fails; see [`dopri5::solve`] and
/// [`rk4::solve`].
pub fn solve<S, Obs, const N: usize>(
    system: &S,
    initial: [f64; N],
    grid: &TimeGrid,
    method: &Method,
    observer: Obs,
) -> Result<Solution<N>, Error>
where
    S: OdeSystem<N>,
    Obs: Observer<Event<N>, Action>,
{
    match method {
        Method::Rk4(config) => Ok(rk4::solve(system, initial, grid, config, observer)?),
        Method::Dopri5(config) => Ok(dopri5::solve(system, initial, grid, config, observer)?),
    }
}

/// Integrates with the chosen method without observation.
///
/// # Errors
///
/// Returns an error if the selected solver fails.
pub fn solve_unobserved<S, const N: usize>(
    system: &S,
    initial: [f64; N],
    grid: &TimeGrid,
    method: &Method,
) -> Result<Solution<N>, Error>
where
    S: OdeSystem<N>,
{
    solve(system, initial, grid, method, ())
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::convert::Infallible;

    use approx::assert_relative_eq;

    /// Exponential decay: `dy/dt = -y`.
    struct Decay;

    impl OdeSystem<1> for Decay {
        type Error = Infallible;

        fn derivative(&self, _t: f64, y: &[f64; 1]) -> Result<[f64; 1], Self::Error> {
            Ok([-y[0]])
        }
    }

    #[test]
    fn both_methods_agree_on_decay() {
        let grid = TimeGrid::linspace(0.0, 2.0, 5).unwrap();
        let rk4 = Method::Rk4(rk4::Config::new(0.01).unwrap());

        let adaptive = solve_unobserved(&Decay, [1.0], &grid, &Method::default()).unwrap();
        let fixed = solve_unobserved(&Decay, [1.0], &grid, &rk4).unwrap();

        for (a, b) in adaptive.trajectory.iter().zip(fixed.trajectory.iter()) {
            assert_relative_eq!(a.y[0], b.y[0], max_relative = 1e-6);
            assert_relative_eq!(a.y[0], (-a.t).exp(), max_relative = 1e-6);
        }
    }

    #[test]
    fn default_method_is_adaptive() {
        assert!(matches!(Method::default(), Method::Dopri5(_)));
    }
}
