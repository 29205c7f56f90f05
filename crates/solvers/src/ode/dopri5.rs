//! Adaptive Dormand–Prince 5(4) solver.
//!
//! Steps are taken by [`ode_solvers::Dopri5`], one grid interval at a time.
//! Each interval starts a fresh integration from the state at its first grid
//! point and ends exactly on the next one, so samples carry no interpolation
//! error and the step budget applies per interval rather than to the whole
//! grid.
//!
//! The local error of each step, scaled by
//!
//! ```text
//! scale_i = abs_tol + rel_tol * max(|y_i|, |y_new_i|)
//! ```
//!
//! must have an RMS norm at or below one for the step to be accepted.
//!
//! # Example
//!
//! ```ignore
//! use contagion_solvers::ode::dopri5;
//!
//! let solution = dopri5::solve_unobserved(&system, initial, &grid, &dopri5::Config::default())?;
//!
//! for state in solution.trajectory.iter() {
//!     println!("t={}: {:?}", state.t, state.y);
//! }
//! ```

mod config;
mod error;

pub use config::{Config, ConfigError};
pub use error::Error;

use std::cell::RefCell;

use contagion_core::{Observer, OdeSystem, State, TimeGrid, Trajectory};
use ode_solvers::{SVector, dop_shared::OutputType};

use super::{
    Action, Event, Solution, Stats, Status,
    stepper::{Stepper, last_state},
};

const SAFETY: f64 = 0.9;
const BETA: f64 = 0.04;
const MIN_FACTOR: f64 = 0.2;
const MAX_FACTOR: f64 = 10.0;

/// Accepted steps between stiffness tests.
const STIFFNESS_CHECK: u32 = 1000;

/// Integrates an ODE system over a time grid with adaptive step control.
///
/// # Algorithm
///
/// 1. Record the initial state at the first grid point.
/// 2. For each following grid point:
///    - Integrate from the previous grid point with a step budget of
///      [`Config::max_steps`] and steps no longer than [`Config::max_step`].
///    - Record the state at the grid point and emit a sample event.
///
/// # Observer
///
/// The observer receives an [`Event::Sampled`] for every grid point, starting
/// with the initial state, and may return [`Action::StopEarly`] to end the
/// integration.
///
/// # Errors
///
/// Returns an error if the initial state or its derivative is not finite, if
/// the system returns an error, if the state stops being finite, or if an
/// interval exhausts its step budget or its step size underflows. No partial
/// trajectory is returned in these cases.
pub fn solve<S, Obs, const N: usize>(
    system: &S,
    initial: [f64; N],
    grid: &TimeGrid,
    config: &Config,
    mut observer: Obs,
) -> Result<Solution<N>, Error>
where
    S: OdeSystem<N>,
    Obs: Observer<Event<N>, Action>,
{
    if !all_finite(&initial) {
        return Err(Error::NonFiniteInitialState);
    }

    let points = grid.points();
    let mut stats = Stats::default();
    let mut trajectory = Trajectory::with_capacity(points.len());

    let mut y = initial;
    trajectory.push(grid.start(), y);

    let event = Event::Sampled {
        index: 0,
        state: State::new(grid.start(), y),
    };
    if stop_requested(&mut observer, &event) {
        return Ok(stopped(trajectory, stats));
    }

    if points.len() == 1 {
        return Ok(Solution {
            status: Status::Complete,
            trajectory,
            stats,
        });
    }

    let start_slope = system.derivative(grid.start(), &y).map_err(Error::system)?;
    stats.evaluations += 1;
    if !all_finite(&start_slope) {
        return Err(Error::NonFiniteDerivative { t: grid.start() });
    }

    for (index, window) in points.windows(2).enumerate() {
        let [start, end] = [window[0], window[1]];
        y = interval(system, start, end, y, config, &mut stats)?;

        trajectory.push(end, y);

        let event = Event::Sampled {
            index: index + 1,
            state: State::new(end, y),
        };
        if stop_requested(&mut observer, &event) {
            return Ok(stopped(trajectory, stats));
        }
    }

    log::debug!(
        "dopri5 reached t = {} with {} accepted and {} rejected steps ({} evaluations)",
        grid.end(),
        stats.accepted_steps,
        stats.rejected_steps,
        stats.evaluations,
    );

    Ok(Solution {
        status: Status::Complete,
        trajectory,
        stats,
    })
}

/// Integrates with adaptive step control without observation.
///
/// This is a convenience wrapper around [`solve`] that discards events.
///
/// # Errors
///
/// Returns an error if the integration fails; see [`solve`].
pub fn solve_unobserved<S, const N: usize>(
    system: &S,
    initial: [f64; N],
    grid: &TimeGrid,
    config: &Config,
) -> Result<Solution<N>, Error>
where
    S: OdeSystem<N>,
{
    solve(system, initial, grid, config, ())
}

/// Advances `y` from `start` to `end` and returns the state at `end`.
fn interval<S, const N: usize>(
    system: &S,
    start: f64,
    end: f64,
    y: [f64; N],
    config: &Config,
    stats: &mut Stats,
) -> Result<[f64; N], Error>
where
    S: OdeSystem<N>,
{
    let span = end - start;
    let failure = RefCell::new(None);

    let mut stepper = ode_solvers::Dopri5::from_param(
        Stepper::new(system, &failure),
        start,
        end,
        span,
        SVector::from(y),
        config.rel_tol(),
        config.abs_tol(),
        SAFETY,
        BETA,
        MIN_FACTOR,
        MAX_FACTOR,
        config.max_step().min(span),
        0.0,
        config.max_steps(),
        STIFFNESS_CHECK,
        OutputType::Sparse,
    );
    let outcome = stepper.integrate();

    if let Some(err) = failure.borrow_mut().take() {
        return Err(Error::system(err));
    }
    stats.record(&outcome?);

    let y = last_state(stepper.y_out(), y);
    if !all_finite(&y) {
        return Err(Error::NonFiniteState { t: end });
    }

    Ok(y)
}

fn all_finite<const N: usize>(values: &[f64; N]) -> bool {
    values.iter().all(|v| v.is_finite())
}

fn stop_requested<Obs, const N: usize>(observer: &mut Obs, event: &Event<N>) -> bool
where
    Obs: Observer<Event<N>, Action>,
{
    matches!(observer.observe(event), Some(Action::StopEarly))
}

fn stopped<const N: usize>(trajectory: Trajectory<N>, stats: Stats) -> Solution<N> {
    Solution {
        status: Status::StoppedByObserver,
        trajectory,
        stats,
    }
}
