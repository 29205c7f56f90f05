//! Classic fourth-order Runge–Kutta with fixed sub-steps.
//!
//! Each grid interval `[t_k, t_{k+1}]` is split into `⌈Δt / max_step⌉` equal
//! sub-steps and handed to [`ode_solvers::Rk4`], which advances each with
//!
//! ```text
//! y_{n+1} = y_n + h/6 * (k1 + 2 k2 + 2 k3 + k4)
//! ```
//!
//! There is no error control. Prefer [`dopri5`](super::dopri5) unless a fixed
//! amount of work per grid interval matters more than accuracy.

mod config;
mod error;

pub use config::{Config, ConfigError};
pub use error::Error;

use std::cell::RefCell;

use contagion_core::{Observer, OdeSystem, State, TimeGrid, Trajectory};
use ode_solvers::SVector;

use super::{
    Action, Event, Solution, Stats, Status,
    stepper::{Stepper, last_state},
};

/// Integrates an ODE system over a time grid with fixed sub-steps.
///
/// # Observer
///
/// The observer receives an [`Event::Sampled`] for every grid point, starting
/// with the initial state, and may return [`Action::StopEarly`].
///
/// # Errors
///
/// Returns an error if the initial state is not finite, an interval needs more
/// than [`Config::max_steps`] sub-steps, the system returns an error, or the
/// state becomes non-finite.
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
    if initial.iter().any(|v| !v.is_finite()) {
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
    if let Some(Action::StopEarly) = observer.observe(&event) {
        return Ok(stopped(trajectory, stats));
    }

    for (index, window) in points.windows(2).enumerate() {
        let [start, end] = [window[0], window[1]];
        y = interval(system, start, end, y, config, &mut stats)?;

        trajectory.push(end, y);

        let event = Event::Sampled {
            index: index + 1,
            state: State::new(end, y),
        };
        if let Some(Action::StopEarly) = observer.observe(&event) {
            return Ok(stopped(trajectory, stats));
        }
    }

    log::debug!(
        "rk4 reached t = {} with {} steps ({} evaluations)",
        grid.end(),
        stats.accepted_steps,
        stats.evaluations,
    );

    Ok(Solution {
        status: Status::Complete,
        trajectory,
        stats,
    })
}

/// Integrates with fixed sub-steps without observation.
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

/// Advances `y` from `start` to `end` in equal sub-steps.
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
    let substeps = (span / config.max_step()).ceil().max(1.0);
    if substeps > f64::from(config.max_steps()) {
        return Err(Error::MaxStepsReached {
            t: start,
            max_steps: config.max_steps(),
        });
    }

    // Slightly long, so rounding never adds a sub-step past `end`.
    let h = span / substeps * (1.0 + 4.0 * f64::EPSILON);

    let failure = RefCell::new(None);
    let mut stepper =
        ode_solvers::Rk4::new(Stepper::new(system, &failure), start, SVector::from(y), end, h);
    let outcome = stepper.integrate();

    if let Some(err) = failure.borrow_mut().take() {
        return Err(Error::system(err));
    }
    stats.record(&outcome?);

    let y = last_state(stepper.y_out(), y);
    if y.iter().any(|v| !v.is_finite()) {
        return Err(Error::NonFiniteState { t: end });
    }

    Ok(y)
}

fn stopped<const N: usize>(trajectory: Trajectory<N>, stats: Stats) -> Solution<N> {
    Solution {
        status: Status::StoppedByObserver,
        trajectory,
        stats,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::convert::Infallible;

    use approx::assert_relative_eq;

    /// Constant velocity: `dx/dt = v`.
    struct ConstantVelocity {
        velocity: f64,
    }

    impl OdeSystem<1> for ConstantVelocity {
        type Error = Infallible;

        fn derivative(&self, _t: f64, _y: &[f64; 1]) -> Result<[f64; 1], Self::Error> {
            Ok([self.velocity])
        }
    }

    /// Time-driven growth: `dy/dt = 3 t^2`, exact for RK4.
    struct Cubic;

    impl OdeSystem<1> for Cubic {
        type Error = Infallible;

        fn derivative(&self, t: f64, _y: &[f64; 1]) -> Result<[f64; 1], Self::Error> {
            Ok([3.0 * t * t])
        }
    }

    /// Explosive growth that overflows: `dy/dt = y^2`.
    struct Blowup;

    impl OdeSystem<1> for Blowup {
        type Error = Infallible;

        fn derivative(&self, _t: f64, y: &[f64; 1]) -> Result<[f64; 1], Self::Error> {
            Ok([y[0] * y[0]])
        }
    }

    #[derive(Debug, thiserror::Error)]
    #[error("refusing to evaluate past t = 1")]
    struct Refusal;

    /// System that fails once time passes one.
    struct Refusing;

    impl OdeSystem<1> for Refusing {
        type Error = Refusal;

        fn derivative(&self, t: f64, _y: &[f64; 1]) -> Result<[f64; 1], Self::Error> {
            if t > 1.0 { Err(Refusal) } else { Ok([1.0]) }
        }
    }

    #[test]
    fn constant_velocity_motion() {
        let grid = TimeGrid::linspace(0.0, 1.0, 11).unwrap();

        let solution = solve_unobserved(
            &ConstantVelocity { velocity: 2.0 },
            [0.0],
            &grid,
            &Config::default(),
        )
        .expect("should solve");

        assert_eq!(solution.status, Status::Complete);
        assert_eq!(solution.trajectory.len(), 11);

        // After t = 1 at v = 2: position = 2.0
        let last = solution.trajectory.last().unwrap();
        assert_relative_eq!(last.t, 1.0);
        assert_relative_eq!(last.y[0], 2.0, epsilon = 1e-12);
    }

    #[test]
    fn integrates_cubic_exactly() {
        let grid = TimeGrid::new(vec![0.0, 1.5, 2.0]).unwrap();

        let solution = solve_unobserved(&Cubic, [0.0], &grid, &Config::default()).unwrap();

        for state in solution.trajectory.iter() {
            assert_relative_eq!(state.y[0], state.t.powi(3), epsilon = 1e-12);
        }
    }

    #[test]
    fn splits_intervals_into_sub_steps() {
        let grid = TimeGrid::new(vec![0.0, 1.0, 1.1]).unwrap();
        let config = Config::new(0.25).unwrap();

        let solution =
            solve_unobserved(&ConstantVelocity { velocity: 1.0 }, [0.0], &grid, &config).unwrap();

        // Four sub-steps for the first interval, one for the second.
        assert_eq!(solution.stats.accepted_steps, 5);
        assert_eq!(solution.stats.evaluations, 20);
    }

    #[test]
    fn errors_when_state_overflows() {
        let grid = TimeGrid::new(vec![0.0, 10.0]).unwrap();

        let result = solve_unobserved(&Blowup, [1.0], &grid, &Config::new(1.0).unwrap());

        assert!(matches!(result, Err(Error::NonFiniteState { .. })));
    }

    #[test]
    fn observer_can_stop_early() {
        let grid = TimeGrid::days(10).unwrap();

        let observer = |event: &Event<1>| match event {
            Event::Sampled { index: 4, .. } => Some(Action::StopEarly),
            _ => None,
        };

        let solution = solve(
            &ConstantVelocity { velocity: 1.0 },
            [0.0],
            &grid,
            &Config::default(),
            observer,
        )
        .unwrap();

        assert_eq!(solution.status, Status::StoppedByObserver);
        assert_eq!(solution.trajectory.len(), 5);
    }

    #[test]
    fn errors_when_an_interval_needs_too_many_sub_steps() {
        let grid = TimeGrid::new(vec![0.0, 1.0]).unwrap();
        let config = Config::new(1e-300).unwrap();

        let result = solve_unobserved(&ConstantVelocity { velocity: 1.0 }, [0.0], &grid, &config);

        assert!(matches!(
            result,
            Err(Error::MaxStepsReached { t, max_steps: 100_000 }) if t == 0.0
        ));
    }

    #[test]
    fn step_budget_applies_to_each_interval() {
        let grid = TimeGrid::days(30).unwrap();
        let config = Config::new(0.25).unwrap().with_max_steps(4).unwrap();

        let solution =
            solve_unobserved(&ConstantVelocity { velocity: 1.0 }, [0.0], &grid, &config).unwrap();

        assert_eq!(solution.status, Status::Complete);
        assert_relative_eq!(solution.trajectory.last().unwrap().y[0], 29.0, epsilon = 1e-9);

        let tight = config.with_max_steps(3).unwrap();
        let result = solve_unobserved(&ConstantVelocity { velocity: 1.0 }, [0.0], &grid, &tight);
        assert!(matches!(result, Err(Error::MaxStepsReached { max_steps: 3, .. })));
    }

    #[test]
    fn propagates_system_errors() {
        let grid = TimeGrid::days(3).unwrap();

        let result = solve_unobserved(&Refusing, [0.0], &grid, &Config::default());

        assert!(matches!(result, Err(Error::System(_))));
    }

    #[test]
    fn rejects_non_positive_max_step() {
        assert_eq!(Config::new(0.0), Err(ConfigError::MaxStep));
        assert_eq!(Config::new(f64::INFINITY), Err(ConfigError::MaxStep));
    }
}
