use contagion_core::Trajectory;

/// Indicates how the solver terminated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// Reached every grid point.
    Complete,

    /// Stopped early due to an observer action.
    StoppedByObserver,
}

/// Work done by a solver during one integration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Stats {
    /// Number of calls to the system's derivative.
    pub evaluations: usize,

    /// Number of steps that passed the error test (every step, for fixed-step
    /// methods).
    pub accepted_steps: usize,

    /// Number of steps that failed the error test and were retried.
    pub rejected_steps: usize,
}

/// The result of an ODE integration.
#[derive(Debug, Clone)]
pub struct Solution<const N: usize> {
    /// How the solver terminated.
    pub status: Status,

    /// States at the grid points reached, starting with the initial state.
    ///
    /// Covers the whole grid when `status` is [`Status::Complete`].
    pub trajectory: Trajectory<N>,

    /// Solver work counters.
    pub stats: Stats,
}
