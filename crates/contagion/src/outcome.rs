use contagion_core::Trajectory;
use contagion_models::{Compartments, Parameters, Variant};
use contagion_solvers::ode::{Stats, Status};

use crate::analysis::{self, Extremum, Peak};

/// The result of running a [`Scenario`](crate::Scenario).
#[derive(Debug, Clone)]
pub struct Outcome {
    pub(crate) variant: Variant,
    pub(crate) parameters: Parameters,
    pub(crate) status: Status,
    pub(crate) trajectory: Trajectory<3>,
    pub(crate) stats: Stats,
}

impl Outcome {
    /// Returns the model variant that was integrated.
    #[must_use]
    pub fn variant(&self) -> Variant {
        self.variant
    }

    /// Returns the parameters of the run.
    #[must_use]
    pub fn parameters(&self) -> &Parameters {
        &self.parameters
    }

    /// Returns how the run ended.
    ///
    /// Only observed runs can end with [`Status::StoppedByObserver`].
    #[must_use]
    pub fn status(&self) -> Status {
        self.status
    }

    /// Returns the raw solver trajectory, in (I, R, S) order.
    #[must_use]
    pub fn trajectory(&self) -> &Trajectory<3> {
        &self.trajectory
    }

    /// Returns solver work counters.
    #[must_use]
    pub fn stats(&self) -> Stats {
        self.stats
    }

    /// Consumes the outcome, returning the trajectory.
    #[must_use]
    pub fn into_trajectory(self) -> Trajectory<3> {
        self.trajectory
    }

    /// Returns the sampled times.
    #[must_use]
    pub fn times(&self) -> &[f64] {
        self.trajectory.times()
    }

    /// Iterates over `(t, compartments)` rows in time order.
    pub fn rows(&self) -> impl Iterator<Item = (f64, Compartments)> + '_ {
        self.trajectory
            .iter()
            .map(|state| (state.t, Compartments::from(state.y)))
    }

    /// Returns the infected count at every sampled time.
    #[must_use]
    pub fn infected(&self) -> Vec<f64> {
        self.column(Compartments::INFECTED)
    }

    /// Returns the recovered count at every sampled time.
    #[must_use]
    pub fn recovered(&self) -> Vec<f64> {
        self.column(Compartments::RECOVERED)
    }

    /// Returns the susceptible count at every sampled time.
    #[must_use]
    pub fn susceptible(&self) -> Vec<f64> {
        self.column(Compartments::SUSCEPTIBLE)
    }

    /// Returns the time and size of the largest infected count.
    #[must_use]
    pub fn peak(&self) -> Option<Peak> {
        analysis::peak(self.times(), &self.infected())
    }

    /// Returns the interior local extrema of the infected curve.
    #[must_use]
    pub fn extrema(&self) -> Vec<Extremum> {
        analysis::extrema(self.times(), &self.infected())
    }

    fn column(&self, index: usize) -> Vec<f64> {
        self.trajectory
            .states()
            .iter()
            .map(|y| y[index])
            .collect()
    }
}
