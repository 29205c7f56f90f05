/// The state of an ODE system at a given time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct State<const N: usize> {
    /// The independent variable, in days.
    pub t: f64,

    /// The dependent variables at `t`.
    pub y: [f64; N],
}

impl<const N: usize> State<N> {
    /// Creates a new state.
    #[must_use]
    pub fn new(t: f64, y: [f64; N]) -> Self {
        Self { t, y }
    }
}

/// The sampled solution of an ODE system: one state per time point.
///
/// Solvers build a trajectory by pushing states in increasing time order.
/// Once returned to a caller it is only read.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Trajectory<const N: usize> {
    times: Vec<f64>,
    states: Vec<[f64; N]>,
}

impl<const N: usize> Trajectory<N> {
    /// Creates an empty trajectory with room for `capacity` samples.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            times: Vec::with_capacity(capacity),
            states: Vec::with_capacity(capacity),
        }
    }

    /// Appends a sample.
    ///
    /// Samples must be pushed in strictly increasing time order.
    pub fn push(&mut self, t: f64, y: [f64; N]) {
        debug_assert!(
            self.times.last().is_none_or(|&last| t > last),
            "trajectory times must be strictly increasing"
        );
        self.times.push(t);
        self.states.push(y);
    }

    /// Returns the sample times.
    #[must_use]
    pub fn times(&self) -> &[f64] {
        &self.times
    }

    /// Returns the sampled states, aligned with [`times`](Self::times).
    #[must_use]
    pub fn states(&self) -> &[[f64; N]] {
        &self.states
    }

    /// Returns the number of samples.
    #[must_use]
    pub fn len(&self) -> usize {
        self.times.len()
    }

    /// Returns `true` if the trajectory holds no samples.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// Returns the sample at `index`, if any.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<State<N>> {
        Some(State::new(*self.times.get(index)?, self.states[index]))
    }

    /// Returns the last sample, if any.
    #[must_use]
    pub fn last(&self) -> Option<State<N>> {
        self.len().checked_sub(1).and_then(|index| self.get(index))
    }

    /// Iterates over the samples in time order.
    pub fn iter(&self) -> impl Iterator<Item = State<N>> + '_ {
        self.times
            .iter()
            .zip(&self.states)
            .map(|(&t, &y)| State::new(t, y))
    }

    /// Returns the values of state variable `index` across all samples.
    ///
    /// Returns `None` if `index` is not less than `N`.
    #[must_use]
    pub fn column(&self, index: usize) -> Option<Vec<f64>> {
        (index < N).then(|| self.states.iter().map(|y| y[index]).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Trajectory<2> {
        let mut trajectory = Trajectory::with_capacity(3);
        trajectory.push(0.0, [1.0, 10.0]);
        trajectory.push(0.5, [2.0, 20.0]);
        trajectory.push(1.0, [3.0, 30.0]);
        trajectory
    }

    #[test]
    fn iterates_in_push_order() {
        let trajectory = sample();

        let times: Vec<f64> = trajectory.iter().map(|state| state.t).collect();
        assert_eq!(times, vec![0.0, 0.5, 1.0]);
        assert_eq!(trajectory.len(), 3);
        assert!(!trajectory.is_empty());
    }

    #[test]
    fn extracts_columns() {
        let trajectory = sample();

        assert_eq!(trajectory.column(0), Some(vec![1.0, 2.0, 3.0]));
        assert_eq!(trajectory.column(1), Some(vec![10.0, 20.0, 30.0]));
        assert_eq!(trajectory.column(2), None);
    }

    #[test]
    fn indexes_samples() {
        let trajectory = sample();

        assert_eq!(trajectory.get(1), Some(State::new(0.5, [2.0, 20.0])));
        assert_eq!(trajectory.last(), Some(State::new(1.0, [3.0, 30.0])));
        assert_eq!(trajectory.get(3), None);
        assert_eq!(Trajectory::<2>::default().last(), None);
    }
}
