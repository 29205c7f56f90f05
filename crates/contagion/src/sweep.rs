//! Parameter sweeps: one full re-integration per knob value.

use contagion_models::Knob;

use crate::{Error, Scenario, analysis::Peak};

/// The infected curve for one value of a swept knob.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    /// The knob value this frame was computed with.
    pub value: f64,
    /// The basic reproduction number `p * c * D` for this frame.
    pub r0: f64,
    /// Infected count at every grid point of the base scenario.
    pub infected: Vec<f64>,
    /// The largest infected count, if the grid is not empty.
    pub peak: Option<Peak>,
}

/// Varies one [`Knob`] of a base scenario over a list of values.
///
/// Every frame is an independent integration from the first grid point; no
/// state carries over between frames.
#[derive(Debug, Clone, PartialEq)]
pub struct Sweep {
    base: Scenario,
    knob: Knob,
    values: Vec<f64>,
}

impl Sweep {
    /// Creates a sweep of `knob` over `values`, in order.
    pub fn new(base: Scenario, knob: Knob, values: impl Into<Vec<f64>>) -> Self {
        Self {
            base,
            knob,
            values: values.into(),
        }
    }

    /// Visits the values forward and then backward; see [`ping_pong`].
    #[must_use]
    pub fn ping_pong(self) -> Self {
        Self {
            values: ping_pong(&self.values),
            ..self
        }
    }

    /// Returns the scenario every frame starts from.
    #[must_use]
    pub fn base(&self) -> &Scenario {
        &self.base
    }

    /// Returns the swept knob.
    #[must_use]
    pub fn knob(&self) -> Knob {
        self.knob
    }

    /// Returns the knob values, in frame order.
    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Returns the number of frames.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if the sweep has no frames.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Computes the frame for one knob value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] if `value` is invalid for the knob,
    /// or [`Error::Integration`] if the solver fails.
    pub fn frame(&self, value: f64) -> Result<Frame, Error> {
        let parameters = self.base.parameters().with_knob(self.knob, value)?;
        let outcome = self.base.clone().with_parameters(parameters)?.run()?;

        Ok(Frame {
            value,
            r0: parameters.basic_reproduction_number(),
            peak: outcome.peak(),
            infected: outcome.infected(),
        })
    }

    /// Lazily computes every frame in order.
    pub fn frames(&self) -> impl Iterator<Item = Result<Frame, Error>> + '_ {
        self.values.iter().map(|&value| self.frame(value))
    }
}

/// Returns `values` followed by `values` reversed.
///
/// Played in a loop, the sequence sweeps a knob up and back down.
#[must_use]
pub fn ping_pong(values: &[f64]) -> Vec<f64> {
    values.iter().chain(values.iter().rev()).copied().collect()
}

/// Returns `start, start + step, ...` up to and including `end`.
///
/// Returns an empty list if `step` is not positive and finite, if either
/// bound is not finite, or if `end` is before `start`.
#[must_use]
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::cast_sign_loss
)]
pub fn inclusive_range(start: f64, end: f64, step: f64) -> Vec<f64> {
    if !step.is_finite() || step <= 0.0 {
        return Vec::new();
    }
    if !start.is_finite() || !end.is_finite() || end < start {
        return Vec::new();
    }

    // Absorb rounding so that an `end` on the lattice is included.
    let span = (end - start) / step * (1.0 + 4.0 * f64::EPSILON);
    let count = span.floor() as usize + 1;

    (0..count).map(|i| start + step * i as f64).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use contagion_core::TimeGrid;
    use contagion_models::{ParameterError, Parameters};

    fn base() -> Scenario {
        let params = Parameters::new(1e4, 0.1, 1.0, 14.0)
            .unwrap()
            .with_waning_time(90.0)
            .unwrap();
        Scenario::new(params, TimeGrid::days(200).unwrap())
    }

    #[test]
    fn ping_pong_reverses_after_forward_pass() {
        assert_eq!(ping_pong(&[1.0, 2.0, 3.0]), [1.0, 2.0, 3.0, 3.0, 2.0, 1.0]);
        assert!(ping_pong(&[]).is_empty());
    }

    #[test]
    fn inclusive_range_includes_end() {
        assert_eq!(inclusive_range(1.0, 5.0, 1.0), [1.0, 2.0, 3.0, 4.0, 5.0]);
        assert_eq!(inclusive_range(0.0, 0.3, 0.1).len(), 4);
        assert_eq!(inclusive_range(0.0, 1.0, 0.4).len(), 3);
        assert!(inclusive_range(1.0, 0.0, 1.0).is_empty());
        assert!(inclusive_range(0.0, 1.0, 0.0).is_empty());
        assert!(inclusive_range(0.0, f64::NAN, 1.0).is_empty());
    }

    #[test]
    fn frames_follow_knob_values() {
        let sweep = Sweep::new(base(), Knob::InfectionDuration, [7.0, 14.0, 21.0]);

        let frames: Vec<Frame> = sweep.frames().collect::<Result<_, _>>().unwrap();

        assert_eq!(frames.len(), 3);
        for (frame, duration) in frames.iter().zip([7.0, 14.0, 21.0]) {
            assert_relative_eq!(frame.value, duration);
            assert_relative_eq!(frame.r0, 0.1 * duration);
            assert_eq!(frame.infected.len(), 200);
            assert_relative_eq!(frame.infected[0], 1.0);
        }

        // Longer infections spread further.
        let peaks: Vec<f64> = frames.iter().map(|f| f.peak.unwrap().value).collect();
        assert!(peaks[0] < peaks[1] && peaks[1] < peaks[2]);
    }

    #[test]
    fn frame_matches_direct_run() {
        let sweep = Sweep::new(base(), Knob::Transmissibility, [0.2]);
        let frame = sweep.frame(0.2).unwrap();

        let params = base().parameters().with_knob(Knob::Transmissibility, 0.2).unwrap();
        let direct = base().with_parameters(params).unwrap().run().unwrap();

        assert_eq!(frame.infected, direct.infected());
    }

    #[test]
    fn invalid_value_fails_before_integration() {
        let sweep = Sweep::new(base(), Knob::InfectionDuration, [14.0, 0.0]);

        let results: Vec<_> = sweep.frames().collect();

        assert!(results[0].is_ok());
        assert!(matches!(
            results[1],
            Err(Error::InvalidParameter(ParameterError::InfectionDuration { .. }))
        ));
    }

    #[test]
    fn population_sweep_reseeds_initial_state() {
        let sweep = Sweep::new(base(), Knob::Population, [500.0, 5e5]);

        for frame in sweep.frames() {
            assert_relative_eq!(frame.unwrap().infected[0], 1.0);
        }
    }
}
