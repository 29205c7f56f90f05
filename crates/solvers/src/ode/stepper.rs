use std::cell::RefCell;

use contagion_core::OdeSystem;
use ode_solvers::{SVector, System, dop_shared};

use super::Stats;

/// Adapts an [`OdeSystem`] to the `ode_solvers` system interface.
///
/// `ode_solvers` expects infallible derivatives, so a system error is stored
/// in `failure` and the derivative is filled with NaN. Integration then stops
/// at the next accepted step.
pub(crate) struct Stepper<'a, S: OdeSystem<N>, const N: usize> {
    system: &'a S,
    failure: &'a RefCell<Option<S::Error>>,
}

impl<'a, S: OdeSystem<N>, const N: usize> Stepper<'a, S, N> {
    pub(crate) fn new(system: &'a S, failure: &'a RefCell<Option<S::Error>>) -> Self {
        Self { system, failure }
    }
}

impl<S: OdeSystem<N>, const N: usize> System<f64, SVector<f64, N>> for Stepper<'_, S, N> {
    fn system(&self, x: f64, y: &SVector<f64, N>, dy: &mut SVector<f64, N>) {
        match self.system.derivative(x, &(*y).into()) {
            Ok(derivative) => {
                *dy = SVector::from_row_slice(&derivative);
            }
            Err(err) => {
                *self.failure.borrow_mut() = Some(err);
                *dy = SVector::from_element(f64::NAN);
            }
        }
    }

    fn solout(&mut self, _x: f64, _y: &SVector<f64, N>, _dy: &SVector<f64, N>) -> bool {
        self.failure.borrow().is_some()
    }
}

/// Returns the last state an `ode_solvers` stepper wrote, or `fallback` if it
/// wrote none.
pub(crate) fn last_state<const N: usize>(
    y_out: &[SVector<f64, N>],
    fallback: [f64; N],
) -> [f64; N] {
    y_out.last().map_or(fallback, |y| (*y).into())
}

impl Stats {
    /// Adds the work reported by one `ode_solvers` run.
    pub(crate) fn record(&mut self, run: &dop_shared::Stats) {
        self.evaluations += run.num_eval as usize;
        self.accepted_steps += run.accepted_steps as usize;
        self.rejected_steps += run.rejected_steps as usize;
    }
}
