use std::convert::Infallible;

use contagion_core::OdeSystem;

use crate::{Compartments, Parameters};

/// Computes instantaneous rates of change of the compartments.
///
/// Implementations are pure: the same state, time and parameters always give
/// the same rates. Parameters arrive validated, so evaluation cannot fail.
pub trait RateModel {
    /// Returns `(dI/dt, dR/dt, dS/dt)` at time `t` (days).
    fn rates(&self, state: &Compartments, t: f64, params: &Parameters) -> Compartments;
}

impl<M: RateModel + ?Sized> RateModel for &M {
    fn rates(&self, state: &Compartments, t: f64, params: &Parameters) -> Compartments {
        (**self).rates(state, t, params)
    }
}

/// A rate model bound to its parameters, ready for an ODE solver.
///
/// The solver state is the compartment array in (I, R, S) order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Epidemic<M> {
    model: M,
    parameters: Parameters,
}

impl<M: RateModel> Epidemic<M> {
    /// Binds `model` to `parameters`.
    pub fn new(model: M, parameters: Parameters) -> Self {
        Self { model, parameters }
    }

    /// Returns the rate model.
    pub fn model(&self) -> &M {
        &self.model
    }

    /// Returns the parameters.
    pub fn parameters(&self) -> &Parameters {
        &self.parameters
    }

    /// Evaluates the rates of change at `state` and `t`.
    pub fn rates(&self, state: &Compartments, t: f64) -> Compartments {
        self.model.rates(state, t, &self.parameters)
    }
}

impl<M: RateModel> OdeSystem<3> for Epidemic<M> {
    type Error = Infallible;

    fn derivative(&self, t: f64, y: &[f64; 3]) -> Result<[f64; 3], Self::Error> {
        Ok(self.rates(&Compartments::from(*y), t).into())
    }
}

/// New infections per day: `p * (N - I - R) * I * c / (N - 1)`.
///
/// The susceptible pool is taken as `N - I - R` rather than the carried `S`.
pub(crate) fn infection_rate(state: &Compartments, params: &Parameters, contact_rate: f64) -> f64 {
    let n = params.population();
    params.transmissibility() * (n - state.infected - state.recovered) * state.infected * contact_rate
        / (n - 1.0)
}

/// Recoveries per day: `I / D`.
pub(crate) fn recovery_rate(state: &Compartments, params: &Parameters) -> f64 {
    state.infected / params.infection_duration()
}

/// Losses of immunity per day: `R / W`, or zero for permanent immunity.
pub(crate) fn waning_rate(state: &Compartments, params: &Parameters) -> f64 {
    params
        .waning_time()
        .map_or(0.0, |waning_time| state.recovered / waning_time)
}

/// Builds the derivative from the infected and recovered rates; the
/// susceptible rate closes the balance so the total is conserved.
pub(crate) fn balanced(d_infected: f64, d_recovered: f64) -> Compartments {
    Compartments::new(d_infected, d_recovered, -d_infected - d_recovered)
}
