use contagion_core::{Observer, TimeGrid, Trajectory};
use contagion_models::{Compartments, Epidemic, ParameterError, Parameters, RateModel, Variant};
use contagion_solvers::ode::{self, Action, Event, Method};

use crate::{Error, Outcome};

/// Relative tolerance when checking that an initial state sums to N.
const INITIAL_TOTAL_TOL: f64 = 1e-9;

/// Everything needed for one integration run.
///
/// A scenario pairs a model [`Variant`] with its [`Parameters`], an initial
/// state, the time grid to sample and the integration [`Method`]. Running it
/// always integrates from the first grid point; nothing is reused between
/// runs.
#[derive(Debug, Clone, PartialEq)]
pub struct Scenario {
    variant: Variant,
    parameters: Parameters,
    initial: Option<Compartments>,
    grid: TimeGrid,
    method: Method,
}

impl Scenario {
    /// Creates a scenario seeded with a single infection.
    ///
    /// The variant is the simplest one that uses every feature of
    /// `parameters`, and the method is the default adaptive solver.
    #[must_use]
    pub fn new(parameters: Parameters, grid: TimeGrid) -> Self {
        Self {
            variant: Variant::for_parameters(&parameters),
            parameters,
            initial: None,
            grid,
            method: Method::default(),
        }
    }

    /// Uses `variant` regardless of which features the parameters describe.
    #[must_use]
    pub fn with_variant(self, variant: Variant) -> Self {
        Self { variant, ..self }
    }

    /// Uses `method` for integration.
    #[must_use]
    pub fn with_method(self, method: Method) -> Self {
        Self { method, ..self }
    }

    /// Starts from `initial` instead of a single infection.
    ///
    /// # Errors
    ///
    /// Returns [`ParameterError::InitialState`] if any compartment is negative
    /// or the total differs from the population.
    pub fn with_initial(self, initial: Compartments) -> Result<Self, Error> {
        check_initial(&initial, &self.parameters)?;

        Ok(Self {
            initial: Some(initial),
            ..self
        })
    }

    /// Replaces the parameters, keeping the variant.
    ///
    /// A seeded initial state follows the new population.
    ///
    /// # Errors
    ///
    /// Returns [`ParameterError::InitialState`] if an explicit initial state
    /// no longer matches the population.
    pub fn with_parameters(self, parameters: Parameters) -> Result<Self, Error> {
        if let Some(initial) = &self.initial {
            check_initial(initial, &parameters)?;
        }

        Ok(Self { parameters, ..self })
    }

    /// Returns the model variant.
    #[must_use]
    pub fn variant(&self) -> Variant {
        self.variant
    }

    /// Returns the parameters.
    #[must_use]
    pub fn parameters(&self) -> &Parameters {
        &self.parameters
    }

    /// Returns the state at the first grid point.
    #[must_use]
    pub fn initial(&self) -> Compartments {
        self.initial
            .unwrap_or_else(|| Compartments::seeded(self.parameters.population()))
    }

    /// Returns the time grid.
    #[must_use]
    pub fn grid(&self) -> &TimeGrid {
        &self.grid
    }

    /// Returns the integration method.
    #[must_use]
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Integrates the scenario over its whole grid.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Integration`] if the solver fails.
    pub fn run(&self) -> Result<Outcome, Error> {
        self.run_observed(())
    }

    /// Integrates the scenario, reporting solver events to `observer`.
    ///
    /// The observer may stop the run early; the outcome then carries the
    /// partial trajectory and [`ode::Status::StoppedByObserver`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::Integration`] if the solver fails.
    pub fn run_observed<Obs>(&self, observer: Obs) -> Result<Outcome, Error>
    where
        Obs: Observer<Event<3>, Action>,
    {
        let epidemic = Epidemic::new(self.variant, self.parameters);
        let solution = ode::solve(
            &epidemic,
            self.initial().into(),
            &self.grid,
            &self.method,
            observer,
        )?;

        log::debug!(
            "{} run with R0 = {:.3} sampled {} points",
            self.variant.name(),
            self.parameters.basic_reproduction_number(),
            solution.trajectory.len(),
        );

        Ok(Outcome {
            variant: self.variant,
            parameters: self.parameters,
            status: solution.status,
            trajectory: solution.trajectory,
            stats: solution.stats,
        })
    }
}

/// Integrates `model` from `initial` over `grid` with the default method.
///
/// This is the bare integrator entry point: one state per grid point, the
/// first being `initial` itself.
///
/// # Errors
///
/// Returns [`Error::InvalidParameter`] if `initial` does not sum to the
/// population, or [`Error::Integration`] if the solver fails.
pub fn integrate<M: RateModel>(
    model: M,
    parameters: Parameters,
    initial: Compartments,
    grid: &TimeGrid,
) -> Result<Trajectory<3>, Error> {
    check_initial(&initial, &parameters)?;

    let epidemic = Epidemic::new(model, parameters);
    let solution = ode::solve_unobserved(&epidemic, initial.into(), grid, &Method::default())?;

    Ok(solution.trajectory)
}

fn check_initial(initial: &Compartments, parameters: &Parameters) -> Result<(), ParameterError> {
    let population = parameters.population();

    if initial.conserves(population, INITIAL_TOTAL_TOL) {
        Ok(())
    } else {
        Err(ParameterError::InitialState {
            total: initial.total(),
            population,
        })
    }
}
