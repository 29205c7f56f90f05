use crate::{
    Compartments, Parameters, RateModel,
    epidemic::{balanced, infection_rate, recovery_rate},
};

/// The basic SIR model: recovery grants permanent immunity.
///
/// ```text
/// dI/dt = p (N - I - R) I c / (N - 1) - I / D
/// dR/dt = I / D
/// dS/dt = -dI/dt - dR/dt
/// ```
///
/// Any waning time or seasonality in the parameters is ignored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Sir;

impl RateModel for Sir {
    fn rates(&self, state: &Compartments, _t: f64, params: &Parameters) -> Compartments {
        let recoveries = recovery_rate(state, params);
        let infections = infection_rate(state, params, params.contact_rate());

        balanced(infections - recoveries, recoveries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    #[test]
    fn single_case_in_a_small_town() {
        let params = Parameters::default();
        let state = Compartments::seeded(1000.0);

        let rates = Sir.rates(&state, 0.0, &params);

        // 0.1 * 999 * 1 * 1 / 999 - 1 / 14
        assert_relative_eq!(rates.infected, 0.1 - 1.0 / 14.0, epsilon = 1e-12);
        assert_relative_eq!(rates.recovered, 1.0 / 14.0, epsilon = 1e-12);
        assert_relative_eq!(rates.susceptible, -0.1, epsilon = 1e-12);
    }

    #[test]
    fn no_infections_without_cases() {
        let params = Parameters::default();
        let state = Compartments::new(0.0, 200.0, 800.0);

        assert_eq!(Sir.rates(&state, 10.0, &params), Compartments::new(0.0, 0.0, -0.0));
    }

    #[test]
    fn ignores_waning_and_time() {
        let params = Parameters::default().with_waning_time(30.0).unwrap();
        let state = Compartments::new(50.0, 300.0, 650.0);

        let early = Sir.rates(&state, 0.0, &params);
        let late = Sir.rates(&state, 180.0, &params);

        assert_eq!(early, late);
        assert_relative_eq!(early.recovered, 50.0 / 14.0);
    }
}
