use crate::{
    Compartments, Parameters, RateModel,
    epidemic::{balanced, infection_rate, recovery_rate, waning_rate},
};

/// SIR with waning immunity: recovered individuals return to the susceptible
/// pool at rate `R / W`.
///
/// ```text
/// dI/dt = p (N - I - R) I c / (N - 1) - I / D
/// dR/dt = I / D - R / W
/// dS/dt = -dI/dt - dR/dt
/// ```
///
/// Resupplying susceptibles allows repeated waves and an endemic equilibrium
/// instead of guaranteed extinction. Without a waning time this is [`Sir`].
///
/// [`Sir`]: crate::Sir
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SirWaning;

impl RateModel for SirWaning {
    fn rates(&self, state: &Compartments, _t: f64, params: &Parameters) -> Compartments {
        let recoveries = recovery_rate(state, params);
        let infections = infection_rate(state, params, params.contact_rate());

        balanced(infections - recoveries, recoveries - waning_rate(state, params))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    use crate::Sir;

    #[test]
    fn recovered_lose_immunity() {
        let params = Parameters::default().with_waning_time(90.0).unwrap();
        let state = Compartments::new(14.0, 180.0, 806.0);

        let rates = SirWaning.rates(&state, 0.0, &params);

        // I / D - R / W = 14 / 14 - 180 / 90
        assert_relative_eq!(rates.recovered, -1.0, epsilon = 1e-12);
        assert_relative_eq!(rates.total(), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn matches_sir_without_waning_time() {
        let params = Parameters::default();
        let state = Compartments::new(25.0, 100.0, 875.0);

        assert_eq!(
            SirWaning.rates(&state, 5.0, &params),
            Sir.rates(&state, 5.0, &params)
        );
    }

    #[test]
    fn infected_rate_is_unchanged_by_waning() {
        let params = Parameters::default().with_waning_time(45.0).unwrap();
        let state = Compartments::new(25.0, 100.0, 875.0);

        assert_relative_eq!(
            SirWaning.rates(&state, 0.0, &params).infected,
            Sir.rates(&state, 0.0, &params).infected
        );
    }
}
