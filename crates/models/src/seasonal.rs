use crate::{
    Compartments, Parameters, RateModel,
    epidemic::{balanced, infection_rate, recovery_rate, waning_rate},
};

/// SIR with waning immunity and an annual cycle in the contact rate.
///
/// Identical to [`SirWaning`] except that the contact rate follows
///
/// ```text
/// c(t) = c * (1 + strength * cos(2π / 365 * (t - shift)))
/// ```
///
/// Without seasonality in the parameters this is [`SirWaning`].
///
/// [`SirWaning`]: crate::SirWaning
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SirWaningSeasonal;

impl RateModel for SirWaningSeasonal {
    fn rates(&self, state: &Compartments, t: f64, params: &Parameters) -> Compartments {
        let contact_rate = params.contact_rate() * params.seasonality().map_or(1.0, |s| s.factor(t));

        let recoveries = recovery_rate(state, params);
        let infections = infection_rate(state, params, contact_rate);

        balanced(infections - recoveries, recoveries - waning_rate(state, params))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    use crate::{SEASON_DAYS, Seasonality, SirWaning};

    fn params(strength: f64, shift: f64) -> Parameters {
        Parameters::new(1e4, 0.2, 1.0, 14.0)
            .unwrap()
            .with_waning_time(90.0)
            .unwrap()
            .with_seasonality(Seasonality::new(strength, shift).unwrap())
    }

    #[test]
    fn infections_peak_at_shift() {
        let params = params(0.5, 60.0);
        let state = Compartments::new(100.0, 500.0, 9400.0);
        let base = SirWaning.rates(&state, 60.0, &params);

        let at_peak = SirWaningSeasonal.rates(&state, 60.0, &params);
        let at_trough = SirWaningSeasonal.rates(&state, 60.0 + SEASON_DAYS / 2.0, &params);

        let base_infections = base.infected + 100.0 / 14.0;
        assert_relative_eq!(
            at_peak.infected + 100.0 / 14.0,
            1.5 * base_infections,
            epsilon = 1e-9
        );
        assert_relative_eq!(
            at_trough.infected + 100.0 / 14.0,
            0.5 * base_infections,
            epsilon = 1e-9
        );
        assert_relative_eq!(at_peak.recovered, base.recovered);
    }

    #[test]
    fn zero_strength_matches_waning_model() {
        let params = params(0.0, 123.0);
        let state = Compartments::new(40.0, 700.0, 9260.0);

        for t in [0.0, 50.0, 123.0, 300.0] {
            assert_eq!(
                SirWaningSeasonal.rates(&state, t, &params),
                SirWaning.rates(&state, t, &params)
            );
        }
    }

    #[test]
    fn matches_waning_model_without_seasonality() {
        let params = params(0.3, 0.0).without_seasonality();
        let state = Compartments::new(40.0, 700.0, 9260.0);

        assert_eq!(
            SirWaningSeasonal.rates(&state, 77.0, &params),
            SirWaning.rates(&state, 77.0, &params)
        );
    }
}
