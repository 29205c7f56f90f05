#![warn(missing_docs)]

use serde::{Deserialize, Serialize};

/// Population counts in each compartment, or their rates of change.
///
/// The solver-facing order is (infected, recovered, susceptible), matching
/// [`INFECTED`](Self::INFECTED), [`RECOVERED`](Self::RECOVERED) and
/// [`SUSCEPTIBLE`](Self::SUSCEPTIBLE).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Compartments {
    /// Currently infected (and infectious) individuals.
    pub infected: f64,

    /// Recovered individuals that are currently immune.
    pub recovered: f64,

    /// Individuals that can be infected.
    pub susceptible: f64,
}

impl Compartments {
    /// Position of the infected count in the solver state.
    pub const INFECTED: usize = 0;
    /// Position of the recovered count in the solver state.
    pub const RECOVERED: usize = 1;
    /// Position of the susceptible count in the solver state.
    pub const SUSCEPTIBLE: usize = 2;

    /// Creates compartments from explicit counts.
    #[must_use]
    pub fn new(infected: f64, recovered: f64, susceptible: f64) -> Self {
        Self {
            infected,
            recovered,
            susceptible,
        }
    }

    /// A single index case in an otherwise susceptible population.
    #[must_use]
    pub fn seeded(population: f64) -> Self {
        Self::new(1.0, 0.0, population - 1.0)
    }

    /// Returns `I + R + S`.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.infected + self.recovered + self.susceptible
    }

    /// Returns a copy with every compartment raised to at least zero.
    ///
    /// Integration can leave counts slightly negative when a compartment is
    /// close to empty.
    #[must_use]
    pub fn clamped(&self) -> Self {
        Self::new(
            self.infected.max(0.0),
            self.recovered.max(0.0),
            self.susceptible.max(0.0),
        )
    }

    /// Returns `true` if no compartment is negative and the total matches
    /// `population` within a relative tolerance.
    #[must_use]
    pub fn conserves(&self, population: f64, rel_tol: f64) -> bool {
        let non_negative = [self.infected, self.recovered, self.susceptible]
            .iter()
            .all(|&count| count >= 0.0);

        non_negative && (self.total() - population).abs() <= rel_tol * population.abs()
    }
}

impl From<[f64; 3]> for Compartments {
    fn from(y: [f64; 3]) -> Self {
        Self::new(
            y[Self::INFECTED],
            y[Self::RECOVERED],
            y[Self::SUSCEPTIBLE],
        )
    }
}

impl From<Compartments> for [f64; 3] {
    fn from(c: Compartments) -> Self {
        let mut y = [0.0; 3];
        y[Compartments::INFECTED] = c.infected;
        y[Compartments::RECOVERED] = c.recovered;
        y[Compartments::SUSCEPTIBLE] = c.susceptible;
        y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn array_order_is_infected_recovered_susceptible() {
        let y: [f64; 3] = Compartments::new(1.0, 2.0, 3.0).into();

        assert_eq!(y, [1.0, 2.0, 3.0]);
        assert_eq!(Compartments::from(y), Compartments::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn seeded_population_has_one_case() {
        let c = Compartments::seeded(1000.0);

        assert_eq!(c, Compartments::new(1.0, 0.0, 999.0));
        assert!(c.conserves(1000.0, 0.0));
    }

    #[test]
    fn conservation_checks_total_and_sign() {
        assert!(!Compartments::new(1.0, 0.0, 998.0).conserves(1000.0, 1e-6));
        assert!(!Compartments::new(-1.0, 2.0, 999.0).conserves(1000.0, 1e-6));
        assert!(Compartments::new(1.0, 0.0, 999.0005).conserves(1000.0, 1e-6));
    }

    #[test]
    fn clamping_removes_negative_drift() {
        let c = Compartments::new(-1e-9, 5.0, -0.0).clamped();

        assert_eq!(c, Compartments::new(0.0, 5.0, 0.0));
    }
}
