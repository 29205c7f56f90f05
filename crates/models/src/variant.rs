use serde::{Deserialize, Serialize};

use crate::{Compartments, Parameters, RateModel, Sir, SirWaning, SirWaningSeasonal};

/// Runtime selection of a model variant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Variant {
    /// [`Sir`]
    #[default]
    Basic,
    /// [`SirWaning`]
    Waning,
    /// [`SirWaningSeasonal`]
    WaningSeasonal,
}

impl Variant {
    /// All variants, from simplest to richest.
    pub const ALL: [Variant; 3] = [Variant::Basic, Variant::Waning, Variant::WaningSeasonal];

    /// Picks the simplest variant that uses every feature in `params`.
    #[must_use]
    pub fn for_parameters(params: &Parameters) -> Self {
        match (params.waning_time(), params.seasonality()) {
            (_, Some(_)) => Variant::WaningSeasonal,
            (Some(_), None) => Variant::Waning,
            (None, None) => Variant::Basic,
        }
    }

    /// Returns the short name used in configuration files.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Variant::Basic => "basic",
            Variant::Waning => "waning",
            Variant::WaningSeasonal => "waning_seasonal",
        }
    }
}

impl RateModel for Variant {
    fn rates(&self, state: &Compartments, t: f64, params: &Parameters) -> Compartments {
        match self {
            Variant::Basic => Sir.rates(state, t, params),
            Variant::Waning => SirWaning.rates(state, t, params),
            Variant::WaningSeasonal => SirWaningSeasonal.rates(state, t, params),
        }
    }
}
