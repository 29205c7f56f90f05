//! SIR-family compartmental epidemic models.
//!
//! The state of every model is the compartment tuple (I, R, S) held in
//! [`Compartments`]. A [`RateModel`] turns a state, a time and a validated
//! [`Parameters`] record into the rates of change of each compartment:
//!
//! - [`Sir`]: the basic model with permanent immunity
//! - [`SirWaning`]: recovered individuals lose immunity at rate `R / W`
//! - [`SirWaningSeasonal`]: waning immunity plus an annual contact-rate cycle
//!
//! [`Variant`] selects one of the three at runtime, and [`Epidemic`] adapts a
//! model and its parameters into an [`OdeSystem`] for the solvers.
//!
//! [`OdeSystem`]: contagion_core::OdeSystem

mod compartments;
mod epidemic;
mod parameters;
mod seasonal;
mod seasonality;
mod sir;
mod variant;
mod waning;

pub use compartments::Compartments;
pub use epidemic::{Epidemic, RateModel};
pub use parameters::{Knob, ParameterError, Parameters};
pub use seasonal::SirWaningSeasonal;
pub use seasonality::{SEASON_DAYS, Seasonality};
pub use sir::Sir;
pub use variant::Variant;
pub use waning::SirWaning;
