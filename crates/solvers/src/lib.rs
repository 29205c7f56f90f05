//! Numerical solvers for the Contagion workspace.
//!
//! - [`ode::dopri5`] — adaptive Dormand–Prince 5(4), the default
//! - [`ode::rk4`] — classic fourth-order Runge–Kutta with fixed sub-steps
//!
//! Both integrate any [`OdeSystem`] over a [`TimeGrid`] and return a
//! [`Trajectory`] sampled at every grid point.
//!
//! [`OdeSystem`]: contagion_core::OdeSystem
//! [`TimeGrid`]: contagion_core::TimeGrid
//! [`Trajectory`]: contagion_core::Trajectory

pub mod ode;
