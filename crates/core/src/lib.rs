//! Core traits and types for the Contagion workspace.
//!
//! This crate defines the shared abstractions that the ODE solvers and the
//! epidemic models build on:
//!
//! - [`OdeSystem`] — a system of first-order ODEs with `N` state variables
//! - [`Observer`] — receives solver events and optionally returns control actions
//! - [`TimeGrid`] — the validated, strictly increasing sample times of a run
//! - [`Trajectory`] — the state at every grid point, produced by a solver

mod grid;
mod observer;
mod system;
mod trajectory;

pub use grid::{GridError, TimeGrid};
pub use observer::Observer;
pub use system::OdeSystem;
pub use trajectory::{State, Trajectory};
