use contagion_core::State;

/// Event emitted by the ODE solvers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Event<const N: usize> {
    /// The solution reached a grid point.
    ///
    /// Index 0 is the initial state, emitted before any integration.
    Sampled { index: usize, state: State<N> },
}
