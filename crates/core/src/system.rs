/// A system of first-order ordinary differential equations with `N` state
/// variables.
///
/// Implementors compute `dy/dt` for a state `y` at time `t`. Solvers call
/// [`derivative`](OdeSystem::derivative) repeatedly with the `(t, y)` pairs
/// their stepping scheme requires, so evaluation must be deterministic and free
/// of side effects.
pub trait OdeSystem<const N: usize> {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Computes the time derivative of the state.
    ///
    /// # Errors
    ///
    /// Returns [`Self::Error`] if the derivative cannot be evaluated.
    fn derivative(&self, t: f64, y: &[f64; N]) -> Result<[f64; N], Self::Error>;
}

impl<S, const N: usize> OdeSystem<N> for &S
where
    S: OdeSystem<N> + ?Sized,
{
    type Error = S::Error;

    fn derivative(&self, t: f64, y: &[f64; N]) -> Result<[f64; N], Self::Error> {
        (**self).derivative(t, y)
    }
}
