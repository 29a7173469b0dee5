use num_traits::{Float, FromPrimitive};
use std::fmt::Debug;

/// Numeric type the integrators work over.
/// Needs float arithmetic, conversion from f64, and debug printing.
pub trait Scalar: Float + FromPrimitive + Debug + 'static {}

impl<T: Float + FromPrimitive + Debug + 'static> Scalar for T {}

/// A continuous-time dynamical system given by a vector field.
pub trait DynamicalSystem<T: Scalar> {
    /// Dimension of the state space.
    fn dimension(&self) -> usize;

    /// Evaluates the vector field at (t, x).
    /// x: current state
    /// out: buffer receiving dx/dt
    ///
    /// Must be pure: no side effects, no dependence on anything but (t, x).
    fn apply(&self, t: T, x: &[T], out: &mut [T]);
}

/// A fixed-step scheme that advances a system by one step of size dt.
pub trait Steppable<T: Scalar> {
    /// Advances (t, state) by dt in place.
    fn step(&mut self, system: &impl DynamicalSystem<T>, t: &mut T, state: &mut [T], dt: T);
}
