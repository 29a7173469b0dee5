/// The `volterra_core` crate is the numerical engine of the Volterra
/// predator-prey simulator. It integrates the Lotka-Volterra equations
///
///   dx/dt = alpha*x - beta*x*y
///   dy/dt = delta*x*y - gamma*y
///
/// over a fixed time grid and hands the resulting trajectory to whatever
/// wants it (plotting, export, reporting); nothing in here renders or
/// persists anything.
///
/// Key components:
/// - **Traits**: `Scalar` (numeric abstraction), `DynamicalSystem` (vector
///   fields), `Steppable` (fixed-step schemes).
/// - **Solvers**: explicit Euler and classic RK4.
/// - **Model**: the `LotkaVolterra` parameter set and its vector field.
/// - **Simulate**: validated stepping driver, lazy `Run` stream, and the
///   materialized `Trajectory`.
/// - **Equilibrium**: fixed points, community matrix, stability.
/// - **Analysis**: peaks, periods, phase lag, and summary statistics.
pub mod analysis;
pub mod equilibrium;
pub mod error;
pub mod model;
pub mod simulate;
pub mod solvers;
pub mod traits;
