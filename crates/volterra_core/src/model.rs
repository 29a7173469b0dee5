use serde::{Deserialize, Serialize};

use crate::error::SimulateError;
use crate::traits::DynamicalSystem;

/// Lotka-Volterra rate parameters.
///
/// The vector field over prey x and predators y is
///
///   dx/dt = alpha * x - beta * x * y
///   dy/dt = delta * x * y - gamma * y
///
/// All four rates must be positive. The set is an immutable value passed
/// into the integrator, so runs with different parameters are independent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LotkaVolterra {
    /// Prey growth rate.
    pub alpha: f64,
    /// Predation rate.
    pub beta: f64,
    /// Predator death rate.
    pub gamma: f64,
    /// Predator growth per predation.
    pub delta: f64,
}

impl Default for LotkaVolterra {
    fn default() -> Self {
        Self {
            alpha: 1.5,
            beta: 1.0,
            gamma: 3.0,
            delta: 1.0,
        }
    }
}

impl LotkaVolterra {
    /// Builds a validated parameter set.
    pub fn new(alpha: f64, beta: f64, gamma: f64, delta: f64) -> Result<Self, SimulateError> {
        let model = Self {
            alpha,
            beta,
            gamma,
            delta,
        };
        model.validate()?;
        Ok(model)
    }

    /// Checks that every rate is positive and finite.
    pub fn validate(&self) -> Result<(), SimulateError> {
        for (name, value) in [
            ("alpha", self.alpha),
            ("beta", self.beta),
            ("gamma", self.gamma),
            ("delta", self.delta),
        ] {
            if !(value > 0.0 && value.is_finite()) {
                return Err(SimulateError::InvalidParameter { name, value });
            }
        }
        Ok(())
    }

    /// Evaluates the vector field at (x, y).
    pub fn derivatives(&self, x: f64, y: f64) -> (f64, f64) {
        (
            self.alpha * x - self.beta * x * y,
            self.delta * x * y - self.gamma * y,
        )
    }

    /// The coexistence equilibrium (gamma/delta, alpha/beta), where both
    /// derivatives vanish.
    pub fn coexistence(&self) -> (f64, f64) {
        (self.gamma / self.delta, self.alpha / self.beta)
    }

    /// First integral V(x, y) = delta*x - gamma*ln(x) + beta*y - alpha*ln(y).
    ///
    /// Constant along exact orbits, so its drift measures the error a
    /// discretization introduces. Only defined for x > 0, y > 0.
    pub fn first_integral(&self, x: f64, y: f64) -> f64 {
        self.delta * x - self.gamma * x.ln() + self.beta * y - self.alpha * y.ln()
    }
}

impl DynamicalSystem<f64> for LotkaVolterra {
    fn dimension(&self) -> usize {
        2
    }

    fn apply(&self, _t: f64, x: &[f64], out: &mut [f64]) {
        let (dx, dy) = self.derivatives(x[0], x[1]);
        out[0] = dx;
        out[1] = dy;
    }
}

#[cfg(test)]
mod tests {
    use super::LotkaVolterra;
    use crate::error::SimulateError;
    use crate::traits::DynamicalSystem;
    use approx::assert_relative_eq;

    #[test]
    fn derivatives_match_reference_scenario() {
        // Defaults at (10, 4): dx/dt = 1.5*10 - 1*10*4, dy/dt = 1*10*4 - 3*4.
        let model = LotkaVolterra::default();
        let (dx, dy) = model.derivatives(10.0, 4.0);
        assert_relative_eq!(dx, -25.0);
        assert_relative_eq!(dy, 28.0);
    }

    #[test]
    fn vector_field_vanishes_at_coexistence() {
        let model = LotkaVolterra::default();
        let (x, y) = model.coexistence();
        assert_relative_eq!(x, 3.0);
        assert_relative_eq!(y, 1.5);

        let mut out = [f64::NAN; 2];
        model.apply(0.0, &[x, y], &mut out);
        assert_relative_eq!(out[0], 0.0);
        assert_relative_eq!(out[1], 0.0);
    }

    #[test]
    fn rejects_nonpositive_rates() {
        let err = LotkaVolterra::new(0.0, 1.0, 3.0, 1.0).unwrap_err();
        assert_eq!(
            err,
            SimulateError::InvalidParameter {
                name: "alpha",
                value: 0.0
            }
        );

        assert!(LotkaVolterra::new(1.5, -1.0, 3.0, 1.0).is_err());
        assert!(LotkaVolterra::new(1.5, 1.0, f64::NAN, 1.0).is_err());
    }

    #[test]
    fn first_integral_is_minimal_at_coexistence() {
        let model = LotkaVolterra::default();
        let (x, y) = model.coexistence();
        let v0 = model.first_integral(x, y);

        for (dx, dy) in [(0.5, 0.0), (-0.5, 0.0), (0.0, 0.5), (0.0, -0.5), (0.3, -0.3)] {
            assert!(model.first_integral(x + dx, y + dy) > v0);
        }
    }
}
