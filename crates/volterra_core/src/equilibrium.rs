use num_complex::Complex64;
use serde::Serialize;

use crate::error::SimulateError;
use crate::model::LotkaVolterra;

/// Qualitative type of a planar equilibrium, from the eigenvalues of the
/// community matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Stability {
    /// Real eigenvalues of opposite sign.
    Saddle,
    /// Purely imaginary pair; orbits circle the point.
    Center,
    /// Complex pair with negative real part.
    SpiralSink,
    /// Complex pair with positive real part.
    SpiralSource,
    /// Both real eigenvalues negative.
    Sink,
    /// Both real eigenvalues positive.
    Source,
    /// At least one eigenvalue is zero; the linearization is inconclusive.
    Degenerate,
}

/// One equilibrium of the model with its linearization.
#[derive(Debug, Clone, Serialize)]
pub struct EquilibriumReport {
    /// The stationary state (x, y).
    pub state: (f64, f64),
    /// Row-major 2x2 Jacobian at the state.
    pub jacobian: [[f64; 2]; 2],
    pub eigenvalues: (Complex64, Complex64),
    pub stability: Stability,
    /// Oscillation period of the linearization, when the eigenvalues have
    /// a nonzero imaginary part.
    pub period: Option<f64>,
}

/// Jacobian (community matrix) of the vector field at (x, y):
///
///   [ alpha - beta*y      -beta*x      ]
///   [ delta*y             delta*x - gamma ]
pub fn jacobian(model: &LotkaVolterra, x: f64, y: f64) -> [[f64; 2]; 2] {
    [
        [model.alpha - model.beta * y, -model.beta * x],
        [model.delta * y, model.delta * x - model.gamma],
    ]
}

/// Eigenvalues of a 2x2 matrix from the trace/determinant closed form.
pub fn eigenvalues(matrix: [[f64; 2]; 2]) -> (Complex64, Complex64) {
    let trace = matrix[0][0] + matrix[1][1];
    let det = matrix[0][0] * matrix[1][1] - matrix[0][1] * matrix[1][0];
    let discriminant = trace * trace / 4.0 - det;

    let half_trace = Complex64::new(trace / 2.0, 0.0);
    let root = Complex64::new(discriminant, 0.0).sqrt();
    (half_trace + root, half_trace - root)
}

fn classify(eigenvalues: (Complex64, Complex64)) -> Stability {
    let (l1, l2) = eigenvalues;
    let tol = 1e-12;

    if l1.norm() < tol || l2.norm() < tol {
        return Stability::Degenerate;
    }

    if l1.im.abs() > tol {
        // Complex conjugate pair.
        return if l1.re.abs() < tol {
            Stability::Center
        } else if l1.re < 0.0 {
            Stability::SpiralSink
        } else {
            Stability::SpiralSource
        };
    }

    match (l1.re > 0.0, l2.re > 0.0) {
        (true, true) => Stability::Source,
        (false, false) => Stability::Sink,
        _ => Stability::Saddle,
    }
}

fn report_at(model: &LotkaVolterra, x: f64, y: f64) -> EquilibriumReport {
    let jacobian = jacobian(model, x, y);
    let eigenvalues = eigenvalues(jacobian);
    let stability = classify(eigenvalues);
    let period = (eigenvalues.0.im.abs() > 1e-12)
        .then(|| 2.0 * std::f64::consts::PI / eigenvalues.0.im.abs());

    EquilibriumReport {
        state: (x, y),
        jacobian,
        eigenvalues,
        stability,
        period,
    }
}

/// Linearization reports for both fixed points: the extinction state
/// (0, 0) and the coexistence state (gamma/delta, alpha/beta).
///
/// For valid parameters the origin is always a saddle and the coexistence
/// point a center with period 2*pi/sqrt(alpha*gamma); small orbits around
/// it take roughly that long, larger ones longer.
pub fn fixed_points(model: &LotkaVolterra) -> Result<Vec<EquilibriumReport>, SimulateError> {
    model.validate()?;

    let (cx, cy) = model.coexistence();
    Ok(vec![report_at(model, 0.0, 0.0), report_at(model, cx, cy)])
}
