use serde::{Deserialize, Serialize};

use crate::error::SimulateError;
use crate::model::LotkaVolterra;
use crate::solvers::{Euler, RK4};
use crate::traits::Steppable;

/// Fixed-step integration scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Scheme {
    /// Explicit Euler. First order; drifts outward on this model and can
    /// produce spurious negative populations at large step sizes.
    Euler,
    /// Classic 4th-order Runge-Kutta. Default; keeps the model's closed
    /// phase-space orbits at practical step sizes.
    Rk4,
}

impl Default for Scheme {
    fn default() -> Self {
        Scheme::Rk4
    }
}

enum SchemeStepper {
    Euler(Euler<f64>),
    Rk4(RK4<f64>),
}

impl SchemeStepper {
    fn new(scheme: Scheme) -> Self {
        match scheme {
            Scheme::Euler => SchemeStepper::Euler(Euler::new(2)),
            Scheme::Rk4 => SchemeStepper::Rk4(RK4::new(2)),
        }
    }

    fn step(&mut self, model: &LotkaVolterra, t: &mut f64, state: &mut [f64], dt: f64) {
        match self {
            SchemeStepper::Euler(s) => s.step(model, t, state, dt),
            SchemeStepper::Rk4(s) => s.step(model, t, state, dt),
        }
    }
}

/// Initial conditions and time grid for one run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Initial prey population.
    pub x0: f64,
    /// Initial predator population.
    pub y0: f64,
    /// Start time.
    pub t0: f64,
    /// Step size.
    pub dt: f64,
    /// Simulated time span; floor(horizon / dt) steps are taken and any
    /// fractional remainder is dropped.
    pub horizon: f64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            x0: 10.0,
            y0: 4.0,
            t0: 0.0,
            dt: 0.01,
            horizon: 20.0,
        }
    }
}

impl SimulationConfig {
    /// Checks populations, step size, and horizon.
    pub fn validate(&self) -> Result<(), SimulateError> {
        for (name, value) in [("x0", self.x0), ("y0", self.y0)] {
            if !(value >= 0.0 && value.is_finite()) {
                return Err(SimulateError::InvalidState { name, value });
            }
        }
        if !self.t0.is_finite() {
            return Err(SimulateError::InvalidStep {
                name: "t0",
                value: self.t0,
            });
        }
        for (name, value) in [("dt", self.dt), ("horizon", self.horizon)] {
            if !(value > 0.0 && value.is_finite()) {
                return Err(SimulateError::InvalidStep { name, value });
            }
        }
        Ok(())
    }

    /// Number of steps taken: floor(horizon / dt).
    pub fn steps(&self) -> usize {
        (self.horizon / self.dt).floor() as usize
    }
}

/// One point of a trajectory.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub t: f64,
    /// Prey population.
    pub x: f64,
    /// Predator population.
    pub y: f64,
}

/// A materialized run: floor(horizon/dt) + 1 samples with strictly
/// increasing times, the first being the initial condition exactly.
/// Immutable once produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trajectory {
    samples: Vec<Sample>,
}

impl Trajectory {
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn first(&self) -> Option<&Sample> {
        self.samples.first()
    }

    pub fn last(&self) -> Option<&Sample> {
        self.samples.last()
    }

    /// Prey series as (t, x) points, ready for plotting.
    pub fn prey_series(&self) -> Vec<[f64; 2]> {
        self.samples.iter().map(|s| [s.t, s.x]).collect()
    }

    /// Predator series as (t, y) points.
    pub fn predator_series(&self) -> Vec<[f64; 2]> {
        self.samples.iter().map(|s| [s.t, s.y]).collect()
    }

    /// Phase-plane orbit as (x, y) points.
    pub fn phase_orbit(&self) -> Vec<[f64; 2]> {
        self.samples.iter().map(|s| [s.x, s.y]).collect()
    }
}

impl From<Trajectory> for Vec<Sample> {
    fn from(trajectory: Trajectory) -> Self {
        trajectory.samples
    }
}

/// A lazy, forward-only run over the stepping loop.
///
/// Yields the initial sample first, then one sample per step, and cannot
/// be restarted. Useful for long horizons where materializing the whole
/// trajectory is not wanted; [`simulate`] is a collect over this.
pub struct Run {
    model: LotkaVolterra,
    stepper: SchemeStepper,
    t: f64,
    state: [f64; 2],
    dt: f64,
    remaining: usize,
    started: bool,
}

impl Run {
    /// Validates all inputs up front; never fails mid-run afterwards.
    pub fn new(
        model: LotkaVolterra,
        config: SimulationConfig,
        scheme: Scheme,
    ) -> Result<Self, SimulateError> {
        model.validate()?;
        config.validate()?;

        Ok(Self {
            model,
            stepper: SchemeStepper::new(scheme),
            t: config.t0,
            state: [config.x0, config.y0],
            dt: config.dt,
            remaining: config.steps(),
            started: false,
        })
    }

    fn current(&self) -> Sample {
        Sample {
            t: self.t,
            x: self.state[0],
            y: self.state[1],
        }
    }
}

impl Iterator for Run {
    type Item = Sample;

    fn next(&mut self) -> Option<Sample> {
        if !self.started {
            self.started = true;
            return Some(self.current());
        }
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        self.stepper
            .step(&self.model, &mut self.t, &mut self.state, self.dt);
        Some(self.current())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.remaining + usize::from(!self.started);
        (n, Some(n))
    }
}

/// Integrates the model over the configured grid and returns the full
/// trajectory. Deterministic: identical inputs produce identical output.
pub fn simulate(
    model: LotkaVolterra,
    config: SimulationConfig,
    scheme: Scheme,
) -> Result<Trajectory, SimulateError> {
    let run = Run::new(model, config, scheme)?;
    Ok(Trajectory {
        samples: run.collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::{simulate, Run, Sample, Scheme, SimulationConfig};
    use crate::error::SimulateError;
    use crate::model::LotkaVolterra;
    use approx::assert_relative_eq;

    fn defaults() -> (LotkaVolterra, SimulationConfig) {
        (LotkaVolterra::default(), SimulationConfig::default())
    }

    #[test]
    fn trajectory_has_floor_plus_one_samples_and_exact_start() {
        let (model, config) = defaults();
        let trajectory = simulate(model, config, Scheme::Rk4).unwrap();

        assert_eq!(trajectory.len(), config.steps() + 1);
        assert_eq!(trajectory.len(), 2001);
        assert_eq!(
            *trajectory.first().unwrap(),
            Sample {
                t: 0.0,
                x: 10.0,
                y: 4.0
            }
        );
        assert_relative_eq!(trajectory.last().unwrap().t, 20.0, epsilon = 1e-9);
    }

    #[test]
    fn fractional_horizon_is_truncated() {
        let (model, mut config) = defaults();
        config.dt = 0.1;
        config.horizon = 0.25;

        let trajectory = simulate(model, config, Scheme::Euler).unwrap();
        assert_eq!(trajectory.len(), 3);
    }

    #[test]
    fn identical_inputs_give_identical_trajectories() {
        let (model, config) = defaults();
        let a = simulate(model, config, Scheme::Rk4).unwrap();
        let b = simulate(model, config, Scheme::Rk4).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn lazy_run_matches_materialized_trajectory() {
        let (model, mut config) = defaults();
        config.horizon = 1.0;

        let streamed: Vec<Sample> = Run::new(model, config, Scheme::Rk4).unwrap().collect();
        let materialized = simulate(model, config, Scheme::Rk4).unwrap();

        assert_eq!(streamed, materialized.samples());
    }

    #[test]
    fn run_reports_exact_size_hint() {
        let (model, mut config) = defaults();
        config.dt = 0.1;
        config.horizon = 1.0;

        let run = Run::new(model, config, Scheme::Euler).unwrap();
        assert_eq!(run.size_hint(), (11, Some(11)));
    }

    #[test]
    fn first_euler_step_matches_hand_computation() {
        // dx/dt = -25, dy/dt = 28 at (10, 4), so one 0.01 step gives
        // (9.75, 4.28).
        let (model, config) = defaults();
        let trajectory = simulate(model, config, Scheme::Euler).unwrap();

        let s1 = trajectory.samples()[1];
        assert_relative_eq!(s1.x, 9.75, epsilon = 1e-12);
        assert_relative_eq!(s1.y, 4.28, epsilon = 1e-12);
    }

    #[test]
    fn coexistence_point_is_stationary() {
        let (model, mut config) = defaults();
        let (x, y) = model.coexistence();
        config.x0 = x;
        config.y0 = y;
        config.horizon = 5.0;

        for scheme in [Scheme::Euler, Scheme::Rk4] {
            let trajectory = simulate(model, config, scheme).unwrap();
            for sample in trajectory.samples() {
                assert_relative_eq!(sample.x, x, epsilon = 1e-12);
                assert_relative_eq!(sample.y, y, epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn schemes_converge_as_step_shrinks() {
        let (model, mut config) = defaults();
        config.dt = 1e-4;
        config.horizon = 1.0;

        let euler = simulate(model, config, Scheme::Euler).unwrap();
        let rk4 = simulate(model, config, Scheme::Rk4).unwrap();

        let e = euler.last().unwrap();
        let r = rk4.last().unwrap();
        assert!((e.x - r.x).abs() < 1e-2);
        assert!((e.y - r.y).abs() < 1e-2);
    }

    #[test]
    fn rk4_conserves_first_integral_where_euler_drifts() {
        let (model, config) = defaults();

        let v0 = model.first_integral(config.x0, config.y0);

        let rk4 = simulate(model, config, Scheme::Rk4).unwrap();
        let r = rk4.last().unwrap();
        let rk4_drift = (model.first_integral(r.x, r.y) - v0).abs();
        assert!(rk4_drift < 1e-4, "RK4 drift {rk4_drift}");

        let euler = simulate(model, config, Scheme::Euler).unwrap();
        let e = euler.last().unwrap();
        let euler_drift = (model.first_integral(e.x, e.y) - v0).abs();
        assert!(euler_drift > 0.05, "Euler drift {euler_drift}");
        assert!(euler_drift > 100.0 * rk4_drift);
    }

    #[test]
    fn rk4_orbit_returns_near_its_start() {
        let (model, mut config) = defaults();
        config.dt = 0.001;
        config.horizon = 8.0;

        let trajectory = simulate(model, config, Scheme::Rk4).unwrap();

        // The continuous orbit is closed; after leaving the start the
        // discretized one must come back close to it.
        let closest = trajectory
            .samples()
            .iter()
            .filter(|s| s.t > 1.0)
            .map(|s| ((s.x - config.x0).powi(2) + (s.y - config.y0).powi(2)).sqrt())
            .fold(f64::INFINITY, f64::min);
        assert!(closest < 0.2, "closest return {closest}");
    }

    #[test]
    fn invalid_inputs_are_rejected_up_front() {
        let (model, config) = defaults();

        let mut bad = config;
        bad.x0 = -1.0;
        assert_eq!(
            simulate(model, bad, Scheme::Rk4).unwrap_err(),
            SimulateError::InvalidState {
                name: "x0",
                value: -1.0
            }
        );

        let mut bad = config;
        bad.dt = 0.0;
        assert_eq!(
            simulate(model, bad, Scheme::Rk4).unwrap_err(),
            SimulateError::InvalidStep {
                name: "dt",
                value: 0.0
            }
        );

        let mut bad = config;
        bad.horizon = -2.0;
        assert!(matches!(
            simulate(model, bad, Scheme::Rk4),
            Err(SimulateError::InvalidStep { name: "horizon", .. })
        ));

        let mut bad_model = model;
        bad_model.alpha = 0.0;
        assert!(matches!(
            simulate(bad_model, config, Scheme::Rk4),
            Err(SimulateError::InvalidParameter { name: "alpha", .. })
        ));
    }
}
