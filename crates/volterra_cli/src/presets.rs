use clap::ValueEnum;

use volterra_core::model::LotkaVolterra;
use volterra_core::simulate::SimulationConfig;

/// Named ecosystem scenarios with their own parameters, initial
/// populations, and time grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Preset {
    /// Large rabbit population held in check by a small fox pack.
    BalancedForest,
    /// Abundant rabbits, few and inefficient foxes.
    RabbitParadise,
    /// As many foxes as it takes to crash the rabbit population.
    FoxDominance,
    /// High rates in both directions; wide swings.
    FragileBalance,
}

pub const ALL: [Preset; 4] = [
    Preset::BalancedForest,
    Preset::RabbitParadise,
    Preset::FoxDominance,
    Preset::FragileBalance,
];

impl Preset {
    pub fn name(self) -> &'static str {
        match self {
            Preset::BalancedForest => "Balanced Forest",
            Preset::RabbitParadise => "Rabbit Paradise",
            Preset::FoxDominance => "Fox Dominance",
            Preset::FragileBalance => "Fragile Balance",
        }
    }

    pub fn model(self) -> LotkaVolterra {
        match self {
            Preset::BalancedForest => LotkaVolterra {
                alpha: 0.1,
                beta: 0.02,
                gamma: 0.1,
                delta: 0.01,
            },
            Preset::RabbitParadise => LotkaVolterra {
                alpha: 0.15,
                beta: 0.01,
                gamma: 0.1,
                delta: 0.005,
            },
            Preset::FoxDominance => LotkaVolterra {
                alpha: 0.08,
                beta: 0.03,
                gamma: 0.08,
                delta: 0.02,
            },
            Preset::FragileBalance => LotkaVolterra {
                alpha: 0.12,
                beta: 0.025,
                gamma: 0.12,
                delta: 0.015,
            },
        }
    }

    /// Slow rates, so a long horizon with a coarse step.
    pub fn config(self) -> SimulationConfig {
        let (x0, y0) = match self {
            Preset::BalancedForest => (40.0, 9.0),
            Preset::RabbitParadise => (100.0, 5.0),
            Preset::FoxDominance => (20.0, 20.0),
            Preset::FragileBalance => (30.0, 12.0),
        };
        SimulationConfig {
            x0,
            y0,
            t0: 0.0,
            dt: 0.2,
            horizon: 200.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ALL;
    use volterra_core::simulate::{simulate, Scheme};

    #[test]
    fn every_preset_simulates_cleanly() {
        for preset in ALL {
            let trajectory = simulate(preset.model(), preset.config(), Scheme::Rk4)
                .unwrap_or_else(|err| panic!("{}: {err}", preset.name()));
            assert_eq!(trajectory.len(), 1001);
        }
    }
}
