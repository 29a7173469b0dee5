use anyhow::{bail, Result};
use serde::Serialize;

use crate::simulate::Trajectory;

/// Qualitative spread of the two series, from their coefficients of
/// variation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Variability {
    /// Both populations stay close to their means.
    Steady,
    Moderate,
    StrongCycles,
}

/// Summary statistics for one population series.
#[derive(Debug, Clone, Serialize)]
pub struct SeriesSummary {
    pub max: f64,
    /// Time at which the maximum occurs.
    pub max_time: f64,
    pub min: f64,
    pub min_time: f64,
    pub mean: f64,
    pub std_dev: f64,
    /// std_dev / mean; zero mean gives zero.
    pub coefficient_of_variation: f64,
    /// Number of strict interior peaks.
    pub peak_count: usize,
    /// Mean spacing between consecutive peaks, when there are at least two.
    pub mean_period: Option<f64>,
    pub final_value: f64,
}

/// Derived dynamics of a full run.
#[derive(Debug, Clone, Serialize)]
pub struct Insights {
    pub prey: SeriesSummary,
    pub predator: SeriesSummary,
    /// Mean delay from each prey peak to the next predator peak; the
    /// predator response lag. Absent when either series has no peaks.
    pub phase_lag: Option<f64>,
    /// Pearson correlation between the two series.
    pub correlation: f64,
    pub variability: Variability,
}

/// Computes peaks, periods, phase lag, extremes, and correlation for a
/// trajectory. Needs at least three samples so interior peaks exist.
pub fn analyze(trajectory: &Trajectory) -> Result<Insights> {
    if trajectory.len() < 3 {
        bail!(
            "Trajectory too short to analyze: {} samples, need at least 3.",
            trajectory.len()
        );
    }

    let times: Vec<f64> = trajectory.samples().iter().map(|s| s.t).collect();
    let prey: Vec<f64> = trajectory.samples().iter().map(|s| s.x).collect();
    let predator: Vec<f64> = trajectory.samples().iter().map(|s| s.y).collect();

    let prey_peaks = local_maxima(&prey);
    let predator_peaks = local_maxima(&predator);

    let phase_lag = mean_peak_delay(&times, &prey_peaks, &predator_peaks);

    let prey_summary = summarize(&times, &prey, &prey_peaks);
    let predator_summary = summarize(&times, &predator, &predator_peaks);
    let variability = classify_variability(
        prey_summary.coefficient_of_variation,
        predator_summary.coefficient_of_variation,
    );

    Ok(Insights {
        correlation: pearson(&prey, &predator),
        prey: prey_summary,
        predator: predator_summary,
        phase_lag,
        variability,
    })
}

/// Mean delay from each prey peak to the first predator peak after it.
fn mean_peak_delay(times: &[f64], prey_peaks: &[usize], predator_peaks: &[usize]) -> Option<f64> {
    let mut delays = Vec::new();
    let mut q = 0;
    for &p in prey_peaks {
        while q < predator_peaks.len() && predator_peaks[q] <= p {
            q += 1;
        }
        if q == predator_peaks.len() {
            break;
        }
        delays.push(times[predator_peaks[q]] - times[p]);
    }

    (!delays.is_empty()).then(|| delays.iter().sum::<f64>() / delays.len() as f64)
}

/// Indices of strict interior local maxima.
fn local_maxima(values: &[f64]) -> Vec<usize> {
    let mut peaks = Vec::new();
    for i in 1..values.len().saturating_sub(1) {
        if values[i] > values[i - 1] && values[i] > values[i + 1] {
            peaks.push(i);
        }
    }
    peaks
}

fn summarize(times: &[f64], values: &[f64], peaks: &[usize]) -> SeriesSummary {
    let mut max_index = 0;
    let mut min_index = 0;
    for (i, &v) in values.iter().enumerate() {
        if v > values[max_index] {
            max_index = i;
        }
        if v < values[min_index] {
            min_index = i;
        }
    }

    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>() / n;
    let std_dev = variance.sqrt();
    let coefficient_of_variation = if mean.abs() > 0.0 { std_dev / mean } else { 0.0 };

    let mean_period = (peaks.len() > 1).then(|| {
        let first = times[peaks[0]];
        let last = times[*peaks.last().unwrap()];
        (last - first) / (peaks.len() - 1) as f64
    });

    SeriesSummary {
        max: values[max_index],
        max_time: times[max_index],
        min: values[min_index],
        min_time: times[min_index],
        mean,
        std_dev,
        coefficient_of_variation,
        peak_count: peaks.len(),
        mean_period,
        final_value: *values.last().unwrap(),
    }
}

fn classify_variability(prey_cv: f64, predator_cv: f64) -> Variability {
    if prey_cv < 0.3 && predator_cv < 0.3 {
        Variability::Steady
    } else if prey_cv < 0.5 && predator_cv < 0.5 {
        Variability::Moderate
    } else {
        Variability::StrongCycles
    }
}

fn pearson(xs: &[f64], ys: &[f64]) -> f64 {
    let n = xs.len() as f64;
    let mean_x = xs.iter().sum::<f64>() / n;
    let mean_y = ys.iter().sum::<f64>() / n;

    let mut covariance = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (&x, &y) in xs.iter().zip(ys) {
        covariance += (x - mean_x) * (y - mean_y);
        var_x += (x - mean_x) * (x - mean_x);
        var_y += (y - mean_y) * (y - mean_y);
    }

    let denom = (var_x * var_y).sqrt();
    if denom > 0.0 {
        covariance / denom
    } else {
        0.0
    }
}
