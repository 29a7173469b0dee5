use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};

use volterra_core::analysis::{Insights, SeriesSummary};
use volterra_core::equilibrium::EquilibriumReport;
use volterra_core::simulate::Trajectory;

/// Writes the trajectory as `t,rabbits,foxes` rows.
pub fn write_csv(path: &Path, trajectory: &Trajectory) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("creating CSV file {}", path.display()))?;
    let mut writer = BufWriter::new(file);

    writeln!(writer, "t,rabbits,foxes")?;
    for sample in trajectory.samples() {
        writeln!(writer, "{},{},{}", sample.t, sample.x, sample.y)?;
    }
    writer.flush()?;
    Ok(())
}

/// Writes the sample list as pretty-printed JSON.
pub fn write_json(path: &Path, trajectory: &Trajectory) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("creating JSON file {}", path.display()))?;
    serde_json::to_writer_pretty(BufWriter::new(file), trajectory.samples())
        .with_context(|| format!("writing JSON to {}", path.display()))?;
    Ok(())
}

/// Prints the fixed-point linearizations and the trajectory insights.
pub fn print_report(equilibria: &[EquilibriumReport], insights: &Insights) {
    println!("Equilibria:");
    for report in equilibria {
        let (x, y) = report.state;
        print!("  ({x:.4}, {y:.4})  {:?}", report.stability);
        if let Some(period) = report.period {
            print!("  linearized period {period:.3}");
        }
        println!();
    }

    println!();
    print_series("Rabbits", &insights.prey);
    print_series("Foxes", &insights.predator);

    println!();
    if let Some(lag) = insights.phase_lag {
        println!("Fox peaks trail rabbit peaks by {lag:.3} time units.");
    }
    println!("Population correlation: {:.3}", insights.correlation);
    println!("Regime: {:?}", insights.variability);
}

fn print_series(label: &str, s: &SeriesSummary) {
    println!(
        "{label}: peak {:.2} at t={:.2}, low {:.2} at t={:.2}, final {:.2}",
        s.max, s.max_time, s.min, s.min_time, s.final_value
    );
    print!(
        "  mean {:.2}, std dev {:.2}, {} cycles",
        s.mean, s.std_dev, s.peak_count
    );
    if let Some(period) = s.mean_period {
        print!(", mean period {period:.3}");
    }
    println!();
}
