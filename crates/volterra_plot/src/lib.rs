use eframe::egui;
use egui_plot::{Legend, Line, Plot, PlotPoint};

/// A window with two charts for one simulation run: both populations
/// against time on shared axes, and the phase-plane orbit below.
///
/// Takes plain `(t, value)` / `(x, y)` point slices, so it works for any
/// trajectory length and any integration scheme.
#[derive(Default)]
pub struct TrajectoryApp {
    populations: Vec<Series>,
    orbits: Vec<Series>,
}

struct Series {
    name: String,
    points: Vec<PlotPoint>,
}

fn to_series(name: &str, points: &[[f64; 2]]) -> Series {
    Series {
        name: name.to_string(),
        points: points.iter().copied().map(Into::into).collect(),
    }
}

impl TrajectoryApp {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a population-vs-time series to the upper chart.
    #[must_use]
    pub fn add_population(mut self, name: &str, points: &[[f64; 2]]) -> Self {
        self.populations.push(to_series(name, points));
        self
    }

    /// Adds a predator-vs-prey orbit to the lower chart.
    #[must_use]
    pub fn add_orbit(mut self, name: &str, points: &[[f64; 2]]) -> Self {
        self.orbits.push(to_series(name, points));
        self
    }

    #[allow(clippy::missing_errors_doc)]
    pub fn run(self, title: &str) -> Result<(), eframe::Error> {
        eframe::run_native(
            title,
            eframe::NativeOptions::default(),
            Box::new(|_cc| Ok(Box::new(self))),
        )
    }
}

impl eframe::App for TrajectoryApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            let chart_height = ui.available_height() / 2.0;

            Plot::new("populations")
                .legend(Legend::default())
                .height(chart_height)
                .show(ui, |plot_ui| {
                    for series in &self.populations {
                        plot_ui.line(Line::new(series.points.as_slice()).name(&series.name));
                    }
                });

            Plot::new("phase-plane")
                .legend(Legend::default())
                .show(ui, |plot_ui| {
                    for series in &self.orbits {
                        plot_ui.line(Line::new(series.points.as_slice()).name(&series.name));
                    }
                });
        });
    }
}
