//! Plotting recorder for visualizing convergence.
//!
//! See [`PlotRecorder`] for usage.

use eframe::egui;
use egui_plot::{Legend, Line, Plot, PlotPoints, Points};
use minima_core::{BoxError, EvaluationType, IterationType, Location, Recorder, Stats};

use crate::gradient_norm;

/// Configuration for rendering a [`PlotRecorder`] result.
///
/// Construct with [`ShowConfig::new`] and chain builder methods as needed.
///
/// # Example
///
/// ```ignore
/// plot.show(ShowConfig::new().title("BFGS on Rosenbrock").legend().log_y())?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct ShowConfig {
    title: Option<String>,
    legend: bool,
    log_y: bool,
}

impl ShowConfig {
    /// Creates a config with no title, no legend, and a linear y-axis.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the window title.
    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Enables a legend labeling each trace.
    #[must_use]
    pub fn legend(mut self) -> Self {
        self.legend = true;
        self
    }

    /// Plots log₁₀ of the y values. Non-positive values are skipped.
    #[must_use]
    pub fn log_y(mut self) -> Self {
        self.log_y = true;
        self
    }
}

/// A recorder that collects convergence traces and displays them via egui.
///
/// Against the major iteration count it plots:
///
/// - the function value at the start and at each major iteration
/// - the gradient infinity norm, where a valid gradient was recorded
/// - the function value at every minor iteration, as markers
///
/// Pass `&mut PlotRecorder` in the settings, then call
/// [`show`](PlotRecorder::show) after the run.
///
/// ```ignore
/// let mut plot = PlotRecorder::new();
/// let settings = Settings::default().with_recorder(&mut plot);
/// minimize(&Rosenbrock, &[-1.2, 1.0], Some(settings), None)?;
/// plot.show(ShowConfig::new().legend().log_y())?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct PlotRecorder {
    f: Vec<[f64; 2]>,
    grad_norm: Vec<[f64; 2]>,
    minor_f: Vec<[f64; 2]>,
}

impl PlotRecorder {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens a blocking egui window displaying the collected traces.
    ///
    /// Blocks until the window is closed by the user.
    ///
    /// # Errors
    ///
    /// Returns an error if the native window cannot be created.
    pub fn show(self, config: ShowConfig) -> Result<(), eframe::Error> {
        let options = eframe::NativeOptions::default();
        let title = config.title.unwrap_or_else(|| "minimization".to_owned());

        eframe::run_native(
            &title,
            options,
            Box::new(move |_cc| {
                Ok(Box::new(PlotApp {
                    data: self,
                    legend: config.legend,
                    log_y: config.log_y,
                }))
            }),
        )
    }
}

impl Recorder for PlotRecorder {
    fn record(
        &mut self,
        location: &Location,
        _evaluation: EvaluationType,
        iteration: IterationType,
        stats: &Stats,
    ) -> Result<(), BoxError> {
        #[allow(clippy::cast_precision_loss)]
        let x = stats.major_iterations as f64;

        match iteration {
            IterationType::InitIteration | IterationType::MajorIteration => {
                self.f.push([x, location.f]);
                if let Some(norm) = gradient_norm(location) {
                    self.grad_norm.push([x, norm]);
                }
            }
            IterationType::MinorIteration => self.minor_f.push([x, location.f]),
            IterationType::PostIteration => {}
        }
        Ok(())
    }
}

/// The egui [`eframe::App`] that renders collected traces.
struct PlotApp {
    data: PlotRecorder,
    legend: bool,
    log_y: bool,
}

impl PlotApp {
    fn transform(&self, points: &[[f64; 2]]) -> PlotPoints {
        points
            .iter()
            .filter(|p| p[1].is_finite() && (!self.log_y || p[1] > 0.0))
            .map(|p| if self.log_y { [p[0], p[1].log10()] } else { *p })
            .collect()
    }
}

impl eframe::App for PlotApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            let mut plot = Plot::new("plot_recorder").x_axis_label("major iteration");
            if self.legend {
                plot = plot.legend(Legend::default());
            }
            if self.log_y {
                plot = plot.y_axis_label("log₁₀");
            }
            plot.show(ui, |plot_ui| {
                plot_ui.line(Line::new(self.transform(&self.data.f)).name("f"));
                plot_ui.line(Line::new(self.transform(&self.data.grad_norm)).name("‖∇f‖∞"));
                plot_ui.points(
                    Points::new(self.transform(&self.data.minor_f))
                        .radius(2.0)
                        .name("line search f"),
                );
            });
        });
    }
}
