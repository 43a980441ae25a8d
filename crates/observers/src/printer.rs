use minima_core::{BoxError, Capabilities, EvaluationType, IterationType, Location, Recorder, Stats};
use tracing::{debug, info};

use crate::gradient_norm;

/// A recorder that reports progress as `tracing` events.
///
/// The starting point, the final best location, and every `interval`-th
/// major iteration are emitted at `INFO`. Minor iterations are emitted at
/// `DEBUG`. Install a subscriber to see the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Printer {
    interval: usize,
}

impl Default for Printer {
    fn default() -> Self {
        Self::new()
    }
}

impl Printer {
    /// Creates a printer that reports every major iteration.
    #[must_use]
    pub fn new() -> Self {
        Self { interval: 1 }
    }

    /// Reports only every `interval`-th major iteration.
    ///
    /// An interval of zero is treated as one.
    #[must_use]
    pub fn with_interval(mut self, interval: usize) -> Self {
        self.interval = interval.max(1);
        self
    }

    fn reports_major(&self, major_iterations: usize) -> bool {
        major_iterations % self.interval == 0
    }
}

impl Recorder for Printer {
    fn init(&mut self, capabilities: &Capabilities) -> Result<(), BoxError> {
        debug!(?capabilities, "starting minimization");
        Ok(())
    }

    fn record(
        &mut self,
        location: &Location,
        evaluation: EvaluationType,
        iteration: IterationType,
        stats: &Stats,
    ) -> Result<(), BoxError> {
        let grad_norm = gradient_norm(location);
        match iteration {
            IterationType::InitIteration | IterationType::PostIteration => {
                info!(
                    %iteration,
                    f = location.f,
                    grad_norm,
                    evaluations = stats.total_func_evaluations(),
                    runtime = ?stats.runtime,
                    "location"
                );
            }
            IterationType::MajorIteration if self.reports_major(stats.major_iterations) => {
                info!(
                    iteration = stats.major_iterations,
                    f = location.f,
                    grad_norm,
                    evaluations = stats.total_func_evaluations(),
                    "major iteration"
                );
            }
            IterationType::MajorIteration | IterationType::MinorIteration => {
                debug!(%iteration, %evaluation, f = location.f, grad_norm, "evaluated");
            }
        }
        Ok(())
    }
}
