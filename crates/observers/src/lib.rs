//! Reusable recorders for the minima framework.
//!
//! This crate provides [`Recorder`] implementations that work with any
//! method driven by `minima_solvers::local::minimize`.
//!
//! - [`Printer`] reports progress through `tracing`
//! - [`History`] keeps every record in memory for later inspection
//!
//! Pass a recorder by `&mut` to keep access to it after the run:
//!
//! ```rust
//! use minima_core::{FuncGrad, Function};
//! use minima_observers::History;
//! use minima_solvers::local::{Settings, minimize};
//!
//! struct Bowl;
//!
//! impl Function for Bowl {
//!     fn func(&self, x: &[f64]) -> f64 {
//!         x.iter().map(|x| x * x).sum()
//!     }
//!
//!     fn as_func_grad(&self) -> Option<&dyn FuncGrad> {
//!         Some(self)
//!     }
//! }
//!
//! impl FuncGrad for Bowl {
//!     fn func_grad(&self, x: &[f64], grad: &mut [f64]) -> f64 {
//!         for (g, x) in grad.iter_mut().zip(x) {
//!             *g = 2.0 * x;
//!         }
//!         self.func(x)
//!     }
//! }
//!
//! let mut history = History::new();
//! let settings = Settings::default().with_recorder(&mut history);
//! let solution = minimize(&Bowl, &[1.0, -2.0], Some(settings), None).unwrap();
//!
//! assert_eq!(history.majors().count(), solution.stats.major_iterations);
//! ```
//!
//! # Features
//!
//! - `plot`: enables [`PlotRecorder`] for visualizing convergence via egui.
//!   This feature adds dependencies on `eframe` and `egui_plot`.
//!
//! [`Recorder`]: minima_core::Recorder

mod history;
mod printer;

#[cfg(feature = "plot")]
mod plot;

pub use history::{History, Record};
pub use printer::Printer;

#[cfg(feature = "plot")]
pub use plot::{PlotRecorder, ShowConfig};

use minima_core::Location;

/// Infinity norm of the gradient, if one is tracked and valid.
pub(crate) fn gradient_norm(location: &Location) -> Option<f64> {
    let gradient = location.gradient.as_ref()?;
    gradient.iter().try_fold(0.0_f64, |max, g| {
        if g.is_nan() {
            None
        } else {
            Some(max.max(g.abs()))
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    #[test]
    fn gradient_norm_needs_a_valid_gradient() {
        let mut location = Location::new(vec![0.0, 0.0]);
        assert_eq!(gradient_norm(&location), None);

        location.gradient = Some(vec![0.5, -2.0]);
        let norm = gradient_norm(&location).expect("gradient is valid");
        assert_relative_eq!(norm, 2.0);

        location.gradient = Some(vec![0.5, f64::NAN]);
        assert_eq!(gradient_norm(&location), None);
    }
}
