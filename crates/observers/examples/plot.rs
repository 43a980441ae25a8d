//! Interactive convergence plots for the default BFGS method.
//!
//! Each mode minimizes a classic test function and opens a plot window
//! showing the function value and gradient norm per major iteration, with
//! line search trials as markers.
//!
//! # Usage
//!
//! ```text
//! cargo run --example plot --features plot -- rosenbrock
//! cargo run --example plot --features plot -- quadratic 20
//! RUST_LOG=debug cargo run --example plot --features plot -- rosenbrock
//! ```
//!
//! # Modes
//!
//! - **rosenbrock**: Rosenbrock's banana function from (-1.2, 1). The curved
//!   valley makes progress slow until BFGS has learned the curvature.
//!
//! - **quadratic [n]**: An ill-conditioned diagonal quadratic in `n`
//!   dimensions (default 10), with weights 1 through `n²`.

use std::error::Error;

use minima_core::{FuncGrad, Function};
use minima_observers::{PlotRecorder, ShowConfig};
use minima_solvers::local::{Settings, minimize};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let mode = std::env::args().nth(1).unwrap_or_else(|| "rosenbrock".into());
    match mode.as_str() {
        "rosenbrock" => run(&Rosenbrock, &[-1.2, 1.0], "BFGS on Rosenbrock"),
        "quadratic" => {
            let n = std::env::args()
                .nth(2)
                .as_deref()
                .map(str::parse::<usize>)
                .transpose()
                .unwrap_or_else(|_| {
                    eprintln!("Invalid dimension, expected a positive integer, e.g. 10");
                    std::process::exit(1);
                })
                .unwrap_or(10)
                .max(1);
            run(&Quadratic, &vec![1.0; n], "BFGS on an ill-conditioned quadratic")
        }
        other => {
            eprintln!("Unknown mode: {other}");
            eprintln!("Usage: plot [rosenbrock|quadratic [n]]");
            std::process::exit(1);
        }
    }
}

/// Minimize `function` from `x0` and plot what happened.
fn run(function: &dyn Function, x0: &[f64], title: &str) -> Result<(), Box<dyn Error>> {
    let mut plot = PlotRecorder::new();
    let settings = Settings::default()
        .with_major_iterations(1_000)
        .with_recorder(&mut plot);

    let solution = match minimize(function, x0, Some(settings), None) {
        Ok(solution) => solution,
        Err(err) => {
            let solution = err.into_solution().ok_or("minimization did not start")?;
            info!(status = %solution.status, "minimization stopped early");
            solution
        }
    };
    info!(
        status = %solution.status,
        f = solution.location.f,
        major_iterations = solution.stats.major_iterations,
        evaluations = solution.stats.total_func_evaluations(),
        "done"
    );

    plot.show(ShowConfig::new().title(title).legend().log_y())?;
    Ok(())
}

// --- Rosenbrock --------------------------------------------------------------

/// f(x, y) = (1 − x)² + 100(y − x²)², minimized at (1, 1).
struct Rosenbrock;

impl Function for Rosenbrock {
    fn func(&self, x: &[f64]) -> f64 {
        (1.0 - x[0]).powi(2) + 100.0 * (x[1] - x[0].powi(2)).powi(2)
    }

    fn as_func_grad(&self) -> Option<&dyn FuncGrad> {
        Some(self)
    }
}

impl FuncGrad for Rosenbrock {
    fn func_grad(&self, x: &[f64], grad: &mut [f64]) -> f64 {
        let a = x[1] - x[0].powi(2);
        grad[0] = -2.0 * (1.0 - x[0]) - 400.0 * a * x[0];
        grad[1] = 200.0 * a;
        self.func(x)
    }
}

// --- Quadratic ---------------------------------------------------------------

/// f(x) = Σ (i + 1)² xᵢ², minimized at the origin.
struct Quadratic;

#[allow(clippy::cast_precision_loss)]
fn weight(i: usize) -> f64 {
    ((i + 1) * (i + 1)) as f64
}

impl Function for Quadratic {
    fn func(&self, x: &[f64]) -> f64 {
        x.iter().enumerate().map(|(i, x)| weight(i) * x * x).sum()
    }

    fn as_func_grad(&self) -> Option<&dyn FuncGrad> {
        Some(self)
    }
}

impl FuncGrad for Quadratic {
    fn func_grad(&self, x: &[f64], grad: &mut [f64]) -> f64 {
        for (i, (g, x)) in grad.iter_mut().zip(x).enumerate() {
            *g = 2.0 * weight(i) * x;
        }
        self.func(x)
    }
}
