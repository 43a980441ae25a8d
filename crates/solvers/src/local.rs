//! Sequential local minimization.
//!
//! [`minimize`] drives any [`Method`] against any [`Function`]. The driver
//! owns the evaluation state: it evaluates the quantities the method asks
//! for, keeps the best location seen so far, tracks [`Stats`], and stops on
//! the first terminal [`Status`].
//!
//! # Loop
//!
//! 1. Evaluate the starting point (or take it from [`InitialData`]) and
//!    check convergence.
//! 2. Ask the method for the next point and the quantities to evaluate.
//! 3. Evaluate, update the best location, and check convergence again.
//! 4. Report the location to the [`Recorder`], if any, and repeat.
//!
//! Convergence checks always see the best location, and they run before the
//! location is recorded.
//!
//! # Capabilities
//!
//! A [`Function`] only has to provide a value. Gradient and Hessian support
//! is detected once per run, and each request is served by the most direct
//! call available, falling back to combined or decomposed calls. For
//! example, [`EvaluationType::FuncAndGrad`] against an objective with only
//! bare function and gradient support costs one call of each.
//!
//! [`Stats`]: minima_core::Stats
//! [`Recorder`]: minima_core::Recorder

mod convergence;
mod driver;
mod error;
mod evaluate;
mod settings;
mod solution;
mod start;

#[cfg(test)]
mod test_utils;

pub use convergence::check_convergence;
pub use error::{Error, StopReason};
pub use settings::{DEFAULT_GRADIENT_ABS_TOL, InitialData, Settings, SettingsError};
pub use solution::Solution;

use std::time::Instant;

use minima_core::{Capabilities, EvaluationType, Function, IterationType, Method, Stats, Status};
use tracing::{debug, info, warn};

use crate::linesearch::{Backtracking, Bfgs, Linesearch};

use evaluate::FunctionInfo;
use start::{Start, starting_location};

/// Finds a local minimum of `function` starting from `init_x`.
///
/// When `settings` is `None`, [`Settings::default`] is used. When `method` is
/// `None`, a BFGS line-search method is chosen if the function provides
/// gradients; there is no gradient-free default.
///
/// # Errors
///
/// Configuration problems ([`Error::EmptyInitialX`], [`Error::NoDefaultMethod`],
/// [`Error::Unsatisfiable`], [`Error::Settings`], [`Error::FunctionStatus`],
/// [`Error::RecorderInit`]) are reported before any evaluation.
///
/// [`Error::Stopped`] is returned when the starting point is not usable or a
/// collaborator fails during the run. It carries the best solution found.
///
/// # Panics
///
/// Panics if the method requests an evaluation the function cannot serve, or
/// requests [`EvaluationType::NoEvaluation`] at a new point.
pub fn minimize(
    function: &dyn Function,
    init_x: &[f64],
    settings: Option<Settings<'_>>,
    method: Option<&mut dyn Method>,
) -> Result<Solution, Error> {
    if init_x.is_empty() {
        return Err(Error::EmptyInitialX);
    }

    let start_time = Instant::now();
    let info = FunctionInfo::new(function);

    let mut fallback;
    let method: &mut dyn Method = match method {
        Some(method) => method,
        None => {
            fallback = default_method(info.capabilities())?;
            &mut fallback
        }
    };

    let needs = method.needs();
    info.capabilities().satisfies(needs)?;

    if let Some(statuser) = info.statuser() {
        statuser.status().map_err(Error::FunctionStatus)?;
    }

    let mut settings = settings.unwrap_or_default();
    settings.validate(init_x.len(), needs)?;

    // Initialize the recorder before the first, possibly expensive, evaluation.
    let mut recorder = settings.recorder.take();
    if let Some(recorder) = recorder.as_mut() {
        recorder
            .init(info.capabilities())
            .map_err(Error::RecorderInit)?;
    }

    let mut stats = Stats::default();
    let Start {
        mut location,
        evaluation,
        sentinel,
    } = starting_location(&info, needs, init_x, &mut stats, &settings);
    stats.runtime = start_time.elapsed();

    if let Some(reason) = sentinel {
        warn!(%reason, f = location.f, "unusable starting point");
        return Err(Error::Stopped {
            reason,
            solution: Box::new(Solution {
                location,
                stats,
                status: Status::Failure,
            }),
        });
    }

    let mut status = check_convergence(&location, IterationType::InitIteration, &stats, &settings);
    debug!(f = location.f, %status, "evaluated starting point");

    let mut error = None;
    if let Some(recorder) = recorder.as_mut() {
        if let Err(err) = recorder.record(&location, evaluation, IterationType::InitIteration, &stats)
        {
            if status == Status::NotTerminated {
                status = Status::Failure;
            }
            error = Some(StopReason::Recorder(err));
        }
    }

    if status == Status::NotTerminated && error.is_none() {
        let termination = driver::run(
            &info,
            method,
            &settings,
            &mut recorder,
            &mut stats,
            &mut location,
            start_time,
        );
        status = termination.status;
        error = termination.error;
    }

    if error.is_none() {
        if let Some(recorder) = recorder.as_mut() {
            if let Err(err) = recorder.record(
                &location,
                EvaluationType::NoEvaluation,
                IterationType::PostIteration,
                &stats,
            ) {
                if status == Status::NotTerminated {
                    status = Status::Failure;
                }
                error = Some(StopReason::Recorder(err));
            }
        }
    }

    stats.runtime = start_time.elapsed();

    let solution = Solution {
        location,
        stats,
        status,
    };

    match error {
        None => {
            info!(
                %status,
                f = solution.location.f,
                major_iterations = stats.major_iterations,
                "minimization finished"
            );
            Ok(solution)
        }
        Some(reason) => {
            warn!(%status, %reason, "minimization stopped");
            Err(Error::Stopped {
                reason,
                solution: Box::new(solution),
            })
        }
    }
}

/// Finds a local minimum with default settings and the default method.
///
/// This is a convenience wrapper around [`minimize`].
///
/// # Errors
///
/// See [`minimize`].
pub fn minimize_default(function: &dyn Function, init_x: &[f64]) -> Result<Solution, Error> {
    minimize(function, init_x, None, None)
}

/// Picks the method used when the caller does not supply one.
fn default_method(capabilities: &Capabilities) -> Result<Linesearch<Bfgs, Backtracking>, Error> {
    if capabilities.provides_gradient() {
        Ok(Linesearch::new(Bfgs::default(), Backtracking::default()))
    } else {
        Err(Error::NoDefaultMethod)
    }
}
