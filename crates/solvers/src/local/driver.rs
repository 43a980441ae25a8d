use std::time::Instant;

use minima_core::{BoxError, IterationType, Location, Method, Recorder, Stats, Status, Statuser};
use tracing::{debug, trace};

use super::{
    Settings, StopReason, check_convergence,
    evaluate::{FunctionInfo, evaluate},
};

/// How the iteration loop ended.
#[derive(Debug)]
pub(super) struct Termination {
    pub(super) status: Status,

    /// Set when a collaborator failed.
    pub(super) error: Option<StopReason>,
}

impl Termination {
    fn converged(status: Status) -> Self {
        Self {
            status,
            error: None,
        }
    }

    /// A failure that forces [`Status::Failure`] unless the run had already
    /// terminated for another reason.
    fn failed(status: Status, reason: StopReason) -> Self {
        let status = if status == Status::NotTerminated {
            Status::Failure
        } else {
            status
        };
        Self {
            status,
            error: Some(reason),
        }
    }
}

/// Runs the method from the already evaluated and recorded `best` location
/// until a terminal status is reached.
///
/// `best` always holds the location with the lowest function value seen.
pub(super) fn run(
    info: &FunctionInfo<'_>,
    method: &mut dyn Method,
    settings: &Settings<'_>,
    recorder: &mut Option<Box<dyn Recorder + '_>>,
    stats: &mut Stats,
    best: &mut Location,
    start: Instant,
) -> Termination {
    let mut working = best.clone();
    let mut x_next = best.x.clone();

    let mut step = match method.init(best, info.capabilities(), &mut x_next) {
        Ok(step) => step,
        Err(err) => {
            return Termination::failed(Status::NotTerminated, StopReason::Method(err));
        }
    };

    loop {
        if let Some(statuser) = info.statuser() {
            if let Some(termination) = probe(statuser, StopReason::FunctionStatus) {
                return termination;
            }
        }

        evaluate(info, step.evaluation, &x_next, &mut working, stats);

        if step.iteration == IterationType::MajorIteration {
            stats.major_iterations += 1;
        }
        if working.f <= best.f {
            best.copy_from(&working);
        }
        stats.runtime = start.elapsed();

        let status = check_convergence(best, step.iteration, stats, settings);
        trace!(
            evaluation = %step.evaluation,
            iteration = %step.iteration,
            f = working.f,
            best = best.f,
            "evaluated"
        );
        if step.iteration == IterationType::MajorIteration {
            debug!(
                iteration = stats.major_iterations,
                f = best.f,
                evaluations = stats.total_func_evaluations(),
                "major iteration"
            );
        }

        if let Some(recorder) = recorder.as_mut() {
            if let Err(err) = recorder.record(&working, step.evaluation, step.iteration, stats) {
                return Termination::failed(status, StopReason::Recorder(err));
            }
        }

        if status.is_terminal() {
            return Termination::converged(status);
        }

        if let Some(statuser) = method.as_statuser() {
            if let Some(termination) = probe(statuser, StopReason::MethodStatus) {
                return termination;
            }
        }

        step = match method.iterate(&working, &mut x_next) {
            Ok(step) => step,
            Err(err) => {
                return Termination::failed(Status::NotTerminated, StopReason::Method(err));
            }
        };
    }
}

/// Asks a status probe whether the run must stop.
fn probe(statuser: &dyn Statuser, reason: fn(BoxError) -> StopReason) -> Option<Termination> {
    match statuser.status() {
        Ok(Status::NotTerminated) => None,
        Ok(status) => Some(Termination::converged(status)),
        Err(err) => Some(Termination::failed(Status::NotTerminated, reason(err))),
    }
}
