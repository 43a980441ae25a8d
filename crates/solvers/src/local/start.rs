use minima_core::{EvaluationType, Location, Needs, Stats};

use super::{
    Settings, StopReason,
    evaluate::{FunctionInfo, evaluate},
};

/// The starting point of a run.
pub(super) struct Start {
    pub(super) location: Location,

    /// How the starting quantities were obtained.
    pub(super) evaluation: EvaluationType,

    /// Set when the starting point cannot be minimized from.
    pub(super) sentinel: Option<StopReason>,
}

/// Builds the starting location, evaluating it unless initial data is given.
///
/// The location tracks a gradient when the method needs a gradient or a
/// Hessian, and a Hessian when it needs one.
pub(super) fn starting_location(
    info: &FunctionInfo<'_>,
    needs: Needs,
    init_x: &[f64],
    stats: &mut Stats,
    settings: &Settings<'_>,
) -> Start {
    let mut location = Location::new(init_x.to_vec());
    if needs.gradient || needs.hessian {
        location = location.with_gradient();
    }
    if needs.hessian {
        location = location.with_hessian();
    }

    let evaluation = if let Some(initial) = &settings.initial {
        location.f = initial.f;
        if let (Some(dst), Some(src)) = (location.gradient.as_mut(), &initial.gradient) {
            dst.copy_from_slice(src);
        }
        if let (Some(dst), Some(src)) = (location.hessian.as_mut(), &initial.hessian) {
            dst.assign(src);
        }
        EvaluationType::NoEvaluation
    } else {
        let evaluation = if needs.hessian {
            EvaluationType::FuncAndGradAndHess
        } else if needs.gradient {
            EvaluationType::FuncAndGrad
        } else {
            EvaluationType::FuncOnly
        };

        // Every tracked quantity is produced, so nothing stale survives.
        evaluate(info, evaluation, init_x, &mut location, stats);
        evaluation
    };

    let sentinel = sentinel(&location);
    Start {
        location,
        evaluation,
        sentinel,
    }
}

/// Checks that minimization can proceed from `location`.
fn sentinel(location: &Location) -> Option<StopReason> {
    if location.f.is_nan() {
        return Some(StopReason::StartNaN);
    }
    if location.f == f64::INFINITY {
        return Some(StopReason::StartInf);
    }
    location
        .gradient
        .iter()
        .flatten()
        .find_map(|&g| {
            if g.is_infinite() {
                Some(StopReason::StartGradInf)
            } else if g.is_nan() {
                Some(StopReason::StartGradNaN)
            } else {
                None
            }
        })
}
