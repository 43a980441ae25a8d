use minima_core::{IterationType, Location, Stats, Status};

use super::Settings;

/// Maps the best location so far and the run counters to a [`Status`].
///
/// Checks, in order, returning the first that applies:
///
/// 1. At [`IterationType::InitIteration`] and [`IterationType::MajorIteration`]
///    only: gradient infinity norm below `gradient_abs_tol`, then function
///    value below `function_abs_tol`.
/// 2. Function value of negative infinity, at every iteration kind.
/// 3. Function, gradient, and Hessian evaluation limits, counting combined
///    calls toward each quantity they produce.
/// 4. Runtime limit.
/// 5. At [`IterationType::MajorIteration`] only: major iteration limit.
///
/// A gradient holding `NaN` never meets the gradient tolerance.
#[must_use]
pub fn check_convergence(
    location: &Location,
    iteration: IterationType,
    stats: &Stats,
    settings: &Settings<'_>,
) -> Status {
    if matches!(
        iteration,
        IterationType::InitIteration | IterationType::MajorIteration
    ) {
        if let Some(gradient) = &location.gradient {
            if inf_norm(gradient) < settings.gradient_abs_tol {
                return Status::GradientThreshold;
            }
        }
        if location.f < settings.function_abs_tol {
            return Status::FunctionThreshold;
        }
    }

    // Checked at every step: -Inf is the best possible value, and it can
    // derail a line search.
    if location.f == f64::NEG_INFINITY {
        return Status::FunctionNegativeInfinity;
    }

    if reached(stats.total_func_evaluations(), settings.func_evaluations) {
        return Status::FunctionEvaluationLimit;
    }
    if reached(stats.total_grad_evaluations(), settings.grad_evaluations) {
        return Status::GradientEvaluationLimit;
    }
    if reached(stats.total_hess_evaluations(), settings.hess_evaluations) {
        return Status::HessianEvaluationLimit;
    }

    if settings.runtime.is_some_and(|limit| stats.runtime >= limit) {
        return Status::RuntimeLimit;
    }

    if iteration == IterationType::MajorIteration
        && reached(stats.major_iterations, settings.major_iterations)
    {
        return Status::IterationLimit;
    }

    Status::NotTerminated
}

fn reached(count: usize, limit: Option<usize>) -> bool {
    limit.is_some_and(|limit| limit > 0 && count >= limit)
}

/// Infinity norm that propagates `NaN`.
fn inf_norm(v: &[f64]) -> f64 {
    v.iter()
        .try_fold(0.0_f64, |max, x| (!x.is_nan()).then(|| max.max(x.abs())))
        .unwrap_or(f64::NAN)
}
