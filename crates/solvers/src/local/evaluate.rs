use minima_core::{
    Capabilities, EvaluationType, FuncGrad, FuncGradHess, Function, Gradient, Hessian, Location,
    Stats, Statuser,
};
use ndarray::Array2;
use tracing::trace;

/// A single call into the objective.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Call {
    Func,
    Grad,
    FuncGrad,
    Hess,
    FuncGradHess,
}

impl Call {
    fn is_supported(self, caps: &Capabilities) -> bool {
        match self {
            Self::Func => caps.func,
            Self::Grad => caps.gradient,
            Self::FuncGrad => caps.func_grad,
            Self::Hess => caps.hessian,
            Self::FuncGradHess => caps.func_grad_hess,
        }
    }

    /// Which of (function, gradient, Hessian) the call writes.
    fn produces(self) -> [bool; 3] {
        match self {
            Self::Func => [true, false, false],
            Self::Grad => [false, true, false],
            Self::FuncGrad => [true, true, false],
            Self::Hess => [false, false, true],
            Self::FuncGradHess => [true, true, true],
        }
    }
}

/// Candidate call plans for each evaluation request, in priority order.
///
/// The first plan whose calls are all supported serves the request.
const PLANS: &[(EvaluationType, &[Call])] = &[
    (EvaluationType::NoEvaluation, &[]),
    (EvaluationType::FuncOnly, &[Call::Func]),
    (EvaluationType::GradOnly, &[Call::Grad]),
    (EvaluationType::GradOnly, &[Call::FuncGrad]),
    (EvaluationType::GradOnly, &[Call::FuncGradHess]),
    (EvaluationType::HessOnly, &[Call::Hess]),
    (EvaluationType::HessOnly, &[Call::FuncGradHess]),
    (EvaluationType::FuncAndGrad, &[Call::FuncGrad]),
    (EvaluationType::FuncAndGrad, &[Call::FuncGradHess]),
    (EvaluationType::FuncAndGrad, &[Call::Func, Call::Grad]),
    (EvaluationType::FuncAndGradAndHess, &[Call::FuncGradHess]),
    (EvaluationType::FuncAndGradAndHess, &[Call::Func, Call::Grad, Call::Hess]),
];

/// Selects the calls that serve `evaluation` given `caps`.
///
/// Returns `None` if no plan is fully supported.
pub(super) fn plan(evaluation: EvaluationType, caps: &Capabilities) -> Option<&'static [Call]> {
    PLANS
        .iter()
        .filter(|(eval, _)| *eval == evaluation)
        .map(|(_, calls)| *calls)
        .find(|calls| calls.iter().all(|call| call.is_supported(caps)))
}

/// An objective together with its detected capabilities.
pub(super) struct FunctionInfo<'a> {
    function: &'a dyn Function,
    caps: Capabilities,
}

impl<'a> FunctionInfo<'a> {
    pub(super) fn new(function: &'a dyn Function) -> Self {
        Self {
            function,
            caps: Capabilities::detect(function),
        }
    }

    pub(super) fn capabilities(&self) -> &Capabilities {
        &self.caps
    }

    pub(super) fn statuser(&self) -> Option<&'a dyn Statuser> {
        self.function.as_statuser()
    }

    /// Runs one call, writing its results into `location`.
    ///
    /// Returns `false` if the objective does not provide the call.
    fn run(&self, call: Call, location: &mut Location, stats: &mut Stats) -> bool {
        let Location {
            x,
            f,
            gradient,
            hessian,
        } = location;
        let dim = x.len();

        match call {
            Call::Func => {
                *f = self.function.func(x);
                stats.func_evaluations += 1;
            }
            Call::Grad => {
                let Some(g) = self.function.as_gradient() else {
                    return false;
                };
                g.grad(x, gradient_buffer(gradient, dim));
                stats.grad_evaluations += 1;
            }
            Call::FuncGrad => {
                let Some(fg) = self.function.as_func_grad() else {
                    return false;
                };
                *f = fg.func_grad(x, gradient_buffer(gradient, dim));
                stats.func_grad_evaluations += 1;
            }
            Call::Hess => {
                let Some(h) = self.function.as_hessian() else {
                    return false;
                };
                h.hess(x, hessian_buffer(hessian, dim));
                stats.hess_evaluations += 1;
            }
            Call::FuncGradHess => {
                let Some(fgh) = self.function.as_func_grad_hess() else {
                    return false;
                };
                *f = fgh.func_grad_hess(
                    x,
                    gradient_buffer(gradient, dim),
                    hessian_buffer(hessian, dim),
                );
                stats.func_grad_hess_evaluations += 1;
            }
        }
        true
    }
}

fn gradient_buffer(gradient: &mut Option<Vec<f64>>, dim: usize) -> &mut [f64] {
    gradient.get_or_insert_with(|| vec![0.0; dim])
}

fn hessian_buffer(hessian: &mut Option<Array2<f64>>, dim: usize) -> &mut Array2<f64> {
    hessian.get_or_insert_with(|| Array2::zeros((dim, dim)))
}

/// Evaluates the function at `x_next` and stores the results in `location`.
///
/// If `x_next` differs from `location.x`, the point is copied in and every
/// quantity the request does not produce is marked invalid. Each call made
/// increments its own counter in `stats`.
///
/// # Panics
///
/// Panics, before touching `location` or `stats`, if `evaluation` is
/// [`EvaluationType::NoEvaluation`] at a new point or if no supported call
/// plan serves `evaluation`.
pub(super) fn evaluate(
    info: &FunctionInfo<'_>,
    evaluation: EvaluationType,
    x_next: &[f64],
    location: &mut Location,
    stats: &mut Stats,
) {
    let moved = location.x.as_slice() != x_next;

    if evaluation == EvaluationType::NoEvaluation {
        assert!(!moved, "no evaluation requested at a new location");
        return;
    }

    let Some(calls) = plan(evaluation, info.capabilities()) else {
        panic!("function does not support {evaluation} evaluation");
    };
    trace!(%evaluation, ?calls, moved, "evaluating");

    if moved {
        location.x.copy_from_slice(x_next);
        let [f, g, h] = calls.iter().fold([false; 3], |acc, call| {
            let p = call.produces();
            [acc[0] || p[0], acc[1] || p[1], acc[2] || p[2]]
        });
        location.invalidate(!f, !g, !h);
    }

    for &call in calls {
        let ran = info.run(call, location, stats);
        debug_assert!(ran, "planned call {call:?} is unsupported");
    }
}
