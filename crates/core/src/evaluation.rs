use std::fmt;

/// The quantities a method asks the driver to evaluate at the next point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EvaluationType {
    /// Nothing is evaluated; the point must not change.
    NoEvaluation,

    /// Function value only.
    FuncOnly,

    /// Gradient only.
    GradOnly,

    /// Hessian only.
    HessOnly,

    /// Function value and gradient.
    FuncAndGrad,

    /// Function value, gradient, and Hessian.
    FuncAndGradAndHess,
}

impl EvaluationType {
    /// Returns `true` if the evaluation produces a function value.
    #[must_use]
    pub fn has_func(self) -> bool {
        matches!(
            self,
            Self::FuncOnly | Self::FuncAndGrad | Self::FuncAndGradAndHess
        )
    }

    /// Returns `true` if the evaluation produces a gradient.
    #[must_use]
    pub fn has_grad(self) -> bool {
        matches!(
            self,
            Self::GradOnly | Self::FuncAndGrad | Self::FuncAndGradAndHess
        )
    }

    /// Returns `true` if the evaluation produces a Hessian.
    #[must_use]
    pub fn has_hess(self) -> bool {
        matches!(self, Self::HessOnly | Self::FuncAndGradAndHess)
    }
}

impl fmt::Display for EvaluationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::NoEvaluation => "NoEvaluation",
            Self::FuncOnly => "FuncOnly",
            Self::GradOnly => "GradOnly",
            Self::HessOnly => "HessOnly",
            Self::FuncAndGrad => "FuncAndGrad",
            Self::FuncAndGradAndHess => "FuncAndGradAndHess",
        };
        f.write_str(name)
    }
}

/// Why an evaluation happened.
///
/// The kind gates which convergence checks apply: gradient and function
/// thresholds are only tested at the starting point and at major iterations,
/// never at intermediate trial points such as line-search steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IterationType {
    /// Evaluation of the starting point.
    InitIteration,

    /// A step that completes one iteration of the method.
    MajorIteration,

    /// An intermediate evaluation within an iteration.
    MinorIteration,

    /// The final report of the best location after the run.
    PostIteration,
}

impl fmt::Display for IterationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::InitIteration => "InitIteration",
            Self::MajorIteration => "MajorIteration",
            Self::MinorIteration => "MinorIteration",
            Self::PostIteration => "PostIteration",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn produced_quantities() {
        use EvaluationType::*;

        let cases = [
            (NoEvaluation, [false, false, false]),
            (FuncOnly, [true, false, false]),
            (GradOnly, [false, true, false]),
            (HessOnly, [false, false, true]),
            (FuncAndGrad, [true, true, false]),
            (FuncAndGradAndHess, [true, true, true]),
        ];

        for (eval, expected) in cases {
            assert_eq!(
                [eval.has_func(), eval.has_grad(), eval.has_hess()],
                expected,
                "{eval}"
            );
        }
    }
}
