use std::fmt;

use crate::BoxError;

/// Termination status of a minimization run.
///
/// Every variant except [`Status::NotTerminated`] ends the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    /// The run has not terminated.
    NotTerminated,

    /// The infinity norm of the gradient fell below the tolerance.
    GradientThreshold,

    /// The function value fell below the tolerance.
    FunctionThreshold,

    /// The function value reached negative infinity.
    FunctionNegativeInfinity,

    /// The function evaluation limit was reached.
    FunctionEvaluationLimit,

    /// The gradient evaluation limit was reached.
    GradientEvaluationLimit,

    /// The Hessian evaluation limit was reached.
    HessianEvaluationLimit,

    /// The runtime limit was reached.
    RuntimeLimit,

    /// The major iteration limit was reached.
    IterationLimit,

    /// A collaborator failed.
    Failure,
}

impl Status {
    /// Returns `true` if the status ends the run.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        self != Self::NotTerminated
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::NotTerminated => "not terminated",
            Self::GradientThreshold => "gradient threshold reached",
            Self::FunctionThreshold => "function threshold reached",
            Self::FunctionNegativeInfinity => "function value is negative infinity",
            Self::FunctionEvaluationLimit => "function evaluation limit reached",
            Self::GradientEvaluationLimit => "gradient evaluation limit reached",
            Self::HessianEvaluationLimit => "Hessian evaluation limit reached",
            Self::RuntimeLimit => "runtime limit reached",
            Self::IterationLimit => "iteration limit reached",
            Self::Failure => "failure",
        };
        f.write_str(text)
    }
}

/// A liveness probe that can request early termination.
///
/// Both functions and methods may expose one. The driver queries it once per
/// iteration; returning a terminal [`Status`] or an error ends the run.
pub trait Statuser {
    /// Returns the current status.
    ///
    /// # Errors
    ///
    /// Returns an error if the collaborator cannot continue.
    fn status(&self) -> Result<Status, BoxError>;
}
