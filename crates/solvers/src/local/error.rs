use minima_core::{BoxError, Unsatisfied};
use thiserror::Error;

use super::{SettingsError, Solution};

/// Errors that can occur during local minimization.
#[derive(Debug, Error)]
pub enum Error {
    #[error("initial x is empty")]
    EmptyInitialX,

    #[error("no gradient-free default method is available, supply a method")]
    NoDefaultMethod,

    #[error("function cannot serve the method: {0}")]
    Unsatisfiable(#[from] Unsatisfied),

    #[error("invalid settings: {0}")]
    Settings(#[from] SettingsError),

    #[error("function status check failed")]
    FunctionStatus(#[source] BoxError),

    #[error("recorder initialization failed")]
    RecorderInit(#[source] BoxError),

    /// The run started but ended with an error.
    ///
    /// The solution holds the best location found before stopping.
    #[error("minimization stopped with status {}: {reason}", .solution.status)]
    Stopped {
        #[source]
        reason: StopReason,
        solution: Box<Solution>,
    },
}

/// Why a started run ended with an error.
#[derive(Debug, Error)]
pub enum StopReason {
    #[error("function value is NaN at the starting point")]
    StartNaN,

    #[error("function value is +Inf at the starting point")]
    StartInf,

    #[error("gradient has a NaN component at the starting point")]
    StartGradNaN,

    #[error("gradient has an infinite component at the starting point")]
    StartGradInf,

    #[error("function status probe failed")]
    FunctionStatus(#[source] BoxError),

    #[error("method status probe failed")]
    MethodStatus(#[source] BoxError),

    #[error("method failed")]
    Method(#[source] BoxError),

    #[error("recorder failed")]
    Recorder(#[source] BoxError),
}

impl Error {
    /// Returns the best solution found before the run stopped, if it started.
    #[must_use]
    pub fn solution(&self) -> Option<&Solution> {
        match self {
            Self::Stopped { solution, .. } => Some(solution.as_ref()),
            _ => None,
        }
    }

    /// Consumes the error and returns the best solution, if the run started.
    #[must_use]
    pub fn into_solution(self) -> Option<Solution> {
        match self {
            Self::Stopped { solution, .. } => Some(*solution),
            _ => None,
        }
    }
}
