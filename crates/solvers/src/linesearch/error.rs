use thiserror::Error;

/// Errors that can occur during a line search.
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum LinesearchError {
    #[error("line search needs a gradient at the major iterate")]
    MissingGradient,

    #[error("search direction is not a descent direction (directional derivative {projected})")]
    NotDescent { projected: f64 },

    #[error("step length {step} fell below the minimum without sufficient decrease")]
    StepTooSmall { step: f64 },
}
