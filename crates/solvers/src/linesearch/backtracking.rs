use minima_core::EvaluationType;
use thiserror::Error;

use super::{LinesearchError, Linesearcher};

/// Smallest step length a backtracking search tries before giving up.
pub const MIN_STEP: f64 = 1e-20;

/// Backtracking line search on the Armijo sufficient decrease condition.
///
/// A trial step `α` is accepted when
///
/// ```text
/// f(x₀ + α·d) <= f(x₀) + fun_const · α · ∇f(x₀)ᵀd
/// ```
///
/// and otherwise shrunk to `decrease · α`. Only function values are
/// evaluated at trial points, which suits objectives with costly gradients.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Backtracking {
    decrease: f64,
    fun_const: f64,

    step: f64,
    init_f: f64,
    init_derivative: f64,
}

/// Errors that can occur when validating a backtracking configuration.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    #[error("decrease must lie strictly between 0 and 1")]
    Decrease,

    #[error("fun_const must lie strictly between 0 and 1")]
    FunConst,
}

impl Default for Backtracking {
    fn default() -> Self {
        Self {
            decrease: 0.5,
            fun_const: 1e-4,
            step: 0.0,
            init_f: f64::NAN,
            init_derivative: f64::NAN,
        }
    }
}

impl Backtracking {
    /// Creates a backtracking search with validated parameters.
    ///
    /// # Errors
    ///
    /// Returns an error if `decrease` or `fun_const` is not in `(0, 1)`.
    pub fn new(decrease: f64, fun_const: f64) -> Result<Self, ConfigError> {
        if !(decrease > 0.0 && decrease < 1.0) {
            return Err(ConfigError::Decrease);
        }
        if !(fun_const > 0.0 && fun_const < 1.0) {
            return Err(ConfigError::FunConst);
        }

        Ok(Self {
            decrease,
            fun_const,
            ..Self::default()
        })
    }

    /// Returns the step length multiplier.
    #[must_use]
    pub fn decrease(&self) -> f64 {
        self.decrease
    }

    /// Returns the sufficient decrease constant.
    #[must_use]
    pub fn fun_const(&self) -> f64 {
        self.fun_const
    }

    /// Returns the current trial step length.
    #[must_use]
    pub fn step(&self) -> f64 {
        self.step
    }
}

impl Linesearcher for Backtracking {
    fn init(&mut self, f: f64, derivative: f64, step: f64) -> EvaluationType {
        debug_assert!(step > 0.0, "initial step must be positive, got {step}");

        self.step = step;
        self.init_f = f;
        self.init_derivative = derivative;
        EvaluationType::FuncOnly
    }

    fn finished(&self, f: f64, _derivative: f64) -> bool {
        f <= self.init_f + self.fun_const * self.step * self.init_derivative
    }

    fn iterate(
        &mut self,
        _f: f64,
        _derivative: f64,
    ) -> Result<(f64, EvaluationType), LinesearchError> {
        self.step *= self.decrease;
        if self.step < MIN_STEP {
            return Err(LinesearchError::StepTooSmall { step: self.step });
        }
        Ok((self.step, EvaluationType::FuncOnly))
    }
}
