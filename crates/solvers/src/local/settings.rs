use std::{fmt, time::Duration};

use minima_core::{Needs, Recorder};
use ndarray::Array2;
use thiserror::Error;

/// Default absolute tolerance on the infinity norm of the gradient.
pub const DEFAULT_GRADIENT_ABS_TOL: f64 = 1e-6;

/// Settings for a minimization run.
///
/// Limits are disabled when `None`. Construct with [`Settings::default`] and
/// chain the `with_*` methods as needed:
///
/// ```rust
/// use std::time::Duration;
///
/// use minima_solvers::local::Settings;
///
/// let settings = Settings::default()
///     .with_gradient_abs_tol(1e-8)
///     .with_major_iterations(200)
///     .with_runtime(Duration::from_secs(5));
///
/// assert_eq!(settings.major_iterations, Some(200));
/// ```
pub struct Settings<'a> {
    /// Stop when the infinity norm of the gradient is below this value.
    pub gradient_abs_tol: f64,

    /// Stop when the function value is below this value.
    pub function_abs_tol: f64,

    /// Limit on calls that produce a function value.
    pub func_evaluations: Option<usize>,

    /// Limit on calls that produce a gradient.
    pub grad_evaluations: Option<usize>,

    /// Limit on calls that produce a Hessian.
    pub hess_evaluations: Option<usize>,

    /// Limit on major iterations.
    pub major_iterations: Option<usize>,

    /// Limit on wall-clock time.
    pub runtime: Option<Duration>,

    /// Known quantities at the starting point, used instead of evaluating it.
    pub initial: Option<InitialData>,

    /// Sink that receives every evaluated location.
    pub recorder: Option<Box<dyn Recorder + 'a>>,
}

/// Quantities at the starting point supplied by the caller.
#[derive(Debug, Clone, PartialEq)]
pub struct InitialData {
    /// Function value at the starting point.
    pub f: f64,

    /// Gradient at the starting point. Required when the method needs one.
    pub gradient: Option<Vec<f64>>,

    /// Hessian at the starting point. Required when the method needs one.
    pub hessian: Option<Array2<f64>>,
}

impl InitialData {
    /// Creates initial data with only a function value.
    #[must_use]
    pub fn new(f: f64) -> Self {
        Self {
            f,
            gradient: None,
            hessian: None,
        }
    }

    /// Sets the gradient at the starting point.
    #[must_use]
    pub fn with_gradient(mut self, gradient: Vec<f64>) -> Self {
        self.gradient = Some(gradient);
        self
    }

    /// Sets the Hessian at the starting point.
    #[must_use]
    pub fn with_hessian(mut self, hessian: Array2<f64>) -> Self {
        self.hessian = Some(hessian);
        self
    }
}

/// Errors that can occur when validating settings.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SettingsError {
    #[error("gradient_abs_tol must not be NaN")]
    GradientAbsTol,

    #[error("function_abs_tol must not be NaN")]
    FunctionAbsTol,

    #[error("{0} limit must be positive")]
    ZeroLimit(&'static str),

    #[error("initial gradient is required by the method")]
    MissingInitialGradient,

    #[error("initial gradient has length {found}, expected {expected}")]
    InitialGradientLength { expected: usize, found: usize },

    #[error("initial Hessian is required by the method")]
    MissingInitialHessian,

    #[error("initial Hessian has shape {found:?}, expected {expected:?}")]
    InitialHessianShape {
        expected: (usize, usize),
        found: (usize, usize),
    },
}

impl Default for Settings<'_> {
    fn default() -> Self {
        Self {
            gradient_abs_tol: DEFAULT_GRADIENT_ABS_TOL,
            function_abs_tol: f64::NEG_INFINITY,
            func_evaluations: None,
            grad_evaluations: None,
            hess_evaluations: None,
            major_iterations: None,
            runtime: None,
            initial: None,
            recorder: None,
        }
    }
}

impl<'a> Settings<'a> {
    /// Sets the gradient infinity-norm tolerance.
    #[must_use]
    pub fn with_gradient_abs_tol(mut self, tol: f64) -> Self {
        self.gradient_abs_tol = tol;
        self
    }

    /// Sets the function value tolerance.
    #[must_use]
    pub fn with_function_abs_tol(mut self, tol: f64) -> Self {
        self.function_abs_tol = tol;
        self
    }

    /// Limits the number of calls that produce a function value.
    #[must_use]
    pub fn with_func_evaluations(mut self, limit: usize) -> Self {
        self.func_evaluations = Some(limit);
        self
    }

    /// Limits the number of calls that produce a gradient.
    #[must_use]
    pub fn with_grad_evaluations(mut self, limit: usize) -> Self {
        self.grad_evaluations = Some(limit);
        self
    }

    /// Limits the number of calls that produce a Hessian.
    #[must_use]
    pub fn with_hess_evaluations(mut self, limit: usize) -> Self {
        self.hess_evaluations = Some(limit);
        self
    }

    /// Limits the number of major iterations.
    #[must_use]
    pub fn with_major_iterations(mut self, limit: usize) -> Self {
        self.major_iterations = Some(limit);
        self
    }

    /// Limits the wall-clock time of the run.
    #[must_use]
    pub fn with_runtime(mut self, limit: Duration) -> Self {
        self.runtime = Some(limit);
        self
    }

    /// Supplies the quantities at the starting point.
    #[must_use]
    pub fn with_initial(mut self, initial: InitialData) -> Self {
        self.initial = Some(initial);
        self
    }

    /// Sets the recorder.
    ///
    /// Pass `&mut recorder` to keep access to it after the run.
    #[must_use]
    pub fn with_recorder(mut self, recorder: impl Recorder + 'a) -> Self {
        self.recorder = Some(Box::new(recorder));
        self
    }

    /// Checks the settings against a problem of dimension `dim` solved by a
    /// method with `needs`.
    ///
    /// # Errors
    ///
    /// Returns an error if a tolerance is NaN, a limit is zero, or the
    /// initial data does not match the problem.
    pub fn validate(&self, dim: usize, needs: Needs) -> Result<(), SettingsError> {
        if self.gradient_abs_tol.is_nan() {
            return Err(SettingsError::GradientAbsTol);
        }
        if self.function_abs_tol.is_nan() {
            return Err(SettingsError::FunctionAbsTol);
        }

        let limits = [
            ("function evaluation", self.func_evaluations),
            ("gradient evaluation", self.grad_evaluations),
            ("Hessian evaluation", self.hess_evaluations),
            ("major iteration", self.major_iterations),
        ];
        for (name, limit) in limits {
            if limit == Some(0) {
                return Err(SettingsError::ZeroLimit(name));
            }
        }
        if self.runtime == Some(Duration::ZERO) {
            return Err(SettingsError::ZeroLimit("runtime"));
        }

        let Some(initial) = &self.initial else {
            return Ok(());
        };

        // The starting point of a Hessian-based method also carries a gradient.
        if needs.gradient || needs.hessian {
            let gradient = initial
                .gradient
                .as_ref()
                .ok_or(SettingsError::MissingInitialGradient)?;
            if gradient.len() != dim {
                return Err(SettingsError::InitialGradientLength {
                    expected: dim,
                    found: gradient.len(),
                });
            }
        }

        if needs.hessian {
            let hessian = initial
                .hessian
                .as_ref()
                .ok_or(SettingsError::MissingInitialHessian)?;
            if hessian.dim() != (dim, dim) {
                return Err(SettingsError::InitialHessianShape {
                    expected: (dim, dim),
                    found: hessian.dim(),
                });
            }
        }

        Ok(())
    }
}

impl fmt::Debug for Settings<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("gradient_abs_tol", &self.gradient_abs_tol)
            .field("function_abs_tol", &self.function_abs_tol)
            .field("func_evaluations", &self.func_evaluations)
            .field("grad_evaluations", &self.grad_evaluations)
            .field("hess_evaluations", &self.hess_evaluations)
            .field("major_iterations", &self.major_iterations)
            .field("runtime", &self.runtime)
            .field("initial", &self.initial)
            .field("recorder", &self.recorder.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GRADIENT: Needs = Needs {
        gradient: true,
        hessian: false,
    };

    #[test]
    fn defaults_disable_everything_but_gradient_tolerance() {
        let settings = Settings::default();
        assert_eq!(settings.gradient_abs_tol, DEFAULT_GRADIENT_ABS_TOL);
        assert_eq!(settings.function_abs_tol, f64::NEG_INFINITY);
        assert!(settings.func_evaluations.is_none());
        assert!(settings.major_iterations.is_none());
        assert!(settings.runtime.is_none());
        assert!(settings.recorder.is_none());
        assert_eq!(settings.validate(2, GRADIENT), Ok(()));
    }

    #[test]
    fn rejects_nan_tolerances() {
        let settings = Settings::default().with_gradient_abs_tol(f64::NAN);
        assert_eq!(
            settings.validate(1, Needs::default()),
            Err(SettingsError::GradientAbsTol)
        );

        let settings = Settings::default().with_function_abs_tol(f64::NAN);
        assert_eq!(
            settings.validate(1, Needs::default()),
            Err(SettingsError::FunctionAbsTol)
        );
    }

    #[test]
    fn rejects_zero_limits() {
        let settings = Settings::default().with_hess_evaluations(0);
        assert_eq!(
            settings.validate(1, Needs::default()),
            Err(SettingsError::ZeroLimit("Hessian evaluation"))
        );

        let settings = Settings::default().with_runtime(Duration::ZERO);
        assert_eq!(
            settings.validate(1, Needs::default()),
            Err(SettingsError::ZeroLimit("runtime"))
        );
    }

    #[test]
    fn initial_gradient_must_match_dimension() {
        let settings = Settings::default().with_initial(InitialData::new(1.0));
        assert_eq!(
            settings.validate(2, GRADIENT),
            Err(SettingsError::MissingInitialGradient)
        );

        let settings =
            Settings::default().with_initial(InitialData::new(1.0).with_gradient(vec![0.0; 3]));
        assert_eq!(
            settings.validate(2, GRADIENT),
            Err(SettingsError::InitialGradientLength {
                expected: 2,
                found: 3
            })
        );
    }

    #[test]
    fn initial_gradient_is_ignored_without_gradient_needs() {
        let settings =
            Settings::default().with_initial(InitialData::new(1.0).with_gradient(vec![0.0; 3]));
        assert_eq!(settings.validate(2, Needs::default()), Ok(()));
    }

    #[test]
    fn initial_hessian_must_be_square_of_dimension() {
        let needs = Needs {
            gradient: true,
            hessian: true,
        };
        let settings = Settings::default().with_initial(
            InitialData::new(1.0)
                .with_gradient(vec![0.0; 2])
                .with_hessian(Array2::zeros((2, 3))),
        );
        assert_eq!(
            settings.validate(2, needs),
            Err(SettingsError::InitialHessianShape {
                expected: (2, 2),
                found: (2, 3)
            })
        );
    }
}
