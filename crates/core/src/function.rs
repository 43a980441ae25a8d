use ndarray::Array2;

use crate::Statuser;

/// An objective function to be minimized.
///
/// Only the function value is required. Derivative information and a
/// liveness probe are optional secondary capabilities: a type opts in by
/// implementing the corresponding trait and returning `Some(self)` from the
/// matching accessor. The driver inspects the accessors once per run to build
/// its [`Capabilities`](crate::Capabilities) record.
///
/// # Example
///
/// ```rust
/// use minima_core::{Capabilities, Function, Gradient};
///
/// /// f(x) = Σ xᵢ²
/// struct SumOfSquares;
///
/// impl Function for SumOfSquares {
///     fn func(&self, x: &[f64]) -> f64 {
///         x.iter().map(|v| v * v).sum()
///     }
///
///     fn as_gradient(&self) -> Option<&dyn Gradient> {
///         Some(self)
///     }
/// }
///
/// impl Gradient for SumOfSquares {
///     fn grad(&self, x: &[f64], grad: &mut [f64]) {
///         for (g, v) in grad.iter_mut().zip(x) {
///             *g = 2.0 * v;
///         }
///     }
/// }
///
/// let caps = Capabilities::detect(&SumOfSquares);
/// assert!(caps.gradient);
/// assert!(!caps.func_grad);
/// ```
pub trait Function {
    /// Returns the function value at `x`.
    fn func(&self, x: &[f64]) -> f64;

    /// Returns the bare gradient capability, if implemented.
    fn as_gradient(&self) -> Option<&dyn Gradient> {
        None
    }

    /// Returns the combined function and gradient capability, if implemented.
    fn as_func_grad(&self) -> Option<&dyn FuncGrad> {
        None
    }

    /// Returns the bare Hessian capability, if implemented.
    fn as_hessian(&self) -> Option<&dyn Hessian> {
        None
    }

    /// Returns the combined function, gradient, and Hessian capability, if
    /// implemented.
    fn as_func_grad_hess(&self) -> Option<&dyn FuncGradHess> {
        None
    }

    /// Returns the liveness probe, if implemented.
    fn as_statuser(&self) -> Option<&dyn Statuser> {
        None
    }
}

/// Computes the gradient of a function.
pub trait Gradient {
    /// Writes the gradient at `x` into `grad`, which has the length of `x`.
    fn grad(&self, x: &[f64], grad: &mut [f64]);
}

/// Computes the function value and gradient in one call.
pub trait FuncGrad {
    /// Writes the gradient at `x` into `grad` and returns the function value.
    fn func_grad(&self, x: &[f64], grad: &mut [f64]) -> f64;
}

/// Computes the Hessian of a function.
pub trait Hessian {
    /// Writes the symmetric Hessian at `x` into `hess`.
    fn hess(&self, x: &[f64], hess: &mut Array2<f64>);
}

/// Computes the function value, gradient, and Hessian in one call.
pub trait FuncGradHess {
    /// Writes the gradient and Hessian at `x` and returns the function value.
    fn func_grad_hess(&self, x: &[f64], grad: &mut [f64], hess: &mut Array2<f64>) -> f64;
}
