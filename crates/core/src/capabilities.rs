use thiserror::Error;

use crate::{Function, Needs};

/// The evaluation forms an objective supports.
///
/// Detected once per run with [`Capabilities::detect`] and immutable
/// afterwards. The driver uses it to pick the calls that serve each
/// evaluation request, and methods receive it during initialization.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Capabilities {
    /// Bare function value. Always available for a [`Function`].
    pub func: bool,

    /// Bare gradient.
    pub gradient: bool,

    /// Combined function value and gradient.
    pub func_grad: bool,

    /// Bare Hessian.
    pub hessian: bool,

    /// Combined function value, gradient, and Hessian.
    pub func_grad_hess: bool,

    /// Liveness probe.
    pub statuser: bool,
}

/// A method requirement the objective cannot satisfy.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum Unsatisfied {
    #[error("method needs a gradient but the function implements none of Gradient, FuncGrad, FuncGradHess")]
    Gradient,

    #[error("method needs a Hessian but the function implements neither FuncGradHess nor both Gradient and Hessian")]
    Hessian,
}

impl Capabilities {
    /// Inspects `function` and records which capabilities it exposes.
    #[must_use]
    pub fn detect<F: Function + ?Sized>(function: &F) -> Self {
        Self {
            func: true,
            gradient: function.as_gradient().is_some(),
            func_grad: function.as_func_grad().is_some(),
            hessian: function.as_hessian().is_some(),
            func_grad_hess: function.as_func_grad_hess().is_some(),
            statuser: function.as_statuser().is_some(),
        }
    }

    /// Returns `true` if some capability produces a gradient.
    #[must_use]
    pub fn provides_gradient(&self) -> bool {
        self.gradient || self.func_grad || self.func_grad_hess
    }

    /// Returns `true` if a Hessian can be produced together with the
    /// function value and gradient.
    #[must_use]
    pub fn provides_hessian(&self) -> bool {
        self.func_grad_hess || (self.gradient && self.hessian)
    }

    /// Checks that a method's declared needs can be served.
    ///
    /// # Errors
    ///
    /// Returns the first requirement that no capability combination covers.
    pub fn satisfies(&self, needs: Needs) -> Result<(), Unsatisfied> {
        if needs.gradient && !self.provides_gradient() {
            return Err(Unsatisfied::Gradient);
        }
        if needs.hessian && !self.provides_hessian() {
            return Err(Unsatisfied::Hessian);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use ndarray::Array2;

    use crate::{BoxError, FuncGradHess, Gradient, Hessian, Status, Statuser};

    struct FuncOnly;

    impl Function for FuncOnly {
        fn func(&self, x: &[f64]) -> f64 {
            x[0]
        }
    }

    struct GradAndHess;

    impl Function for GradAndHess {
        fn func(&self, x: &[f64]) -> f64 {
            x[0] * x[0]
        }

        fn as_gradient(&self) -> Option<&dyn Gradient> {
            Some(self)
        }

        fn as_hessian(&self) -> Option<&dyn Hessian> {
            Some(self)
        }

        fn as_statuser(&self) -> Option<&dyn Statuser> {
            Some(self)
        }
    }

    impl Gradient for GradAndHess {
        fn grad(&self, x: &[f64], grad: &mut [f64]) {
            grad[0] = 2.0 * x[0];
        }
    }

    impl Hessian for GradAndHess {
        fn hess(&self, _x: &[f64], hess: &mut Array2<f64>) {
            hess[[0, 0]] = 2.0;
        }
    }

    impl Statuser for GradAndHess {
        fn status(&self) -> Result<Status, BoxError> {
            Ok(Status::NotTerminated)
        }
    }

    struct Triple;

    impl Function for Triple {
        fn func(&self, x: &[f64]) -> f64 {
            x[0]
        }

        fn as_func_grad_hess(&self) -> Option<&dyn FuncGradHess> {
            Some(self)
        }
    }

    impl FuncGradHess for Triple {
        fn func_grad_hess(&self, x: &[f64], grad: &mut [f64], hess: &mut Array2<f64>) -> f64 {
            grad[0] = 1.0;
            hess[[0, 0]] = 0.0;
            x[0]
        }
    }

    const GRADIENT: Needs = Needs {
        gradient: true,
        hessian: false,
    };

    const HESSIAN: Needs = Needs {
        gradient: true,
        hessian: true,
    };

    #[test]
    fn detects_function_only() {
        let caps = Capabilities::detect(&FuncOnly);
        assert_eq!(
            caps,
            Capabilities {
                func: true,
                ..Capabilities::default()
            }
        );
        assert_eq!(caps.satisfies(Needs::default()), Ok(()));
        assert_eq!(caps.satisfies(GRADIENT), Err(Unsatisfied::Gradient));
    }

    #[test]
    fn detects_each_capability_independently() {
        let caps = Capabilities::detect(&GradAndHess);
        assert!(caps.func && caps.gradient && caps.hessian && caps.statuser);
        assert!(!caps.func_grad && !caps.func_grad_hess);
        assert_eq!(caps.satisfies(HESSIAN), Ok(()));
    }

    #[test]
    fn combined_triple_covers_gradient_and_hessian() {
        let caps = Capabilities::detect(&Triple);
        assert!(caps.provides_gradient());
        assert!(caps.provides_hessian());
        assert_eq!(caps.satisfies(HESSIAN), Ok(()));
    }

    #[test]
    fn bare_hessian_without_gradient_is_unsatisfiable() {
        let caps = Capabilities {
            func: true,
            hessian: true,
            func_grad: true,
            ..Capabilities::default()
        };
        assert_eq!(caps.satisfies(HESSIAN), Err(Unsatisfied::Hessian));
    }

    #[test]
    fn works_through_trait_objects() {
        let function: &dyn Function = &GradAndHess;
        assert!(Capabilities::detect(function).gradient);
    }
}
