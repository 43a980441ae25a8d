use std::cell::Cell;

use minima_core::{
    Capabilities, FuncGrad, FuncGradHess, Function, Gradient, Hessian, Stats,
};
use ndarray::Array2;

/// Weighted quadratic f(x) = Σ (i + 1)·(xᵢ - cᵢ)² with switchable capabilities.
///
/// Every call is counted, so tests can compare the driver's [`Stats`] with
/// what actually happened.
pub(crate) struct Quadratic {
    center: Vec<f64>,
    caps: Capabilities,
    func: Cell<usize>,
    grad: Cell<usize>,
    hess: Cell<usize>,
    func_grad: Cell<usize>,
    func_grad_hess: Cell<usize>,
}

impl Quadratic {
    pub(crate) fn new(center: Vec<f64>, caps: Capabilities) -> Self {
        Self {
            center,
            caps,
            func: Cell::new(0),
            grad: Cell::new(0),
            hess: Cell::new(0),
            func_grad: Cell::new(0),
            func_grad_hess: Cell::new(0),
        }
    }

    /// A quadratic exposing a bare gradient.
    pub(crate) fn with_gradient(center: Vec<f64>) -> Self {
        Self::new(
            center,
            Capabilities {
                func: true,
                gradient: true,
                ..Capabilities::default()
            },
        )
    }

    /// Returns the calls made so far, as evaluation counters.
    pub(crate) fn calls(&self) -> Stats {
        Stats {
            func_evaluations: self.func.get(),
            grad_evaluations: self.grad.get(),
            hess_evaluations: self.hess.get(),
            func_grad_evaluations: self.func_grad.get(),
            func_grad_hess_evaluations: self.func_grad_hess.get(),
            ..Stats::default()
        }
    }

    fn value(&self, x: &[f64]) -> f64 {
        x.iter()
            .zip(&self.center)
            .enumerate()
            .map(|(i, (x, c))| weight(i) * (x - c).powi(2))
            .sum()
    }

    fn fill_gradient(&self, x: &[f64], grad: &mut [f64]) {
        for (i, ((g, x), c)) in grad.iter_mut().zip(x).zip(&self.center).enumerate() {
            *g = 2.0 * weight(i) * (x - c);
        }
    }

    fn fill_hessian(hess: &mut Array2<f64>) {
        hess.fill(0.0);
        for i in 0..hess.nrows() {
            hess[[i, i]] = 2.0 * weight(i);
        }
    }
}

#[allow(clippy::cast_precision_loss)]
fn weight(i: usize) -> f64 {
    (i + 1) as f64
}

fn bump(counter: &Cell<usize>) {
    counter.set(counter.get() + 1);
}

impl Function for Quadratic {
    fn func(&self, x: &[f64]) -> f64 {
        bump(&self.func);
        self.value(x)
    }

    fn as_gradient(&self) -> Option<&dyn Gradient> {
        self.caps.gradient.then_some(self as &dyn Gradient)
    }

    fn as_func_grad(&self) -> Option<&dyn FuncGrad> {
        self.caps.func_grad.then_some(self as &dyn FuncGrad)
    }

    fn as_hessian(&self) -> Option<&dyn Hessian> {
        self.caps.hessian.then_some(self as &dyn Hessian)
    }

    fn as_func_grad_hess(&self) -> Option<&dyn FuncGradHess> {
        self.caps.func_grad_hess.then_some(self as &dyn FuncGradHess)
    }
}

impl Gradient for Quadratic {
    fn grad(&self, x: &[f64], grad: &mut [f64]) {
        bump(&self.grad);
        self.fill_gradient(x, grad);
    }
}

impl FuncGrad for Quadratic {
    fn func_grad(&self, x: &[f64], grad: &mut [f64]) -> f64 {
        bump(&self.func_grad);
        self.fill_gradient(x, grad);
        self.value(x)
    }
}

impl Hessian for Quadratic {
    fn hess(&self, _x: &[f64], hess: &mut Array2<f64>) {
        bump(&self.hess);
        Self::fill_hessian(hess);
    }
}

impl FuncGradHess for Quadratic {
    fn func_grad_hess(&self, x: &[f64], grad: &mut [f64], hess: &mut Array2<f64>) -> f64 {
        bump(&self.func_grad_hess);
        self.fill_gradient(x, grad);
        Self::fill_hessian(hess);
        self.value(x)
    }
}
