//! Line search methods for smooth multivariate minimization.
//!
//! # Algorithm
//!
//! A [`Linesearch`] method alternates two phases:
//!
//! - A [`NextDirectioner`] picks a descent direction and an initial step
//!   length at the current major iterate.
//! - A [`Linesearcher`] shrinks or grows the step along that direction until
//!   its acceptance condition holds at the trial point.
//!
//! Each accepted trial point becomes a major iteration, and the gradient
//! there is evaluated if the line search did not already need it.
//!
//! # Provided Components
//!
//! - [`Bfgs`] for quasi-Newton directions from an inverse Hessian estimate
//! - [`Backtracking`] for an Armijo line search that needs no gradients at
//!   trial points
//!
//! `Linesearch<Bfgs, Backtracking>` is the default method of
//! [`minimize`](crate::local::minimize).

mod backtracking;
mod bfgs;
mod error;

#[cfg(test)]
mod tests;

pub use backtracking::{Backtracking, ConfigError, MIN_STEP};
pub use bfgs::Bfgs;
pub use error::LinesearchError;

use minima_core::{
    BoxError, Capabilities, EvaluationType, IterationType, Location, Method, Needs, Step,
};

/// Produces search directions for a [`Linesearch`] method.
pub trait NextDirectioner {
    /// Starts a run at `x`, writing the first direction into `dir`.
    ///
    /// Returns the initial step length along `dir`.
    fn init_direction(&mut self, x: &[f64], gradient: &[f64], dir: &mut [f64]) -> f64;

    /// Writes the direction at the new major iterate `x` into `dir`.
    ///
    /// Returns the initial step length along `dir`.
    fn next_direction(&mut self, x: &[f64], gradient: &[f64], dir: &mut [f64]) -> f64;
}

/// Chooses step lengths along a fixed direction.
///
/// The `derivative` arguments are the directional derivative of the
/// objective along the search direction. They are `NaN` when the gradient
/// was not evaluated at the trial point.
pub trait Linesearcher {
    /// Starts a search from a point with value `f` and directional
    /// `derivative`, with a first trial at `step`.
    ///
    /// Returns the quantities to evaluate at the first trial point.
    fn init(&mut self, f: f64, derivative: f64, step: f64) -> EvaluationType;

    /// Returns `true` if the current trial point is acceptable.
    fn finished(&self, f: f64, derivative: f64) -> bool;

    /// Proposes the next step length after rejecting the current one.
    ///
    /// # Errors
    ///
    /// Returns an error if no acceptable step can be found.
    fn iterate(&mut self, f: f64, derivative: f64)
    -> Result<(f64, EvaluationType), LinesearchError>;
}

/// A line search method built from a direction generator and a step search.
#[derive(Debug, Clone, Default)]
pub struct Linesearch<D, S> {
    direction: D,
    searcher: S,

    /// Major iterate the current search started from.
    x0: Vec<f64>,
    dir: Vec<f64>,
    last: Option<IterationType>,
}

impl<D, S> Linesearch<D, S>
where
    D: NextDirectioner,
    S: Linesearcher,
{
    /// Creates a line search method.
    #[must_use]
    pub fn new(direction: D, searcher: S) -> Self {
        Self {
            direction,
            searcher,
            x0: Vec::new(),
            dir: Vec::new(),
            last: None,
        }
    }

    /// Returns the direction generator.
    pub fn direction(&self) -> &D {
        &self.direction
    }

    /// Returns the step search.
    pub fn searcher(&self) -> &S {
        &self.searcher
    }

    /// Begins a search along `self.dir` from `location`.
    fn start_search(
        &mut self,
        location: &Location,
        gradient: &[f64],
        step: f64,
        x_next: &mut [f64],
    ) -> Result<Step, LinesearchError> {
        let projected = dot(gradient, &self.dir);
        if projected.is_nan() || projected >= 0.0 {
            return Err(LinesearchError::NotDescent { projected });
        }

        self.x0.clone_from(&location.x);
        let evaluation = self.searcher.init(location.f, projected, step);
        self.trial(step, x_next);

        self.last = Some(IterationType::MinorIteration);
        Ok(Step::new(evaluation, IterationType::MinorIteration))
    }

    /// Writes `x0 + step * dir` into `x_next`.
    fn trial(&self, step: f64, x_next: &mut [f64]) {
        for ((x, x0), d) in x_next.iter_mut().zip(&self.x0).zip(&self.dir) {
            *x = x0 + step * d;
        }
    }
}

impl<D, S> Method for Linesearch<D, S>
where
    D: NextDirectioner,
    S: Linesearcher,
{
    fn init(
        &mut self,
        location: &Location,
        _capabilities: &Capabilities,
        x_next: &mut [f64],
    ) -> Result<Step, BoxError> {
        let gradient = location
            .gradient
            .as_deref()
            .ok_or(LinesearchError::MissingGradient)?;

        self.dir = vec![0.0; location.dim()];
        let step = self
            .direction
            .init_direction(&location.x, gradient, &mut self.dir);

        Ok(self.start_search(location, gradient, step, x_next)?)
    }

    fn iterate(&mut self, location: &Location, x_next: &mut [f64]) -> Result<Step, BoxError> {
        let gradient = location
            .gradient
            .as_deref()
            .ok_or(LinesearchError::MissingGradient)?;

        if self.last == Some(IterationType::MajorIteration) {
            let step = self
                .direction
                .next_direction(&location.x, gradient, &mut self.dir);
            return Ok(self.start_search(location, gradient, step, x_next)?);
        }

        // NaN when the trial point was evaluated without a gradient.
        let projected = dot(gradient, &self.dir);

        if self.searcher.finished(location.f, projected) {
            x_next.copy_from_slice(&location.x);
            self.last = Some(IterationType::MajorIteration);
            let evaluation = if projected.is_nan() {
                EvaluationType::GradOnly
            } else {
                EvaluationType::NoEvaluation
            };
            return Ok(Step::new(evaluation, IterationType::MajorIteration));
        }

        let (step, evaluation) = self.searcher.iterate(location.f, projected)?;
        self.trial(step, x_next);
        Ok(Step::new(evaluation, IterationType::MinorIteration))
    }

    fn needs(&self) -> Needs {
        Needs {
            gradient: true,
            hessian: false,
        }
    }
}

fn dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(a, b)| a * b).sum()
}
