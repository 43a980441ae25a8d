use crate::{BoxError, Capabilities, EvaluationType, IterationType, Location, Statuser};

/// The quantities a method needs the objective to provide.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Needs {
    /// The method reads `Location::gradient`.
    pub gradient: bool,

    /// The method reads `Location::hessian`.
    pub hessian: bool,
}

/// The next request a method makes of the driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    /// Quantities to evaluate at the next point.
    pub evaluation: EvaluationType,

    /// Why the evaluation happens.
    pub iteration: IterationType,
}

impl Step {
    /// Creates a new step request.
    #[must_use]
    pub fn new(evaluation: EvaluationType, iteration: IterationType) -> Self {
        Self {
            evaluation,
            iteration,
        }
    }
}

/// An iterative optimization method driven by the minimization loop.
///
/// The driver owns all locations. A method only proposes the next point by
/// writing it into `x_next` and states which quantities must be evaluated
/// there. After evaluation, the driver hands the updated location back
/// through [`Method::iterate`].
///
/// Methods carry sequencing state across calls (a current step size, an
/// inverse Hessian approximation), so one instance must not drive two runs
/// at the same time.
pub trait Method {
    /// Prepares the method for a run starting at `location`.
    ///
    /// `location` holds every quantity reported by [`Method::needs`].
    /// The first point to evaluate is written into `x_next`.
    ///
    /// # Errors
    ///
    /// Returns an error if the method cannot start from `location`.
    fn init(
        &mut self,
        location: &Location,
        capabilities: &Capabilities,
        x_next: &mut [f64],
    ) -> Result<Step, BoxError>;

    /// Consumes the just-evaluated `location` and proposes the next point.
    ///
    /// # Errors
    ///
    /// Returns an error if the method cannot make progress.
    fn iterate(&mut self, location: &Location, x_next: &mut [f64]) -> Result<Step, BoxError>;

    /// Returns the quantities this method reads from a location.
    fn needs(&self) -> Needs;

    /// Returns the method's liveness probe, if it has one.
    fn as_statuser(&self) -> Option<&dyn Statuser> {
        None
    }
}
