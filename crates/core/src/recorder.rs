use crate::{BoxError, Capabilities, EvaluationType, IterationType, Location, Stats};

/// Receives every location produced during a minimization run.
///
/// The driver calls [`Recorder::init`] once before any evaluation, then
/// [`Recorder::record`] for the starting point, for each evaluated point, and
/// finally for the best location with [`IterationType::PostIteration`].
///
/// Returning an error from either method ends the run.
pub trait Recorder {
    /// Prepares the recorder for a run on a function with `capabilities`.
    ///
    /// # Errors
    ///
    /// Returns an error if the recorder cannot start.
    fn init(&mut self, capabilities: &Capabilities) -> Result<(), BoxError> {
        let _ = capabilities;
        Ok(())
    }

    /// Records one location along with how it was produced.
    ///
    /// # Errors
    ///
    /// Returns an error if the record cannot be stored.
    fn record(
        &mut self,
        location: &Location,
        evaluation: EvaluationType,
        iteration: IterationType,
        stats: &Stats,
    ) -> Result<(), BoxError>;
}

/// Allows `&mut R` to be handed to the driver, so the recorder can be
/// inspected after the run completes.
impl<R: Recorder + ?Sized> Recorder for &mut R {
    fn init(&mut self, capabilities: &Capabilities) -> Result<(), BoxError> {
        (**self).init(capabilities)
    }

    fn record(
        &mut self,
        location: &Location,
        evaluation: EvaluationType,
        iteration: IterationType,
        stats: &Stats,
    ) -> Result<(), BoxError> {
        (**self).record(location, evaluation, iteration, stats)
    }
}
