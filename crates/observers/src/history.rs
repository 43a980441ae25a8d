use minima_core::{BoxError, Capabilities, EvaluationType, IterationType, Location, Recorder, Stats};

/// One location received from the driver.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub location: Location,
    pub evaluation: EvaluationType,
    pub iteration: IterationType,
    pub stats: Stats,
}

/// A recorder that keeps every record in memory.
///
/// Each run starts with an empty history, so one `History` can be reused
/// across runs.
#[derive(Debug, Clone, Default)]
pub struct History {
    capabilities: Option<Capabilities>,
    records: Vec<Record>,
}

impl History {
    /// Creates an empty history.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the capabilities of the last function recorded, if any.
    #[must_use]
    pub fn capabilities(&self) -> Option<&Capabilities> {
        self.capabilities.as_ref()
    }

    /// Returns every record in the order received.
    #[must_use]
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Returns the records of major iterations.
    pub fn majors(&self) -> impl Iterator<Item = &Record> {
        self.records
            .iter()
            .filter(|r| r.iteration == IterationType::MajorIteration)
    }

    /// Returns the final best-location record, present when the run finished
    /// without a collaborator error.
    #[must_use]
    pub fn post(&self) -> Option<&Record> {
        self.records
            .last()
            .filter(|r| r.iteration == IterationType::PostIteration)
    }

    /// Returns the lowest function value recorded, ignoring `NaN`.
    #[must_use]
    pub fn lowest(&self) -> Option<f64> {
        self.records
            .iter()
            .map(|r| r.location.f)
            .filter(|f| !f.is_nan())
            .reduce(f64::min)
    }
}

impl Recorder for History {
    fn init(&mut self, capabilities: &Capabilities) -> Result<(), BoxError> {
        self.capabilities = Some(*capabilities);
        self.records.clear();
        Ok(())
    }

    fn record(
        &mut self,
        location: &Location,
        evaluation: EvaluationType,
        iteration: IterationType,
        stats: &Stats,
    ) -> Result<(), BoxError> {
        self.records.push(Record {
            location: location.clone(),
            evaluation,
            iteration,
            stats: *stats,
        });
        Ok(())
    }
}
