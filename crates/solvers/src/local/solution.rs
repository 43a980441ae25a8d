use minima_core::{Location, Stats, Status};

/// The result of a minimization run.
#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    /// Best location found.
    pub location: Location,

    /// Counters at the end of the run.
    pub stats: Stats,

    /// Why the run ended.
    pub status: Status,
}
