use std::time::Duration;

/// Counters collected during a minimization run.
///
/// Every counter only increases during a run. Evaluation counters count
/// calls of exactly one kind: a combined function and gradient call bumps
/// `func_grad_evaluations` and nothing else.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Stats {
    /// Number of major iterations.
    pub major_iterations: usize,

    /// Number of bare function evaluations.
    pub func_evaluations: usize,

    /// Number of bare gradient evaluations.
    pub grad_evaluations: usize,

    /// Number of bare Hessian evaluations.
    pub hess_evaluations: usize,

    /// Number of combined function and gradient evaluations.
    pub func_grad_evaluations: usize,

    /// Number of combined function, gradient, and Hessian evaluations.
    pub func_grad_hess_evaluations: usize,

    /// Wall-clock time since the start of the run.
    pub runtime: Duration,
}

impl Stats {
    /// Returns the number of calls that produced a function value.
    #[must_use]
    pub fn total_func_evaluations(&self) -> usize {
        self.func_evaluations + self.func_grad_evaluations + self.func_grad_hess_evaluations
    }

    /// Returns the number of calls that produced a gradient.
    #[must_use]
    pub fn total_grad_evaluations(&self) -> usize {
        self.grad_evaluations + self.func_grad_evaluations + self.func_grad_hess_evaluations
    }

    /// Returns the number of calls that produced a Hessian.
    #[must_use]
    pub fn total_hess_evaluations(&self) -> usize {
        self.hess_evaluations + self.func_grad_hess_evaluations
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn totals_include_combined_calls() {
        let stats = Stats {
            func_evaluations: 3,
            grad_evaluations: 2,
            hess_evaluations: 1,
            func_grad_evaluations: 5,
            func_grad_hess_evaluations: 7,
            ..Stats::default()
        };

        assert_eq!(stats.total_func_evaluations(), 15);
        assert_eq!(stats.total_grad_evaluations(), 14);
        assert_eq!(stats.total_hess_evaluations(), 8);
    }
}
