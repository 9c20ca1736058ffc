// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

use crate::stats::BnbSolverStatistics;
use golomb_model::ruler::Ruler;
use golomb_search::{
    result::{SolverOutcome, SolverResult, TerminationReason},
    stats::SolverStatisticsBuilder,
};

/// Result of the sequential solver after termination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BnbSolverOutcome {
    result: SolverResult,
    termination_reason: TerminationReason,
    statistics: BnbSolverStatistics,
}

impl BnbSolverOutcome {
    #[inline]
    pub fn found(ruler: Ruler, statistics: BnbSolverStatistics) -> Self {
        Self {
            result: SolverResult::Found(ruler),
            termination_reason: TerminationReason::ExistenceProven,
            statistics,
        }
    }

    #[inline]
    pub fn not_found(statistics: BnbSolverStatistics) -> Self {
        Self {
            result: SolverResult::NotFound,
            termination_reason: TerminationReason::NonExistenceProven,
            statistics,
        }
    }

    #[inline]
    pub fn aborted<R>(reason: R, statistics: BnbSolverStatistics) -> Self
    where
        R: Into<String>,
    {
        Self {
            result: SolverResult::Unknown,
            termination_reason: TerminationReason::Aborted(reason.into()),
            statistics,
        }
    }

    /// Returns the solver result.
    #[inline]
    pub fn result(&self) -> &SolverResult {
        &self.result
    }

    /// Returns the termination reason.
    #[inline]
    pub fn termination_reason(&self) -> &TerminationReason {
        &self.termination_reason
    }

    /// Returns the solver statistics.
    #[inline]
    pub fn statistics(&self) -> &BnbSolverStatistics {
        &self.statistics
    }

    /// Returns the found ruler, if any.
    #[inline]
    pub fn ruler(&self) -> Option<&Ruler> {
        match &self.result {
            SolverResult::Found(ruler) => Some(ruler),
            _ => None,
        }
    }

    #[inline]
    pub fn is_aborted(&self) -> bool {
        matches!(self.termination_reason, TerminationReason::Aborted(_))
    }

    /// Splits the outcome into its result, reason and statistics.
    #[inline]
    pub fn into_parts(self) -> (SolverResult, TerminationReason, BnbSolverStatistics) {
        (self.result, self.termination_reason, self.statistics)
    }
}

impl std::fmt::Display for BnbSolverOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "BnbSolverOutcome(result: {}, reason: {})",
            self.result, self.termination_reason
        )
    }
}

impl From<BnbSolverOutcome> for SolverOutcome {
    fn from(val: BnbSolverOutcome) -> Self {
        let statistics = SolverStatisticsBuilder::new()
            .nodes_explored(val.statistics.nodes_explored)
            .backtracks(val.statistics.backtracks)
            .collisions(val.statistics.collisions)
            .used_threads(1)
            .solve_duration(val.statistics.time_total)
            .build();

        SolverOutcome::new(val.result, val.termination_reason, statistics)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn stats() -> BnbSolverStatistics {
        BnbSolverStatistics {
            nodes_explored: 12,
            backtracks: 8,
            collisions: 5,
            max_depth: 4,
            solutions_found: 1,
            time_total: Duration::from_millis(3),
        }
    }

    #[test]
    fn test_found_carries_ruler() {
        let ruler = Ruler::from_positions([0, 1, 4, 6]).unwrap();
        let outcome = BnbSolverOutcome::found(ruler.clone(), stats());
        assert_eq!(outcome.ruler(), Some(&ruler));
        assert_eq!(
            outcome.termination_reason(),
            &TerminationReason::ExistenceProven
        );
        assert!(!outcome.is_aborted());
    }

    #[test]
    fn test_aborted_has_no_ruler() {
        let outcome = BnbSolverOutcome::aborted("Interrupt signal received", stats());
        assert!(outcome.ruler().is_none());
        assert!(outcome.is_aborted());
        assert_eq!(outcome.result(), &SolverResult::Unknown);
    }

    #[test]
    fn test_into_solver_outcome_maps_statistics() {
        let outcome: SolverOutcome = BnbSolverOutcome::not_found(stats()).into();
        assert_eq!(outcome.result, SolverResult::NotFound);
        assert_eq!(outcome.reason, TerminationReason::NonExistenceProven);
        assert_eq!(outcome.statistics.nodes_explored, 12);
        assert_eq!(outcome.statistics.backtracks, 8);
        assert_eq!(outcome.statistics.collisions, 5);
        assert_eq!(outcome.statistics.used_threads, 1);
        assert_eq!(outcome.statistics.solve_duration, Duration::from_millis(3));
    }
}
