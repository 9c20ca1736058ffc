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

use crate::{state::SearchState, stats::BnbSolverStatistics};
use golomb_model::ruler::Ruler;
use golomb_search::{monitor::search_monitor::SearchCommand, shape::RulerShape};

/// Reasons for pruning a candidate or a search state.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum PruneReason {
    /// The candidate would measure a distance that is already present.
    DistanceCollision,
    /// All marks are placed but the last one is not at the target length.
    LengthMismatch,
}

impl std::fmt::Display for PruneReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PruneReason::DistanceCollision => write!(f, "DistanceCollision"),
            PruneReason::LengthMismatch => write!(f, "LengthMismatch"),
        }
    }
}

/// Trait for monitoring and controlling the search process of the solver.
pub trait TreeSearchMonitor {
    /// Returns the name of the monitor.
    fn name(&self) -> &str;
    /// Called when the search starts.
    fn on_enter_search(&mut self, shape: &RulerShape, statistics: &BnbSolverStatistics);
    /// Called when the search ends.
    fn on_exit_search(&mut self, statistics: &BnbSolverStatistics);
    /// Called to determine the next action of the search. Polled on entry to
    /// every node and before every candidate.
    fn search_command(
        &mut self,
        _state: &SearchState,
        _statistics: &BnbSolverStatistics,
    ) -> SearchCommand {
        SearchCommand::Continue
    }
    /// Called once per explored node.
    fn on_step(&mut self, state: &SearchState, statistics: &BnbSolverStatistics);
    /// Called when a candidate or a complete placement is rejected.
    fn on_prune(&mut self, state: &SearchState, reason: PruneReason, statistics: &BnbSolverStatistics);
    /// Called after a mark was placed at `position`, before descending.
    fn on_descend(&mut self, state: &SearchState, position: u32, statistics: &BnbSolverStatistics);
    /// Called after the most recent mark was removed again.
    fn on_backtrack(&mut self, state: &SearchState, statistics: &BnbSolverStatistics);
    /// Called when a ruler of the requested shape is found.
    fn on_solution_found(&mut self, ruler: &Ruler, statistics: &BnbSolverStatistics);
}

impl std::fmt::Debug for dyn TreeSearchMonitor + '_ {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "TreeSearchMonitor({})", self.name())
    }
}

impl std::fmt::Display for dyn TreeSearchMonitor + '_ {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "TreeSearchMonitor({})", self.name())
    }
}

impl<M> TreeSearchMonitor for &mut M
where
    M: TreeSearchMonitor + ?Sized,
{
    #[inline(always)]
    fn name(&self) -> &str {
        (**self).name()
    }

    #[inline(always)]
    fn on_enter_search(&mut self, shape: &RulerShape, statistics: &BnbSolverStatistics) {
        (**self).on_enter_search(shape, statistics);
    }

    #[inline(always)]
    fn on_exit_search(&mut self, statistics: &BnbSolverStatistics) {
        (**self).on_exit_search(statistics);
    }

    #[inline(always)]
    fn search_command(
        &mut self,
        state: &SearchState,
        statistics: &BnbSolverStatistics,
    ) -> SearchCommand {
        (**self).search_command(state, statistics)
    }

    #[inline(always)]
    fn on_step(&mut self, state: &SearchState, statistics: &BnbSolverStatistics) {
        (**self).on_step(state, statistics);
    }

    #[inline(always)]
    fn on_prune(&mut self, state: &SearchState, reason: PruneReason, statistics: &BnbSolverStatistics) {
        (**self).on_prune(state, reason, statistics);
    }

    #[inline(always)]
    fn on_descend(&mut self, state: &SearchState, position: u32, statistics: &BnbSolverStatistics) {
        (**self).on_descend(state, position, statistics);
    }

    #[inline(always)]
    fn on_backtrack(&mut self, state: &SearchState, statistics: &BnbSolverStatistics) {
        (**self).on_backtrack(state, statistics);
    }

    #[inline(always)]
    fn on_solution_found(&mut self, ruler: &Ruler, statistics: &BnbSolverStatistics) {
        (**self).on_solution_found(ruler, statistics);
    }
}
