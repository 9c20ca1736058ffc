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

//! Depth-first branch-and-bound search for Golomb rulers of an exact length.
//!
//! The `BnbSolver` places marks left to right. Mark 0 is fixed at position 0;
//! at depth `d` (marks placed so far) the next mark ranges over
//! `last + 1 ..= length - (marks - d - 1)`, which leaves one unit of room for
//! every mark still to come. A candidate is rejected as soon as one of its
//! distances to the placed marks is already measured, and a complete
//! placement is accepted only when its last mark sits exactly at the target
//! length. Mirror images are pruned by bounding the second mark to
//! `max(1, length / 2)`: every ruler or its reflection satisfies the bound.
//!
//! The solver owns a reusable `SearchState` (positions plus a distance bitset)
//! whose capacity survives across solves. A search session encapsulates
//! per-run state, statistics and timing. Monitors are consulted on entry to
//! every node and before every candidate, so a stop request is honoured
//! within one candidate step.
//!
//! `solve_from_prefix` continues the search below a caller-supplied prefix;
//! the parallel engine uses it to hand out disjoint subtrees.

use crate::{
    monitor::tree_search_monitor::{PruneReason, TreeSearchMonitor},
    result::BnbSolverOutcome,
    state::SearchState,
    stats::BnbSolverStatistics,
};
use golomb_model::ruler::Ruler;
use golomb_search::{monitor::search_monitor::SearchCommand, shape::RulerShape};

/// A sequential, exhaustive solver for the exact-length Golomb ruler problem.
#[derive(Debug, Clone, Default)]
pub struct BnbSolver {
    state: SearchState,
}

impl BnbSolver {
    /// Create a new solver instance.
    #[inline]
    pub fn new() -> Self {
        Self {
            state: SearchState::new(),
        }
    }

    /// Create a new solver instance with preallocated storage for
    /// rulers of up to `marks` marks and `length` units.
    ///
    /// # Note
    ///
    /// The solver grows its storage on demand, so this only moves the
    /// allocation to construction time.
    #[inline]
    pub fn preallocated(marks: usize, length: u32) -> Self {
        Self {
            state: SearchState::preallocated(marks, length),
        }
    }

    /// Searches for a Golomb ruler of exactly `shape.marks()` marks and
    /// length `shape.length()`.
    ///
    /// Returns the first ruler in lexicographic order of its positions
    /// among those whose second mark is at most `max(1, length / 2)`.
    #[inline]
    pub fn solve<S>(&mut self, shape: &RulerShape, monitor: S) -> BnbSolverOutcome
    where
        S: TreeSearchMonitor,
    {
        self.solve_from_prefix(shape, &[0], monitor)
    }

    /// Searches for a ruler of the given shape that starts with `prefix`.
    ///
    /// The prefix must start at 0, be strictly increasing, stay within the
    /// target length and measure pairwise-distinct distances. A prefix that
    /// violates any of these yields a not-found outcome. The symmetry bound
    /// on the second mark is only applied when `prefix` is `[0]`.
    pub fn solve_from_prefix<S>(
        &mut self,
        shape: &RulerShape,
        prefix: &[u32],
        mut monitor: S,
    ) -> BnbSolverOutcome
    where
        S: TreeSearchMonitor,
    {
        let session = BnbSolverSearchSession::new(self, shape, &mut monitor);
        let outcome = session.run(prefix);
        self.reset();
        outcome
    }

    /// Clears the logical state while keeping allocated capacity.
    #[inline]
    fn reset(&mut self) {
        self.state.reset(0, 0);
    }
}

/// Outcome of exploring one subtree.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Step {
    Found,
    Exhausted,
    Aborted(String),
}

/// A search session for the solver.
/// This struct encapsulates the state and logic
/// of a single search run.
struct BnbSolverSearchSession<'a, S> {
    solver: &'a mut BnbSolver,
    shape: &'a RulerShape,
    monitor: &'a mut S,
    stats: BnbSolverStatistics,
    start_time: std::time::Instant,
}

impl<S> std::fmt::Debug for BnbSolverSearchSession<'_, S>
where
    S: TreeSearchMonitor,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchSession")
            .field("shape", &self.shape)
            .field("state", &self.solver.state)
            .field("monitor", &self.monitor.name())
            .field("stats", &self.stats)
            .finish()
    }
}

impl<'a, S> BnbSolverSearchSession<'a, S>
where
    S: TreeSearchMonitor,
{
    #[inline]
    fn new(solver: &'a mut BnbSolver, shape: &'a RulerShape, monitor: &'a mut S) -> Self {
        Self {
            solver,
            shape,
            monitor,
            stats: BnbSolverStatistics::default(),
            start_time: std::time::Instant::now(),
        }
    }

    /// Run the search session below `prefix`.
    fn run(mut self, prefix: &[u32]) -> BnbSolverOutcome {
        self.monitor.on_enter_search(self.shape, &self.stats);

        let step = if !self.shape.is_trivially_infeasible() && self.seed(prefix) {
            self.search()
        } else {
            Step::Exhausted
        };

        self.stats.set_total_time(self.start_time.elapsed());
        self.monitor.on_exit_search(&self.stats);
        self.finalize_result(step)
    }

    /// Finalize the outcome based on the last step.
    ///
    /// # Note
    ///
    /// This consumes self.
    fn finalize_result(self, step: Step) -> BnbSolverOutcome {
        match step {
            Step::Found => {
                let ruler = self.current_ruler();
                BnbSolverOutcome::found(ruler, self.stats)
            }
            Step::Exhausted => BnbSolverOutcome::not_found(self.stats),
            Step::Aborted(reason) => BnbSolverOutcome::aborted(reason, self.stats),
        }
    }

    /// Places the prefix marks. Returns `false` if the prefix cannot
    /// start a ruler of the requested shape.
    fn seed(&mut self, prefix: &[u32]) -> bool {
        let marks = self.shape.marks();
        let length = self.shape.length();
        self.solver.state.reset(marks, length);

        if prefix.first() != Some(&0) || prefix.len() > marks {
            return false;
        }

        for &position in prefix {
            let increasing = self.solver.state.depth() == 0 || position > self.solver.state.last();
            if position > length || !increasing {
                return false;
            }
            if !self.solver.state.try_place(position) {
                self.stats.on_collision();
                return false;
            }
        }

        true
    }

    /// Builds the ruler from the current (complete) placement.
    fn current_ruler(&self) -> Ruler {
        Ruler::new(
            self.shape.length(),
            self.shape.marks(),
            self.solver.state.positions().to_vec(),
        )
        .expect("expected a complete placement to form a well-formed ruler")
    }

    /// Returns the inclusive candidate range for the next mark at `depth`,
    /// or `None` if it is empty.
    #[inline]
    fn candidate_range(&self, depth: usize) -> Option<(u32, u32)> {
        let marks = self.shape.marks();
        let length = self.shape.length();
        let last = self.solver.state.last();

        // The final mark can only succeed at the target length.
        if depth == marks - 1 {
            return (length > last).then_some((length, length));
        }

        let remaining = (marks - depth - 1) as u32;
        let mut upper = length.checked_sub(remaining)?;
        if depth == 1 && marks > 2 {
            upper = upper.min((last + 1).max(length / 2));
        }

        let lower = last + 1;
        (lower <= upper).then_some((lower, upper))
    }

    #[inline]
    fn poll(&mut self) -> Option<String> {
        match self.monitor.search_command(&self.solver.state, &self.stats) {
            SearchCommand::Continue => None,
            SearchCommand::Terminate(reason) => Some(reason),
        }
    }

    fn search(&mut self) -> Step {
        if let Some(reason) = self.poll() {
            return Step::Aborted(reason);
        }

        let depth = self.solver.state.depth();
        self.stats.on_node_explored();
        self.stats.on_depth_update(depth as u64);
        self.monitor.on_step(&self.solver.state, &self.stats);

        if depth == self.shape.marks() {
            if self.solver.state.last() == self.shape.length() {
                self.stats.on_solution_found();
                let ruler = self.current_ruler();
                self.monitor.on_solution_found(&ruler, &self.stats);
                return Step::Found;
            }
            // Only a complete caller-supplied prefix can end short of the length.
            self.monitor
                .on_prune(&self.solver.state, PruneReason::LengthMismatch, &self.stats);
            return Step::Exhausted;
        }

        let Some((lower, upper)) = self.candidate_range(depth) else {
            return Step::Exhausted;
        };

        for candidate in lower..=upper {
            if let Some(reason) = self.poll() {
                return Step::Aborted(reason);
            }

            if !self.solver.state.try_place(candidate) {
                self.stats.on_collision();
                self.monitor.on_prune(
                    &self.solver.state,
                    PruneReason::DistanceCollision,
                    &self.stats,
                );
                continue;
            }

            self.monitor
                .on_descend(&self.solver.state, candidate, &self.stats);

            match self.search() {
                Step::Exhausted => {}
                step => return step,
            }

            self.solver.state.remove_last();
            self.stats.on_backtrack();
            self.monitor.on_backtrack(&self.solver.state, &self.stats);
        }

        Step::Exhausted
    }
}

#[cfg(test)]
mod tests {
    use super::BnbSolver;
    use crate::{
        monitor::{
            no_op::NoOperationMonitor,
            tree_search_monitor::{PruneReason, TreeSearchMonitor},
            wrapper::WrapperMonitor,
        },
        result::BnbSolverOutcome,
        state::SearchState,
        stats::BnbSolverStatistics,
    };
    use golomb_model::{known::KnownOptimalTable, ruler::Ruler};
    use golomb_search::{
        monitor::{
            interrupt::InterruptMonitor,
            search_monitor::{SearchCommand, SearchMonitor},
        },
        result::{SolverResult, TerminationReason},
        shape::RulerShape,
    };
    use std::sync::atomic::AtomicBool;

    fn solve(marks: usize, length: u32) -> BnbSolverOutcome {
        let shape = RulerShape::new(marks, length).unwrap();
        BnbSolver::new().solve(&shape, NoOperationMonitor::new())
    }

    fn positions(outcome: &BnbSolverOutcome) -> Option<Vec<u32>> {
        outcome.ruler().map(|r| r.positions().to_vec())
    }

    #[test]
    fn test_finds_four_mark_ruler() {
        let outcome = solve(4, 6);
        assert_eq!(positions(&outcome), Some(vec![0, 1, 4, 6]));
        assert_eq!(
            outcome.termination_reason(),
            &TerminationReason::ExistenceProven
        );
    }

    #[test]
    fn test_finds_five_mark_ruler() {
        assert_eq!(positions(&solve(5, 11)), Some(vec![0, 1, 4, 9, 11]));
    }

    #[test]
    fn test_finds_six_and_seven_mark_rulers() {
        assert_eq!(positions(&solve(6, 17)), Some(vec![0, 1, 4, 10, 12, 17]));
        assert_eq!(
            positions(&solve(7, 25)),
            Some(vec![0, 1, 4, 10, 18, 23, 25])
        );
    }

    #[test]
    fn test_small_shapes() {
        assert_eq!(positions(&solve(2, 1)), Some(vec![0, 1]));
        assert_eq!(positions(&solve(2, 5)), Some(vec![0, 5]));
        assert_eq!(positions(&solve(3, 3)), Some(vec![0, 1, 3]));
    }

    #[test]
    fn test_length_shorter_than_optimum_is_not_found() {
        let outcome = solve(4, 5);
        assert_eq!(outcome.result(), &SolverResult::NotFound);
        assert_eq!(
            outcome.termination_reason(),
            &TerminationReason::NonExistenceProven
        );

        assert!(solve(5, 10).ruler().is_none());
        assert!(solve(3, 2).ruler().is_none());
    }

    #[test]
    fn test_too_short_for_marks_is_not_found() {
        assert!(solve(5, 3).ruler().is_none());
        assert!(solve(2, 0).ruler().is_none());
    }

    #[test]
    fn test_known_optimal_lengths_are_found() {
        let table = KnownOptimalTable::global();
        let mut solver = BnbSolver::preallocated(8, 34);
        for marks in 2..=8 {
            let length = table.length(marks).unwrap();
            let shape = RulerShape::new(marks, length).unwrap();
            let outcome = solver.solve(&shape, NoOperationMonitor::new());
            let ruler = outcome.ruler().expect("known optimal length must be found");
            assert_eq!(ruler.marks(), marks);
            assert_eq!(ruler.length(), length);
            assert!(ruler.is_valid(), "invalid ruler {}", ruler);
            assert!(table.is_optimal(ruler));
        }
    }

    #[test]
    fn test_found_ruler_respects_symmetry_bound() {
        for (marks, length) in [(4, 6), (5, 11), (6, 17), (7, 25)] {
            let outcome = solve(marks, length);
            let ruler = outcome.ruler().unwrap();
            assert!(ruler.positions()[1] <= (length / 2).max(1));
        }
    }

    #[test]
    fn test_solve_from_prefix_continues_below_prefix() {
        let shape = RulerShape::new(5, 11).unwrap();
        let outcome = BnbSolver::new().solve_from_prefix(&shape, &[0, 1, 4], NoOperationMonitor::new());
        assert_eq!(positions(&outcome), Some(vec![0, 1, 4, 9, 11]));
    }

    #[test]
    fn test_solve_from_prefix_ignores_symmetry_bound_beyond_root() {
        // The mirror of 0,1,4,6 has its second mark above 6 / 2.
        let shape = RulerShape::new(4, 6).unwrap();
        let outcome = BnbSolver::new().solve_from_prefix(&shape, &[0, 2], NoOperationMonitor::new());
        assert_eq!(positions(&outcome), Some(vec![0, 2, 5, 6]));
    }

    #[test]
    fn test_solve_from_complete_prefix() {
        let shape = RulerShape::new(4, 6).unwrap();
        let mut solver = BnbSolver::new();
        let found = solver.solve_from_prefix(&shape, &[0, 1, 4, 6], NoOperationMonitor::new());
        assert_eq!(positions(&found), Some(vec![0, 1, 4, 6]));

        let colliding = solver.solve_from_prefix(&shape, &[0, 1, 4, 5], NoOperationMonitor::new());
        assert!(colliding.ruler().is_none());
    }

    #[test]
    fn test_invalid_prefixes_are_not_found() {
        let shape = RulerShape::new(5, 11).unwrap();
        let mut solver = BnbSolver::new();
        for prefix in [
            &[][..],
            &[1, 2][..],
            &[0, 1, 2][..],
            &[0, 4, 1][..],
            &[0, 12][..],
            &[0, 1, 3, 7, 9, 11][..],
        ] {
            let outcome = solver.solve_from_prefix(&shape, prefix, NoOperationMonitor::new());
            assert_eq!(
                outcome.result(),
                &SolverResult::NotFound,
                "prefix {:?} should not be searchable",
                prefix
            );
        }
    }

    #[test]
    fn test_interrupt_before_start_aborts() {
        let flag = AtomicBool::new(true);
        let mut interrupt = InterruptMonitor::new(&flag);
        let shape = RulerShape::new(10, 55).unwrap();

        let outcome = BnbSolver::new().solve(
            &shape,
            WrapperMonitor::new(&mut interrupt as &mut dyn SearchMonitor),
        );

        assert!(outcome.is_aborted());
        assert_eq!(outcome.result(), &SolverResult::Unknown);
        assert_eq!(
            outcome.termination_reason(),
            &TerminationReason::Aborted("Interrupt signal received".to_string())
        );
        assert_eq!(outcome.statistics().nodes_explored, 0);
    }

    struct NodeLimitMonitor {
        limit: u64,
        solutions: Vec<Ruler>,
        prunes: Vec<PruneReason>,
    }

    impl NodeLimitMonitor {
        fn new(limit: u64) -> Self {
            Self {
                limit,
                solutions: Vec::new(),
                prunes: Vec::new(),
            }
        }
    }

    impl TreeSearchMonitor for NodeLimitMonitor {
        fn name(&self) -> &str {
            "NodeLimitMonitor"
        }
        fn on_enter_search(&mut self, _shape: &RulerShape, _statistics: &BnbSolverStatistics) {}
        fn on_exit_search(&mut self, _statistics: &BnbSolverStatistics) {}
        fn search_command(
            &mut self,
            _state: &SearchState,
            statistics: &BnbSolverStatistics,
        ) -> SearchCommand {
            if statistics.nodes_explored >= self.limit {
                SearchCommand::Terminate("node limit".to_string())
            } else {
                SearchCommand::Continue
            }
        }
        fn on_step(&mut self, _state: &SearchState, _statistics: &BnbSolverStatistics) {}
        fn on_prune(
            &mut self,
            _state: &SearchState,
            reason: PruneReason,
            _statistics: &BnbSolverStatistics,
        ) {
            self.prunes.push(reason);
        }
        fn on_descend(&mut self, _state: &SearchState, _position: u32, _statistics: &BnbSolverStatistics) {}
        fn on_backtrack(&mut self, _state: &SearchState, _statistics: &BnbSolverStatistics) {}
        fn on_solution_found(&mut self, ruler: &Ruler, _statistics: &BnbSolverStatistics) {
            self.solutions.push(ruler.clone());
        }
    }

    #[test]
    fn test_monitor_can_stop_mid_search() {
        let shape = RulerShape::new(10, 55).unwrap();
        let mut monitor = NodeLimitMonitor::new(50);

        let outcome = BnbSolver::new().solve(&shape, &mut monitor);

        assert_eq!(
            outcome.termination_reason(),
            &TerminationReason::Aborted("node limit".to_string())
        );
        assert_eq!(outcome.statistics().nodes_explored, 50);
        assert!(monitor.solutions.is_empty());
    }

    #[test]
    fn test_monitor_sees_solution() {
        let shape = RulerShape::new(4, 6).unwrap();
        let mut monitor = NodeLimitMonitor::new(u64::MAX);
        let outcome = BnbSolver::new().solve(&shape, &mut monitor);
        assert_eq!(monitor.solutions.len(), 1);
        assert_eq!(outcome.ruler(), monitor.solutions.first());
    }

    #[test]
    fn test_statistics_coherence_after_solve() {
        let outcome = solve(6, 17);
        let stats = outcome.statistics();
        assert_eq!(stats.solutions_found, 1);
        assert_eq!(stats.max_depth, 6);
        assert!(stats.nodes_explored > stats.backtracks);
        assert!(stats.collisions > 0);

        let exhausted = solve(4, 5);
        assert_eq!(exhausted.statistics().solutions_found, 0);
        assert!(exhausted.statistics().nodes_explored > 0);
    }

    #[test]
    fn test_solver_is_reusable_across_shapes() {
        let mut solver = BnbSolver::new();
        let shapes = [(5, 11), (4, 5), (3, 3), (6, 17), (4, 6)];
        let expected: [Option<&[u32]>; 5] = [
            Some(&[0, 1, 4, 9, 11][..]),
            None,
            Some(&[0, 1, 3][..]),
            Some(&[0, 1, 4, 10, 12, 17][..]),
            Some(&[0, 1, 4, 6][..]),
        ];

        for ((marks, length), expected) in shapes.into_iter().zip(expected) {
            let shape = RulerShape::new(marks, length).unwrap();
            let outcome = solver.solve(&shape, NoOperationMonitor::new());
            assert_eq!(outcome.ruler().map(Ruler::positions), expected);
        }
    }

    #[test]
    fn test_deterministic_across_runs() {
        let first = solve(7, 25);
        let second = solve(7, 25);
        assert_eq!(first.ruler(), second.ruler());
        assert_eq!(
            first.statistics().nodes_explored,
            second.statistics().nodes_explored
        );
    }

    #[test]
    fn test_complete_prefix_short_of_length_is_pruned() {
        // 0, 1, 3 is a complete Golomb ruler, but one unit short of 4.
        let shape = RulerShape::new(3, 4).unwrap();
        let mut monitor = NodeLimitMonitor::new(u64::MAX);

        let outcome = BnbSolver::new().solve_from_prefix(&shape, &[0, 1, 3], &mut monitor);

        assert_eq!(outcome.result(), &SolverResult::NotFound);
        assert_eq!(monitor.prunes, vec![PruneReason::LengthMismatch]);
    }

    #[test]
    fn test_trivially_infeasible_shape_explores_no_nodes() {
        for (marks, length) in [(5, 3), (2, 0), (32, 30)] {
            let outcome = solve(marks, length);
            assert_eq!(outcome.result(), &SolverResult::NotFound);
            assert_eq!(outcome.statistics().nodes_explored, 0);
        }
    }

    /// Exhaustive existence check that places every interior mark freely,
    /// without the symmetry bound or any pruning.
    fn exists_by_enumeration(marks: usize, length: u32) -> bool {
        fn extend(positions: &mut Vec<u32>, marks: usize, length: u32) -> bool {
            if positions.len() == marks - 1 {
                positions.push(length);
                let valid = Ruler::new(length, marks, positions.clone())
                    .is_ok_and(|ruler| ruler.is_valid());
                positions.pop();
                return valid;
            }

            let start = positions.last().map_or(0, |&p| p + 1);
            for position in start..length {
                positions.push(position);
                let found = extend(positions, marks, length);
                positions.pop();
                if found {
                    return true;
                }
            }
            false
        }

        length > 0 && extend(&mut vec![0], marks, length)
    }

    #[test]
    fn test_symmetry_bound_keeps_every_reflection_class() {
        let mut solver = BnbSolver::new();
        let mut mismatches = Vec::new();

        for marks in 2..=6 {
            for length in 0..=22 {
                let shape = RulerShape::new(marks, length).unwrap();
                let found = solver.solve(&shape, NoOperationMonitor::new()).ruler().is_some();
                if found != exists_by_enumeration(marks, length) {
                    mismatches.push((marks, length));
                }
            }
        }

        assert!(mismatches.is_empty(), "engine disagrees for {:?}", mismatches);
    }
}
