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

//! # Parallel Ruler Search
//!
//! Divide-and-conquer decomposition of the exact-length search over a
//! `rayon` pool. The range of second-mark positions `1..=max(1, length / 2)`
//! is split in halves with `rayon::join` until a range holds at most
//! `leaf_size` positions. A leaf enumerates the third mark over
//! `second + 1 ..= length - (marks - 3)`, skips prefixes `[0, second, third]`
//! whose three distances are not distinct, and hands each prefix to a
//! sequential `BnbSolver`.
//!
//! ## Highlights
//!
//! - The first ruler found is published through a shared `ResultSlot`; every
//!   other worker observes the slot through a `PublishedMonitor` and stops.
//! - Every worker also watches the caller's stop flag (`InterruptMonitor`) and
//!   the optional deadline (`TimeLimitMonitor`).
//! - Publishing does not touch the caller's stop flag, so a search that found a
//!   ruler never reports itself as cancelled.
//! - Shapes with three or fewer marks have no third-mark fan-out and run
//!   on the sequential engine.

use golomb_bnb::{
    bnb::BnbSolver, monitor::wrapper::WrapperMonitor, result::BnbSolverOutcome,
    stats::BnbSolverStatistics,
};
use golomb_search::{
    monitor::{
        composite::CompositeMonitor,
        interrupt::InterruptMonitor,
        published::PublishedMonitor,
        search_monitor::{SearchCommand, SearchMonitor},
        time_limit::TimeLimitMonitor,
    },
    result::{SolverOutcome, SolverResult, TerminationReason},
    shape::RulerShape,
    slot::ResultSlot,
    stats::SolverStatisticsBuilder,
};
use std::{
    sync::{Mutex, PoisonError, atomic::AtomicBool},
    time::{Duration, Instant},
};

/// Configuration of the parallel engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParallelSolver {
    threads: usize,
    leaf_size: u32,
    verbose: bool,
}

impl Default for ParallelSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl ParallelSolver {
    /// Number of second-mark positions a leaf task enumerates sequentially.
    pub const DEFAULT_LEAF_SIZE: u32 = 10;

    /// Creates a parallel solver that uses all available hardware threads.
    #[inline]
    pub fn new() -> Self {
        let threads = std::thread::available_parallelism().map_or(1, |n| n.get());
        Self {
            threads,
            leaf_size: Self::DEFAULT_LEAF_SIZE,
            verbose: false,
        }
    }

    /// Sets the worker count. Zero is treated as one.
    #[inline]
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads.max(1);
        self
    }

    /// Sets the leaf size. Zero is treated as one.
    #[inline]
    pub fn with_leaf_size(mut self, leaf_size: u32) -> Self {
        self.leaf_size = leaf_size.max(1);
        self
    }

    /// Prints a line to stdout whenever a leaf range is finished.
    #[inline]
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    #[inline]
    pub fn threads(&self) -> usize {
        self.threads
    }

    #[inline]
    pub fn leaf_size(&self) -> u32 {
        self.leaf_size
    }

    /// Searches for a ruler of the given shape.
    ///
    /// The search stops early when `stop_flag` is raised or when
    /// `time_limit` (measured from this call) expires.
    pub fn solve(
        &self,
        shape: &RulerShape,
        stop_flag: &AtomicBool,
        time_limit: Option<Duration>,
    ) -> SolverOutcome {
        let start_time = Instant::now();

        if shape.marks() <= 3 {
            return self.solve_sequential(shape, stop_flag, time_limit, start_time);
        }

        let context = WorkerContext {
            shape: *shape,
            stop_flag,
            time_limit,
            start_time,
            slot: ResultSlot::new(),
            statistics: Mutex::new(BnbSolverStatistics::default()),
        };

        let upper = (shape.length() / 2).max(1);
        let run = || self.split(&context, 1, upper);

        let (abort_reason, used_threads) = match rayon::ThreadPoolBuilder::new()
            .num_threads(self.threads)
            .build()
        {
            Ok(pool) => (pool.install(run), pool.current_num_threads()),
            // Fall back to the global pool if a dedicated one cannot be spawned.
            Err(_) => (run(), rayon::current_num_threads()),
        };

        let WorkerContext {
            slot, statistics, ..
        } = context;
        let totals = statistics
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner);
        let statistics = SolverStatisticsBuilder::new()
            .nodes_explored(totals.nodes_explored)
            .backtracks(totals.backtracks)
            .collisions(totals.collisions)
            .used_threads(used_threads)
            .solve_duration(start_time.elapsed())
            .build();

        match (slot.into_inner(), abort_reason) {
            (Some(ruler), _) => SolverOutcome::found(ruler, statistics),
            (None, Some(reason)) => SolverOutcome::aborted(reason, statistics),
            (None, None) => SolverOutcome::not_found(statistics),
        }
    }

    fn solve_sequential(
        &self,
        shape: &RulerShape,
        stop_flag: &AtomicBool,
        time_limit: Option<Duration>,
        start_time: Instant,
    ) -> SolverOutcome {
        let mut monitor = CompositeMonitor::with_capacity(2);
        monitor.add_monitor(InterruptMonitor::new(stop_flag));
        if let Some(limit) = time_limit {
            monitor.add_monitor(TimeLimitMonitor::starting_at(limit, start_time));
        }

        let outcome = BnbSolver::preallocated(shape.marks(), shape.length())
            .solve(shape, WrapperMonitor::new(&mut monitor));
        outcome.into()
    }

    /// Splits `lo..=hi` until it fits a leaf. Returns the first abort
    /// reason reported by any leaf.
    fn split(&self, context: &WorkerContext<'_>, lo: u32, hi: u32) -> Option<String> {
        if lo > hi {
            return None;
        }

        if hi - lo < self.leaf_size {
            return self.leaf(context, lo, hi);
        }

        let mid = lo + (hi - lo) / 2;
        let (left, right) = rayon::join(
            || self.split(context, lo, mid),
            || self.split(context, mid + 1, hi),
        );
        left.or(right)
    }

    fn leaf(&self, context: &WorkerContext<'_>, lo: u32, hi: u32) -> Option<String> {
        let shape = &context.shape;
        let mut monitor = context.monitor();
        let mut solver = BnbSolver::preallocated(shape.marks(), shape.length());
        let mut statistics = BnbSolverStatistics::default();

        let third_max = shape.length().checked_sub((shape.marks() - 3) as u32);
        let mut abort_reason = None;

        'second: for second in lo..=hi {
            let Some(third_max) = third_max else {
                break;
            };

            for third in (second + 1)..=third_max {
                if let SearchCommand::Terminate(reason) = monitor.search_command() {
                    abort_reason = Some(reason);
                    break 'second;
                }

                // third > second and third > third - second, so only these two can clash.
                if third == 2 * second {
                    continue;
                }

                let outcome = solver.solve_from_prefix(
                    shape,
                    &[0, second, third],
                    WrapperMonitor::new(&mut monitor),
                );
                statistics.merge(outcome.statistics());

                match self.handle_outcome(context, outcome) {
                    LeafStep::Continue => {}
                    LeafStep::Done => break 'second,
                    LeafStep::Aborted(reason) => {
                        abort_reason = Some(reason);
                        break 'second;
                    }
                }
            }
        }

        context
            .statistics
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .merge(&statistics);

        if self.verbose {
            println!(
                "Second mark {}..={} done: {} nodes{}",
                lo,
                hi,
                statistics.nodes_explored,
                abort_reason
                    .as_deref()
                    .map_or_else(String::new, |r| format!(" (stopped: {})", r))
            );
        }

        abort_reason
    }

    #[inline]
    fn handle_outcome(&self, context: &WorkerContext<'_>, outcome: BnbSolverOutcome) -> LeafStep {
        match outcome.into_parts() {
            (SolverResult::Found(ruler), _, _) => {
                context.slot.try_publish(&ruler);
                LeafStep::Done
            }
            (SolverResult::NotFound, _, _) => LeafStep::Continue,
            (SolverResult::Unknown, _, _) if context.slot.is_published() => LeafStep::Done,
            (SolverResult::Unknown, TerminationReason::Aborted(reason), _) => {
                LeafStep::Aborted(reason)
            }
            (SolverResult::Unknown, reason, _) => LeafStep::Aborted(reason.to_string()),
        }
    }
}

impl std::fmt::Display for ParallelSolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "ParallelSolver(threads: {}, leaf_size: {})",
            self.threads, self.leaf_size
        )
    }
}

enum LeafStep {
    Continue,
    Done,
    Aborted(String),
}

/// State shared by every task of one parallel search.
struct WorkerContext<'a> {
    shape: RulerShape,
    stop_flag: &'a AtomicBool,
    time_limit: Option<Duration>,
    start_time: Instant,
    slot: ResultSlot,
    statistics: Mutex<BnbSolverStatistics>,
}

impl WorkerContext<'_> {
    /// Builds the monitor stack every worker polls.
    fn monitor(&self) -> CompositeMonitor<'_> {
        let mut monitor = CompositeMonitor::with_capacity(3);
        monitor.add_monitor(InterruptMonitor::new(self.stop_flag));
        monitor.add_monitor(PublishedMonitor::new(&self.slot));
        if let Some(limit) = self.time_limit {
            monitor.add_monitor(TimeLimitMonitor::starting_at(limit, self.start_time));
        }
        monitor
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use golomb_model::{known::KnownOptimalTable, ruler::Ruler};

    fn shape(marks: usize, length: u32) -> RulerShape {
        RulerShape::new(marks, length).expect("valid shape")
    }

    fn assert_ruler_or_mirror(ruler: &Ruler, expected: &[u32]) {
        let mirror = ruler.reflect();
        assert!(
            ruler.positions() == expected || mirror.positions() == expected,
            "unexpected ruler {}",
            ruler
        );
    }

    #[test]
    fn test_parallel_finds_known_optimal_rulers() {
        let table = KnownOptimalTable::global();
        let solver = ParallelSolver::new().with_threads(4);
        let stop = AtomicBool::new(false);

        for marks in 4..=8 {
            let length = table.length(marks).expect("known length");
            let outcome = solver.solve(&shape(marks, length), &stop, None);
            let ruler = outcome.ruler().expect("ruler expected");
            assert!(ruler.is_valid());
            assert_eq!(ruler.marks(), marks);
            assert_eq!(ruler.length(), length);
            assert_eq!(outcome.reason, TerminationReason::ExistenceProven);
        }
    }

    #[test]
    fn test_parallel_result_matches_table_ruler_up_to_reflection() {
        let solver = ParallelSolver::new().with_threads(2).with_leaf_size(1);
        let stop = AtomicBool::new(false);

        let outcome = solver.solve(&shape(5, 11), &stop, None);
        let ruler = outcome.ruler().expect("ruler expected");
        assert_ruler_or_mirror(ruler, &[0, 1, 4, 9, 11]);
    }

    #[test]
    fn test_parallel_reports_not_found_below_optimum() {
        let solver = ParallelSolver::new().with_threads(2);
        let stop = AtomicBool::new(false);

        let outcome = solver.solve(&shape(6, 16), &stop, None);
        assert!(outcome.ruler().is_none());
        assert_eq!(outcome.result, SolverResult::NotFound);
        assert_eq!(outcome.reason, TerminationReason::NonExistenceProven);
        assert!(outcome.statistics.nodes_explored > 0);
    }

    #[test]
    fn test_small_shapes_use_sequential_engine() {
        let solver = ParallelSolver::new().with_threads(2);
        let stop = AtomicBool::new(false);

        let two = solver.solve(&shape(2, 5), &stop, None);
        assert_eq!(two.ruler().map(|r| r.positions().to_vec()), Some(vec![0, 5]));

        let three = solver.solve(&shape(3, 3), &stop, None);
        assert_eq!(
            three.ruler().map(|r| r.positions().to_vec()),
            Some(vec![0, 1, 3])
        );
        assert_eq!(three.statistics.used_threads, 1);
    }

    #[test]
    fn test_raised_stop_flag_aborts_immediately() {
        let solver = ParallelSolver::new().with_threads(2);
        let stop = AtomicBool::new(true);

        let outcome = solver.solve(&shape(12, 84), &stop, None);
        assert!(outcome.ruler().is_none());
        assert!(outcome.is_aborted());
    }

    #[test]
    fn test_zero_time_limit_aborts() {
        let solver = ParallelSolver::new().with_threads(2);
        let stop = AtomicBool::new(false);

        let outcome = solver.solve(&shape(12, 84), &stop, Some(Duration::ZERO));
        assert!(outcome.ruler().is_none());
        assert!(outcome.is_aborted());
    }

    #[test]
    fn test_builder_clamps_zero_values() {
        let solver = ParallelSolver::new().with_threads(0).with_leaf_size(0);
        assert_eq!(solver.threads(), 1);
        assert_eq!(solver.leaf_size(), 1);
        assert_eq!(
            solver.to_string(),
            "ParallelSolver(threads: 1, leaf_size: 1)"
        );
    }

    /// Existence by plain enumeration of all interior marks.
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
            (start..length).any(|position| {
                positions.push(position);
                let found = extend(positions, marks, length);
                positions.pop();
                found
            })
        }

        length > 0 && extend(&mut vec![0], marks, length)
    }

    #[test]
    fn test_decomposition_agrees_with_enumeration() {
        let solver = ParallelSolver::new().with_threads(4).with_leaf_size(1);
        let stop = AtomicBool::new(false);
        let mut mismatches = Vec::new();

        for marks in 2..=6 {
            for length in 0..=22 {
                let outcome = solver.solve(&shape(marks, length), &stop, None);
                if let Some(ruler) = outcome.ruler() {
                    assert!(ruler.is_valid(), "invalid ruler {}", ruler);
                    assert_eq!(ruler.length(), length);
                }
                if outcome.has_ruler() != exists_by_enumeration(marks, length) {
                    mismatches.push((marks, length));
                }
            }
        }

        assert!(mismatches.is_empty(), "parallel engine disagrees for {:?}", mismatches);
    }
}
