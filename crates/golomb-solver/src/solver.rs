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

//! # Golomb Solver Facade
//!
//! Entry point for exact-length Golomb ruler searches. A `GolombSolver`
//! validates the requested shape, picks the sequential or the parallel
//! engine and owns the stop flag that `cancel` raises.
//!
//! ## Highlights
//!
//! - Engine selection through `SearchMode`:
//!   - `Auto` runs the parallel engine for more than three marks.
//!   - `Sequential` always runs a single `BnbSolver`.
//!   - `Parallel` always runs the `ParallelSolver`.
//! - Cancellation:
//!   - `cancel` is safe to call from any thread while a search is running.
//!   - Each search clears the flag before work begins, so a cancel issued
//!     before `search` is called has no effect on it.
//! - Outcomes:
//!   - `search` returns the ruler or `None`; a cancelled search and an
//!     exhausted one both yield `None`.
//!   - `search_with_outcome` keeps the termination reason and statistics.
//!
//! ## Usage
//!
//! ```rust
//! use golomb_solver::solver::SolverBuilder;
//!
//! let solver = SolverBuilder::new().with_threads(2).build();
//! let ruler = solver.search(5, 11).expect("valid input").expect("ruler exists");
//! assert_eq!(ruler.length(), 11);
//! assert!(ruler.is_valid());
//! ```

use crate::parallel::ParallelSolver;
use golomb_bnb::{
    bnb::BnbSolver,
    monitor::{
        composite::CompositeTreeSearchMonitor, log::LogTreeSearchMonitor,
        wrapper::WrapperMonitor,
    },
};
use golomb_model::ruler::Ruler;
use golomb_search::{
    monitor::{
        composite::CompositeMonitor, interrupt::InterruptMonitor, time_limit::TimeLimitMonitor,
    },
    result::SolverOutcome,
    shape::{RulerShape, SearchError},
};
use std::{
    sync::atomic::{AtomicBool, Ordering},
    time::Duration,
};

/// Selects the engine used by `GolombSolver`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SearchMode {
    /// Parallel for more than three marks, sequential otherwise.
    #[default]
    Auto,
    Sequential,
    Parallel,
}

impl SearchMode {
    /// Returns `true` if a search for `marks` marks runs on the parallel engine.
    #[inline]
    pub fn is_parallel_for(&self, marks: usize) -> bool {
        match self {
            SearchMode::Auto => marks > 3,
            SearchMode::Sequential => false,
            SearchMode::Parallel => true,
        }
    }
}

impl std::fmt::Display for SearchMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SearchMode::Auto => write!(f, "Auto"),
            SearchMode::Sequential => write!(f, "Sequential"),
            SearchMode::Parallel => write!(f, "Parallel"),
        }
    }
}

pub struct GolombSolver {
    mode: SearchMode,
    parallel: ParallelSolver,
    time_limit: Option<Duration>,
    log_interval: Option<Duration>,
    /// Raised by `cancel`; every worker of the running search polls it.
    stop_signal: AtomicBool,
}

impl Default for GolombSolver {
    fn default() -> Self {
        SolverBuilder::new().build()
    }
}

impl GolombSolver {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn mode(&self) -> SearchMode {
        self.mode
    }

    #[inline]
    pub fn threads(&self) -> usize {
        self.parallel.threads()
    }

    #[inline]
    pub fn time_limit(&self) -> Option<Duration> {
        self.time_limit
    }

    #[inline]
    pub fn has_time_limit(&self) -> bool {
        self.time_limit.is_some()
    }

    /// Searches for a ruler with `marks` marks whose last mark is exactly at
    /// `length`.
    ///
    /// Returns `Ok(None)` both when no such ruler exists and when the search
    /// was cancelled or ran out of time.
    ///
    /// # Errors
    ///
    /// Returns `SearchError` if `marks` is outside `2..=32` or `length`
    /// exceeds 600. No search work is done in that case.
    pub fn search(&self, marks: usize, length: u32) -> Result<Option<Ruler>, SearchError> {
        Ok(self.search_with_outcome(marks, length)?.into_ruler())
    }

    /// Like `search`, but returns the full outcome including the termination
    /// reason and statistics.
    ///
    /// # Errors
    ///
    /// Returns `SearchError` for out-of-range input.
    pub fn search_with_outcome(
        &self,
        marks: usize,
        length: u32,
    ) -> Result<SolverOutcome, SearchError> {
        let shape = RulerShape::new(marks, length)?;

        self.stop_signal.store(false, Ordering::Relaxed);

        let outcome = if self.mode.is_parallel_for(shape.marks()) {
            self.parallel
                .solve(&shape, &self.stop_signal, self.time_limit)
        } else {
            self.solve_sequential(&shape)
        };

        Ok(outcome)
    }

    /// Signals the running search to stop at its next poll point.
    /// Calling it repeatedly or with no search running is harmless.
    #[inline]
    pub fn cancel(&self) {
        self.stop_signal.store(true, Ordering::Relaxed);
    }

    #[inline]
    pub fn is_cancelled(&self) -> bool {
        self.stop_signal.load(Ordering::Relaxed)
    }

    fn solve_sequential(&self, shape: &RulerShape) -> SolverOutcome {
        let mut monitor = CompositeMonitor::with_capacity(2);
        monitor.add_monitor(InterruptMonitor::new(&self.stop_signal));
        if let Some(limit) = self.time_limit {
            monitor.add_monitor(TimeLimitMonitor::new(limit));
        }

        let mut solver = BnbSolver::preallocated(shape.marks(), shape.length());
        let outcome = match self.log_interval {
            Some(interval) => {
                let mut tree_monitor = CompositeTreeSearchMonitor::with_capacity(2);
                tree_monitor.add_monitor(WrapperMonitor::new(&mut monitor));
                tree_monitor.add_monitor(LogTreeSearchMonitor::new(
                    interval,
                    LogTreeSearchMonitor::DEFAULT_CLOCK_CHECK_MASK,
                ));
                solver.solve(shape, tree_monitor)
            }
            None => solver.solve(shape, WrapperMonitor::new(&mut monitor)),
        };
        outcome.into()
    }
}

impl std::fmt::Debug for GolombSolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GolombSolver")
            .field("mode", &self.mode)
            .field("parallel", &self.parallel)
            .field("time_limit", &self.time_limit)
            .field("log_interval", &self.log_interval)
            .field("cancelled", &self.is_cancelled())
            .finish()
    }
}

impl std::fmt::Display for GolombSolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "GolombSolver(mode: {}, threads: {}, time_limit: {:?})",
            self.mode,
            self.parallel.threads(),
            self.time_limit
        )
    }
}

#[derive(Debug, Clone)]
pub struct SolverBuilder {
    mode: SearchMode,
    parallel: ParallelSolver,
    time_limit: Option<Duration>,
    log_interval: Option<Duration>,
}

impl Default for SolverBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SolverBuilder {
    #[inline]
    pub fn new() -> Self {
        Self {
            mode: SearchMode::Auto,
            parallel: ParallelSolver::new(),
            time_limit: None,
            log_interval: None,
        }
    }

    #[inline]
    pub fn with_mode(mut self, mode: SearchMode) -> Self {
        self.mode = mode;
        self
    }

    /// Sets the size of the parallel worker pool.
    #[inline]
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.parallel = self.parallel.with_threads(threads);
        self
    }

    /// Stops every search after `limit`; the outcome is then reported as aborted.
    #[inline]
    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }

    #[inline]
    pub fn with_leaf_size(mut self, leaf_size: u32) -> Self {
        self.parallel = self.parallel.with_leaf_size(leaf_size);
        self
    }

    /// Enables progress output: a periodic table for sequential runs and one
    /// line per finished leaf range for parallel runs.
    #[inline]
    pub fn with_logging(mut self, interval: Duration) -> Self {
        self.log_interval = Some(interval);
        self.parallel = self.parallel.with_verbose(true);
        self
    }

    #[inline]
    pub fn build(self) -> GolombSolver {
        GolombSolver {
            mode: self.mode,
            parallel: self.parallel,
            time_limit: self.time_limit,
            log_interval: self.log_interval,
            stop_signal: AtomicBool::new(false),
        }
    }
}
