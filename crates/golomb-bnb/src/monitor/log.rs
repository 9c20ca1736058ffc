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

use crate::{
    monitor::tree_search_monitor::{PruneReason, TreeSearchMonitor},
    state::SearchState,
    stats::BnbSolverStatistics,
};
use golomb_model::ruler::Ruler;
use golomb_search::shape::RulerShape;
use std::time::{Duration, Instant};

/// Prints a progress table to stdout while the search runs.
///
/// A line is emitted on a step whose node counter matches `clock_check_mask`
/// and only if `log_interval` elapsed since the previous line.
#[derive(Debug, Clone)]
pub struct LogTreeSearchMonitor {
    start_time: Instant,
    last_log_time: Instant,
    log_interval: Duration,
    clock_check_mask: u64,
    found: Option<Ruler>,
}

impl LogTreeSearchMonitor {
    const TABLE_WIDTH: usize = 84;

    /// Nodes between two clock reads.
    pub const DEFAULT_CLOCK_CHECK_MASK: u64 = 4095;

    pub fn new(log_interval: Duration, clock_check_mask: u64) -> Self {
        Self {
            start_time: Instant::now(),
            last_log_time: Instant::now(),
            log_interval,
            clock_check_mask,
            found: None,
        }
    }

    #[inline(always)]
    fn print_header(&self, shape: &RulerShape) {
        println!(
            "Searching marks={} length={}",
            shape.marks(),
            shape.length()
        );
        println!(
            "{:<9} | {:<14} | {:<5} | {:<10} | {:<12} | {:<12}",
            "Elapsed", "Nodes", "Depth", "Last Mark", "Backtracks", "Collisions"
        );
        println!("{}", "-".repeat(Self::TABLE_WIDTH));
    }

    #[inline(always)]
    fn log_line(&mut self, state: &SearchState, stats: &BnbSolverStatistics) {
        let now = Instant::now();
        let elapsed = now.duration_since(self.start_time).as_secs_f32();

        let last_mark = state
            .positions()
            .last()
            .map_or_else(|| "-".to_string(), |p| p.to_string());
        let elapsed_field = format!("{:.1}s", elapsed);

        println!(
            "{:<9} | {:<14} | {:<5} | {:<10} | {:<12} | {:<12}",
            elapsed_field,
            stats.nodes_explored,
            state.depth(),
            last_mark,
            stats.backtracks,
            stats.collisions
        );

        self.last_log_time = now;
    }
}

impl Default for LogTreeSearchMonitor {
    fn default() -> Self {
        Self::new(Duration::from_secs(1), Self::DEFAULT_CLOCK_CHECK_MASK)
    }
}

impl std::fmt::Display for LogTreeSearchMonitor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "LogTreeSearchMonitor(log_interval: {}s, clock_check_mask: {})",
            self.log_interval.as_secs(),
            self.clock_check_mask
        )
    }
}

impl TreeSearchMonitor for LogTreeSearchMonitor {
    fn name(&self) -> &str {
        "LogTreeSearchMonitor"
    }

    fn on_enter_search(&mut self, shape: &RulerShape, _stats: &BnbSolverStatistics) {
        self.start_time = Instant::now();
        self.last_log_time = self.start_time;
        self.found = None;
        self.print_header(shape);
    }

    fn on_exit_search(&mut self, stats: &BnbSolverStatistics) {
        println!("{}", "-".repeat(Self::TABLE_WIDTH));
        match &self.found {
            Some(ruler) => println!("Search finished: found {}", ruler),
            None => println!("Search finished: no ruler found"),
        }
        println!(
            "Explored {} nodes in {:.3}s",
            stats.nodes_explored,
            self.start_time.elapsed().as_secs_f64()
        );
    }

    fn on_step(&mut self, state: &SearchState, stats: &BnbSolverStatistics) {
        if (stats.nodes_explored & self.clock_check_mask) == 0
            && self.last_log_time.elapsed() >= self.log_interval
        {
            self.log_line(state, stats);
        }
    }

    fn on_prune(&mut self, _state: &SearchState, _reason: PruneReason, _stats: &BnbSolverStatistics) {}

    fn on_descend(&mut self, _state: &SearchState, _position: u32, _stats: &BnbSolverStatistics) {}

    fn on_backtrack(&mut self, _state: &SearchState, _stats: &BnbSolverStatistics) {}

    fn on_solution_found(&mut self, ruler: &Ruler, _stats: &BnbSolverStatistics) {
        self.found = Some(ruler.clone());
    }
}
