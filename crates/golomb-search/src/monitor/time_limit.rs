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

//! # Time Limit Monitor
//!
//! Enforces a caller-imposed wall-clock budget on the search. Elapsed time is
//! only sampled when `(steps & clock_check_mask) == 0`, so the clock is read
//! roughly once every 2^14 steps with the default mask.
//!
//! ## Usage
//!
//! ```rust
//! use golomb_search::monitor::time_limit::TimeLimitMonitor;
//! use golomb_search::monitor::search_monitor::{SearchMonitor, SearchCommand};
//! use std::time::Duration;
//!
//! let mut mon = TimeLimitMonitor::new(Duration::from_secs(5));
//! mon.on_step();
//! match mon.search_command() {
//!     SearchCommand::Continue => { /* keep searching */ }
//!     SearchCommand::Terminate(reason) => { /* stop: reason */ }
//! }
//! ```

use crate::{
    monitor::search_monitor::{SearchCommand, SearchMonitor},
    shape::RulerShape,
};
use golomb_model::ruler::Ruler;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeLimitMonitor {
    clock_check_mask: u64,
    steps: u64,
    time_limit: std::time::Duration,
    start_time: std::time::Instant,
}

impl TimeLimitMonitor {
    /// Default mask: Check every 16,384 steps (2^14).
    const DEFAULT_STEP_CLOCK_CHECK_MASK: u64 = 0x3FFF;

    #[inline]
    pub fn new(time_limit: std::time::Duration) -> Self {
        Self::with_clock_check_mask(time_limit, Self::DEFAULT_STEP_CLOCK_CHECK_MASK)
    }

    #[inline]
    pub fn with_clock_check_mask(time_limit: std::time::Duration, clock_check_mask: u64) -> Self {
        Self {
            clock_check_mask,
            steps: 0,
            time_limit,
            start_time: std::time::Instant::now(),
        }
    }

    /// Creates a monitor whose budget is measured from `start_time` instead
    /// of from `on_enter_search`. Parallel workers share one start instant.
    #[inline]
    pub fn starting_at(time_limit: std::time::Duration, start_time: std::time::Instant) -> Self {
        Self {
            clock_check_mask: Self::DEFAULT_STEP_CLOCK_CHECK_MASK,
            steps: 0,
            time_limit,
            start_time,
        }
    }

    #[inline]
    pub fn time_limit(&self) -> std::time::Duration {
        self.time_limit
    }
}

impl SearchMonitor for TimeLimitMonitor {
    fn name(&self) -> &str {
        "TimeLimitMonitor"
    }

    fn on_enter_search(&mut self, _shape: &RulerShape) {
        self.steps = 0;
    }

    fn on_exit_search(&mut self) {}

    fn on_solution_found(&mut self, _ruler: &Ruler) {}

    #[inline(always)]
    fn on_step(&mut self) {
        self.steps = self.steps.wrapping_add(1);
    }

    #[inline(always)]
    fn search_command(&self) -> SearchCommand {
        if (self.steps & self.clock_check_mask) == 0 && self.start_time.elapsed() >= self.time_limit
        {
            return SearchCommand::Terminate("time limit reached".to_string());
        }
        SearchCommand::Continue
    }
}
