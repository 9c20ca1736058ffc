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

//! Adapter for engine-agnostic search monitors
//!
//! `WrapperMonitor` bridges this crate's `TreeSearchMonitor` with a generic
//! `SearchMonitor` from `golomb_search`. It forwards lifecycle events and
//! commands to the inner monitor while ignoring tree-specific callbacks.
//!
//! Behavior
//! - Delegates: enter, step, solution, exit, and `search_command`.
//! - No-ops: prune, descend, and backtrack.
//! - `name()` is `WrapperMonitor(inner.name())`.

use crate::{
    monitor::tree_search_monitor::{PruneReason, TreeSearchMonitor},
    state::SearchState,
    stats::BnbSolverStatistics,
};
use golomb_model::ruler::Ruler;
use golomb_search::{
    monitor::search_monitor::{SearchCommand, SearchMonitor},
    shape::RulerShape,
};

/// A tree search monitor that wraps a general search monitor.
pub struct WrapperMonitor<'a> {
    inner: &'a mut dyn SearchMonitor,
    name: String,
}

impl<'a> WrapperMonitor<'a> {
    /// Creates a new `WrapperMonitor` that wraps the given search monitor.
    #[inline(always)]
    pub fn new(inner: &'a mut dyn SearchMonitor) -> Self {
        let name = format!("WrapperMonitor({})", inner.name());
        Self { inner, name }
    }
}

impl std::fmt::Debug for WrapperMonitor<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WrapperMonitor")
            .field("inner", &self.inner.name())
            .finish()
    }
}

impl TreeSearchMonitor for WrapperMonitor<'_> {
    #[inline(always)]
    fn name(&self) -> &str {
        &self.name
    }

    #[inline(always)]
    fn on_enter_search(&mut self, shape: &RulerShape, _statistics: &BnbSolverStatistics) {
        self.inner.on_enter_search(shape);
    }

    #[inline(always)]
    fn on_exit_search(&mut self, _statistics: &BnbSolverStatistics) {
        self.inner.on_exit_search();
    }

    #[inline(always)]
    fn search_command(
        &mut self,
        _state: &SearchState,
        _statistics: &BnbSolverStatistics,
    ) -> SearchCommand {
        self.inner.search_command()
    }

    #[inline(always)]
    fn on_step(&mut self, _state: &SearchState, _statistics: &BnbSolverStatistics) {
        self.inner.on_step();
    }

    #[inline(always)]
    fn on_prune(
        &mut self,
        _state: &SearchState,
        _reason: PruneReason,
        _statistics: &BnbSolverStatistics,
    ) {
    }

    #[inline(always)]
    fn on_descend(&mut self, _state: &SearchState, _position: u32, _statistics: &BnbSolverStatistics) {}

    #[inline(always)]
    fn on_backtrack(&mut self, _state: &SearchState, _statistics: &BnbSolverStatistics) {}

    #[inline(always)]
    fn on_solution_found(&mut self, ruler: &Ruler, _statistics: &BnbSolverStatistics) {
        self.inner.on_solution_found(ruler);
    }
}

#[cfg(test)]
mod tests {
    use super::WrapperMonitor;
    use crate::{
        monitor::tree_search_monitor::TreeSearchMonitor, state::SearchState,
        stats::BnbSolverStatistics,
    };
    use golomb_search::monitor::{
        interrupt::InterruptMonitor,
        search_monitor::{SearchCommand, SearchMonitor},
    };
    use std::sync::atomic::{AtomicBool, Ordering};

    #[test]
    fn test_forwards_search_command() {
        let flag = AtomicBool::new(false);
        let mut inner = InterruptMonitor::new(&flag);
        let mut wrapper = WrapperMonitor::new(&mut inner as &mut dyn SearchMonitor);
        let state = SearchState::new();
        let stats = BnbSolverStatistics::default();

        assert_eq!(wrapper.name(), "WrapperMonitor(InterruptMonitor)");
        assert_eq!(wrapper.search_command(&state, &stats), SearchCommand::Continue);

        flag.store(true, Ordering::Relaxed);
        assert!(matches!(
            wrapper.search_command(&state, &stats),
            SearchCommand::Terminate(_)
        ));
    }
}
