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

//! Monitoring combinators for tree search
//!
//! Provides `CompositeTreeSearchMonitor`, a fan-out monitor that forwards every
//! event to its children, so logging and early stopping can be mixed without
//! coupling them to the solver.
//!
//! Behavior
//! - Events are dispatched to child monitors in insertion order.
//! - `search_command` short-circuits on the first non-`Continue` response;
//!   put stricter stop conditions first.
//! - Other callbacks always fan out to all children.

use crate::{
    monitor::tree_search_monitor::{PruneReason, TreeSearchMonitor},
    state::SearchState,
    stats::BnbSolverStatistics,
};
use golomb_model::ruler::Ruler;
use golomb_search::{monitor::search_monitor::SearchCommand, shape::RulerShape};

/// A tree search monitor that aggregates multiple monitors and forwards events to all of them.
pub struct CompositeTreeSearchMonitor<'a> {
    monitors: Vec<Box<dyn TreeSearchMonitor + 'a>>,
}

impl Default for CompositeTreeSearchMonitor<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> CompositeTreeSearchMonitor<'a> {
    /// Creates a new empty `CompositeTreeSearchMonitor`.
    #[inline(always)]
    pub fn new() -> Self {
        Self {
            monitors: Vec::new(),
        }
    }

    /// Creates a new `CompositeTreeSearchMonitor` with the specified capacity.
    #[inline(always)]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            monitors: Vec::with_capacity(capacity),
        }
    }

    /// Adds a new monitor to the composite monitor.
    #[inline(always)]
    pub fn add_monitor<M>(&mut self, monitor: M)
    where
        M: TreeSearchMonitor + 'a,
    {
        self.monitors.push(Box::new(monitor));
    }

    /// Adds a boxed monitor to the composite monitor.
    #[inline(always)]
    pub fn add_monitor_boxed(&mut self, monitor: Box<dyn TreeSearchMonitor + 'a>) {
        self.monitors.push(monitor);
    }

    /// Returns a slice of the monitors contained in the composite monitor.
    #[inline(always)]
    pub fn monitors(&self) -> &[Box<dyn TreeSearchMonitor + 'a>] {
        &self.monitors
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.monitors.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.monitors.is_empty()
    }
}

impl std::fmt::Debug for CompositeTreeSearchMonitor<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names = self
            .monitors
            .iter()
            .map(|m| m.name())
            .collect::<Vec<&str>>()
            .join(", ");
        f.debug_struct("CompositeTreeSearchMonitor")
            .field("monitors", &names)
            .finish()
    }
}

impl TreeSearchMonitor for CompositeTreeSearchMonitor<'_> {
    fn name(&self) -> &str {
        "CompositeTreeSearchMonitor"
    }

    fn on_enter_search(&mut self, shape: &RulerShape, statistics: &BnbSolverStatistics) {
        for monitor in &mut self.monitors {
            monitor.on_enter_search(shape, statistics);
        }
    }

    fn on_exit_search(&mut self, statistics: &BnbSolverStatistics) {
        for monitor in &mut self.monitors {
            monitor.on_exit_search(statistics);
        }
    }

    fn search_command(
        &mut self,
        state: &SearchState,
        statistics: &BnbSolverStatistics,
    ) -> SearchCommand {
        for monitor in &mut self.monitors {
            if let SearchCommand::Terminate(reason) = monitor.search_command(state, statistics) {
                return SearchCommand::Terminate(reason);
            }
        }
        SearchCommand::Continue
    }

    fn on_step(&mut self, state: &SearchState, statistics: &BnbSolverStatistics) {
        for monitor in &mut self.monitors {
            monitor.on_step(state, statistics);
        }
    }

    fn on_prune(&mut self, state: &SearchState, reason: PruneReason, statistics: &BnbSolverStatistics) {
        for monitor in &mut self.monitors {
            monitor.on_prune(state, reason.clone(), statistics);
        }
    }

    fn on_descend(&mut self, state: &SearchState, position: u32, statistics: &BnbSolverStatistics) {
        for monitor in &mut self.monitors {
            monitor.on_descend(state, position, statistics);
        }
    }

    fn on_backtrack(&mut self, state: &SearchState, statistics: &BnbSolverStatistics) {
        for monitor in &mut self.monitors {
            monitor.on_backtrack(state, statistics);
        }
    }

    fn on_solution_found(&mut self, ruler: &Ruler, statistics: &BnbSolverStatistics) {
        for monitor in &mut self.monitors {
            monitor.on_solution_found(ruler, statistics);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::CompositeTreeSearchMonitor;
    use crate::{
        monitor::{
            no_op::NoOperationMonitor, tree_search_monitor::TreeSearchMonitor,
            wrapper::WrapperMonitor,
        },
        state::SearchState,
        stats::BnbSolverStatistics,
    };
    use golomb_search::monitor::{
        interrupt::InterruptMonitor,
        search_monitor::{SearchCommand, SearchMonitor},
    };
    use std::sync::atomic::AtomicBool;

    #[test]
    fn test_empty_composite_continues() {
        let mut composite = CompositeTreeSearchMonitor::new();
        assert!(composite.is_empty());
        assert_eq!(
            composite.search_command(&SearchState::new(), &BnbSolverStatistics::default()),
            SearchCommand::Continue
        );
    }

    #[test]
    fn test_terminate_short_circuits() {
        let flag = AtomicBool::new(true);
        let mut interrupt = InterruptMonitor::new(&flag);
        let mut composite = CompositeTreeSearchMonitor::with_capacity(2);
        composite.add_monitor(NoOperationMonitor::new());
        composite.add_monitor(WrapperMonitor::new(&mut interrupt as &mut dyn SearchMonitor));

        assert_eq!(composite.len(), 2);
        assert_eq!(
            composite.search_command(&SearchState::new(), &BnbSolverStatistics::default()),
            SearchCommand::Terminate("Interrupt signal received".to_string())
        );
    }
}
