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
    monitor::search_monitor::{SearchCommand, SearchMonitor},
    shape::RulerShape,
};
use golomb_model::ruler::Ruler;

/// A composite monitor that aggregates multiple monitors and forwards events to all of them.
pub struct CompositeMonitor<'a> {
    monitors: Vec<Box<dyn SearchMonitor + 'a>>,
}

impl std::fmt::Debug for CompositeMonitor<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let monitors_str = self
            .monitors
            .iter()
            .map(|m| m.name())
            .collect::<Vec<&str>>()
            .join(", ");

        f.debug_struct("CompositeMonitor")
            .field("monitors", &monitors_str)
            .finish()
    }
}

impl std::fmt::Display for CompositeMonitor<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let monitors_str = self
            .monitors
            .iter()
            .map(|m| m.name())
            .collect::<Vec<&str>>()
            .join(", ");

        write!(f, "CompositeMonitor([{}])", monitors_str)
    }
}

impl Default for CompositeMonitor<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> CompositeMonitor<'a> {
    /// Creates a new empty `CompositeMonitor`.
    #[inline]
    pub fn new() -> CompositeMonitor<'a> {
        CompositeMonitor {
            monitors: Vec::new(),
        }
    }

    /// Creates a new `CompositeMonitor` with the specified capacity.
    #[inline]
    pub fn with_capacity(capacity: usize) -> CompositeMonitor<'a> {
        CompositeMonitor {
            monitors: Vec::with_capacity(capacity),
        }
    }

    /// Adds a new monitor to the composite monitor.
    #[inline]
    pub fn add_monitor<M>(&mut self, monitor: M)
    where
        M: SearchMonitor + 'a,
    {
        self.monitors.push(Box::new(monitor));
    }

    /// Adds a new boxed monitor to the composite monitor.
    #[inline]
    pub fn add_monitor_boxed(&mut self, monitor: Box<dyn SearchMonitor + 'a>) {
        self.monitors.push(monitor);
    }

    /// Returns the number of monitors in the composite monitor.
    #[inline]
    pub fn len(&self) -> usize {
        self.monitors.len()
    }

    /// Returns `true` if the composite monitor contains no monitors.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.monitors.is_empty()
    }
}

impl<'a> FromIterator<Box<dyn SearchMonitor + 'a>> for CompositeMonitor<'a> {
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = Box<dyn SearchMonitor + 'a>>,
    {
        CompositeMonitor {
            monitors: iter.into_iter().collect(),
        }
    }
}

impl SearchMonitor for CompositeMonitor<'_> {
    fn name(&self) -> &str {
        "CompositeMonitor"
    }

    fn on_enter_search(&mut self, shape: &RulerShape) {
        for monitor in &mut self.monitors {
            monitor.on_enter_search(shape);
        }
    }

    fn on_exit_search(&mut self) {
        for monitor in &mut self.monitors {
            monitor.on_exit_search();
        }
    }

    fn on_solution_found(&mut self, ruler: &Ruler) {
        for monitor in &mut self.monitors {
            monitor.on_solution_found(ruler);
        }
    }

    fn on_step(&mut self) {
        for monitor in &mut self.monitors {
            monitor.on_step();
        }
    }

    fn search_command(&self) -> SearchCommand {
        // Called once per search node; a plain loop avoids the Option per iteration.
        for monitor in &self.monitors {
            if let SearchCommand::Terminate(reason) = monitor.search_command() {
                return SearchCommand::Terminate(reason);
            }
        }
        SearchCommand::Continue
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::monitor::interrupt::InterruptMonitor;
    use std::sync::atomic::{AtomicBool, Ordering};

    struct CountingMonitor<'a> {
        steps: &'a std::cell::Cell<usize>,
        terminate: bool,
    }

    impl SearchMonitor for CountingMonitor<'_> {
        fn name(&self) -> &str {
            "CountingMonitor"
        }
        fn on_enter_search(&mut self, _shape: &RulerShape) {}
        fn on_exit_search(&mut self) {}
        fn on_solution_found(&mut self, _ruler: &Ruler) {}
        fn on_step(&mut self) {
            self.steps.set(self.steps.get() + 1);
        }
        fn search_command(&self) -> SearchCommand {
            if self.terminate {
                SearchCommand::Terminate("counting".to_string())
            } else {
                SearchCommand::Continue
            }
        }
    }

    #[test]
    fn test_empty_composite_continues() {
        let composite = CompositeMonitor::new();
        assert!(composite.is_empty());
        assert_eq!(composite.search_command(), SearchCommand::Continue);
    }

    #[test]
    fn test_events_fan_out_to_all_monitors() {
        let a = std::cell::Cell::new(0);
        let b = std::cell::Cell::new(0);
        let mut composite = CompositeMonitor::with_capacity(2);
        composite.add_monitor(CountingMonitor {
            steps: &a,
            terminate: false,
        });
        composite.add_monitor_boxed(Box::new(CountingMonitor {
            steps: &b,
            terminate: false,
        }));

        composite.on_step();
        composite.on_step();

        assert_eq!(composite.len(), 2);
        assert_eq!(a.get(), 2);
        assert_eq!(b.get(), 2);
    }

    #[test]
    fn test_first_terminate_wins() {
        let flag = AtomicBool::new(false);
        let steps = std::cell::Cell::new(0);
        let mut composite = CompositeMonitor::new();
        composite.add_monitor(InterruptMonitor::new(&flag));
        composite.add_monitor(CountingMonitor {
            steps: &steps,
            terminate: true,
        });

        assert_eq!(
            composite.search_command(),
            SearchCommand::Terminate("counting".to_string())
        );

        flag.store(true, Ordering::Relaxed);
        assert_eq!(
            composite.search_command(),
            SearchCommand::Terminate("Interrupt signal received".to_string())
        );
    }

    #[test]
    fn test_display_lists_monitor_names() {
        let flag = AtomicBool::new(false);
        let composite: CompositeMonitor<'_> =
            std::iter::once(Box::new(InterruptMonitor::new(&flag)) as Box<dyn SearchMonitor + '_>)
                .collect();
        assert_eq!(composite.to_string(), "CompositeMonitor([InterruptMonitor])");
    }
}
