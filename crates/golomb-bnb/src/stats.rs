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

use std::time::Duration;

/// Statistics collected during the execution of the sequential search.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BnbSolverStatistics {
    /// Total nodes visited.
    pub nodes_explored: u64,
    /// Total marks removed again after their subtree was exhausted.
    pub backtracks: u64,
    /// Candidates rejected because they would repeat a distance.
    pub collisions: u64,
    /// The deepest level reached in the tree.
    pub max_depth: u64,
    /// Total rulers found (0 or 1 for an exact-length search).
    pub solutions_found: u64,
    /// Total time spent in the solver.
    pub time_total: Duration,
}

impl BnbSolverStatistics {
    #[inline]
    pub fn on_node_explored(&mut self) {
        self.nodes_explored = self.nodes_explored.saturating_add(1);
    }

    #[inline]
    pub fn on_backtrack(&mut self) {
        self.backtracks = self.backtracks.saturating_add(1);
    }

    #[inline]
    pub fn on_collision(&mut self) {
        self.collisions = self.collisions.saturating_add(1);
    }

    #[inline]
    pub fn on_solution_found(&mut self) {
        self.solutions_found = self.solutions_found.saturating_add(1);
    }

    #[inline]
    pub fn on_depth_update(&mut self, depth: u64) {
        self.max_depth = self.max_depth.max(depth);
    }

    #[inline]
    pub fn set_total_time(&mut self, duration: Duration) {
        self.time_total = duration;
    }

    /// Adds the counters of `other` to `self`. The maximum depth is the
    /// maximum of both, the total time is left untouched.
    pub fn merge(&mut self, other: &BnbSolverStatistics) {
        self.nodes_explored = self.nodes_explored.saturating_add(other.nodes_explored);
        self.backtracks = self.backtracks.saturating_add(other.backtracks);
        self.collisions = self.collisions.saturating_add(other.collisions);
        self.solutions_found = self.solutions_found.saturating_add(other.solutions_found);
        self.max_depth = self.max_depth.max(other.max_depth);
    }
}

impl std::fmt::Display for BnbSolverStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Golomb-BnB Solver Statistics:")?;
        writeln!(f, "  Nodes explored:       {}", self.nodes_explored)?;
        writeln!(f, "  Backtracks:           {}", self.backtracks)?;
        writeln!(f, "  Distance collisions:  {}", self.collisions)?;
        writeln!(f, "  Max depth reached:    {}", self.max_depth)?;
        writeln!(f, "  Solutions found:      {}", self.solutions_found)?;
        writeln!(f, "  Total time:           {:.2?}", self.time_total)?;
        Ok(())
    }
}
