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

/// Statistics collected during the solving process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolverStatistics {
    /// Number of search nodes explored, summed over all workers.
    pub nodes_explored: u64,
    /// Number of backtracks, summed over all workers.
    pub backtracks: u64,
    /// Number of candidate positions rejected because of a repeated distance.
    pub collisions: u64,
    /// Number of threads used during the solving process.
    pub used_threads: usize,
    /// Total duration of the solving process.
    pub solve_duration: std::time::Duration,
}

impl std::fmt::Display for SolverStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Solver Statistics:")?;
        writeln!(f, "  Nodes Explored: {}", self.nodes_explored)?;
        writeln!(f, "  Backtracks: {}", self.backtracks)?;
        writeln!(f, "  Distance Collisions: {}", self.collisions)?;
        writeln!(f, "  Used Threads: {}", self.used_threads)?;
        writeln!(
            f,
            "  Solve Duration (secs): {:.3}",
            self.solve_duration.as_secs_f64()
        )
    }
}

/// Builder for `SolverStatistics`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolverStatisticsBuilder {
    nodes_explored: u64,
    backtracks: u64,
    collisions: u64,
    used_threads: usize,
    solve_duration: std::time::Duration,
}

impl Default for SolverStatisticsBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SolverStatisticsBuilder {
    /// Creates a new `SolverStatisticsBuilder` with default values.
    #[inline]
    pub fn new() -> Self {
        Self {
            nodes_explored: 0,
            backtracks: 0,
            collisions: 0,
            used_threads: 1,
            solve_duration: std::time::Duration::ZERO,
        }
    }

    #[inline]
    pub fn nodes_explored(mut self, nodes_explored: u64) -> Self {
        self.nodes_explored = nodes_explored;
        self
    }

    #[inline]
    pub fn backtracks(mut self, backtracks: u64) -> Self {
        self.backtracks = backtracks;
        self
    }

    #[inline]
    pub fn collisions(mut self, collisions: u64) -> Self {
        self.collisions = collisions;
        self
    }

    /// Sets the number of threads used.
    #[inline]
    pub fn used_threads(mut self, used_threads: usize) -> Self {
        self.used_threads = used_threads;
        self
    }

    /// Sets the total solve duration.
    #[inline]
    pub fn solve_duration(mut self, solve_duration: std::time::Duration) -> Self {
        self.solve_duration = solve_duration;
        self
    }

    /// Builds the `SolverStatistics` instance.
    #[inline]
    pub fn build(self) -> SolverStatistics {
        SolverStatistics {
            nodes_explored: self.nodes_explored,
            backtracks: self.backtracks,
            collisions: self.collisions,
            used_threads: self.used_threads,
            solve_duration: self.solve_duration,
        }
    }
}
