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

//! Golomb-BnB: sequential exact-length ruler search
//!
//! Depth-first branch-and-bound engine that decides whether a Golomb ruler
//! with a given number of marks and an exact length exists, and returns the
//! first one found. The engine separates search state, monitoring and
//! outcome reporting so callers can observe or stop a run without touching
//! the core loop.
//!
//! Core flow
//! - Validate the input as a `golomb_search::shape::RulerShape`.
//! - Pick a `monitor::tree_search_monitor::TreeSearchMonitor` (or wrap a
//!   `golomb_search` monitor with `monitor::wrapper::WrapperMonitor`).
//! - Run `bnb::BnbSolver::solve`, or `solve_from_prefix` to search a subtree.
//!
//! Design highlights
//! - Tight inner loop: the distance set is a bitset mutated in place and
//!   restored on backtrack.
//! - Deterministic: candidates are tried in ascending order, so the same
//!   shape always yields the same ruler.
//! - Cooperative cancellation: the monitor is polled at every node and
//!   before every candidate.
//!
//! Module map
//! - `bnb`: the solver engine and session orchestration.
//! - `state`: positions plus distance presence set with undo.
//! - `monitor`: tree-search monitors (log, composite, wrapper, no-op).
//! - `result`: solver outcomes with termination reasons.
//! - `stats`: lightweight counters/timing.

pub mod bnb;
pub mod monitor;
pub mod result;
pub mod state;
pub mod stats;
