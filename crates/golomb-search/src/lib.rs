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

//! Golomb-Search: engine-agnostic search plumbing
//!
//! Types shared by the sequential and parallel engines: the validated search
//! input, cooperative monitors, the single-write result slot, and outcome
//! reporting.
//!
//! Module map
//! - `shape`: `RulerShape` and the input-validation `SearchError`.
//! - `monitor`: `SearchMonitor` trait plus interrupt, published, time-limit
//!   and composite monitors.
//! - `slot`: `ResultSlot`, the first-write-wins cell shared by workers.
//! - `result`: `SolverOutcome` with result and termination reason.
//! - `stats`: `SolverStatistics` and its builder.

pub mod monitor;
pub mod result;
pub mod shape;
pub mod slot;
pub mod stats;

pub use shape::{RulerShape, SearchError};
