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

//! Search state for the sequential engine
//!
//! `SearchState` holds the partial ruler under construction together with
//! the set of distances it already measures. Marks are placed and removed in
//! strict stack order; removing the last mark clears exactly the distances it
//! introduced, so the distance set always equals the pairwise distances of
//! the current positions.
//!
//! The distance set is a `FixedBitSet` indexed by distance (`0..=length`).
//! Placing a candidate first collects its distances to every placed mark
//! into a `SmallVec` and only commits them if none is present yet, so a
//! rejected candidate leaves the state untouched.

use fixedbitset::FixedBitSet;
use smallvec::SmallVec;

/// Buffer for the distances a single candidate adds. One entry per placed mark.
pub type DistanceBuffer = SmallVec<[u32; 32]>;

/// The mutable state of a depth-first ruler search.
#[derive(Debug, Clone)]
pub struct SearchState {
    positions: Vec<u32>,
    distances: FixedBitSet,
    /// Scratch space for `try_place`; not part of the logical state.
    pending: DistanceBuffer,
}

impl PartialEq for SearchState {
    fn eq(&self, other: &Self) -> bool {
        self.positions == other.positions && self.distances == other.distances
    }
}

impl Eq for SearchState {}

impl Default for SearchState {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchState {
    #[inline]
    pub fn new() -> Self {
        Self {
            positions: Vec::new(),
            distances: FixedBitSet::new(),
            pending: DistanceBuffer::new(),
        }
    }

    /// Creates a state with room for `marks` positions and distances up to `length`.
    #[inline]
    pub fn preallocated(marks: usize, length: u32) -> Self {
        Self {
            positions: Vec::with_capacity(marks),
            distances: FixedBitSet::with_capacity(length as usize + 1),
            pending: DistanceBuffer::with_capacity(marks),
        }
    }

    /// Clears all marks and resizes the distance set for `length`,
    /// keeping allocated capacity.
    pub fn reset(&mut self, marks: usize, length: u32) {
        self.positions.clear();
        self.positions.reserve(marks);
        self.distances.clear();
        self.distances.grow(length as usize + 1);
        self.pending.clear();
    }

    /// Returns the number of marks placed so far.
    #[inline]
    pub fn depth(&self) -> usize {
        self.positions.len()
    }

    /// Returns the position of the most recently placed mark.
    ///
    /// # Panics
    ///
    /// Panics if no mark has been placed.
    #[inline]
    pub fn last(&self) -> u32 {
        match self.positions.last() {
            Some(&position) => position,
            None => panic!("called `SearchState::last` on an empty state"),
        }
    }

    #[inline]
    pub fn positions(&self) -> &[u32] {
        &self.positions
    }

    /// Returns `true` if some pair of placed marks measures `distance`.
    #[inline]
    pub fn has_distance(&self, distance: u32) -> bool {
        self.distances.contains(distance as usize)
    }

    /// Returns the number of distinct distances currently measured.
    #[inline]
    pub fn distance_count(&self) -> usize {
        self.distances.count_ones(..)
    }

    /// Places a mark at `candidate` if none of its distances to the placed
    /// marks is already measured. Returns `false` and leaves the state
    /// unchanged on a collision.
    ///
    /// `candidate` must be greater than the last placed mark and must not
    /// exceed the length the state was reset for.
    pub fn try_place(&mut self, candidate: u32) -> bool {
        debug_assert!(
            self.positions.last().is_none_or(|&last| candidate > last),
            "called `SearchState::try_place` with candidate {} not beyond the last mark {:?}",
            candidate,
            self.positions.last()
        );
        debug_assert!(
            (candidate as usize) < self.distances.len(),
            "called `SearchState::try_place` with candidate {} beyond the distance capacity {}",
            candidate,
            self.distances.len()
        );

        self.pending.clear();
        for &position in &self.positions {
            let distance = candidate - position;
            if self.distances.contains(distance as usize) {
                return false;
            }
            self.pending.push(distance);
        }

        for &distance in &self.pending {
            self.distances.insert(distance as usize);
        }
        self.positions.push(candidate);
        true
    }

    /// Removes the most recently placed mark and every distance it introduced.
    ///
    /// # Panics
    ///
    /// Panics if no mark has been placed.
    pub fn remove_last(&mut self) {
        let Some(removed) = self.positions.pop() else {
            panic!("called `SearchState::remove_last` on an empty state");
        };

        for &position in &self.positions {
            self.distances.set((removed - position) as usize, false);
        }
    }
}

impl std::fmt::Display for SearchState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "SearchState(depth: {}, positions: {:?}, distances: {})",
            self.depth(),
            self.positions,
            self.distance_count()
        )
    }
}
