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

//! # Ruler
//!
//! The immutable ruler entity. A `Ruler` is an ordered sequence of mark
//! positions starting at zero and ending at its length. Construction checks
//! the structural invariants only; whether every pairwise distance is unique
//! is the derived property `is_valid`.
//!
//! ## Invariants
//!
//! - `positions.len() == marks`
//! - `positions[0] == 0` when `marks > 0`
//! - `positions[marks - 1] == length` when `marks > 1`
//! - positions are strictly increasing
//!
//! Every transformation (e.g. `reflect`) produces a new ruler.

use crate::report::RulerReport;
use thiserror::Error;

/// Errors reported when ruler construction arguments violate an invariant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RulerError {
    /// The declared mark count differs from the number of positions.
    #[error("mark count {marks} does not match the number of positions {positions}")]
    MarkCountMismatch { marks: usize, positions: usize },
    /// The first mark is not placed at zero.
    #[error("first mark must be at position 0, found {first}")]
    FirstMarkNotZero { first: u32 },
    /// The last mark does not coincide with the declared length.
    #[error("last mark {last} does not match the ruler length {length}")]
    LengthMismatch { length: u32, last: u32 },
    /// Two consecutive positions are not strictly increasing.
    #[error("positions must be strictly increasing: {previous} is followed by {next} at index {index}")]
    NotStrictlyIncreasing {
        index: usize,
        previous: u32,
        next: u32,
    },
}

/// A Golomb ruler candidate: marks at integer positions on a line.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Ruler {
    length: u32,
    positions: Vec<u32>,
}

impl Ruler {
    /// Constructs a ruler, validating every structural invariant.
    ///
    /// A zero-mark ruler is accepted only with no positions; its length is
    /// whatever the caller declares, conventionally `0`.
    pub fn new(length: u32, marks: usize, positions: Vec<u32>) -> Result<Self, RulerError> {
        if positions.len() != marks {
            return Err(RulerError::MarkCountMismatch {
                marks,
                positions: positions.len(),
            });
        }

        if let Some(&first) = positions.first() {
            if first != 0 {
                return Err(RulerError::FirstMarkNotZero { first });
            }
        }

        if marks > 1 {
            let last = positions[marks - 1];
            if last != length {
                return Err(RulerError::LengthMismatch { length, last });
            }
        }

        if let Some(index) = positions.windows(2).position(|w| w[1] <= w[0]) {
            return Err(RulerError::NotStrictlyIncreasing {
                index: index + 1,
                previous: positions[index],
                next: positions[index + 1],
            });
        }

        Ok(Self { length, positions })
    }

    /// Constructs a ruler from positions given in any order.
    ///
    /// The positions are sorted first; `length` and the mark count are
    /// derived from the sorted sequence. Unsorted input is never rejected,
    /// but duplicates or a smallest mark other than zero still are.
    pub fn from_positions<I>(positions: I) -> Result<Self, RulerError>
    where
        I: IntoIterator<Item = u32>,
    {
        let mut sorted: Vec<u32> = positions.into_iter().collect();
        sorted.sort_unstable();

        let length = sorted.last().copied().unwrap_or(0);
        let marks = sorted.len();
        Self::new(length, marks, sorted)
    }

    /// Returns the position of the last mark.
    #[inline]
    pub fn length(&self) -> u32 {
        self.length
    }

    /// Returns the number of marks.
    #[inline]
    pub fn marks(&self) -> usize {
        self.positions.len()
    }

    /// Returns the mark positions in ascending order.
    #[inline]
    pub fn positions(&self) -> &[u32] {
        &self.positions
    }

    /// Returns all `marks * (marks - 1) / 2` pairwise distances, sorted ascending.
    ///
    /// Rulers with fewer than two marks have no distances.
    pub fn distances(&self) -> Vec<u32> {
        let marks = self.marks();
        if marks < 2 {
            return Vec::new();
        }

        let mut distances = Vec::with_capacity(marks * (marks - 1) / 2);
        for (i, &left) in self.positions.iter().enumerate() {
            for &right in &self.positions[i + 1..] {
                distances.push(right - left);
            }
        }

        distances.sort_unstable();
        distances
    }

    /// Returns `true` if all pairwise distances are distinct.
    pub fn is_valid(&self) -> bool {
        self.distances().windows(2).all(|w| w[0] != w[1])
    }

    /// Returns the number of distinct pairwise distances.
    pub fn distinct_distance_count(&self) -> usize {
        let mut distances = self.distances();
        distances.dedup();
        distances.len()
    }

    /// Returns the integers in `1..=length` that no pair of marks measures.
    pub fn missing_distances(&self) -> Vec<u32> {
        let mut present = vec![false; self.length as usize + 1];
        for distance in self.distances() {
            present[distance as usize] = true;
        }

        (1..=self.length)
            .filter(|&d| !present[d as usize])
            .collect()
    }

    /// Returns the mirror image of this ruler (`length - p` for every mark).
    ///
    /// The mirror has the same distance multiset, so it is valid exactly
    /// when `self` is.
    pub fn reflect(&self) -> Self {
        let positions = self
            .positions
            .iter()
            .rev()
            .map(|&p| self.length - p)
            .collect();

        Self {
            length: self.length,
            positions,
        }
    }

    /// Returns a renderable key=value report of this ruler.
    #[inline]
    pub fn report(&self) -> RulerReport<'_> {
        RulerReport::new(self)
    }
}

impl std::fmt::Display for Ruler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Ruler(length={}, marks={}, positions={:?})",
            self.length,
            self.marks(),
            self.positions
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn ruler(positions: &[u32]) -> Ruler {
        Ruler::from_positions(positions.iter().copied()).expect("fixture must be a well-formed ruler")
    }

    #[test]
    fn test_new_accepts_well_formed_ruler() {
        let r = Ruler::new(6, 4, vec![0, 1, 4, 6]).unwrap();
        assert_eq!(r.length(), 6);
        assert_eq!(r.marks(), 4);
        assert_eq!(r.positions(), &[0, 1, 4, 6]);
    }

    #[test]
    fn test_new_rejects_first_mark_not_zero() {
        let err = Ruler::new(6, 4, vec![1, 2, 4, 6]).unwrap_err();
        assert_eq!(err, RulerError::FirstMarkNotZero { first: 1 });
    }

    #[test]
    fn test_new_rejects_length_mismatch() {
        let err = Ruler::new(7, 4, vec![0, 1, 4, 6]).unwrap_err();
        assert_eq!(err, RulerError::LengthMismatch { length: 7, last: 6 });
    }

    #[test]
    fn test_new_rejects_mark_count_mismatch() {
        let err = Ruler::new(6, 3, vec![0, 1, 4, 6]).unwrap_err();
        assert_eq!(
            err,
            RulerError::MarkCountMismatch {
                marks: 3,
                positions: 4
            }
        );
    }

    #[test]
    fn test_new_rejects_unsorted_positions() {
        let err = Ruler::new(6, 4, vec![0, 4, 1, 6]).unwrap_err();
        assert_eq!(
            err,
            RulerError::NotStrictlyIncreasing {
                index: 2,
                previous: 4,
                next: 1
            }
        );
    }

    #[test]
    fn test_new_does_not_require_distinct_distances() {
        // 0,1,2 measures 1 twice but is structurally fine.
        let r = Ruler::new(2, 3, vec![0, 1, 2]).unwrap();
        assert!(!r.is_valid());
    }

    #[test]
    fn test_from_positions_sorts_input() {
        let r = Ruler::from_positions([6, 0, 4, 1]).unwrap();
        assert_eq!(r.length(), 6);
        assert_eq!(r.marks(), 4);
        assert_eq!(r.positions(), &[0, 1, 4, 6]);
    }

    #[test]
    fn test_from_positions_rejects_duplicates() {
        let err = Ruler::from_positions([0, 3, 3]).unwrap_err();
        assert!(matches!(err, RulerError::NotStrictlyIncreasing { .. }));
    }

    #[test]
    fn test_empty_and_single_mark_rulers() {
        let empty = Ruler::from_positions([]).unwrap();
        assert_eq!(empty.length(), 0);
        assert_eq!(empty.marks(), 0);
        assert!(empty.positions().is_empty());
        assert!(empty.distances().is_empty());
        assert!(empty.is_valid());

        let single = Ruler::from_positions([0]).unwrap();
        assert_eq!(single.length(), 0);
        assert_eq!(single.marks(), 1);
        assert!(single.distances().is_empty());
        assert!(single.missing_distances().is_empty());
    }

    #[test]
    fn test_distances_are_sorted() {
        let r = ruler(&[0, 1, 4, 6]);
        assert_eq!(r.distances(), vec![1, 2, 3, 4, 5, 6]);
        assert_eq!(r.distinct_distance_count(), 6);
    }

    #[test]
    fn test_perfect_ruler_has_no_missing_distances() {
        assert!(ruler(&[0, 1, 4, 6]).missing_distances().is_empty());
    }

    #[test]
    fn test_missing_distances_of_five_mark_ruler() {
        let r = ruler(&[0, 1, 4, 9, 11]);
        assert!(r.is_valid());
        assert_eq!(r.missing_distances(), vec![6]);
    }

    #[test]
    fn test_is_valid_detects_repeated_distance() {
        let r = ruler(&[0, 1, 3, 4]);
        assert!(!r.is_valid());
        assert_eq!(r.distinct_distance_count(), 4);
    }

    #[test]
    fn test_reflect_mirrors_positions() {
        let r = ruler(&[0, 1, 4, 6]);
        let mirrored = r.reflect();
        assert_eq!(mirrored.positions(), &[0, 2, 5, 6]);
        assert_eq!(mirrored.length(), 6);
        assert_eq!(mirrored.reflect(), r);
    }

    #[test]
    fn test_display_contains_fields() {
        let rendered = format!("{}", ruler(&[0, 1, 4, 6]));
        assert_eq!(rendered, "Ruler(length=6, marks=4, positions=[0, 1, 4, 6])");
    }

    fn arbitrary_ruler() -> impl Strategy<Value = Ruler> {
        prop::collection::btree_set(1u32..200, 1..12).prop_map(|marks| {
            Ruler::from_positions(std::iter::once(0).chain(marks)).expect("sorted distinct marks")
        })
    }

    proptest! {
        #[test]
        fn prop_reflection_preserves_distances(r in arbitrary_ruler()) {
            let mirrored = r.reflect();
            prop_assert_eq!(mirrored.distances(), r.distances());
            prop_assert_eq!(mirrored.is_valid(), r.is_valid());
            prop_assert_eq!(mirrored.positions()[0], 0);
            prop_assert_eq!(mirrored.length(), r.length());
        }

        #[test]
        fn prop_distance_count_matches_pairs(r in arbitrary_ruler()) {
            let m = r.marks();
            prop_assert_eq!(r.distances().len(), m * (m - 1) / 2);
            prop_assert_eq!(r.is_valid(), r.distinct_distance_count() == r.distances().len());
        }

        #[test]
        fn prop_missing_and_present_partition_range(r in arbitrary_ruler()) {
            let missing = r.missing_distances();
            let mut present = r.distances();
            present.dedup();
            prop_assert_eq!(missing.len() + present.len(), r.length() as usize);
        }
    }
}
