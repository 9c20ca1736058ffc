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

//! # Known-Optimal Table
//!
//! Published optimal Golomb rulers indexed by mark count. The table is an
//! immutable process-wide static, built lazily on first access.
//!
//! ## Usage
//!
//! ```rust
//! use golomb_model::known::KnownOptimalTable;
//!
//! let table = KnownOptimalTable::global();
//! assert_eq!(table.length(5), Some(11));
//! assert!(table.ruler(40).is_none());
//! ```

use crate::ruler::Ruler;
use rustc_hash::FxHashMap;
use std::sync::LazyLock;

const KNOWN_OPTIMAL_RULERS: &[&[u32]] = &[
    &[0, 1],
    &[0, 1, 3],
    &[0, 1, 4, 6],
    &[0, 1, 4, 9, 11],
    &[0, 1, 4, 10, 12, 17],
    &[0, 1, 4, 10, 18, 23, 25],
    &[0, 1, 4, 9, 15, 22, 32, 34],
    &[0, 1, 5, 12, 25, 27, 35, 41, 44],
    &[0, 1, 6, 10, 23, 26, 34, 41, 53, 55],
    &[0, 1, 4, 13, 28, 33, 47, 54, 64, 70, 72],
    &[0, 2, 6, 24, 29, 40, 43, 55, 68, 75, 76, 85],
    &[0, 2, 5, 25, 37, 43, 59, 70, 85, 89, 98, 99, 106],
    &[0, 4, 6, 20, 35, 52, 59, 77, 78, 86, 89, 99, 122, 127],
    &[
        0, 4, 20, 30, 57, 59, 62, 76, 100, 111, 123, 136, 144, 145, 151,
    ],
    &[
        0, 1, 4, 11, 26, 32, 56, 68, 76, 115, 117, 134, 150, 163, 168, 177,
    ],
    &[
        0, 5, 7, 17, 52, 56, 67, 80, 81, 100, 122, 138, 159, 165, 168, 191, 199,
    ],
    &[
        0, 2, 10, 22, 53, 56, 82, 83, 89, 98, 130, 148, 153, 167, 188, 192, 205, 216,
    ],
    &[
        0, 1, 6, 25, 32, 72, 100, 108, 120, 130, 153, 169, 187, 190, 204, 231, 233, 242, 246,
    ],
    &[
        0, 1, 8, 11, 68, 77, 94, 116, 121, 156, 158, 179, 194, 208, 212, 228, 240, 253, 259, 283,
    ],
    &[
        0, 2, 24, 56, 77, 82, 83, 95, 129, 144, 179, 186, 195, 255, 265, 285, 293, 296, 310, 329,
        333,
    ],
    &[
        0, 1, 9, 14, 43, 70, 106, 122, 124, 128, 159, 179, 204, 223, 253, 263, 270, 291, 330, 341,
        353, 356,
    ],
    &[
        0, 3, 7, 17, 61, 66, 91, 99, 114, 159, 171, 199, 200, 226, 235, 246, 277, 316, 329, 348,
        350, 366, 372,
    ],
    &[
        0, 9, 33, 37, 38, 97, 122, 129, 140, 142, 152, 191, 205, 208, 252, 278, 286, 326, 332,
        353, 368, 384, 403, 425,
    ],
    &[
        0, 12, 29, 39, 72, 91, 146, 157, 160, 161, 166, 191, 207, 214, 258, 290, 316, 354, 372,
        394, 396, 431, 459, 467, 480,
    ],
    &[
        0, 1, 33, 83, 104, 110, 124, 163, 185, 200, 203, 249, 251, 258, 314, 318, 343, 356, 386,
        430, 440, 456, 464, 475, 487, 492,
    ],
    &[
        0, 3, 15, 41, 66, 95, 97, 106, 142, 152, 220, 221, 225, 242, 295, 330, 338, 354, 382, 388,
        402, 415, 486, 504, 523, 546, 553,
    ],
    &[
        0, 3, 15, 41, 66, 95, 97, 106, 142, 152, 220, 221, 225, 242, 295, 330, 338, 354, 382, 388,
        402, 415, 486, 504, 523, 546, 553, 585,
    ],
];

static GLOBAL_TABLE: LazyLock<KnownOptimalTable> = LazyLock::new(KnownOptimalTable::build);

/// Lookup of published optimal rulers by mark count.
#[derive(Debug, Clone)]
pub struct KnownOptimalTable {
    rulers: FxHashMap<usize, Ruler>,
    max_marks: usize,
}

impl KnownOptimalTable {
    /// Returns the process-wide table.
    #[inline]
    pub fn global() -> &'static KnownOptimalTable {
        &GLOBAL_TABLE
    }

    fn build() -> Self {
        let mut rulers =
            FxHashMap::with_capacity_and_hasher(KNOWN_OPTIMAL_RULERS.len(), Default::default());
        let mut max_marks = 0;

        for positions in KNOWN_OPTIMAL_RULERS {
            let ruler = Ruler::from_positions(positions.iter().copied())
                .expect("known-optimal table entries are well-formed rulers");
            max_marks = max_marks.max(ruler.marks());
            rulers.insert(ruler.marks(), ruler);
        }

        Self { rulers, max_marks }
    }

    /// Returns the optimal ruler with `marks` marks, if one is recorded.
    #[inline]
    pub fn ruler(&self, marks: usize) -> Option<&Ruler> {
        self.rulers.get(&marks)
    }

    /// Returns the optimal length for `marks` marks, if one is recorded.
    #[inline]
    pub fn length(&self, marks: usize) -> Option<u32> {
        self.ruler(marks).map(Ruler::length)
    }

    /// Returns the recorded ruler whose length equals `length`.
    pub fn ruler_by_length(&self, length: u32) -> Option<&Ruler> {
        self.rulers.values().find(|r| r.length() == length)
    }

    /// Returns `true` if `ruler` is as short as the recorded optimum
    /// for its mark count. Unrecorded mark counts are never optimal.
    pub fn is_optimal(&self, ruler: &Ruler) -> bool {
        self.length(ruler.marks())
            .is_some_and(|length| length == ruler.length())
    }

    /// Returns the largest mark count with a recorded entry.
    #[inline]
    pub fn max_known_marks(&self) -> usize {
        self.max_marks
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.rulers.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rulers.is_empty()
    }

    /// Iterates the recorded rulers in ascending mark count.
    pub fn iter(&self) -> impl Iterator<Item = &Ruler> + '_ {
        (0..=self.max_marks).filter_map(move |marks| self.rulers.get(&marks))
    }
}

impl std::fmt::Display for KnownOptimalTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "KnownOptimalTable(entries: {}, max_marks: {})",
            self.len(),
            self.max_marks
        )
    }
}
