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

//! # Ruler Shape
//!
//! The validated input of every search: a mark count and an exact target
//! length. Validation happens once, here, so engines can rely on
//! `MIN_MARKS <= marks <= MAX_MARKS` and `length <= MAX_LENGTH`.

use thiserror::Error;

/// Errors reported for search arguments outside the supported domain.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    #[error("number of marks {marks} is out of range: expected {min}..={max}")]
    MarksOutOfRange { marks: usize, min: usize, max: usize },
    #[error("target length {length} exceeds the maximum supported length {max}")]
    LengthOutOfRange { length: u32, max: u32 },
}

/// The mark count and exact length a search looks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RulerShape {
    marks: usize,
    length: u32,
}

impl RulerShape {
    pub const MIN_MARKS: usize = 2;
    pub const MAX_MARKS: usize = 32;
    pub const MAX_LENGTH: u32 = 600;

    /// Validates and constructs a shape.
    ///
    /// # Errors
    ///
    /// Returns `SearchError::MarksOutOfRange` if `marks` is outside
    /// `MIN_MARKS..=MAX_MARKS`, and `SearchError::LengthOutOfRange` if
    /// `length` exceeds `MAX_LENGTH`.
    pub fn new(marks: usize, length: u32) -> Result<Self, SearchError> {
        if !(Self::MIN_MARKS..=Self::MAX_MARKS).contains(&marks) {
            return Err(SearchError::MarksOutOfRange {
                marks,
                min: Self::MIN_MARKS,
                max: Self::MAX_MARKS,
            });
        }

        if length > Self::MAX_LENGTH {
            return Err(SearchError::LengthOutOfRange {
                length,
                max: Self::MAX_LENGTH,
            });
        }

        Ok(Self { marks, length })
    }

    #[inline]
    pub fn marks(&self) -> usize {
        self.marks
    }

    #[inline]
    pub fn length(&self) -> u32 {
        self.length
    }

    /// Returns `true` if no ruler of this shape can exist because the marks
    /// do not fit on distinct integer positions in `0..=length`.
    #[inline]
    pub fn is_trivially_infeasible(&self) -> bool {
        (self.length as usize) < self.marks - 1
    }
}

impl std::fmt::Display for RulerShape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "RulerShape(marks: {}, length: {})", self.marks, self.length)
    }
}

#[cfg(test)]
mod tests {
    use super::{RulerShape, SearchError};

    #[test]
    fn test_accepts_domain_bounds() {
        assert!(RulerShape::new(2, 0).is_ok());
        assert!(RulerShape::new(32, 600).is_ok());
        let shape = RulerShape::new(5, 11).unwrap();
        assert_eq!(shape.marks(), 5);
        assert_eq!(shape.length(), 11);
    }

    #[test]
    fn test_rejects_too_few_marks() {
        assert_eq!(
            RulerShape::new(1, 10),
            Err(SearchError::MarksOutOfRange {
                marks: 1,
                min: 2,
                max: 32
            })
        );
    }

    #[test]
    fn test_rejects_too_many_marks() {
        assert!(matches!(
            RulerShape::new(33, 10),
            Err(SearchError::MarksOutOfRange { marks: 33, .. })
        ));
    }

    #[test]
    fn test_rejects_excessive_length() {
        assert_eq!(
            RulerShape::new(4, 601),
            Err(SearchError::LengthOutOfRange {
                length: 601,
                max: 600
            })
        );
    }

    #[test]
    fn test_error_messages_are_readable() {
        let err = RulerShape::new(40, 10).unwrap_err();
        assert_eq!(
            err.to_string(),
            "number of marks 40 is out of range: expected 2..=32"
        );
    }

    #[test]
    fn test_trivially_infeasible_shapes() {
        assert!(RulerShape::new(5, 3).unwrap().is_trivially_infeasible());
        assert!(!RulerShape::new(5, 4).unwrap().is_trivially_infeasible());
        assert!(RulerShape::new(2, 0).unwrap().is_trivially_infeasible());
    }
}
