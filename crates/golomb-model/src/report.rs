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

//! Key=value rendering of a ruler, one field per line.
//!
//! ```text
//! length=6
//! marks=4
//! positions=0 1 4 6
//! distances=1 2 3 4 5 6
//! missing=
//! ```

use crate::ruler::Ruler;

/// A borrowed view of a ruler that renders as a key=value report.
#[derive(Debug, Clone, Copy)]
pub struct RulerReport<'a> {
    ruler: &'a Ruler,
}

impl<'a> RulerReport<'a> {
    #[inline]
    pub fn new(ruler: &'a Ruler) -> Self {
        Self { ruler }
    }

    /// Returns the ruler this report renders.
    #[inline]
    pub fn ruler(&self) -> &'a Ruler {
        self.ruler
    }
}

fn write_values(f: &mut std::fmt::Formatter<'_>, key: &str, values: &[u32]) -> std::fmt::Result {
    write!(f, "{}=", key)?;
    for (i, value) in values.iter().enumerate() {
        if i > 0 {
            write!(f, " ")?;
        }
        write!(f, "{}", value)?;
    }
    writeln!(f)
}

impl std::fmt::Display for RulerReport<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "length={}", self.ruler.length())?;
        writeln!(f, "marks={}", self.ruler.marks())?;
        write_values(f, "positions", self.ruler.positions())?;
        write_values(f, "distances", &self.ruler.distances())?;
        write_values(f, "missing", &self.ruler.missing_distances())
    }
}
