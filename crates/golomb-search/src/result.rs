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

use crate::stats::SolverStatistics;
use golomb_model::ruler::Ruler;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolverResult {
    /// A Golomb ruler of the requested shape was found.
    Found(Ruler),
    /// The search space was exhausted: no ruler of the requested shape exists.
    NotFound,
    /// The search stopped early without finding a ruler.
    Unknown,
}

impl std::fmt::Display for SolverResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SolverResult::Found(ruler) => write!(f, "Found({})", ruler),
            SolverResult::NotFound => write!(f, "NotFound"),
            SolverResult::Unknown => write!(f, "Unknown"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TerminationReason {
    /// A ruler was found.
    ExistenceProven,
    /// The complete search space was explored without a match.
    NonExistenceProven,
    /// The solver aborted due to cancellation or a search limit.
    /// The string contains information about the reason for abortion.
    Aborted(String),
}

impl std::fmt::Display for TerminationReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TerminationReason::ExistenceProven => write!(f, "Existence Proven"),
            TerminationReason::NonExistenceProven => write!(f, "Non-Existence Proven"),
            TerminationReason::Aborted(reason) => write!(f, "Aborted: {}", reason),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolverOutcome {
    pub result: SolverResult,
    pub reason: TerminationReason,
    pub statistics: SolverStatistics,
}

impl SolverOutcome {
    #[inline]
    pub fn new(
        result: SolverResult,
        reason: TerminationReason,
        statistics: SolverStatistics,
    ) -> Self {
        Self {
            result,
            reason,
            statistics,
        }
    }

    #[inline]
    pub fn found(ruler: Ruler, statistics: SolverStatistics) -> Self {
        Self::new(
            SolverResult::Found(ruler),
            TerminationReason::ExistenceProven,
            statistics,
        )
    }

    #[inline]
    pub fn not_found(statistics: SolverStatistics) -> Self {
        Self::new(
            SolverResult::NotFound,
            TerminationReason::NonExistenceProven,
            statistics,
        )
    }

    #[inline]
    pub fn aborted<S>(reason: S, statistics: SolverStatistics) -> Self
    where
        S: Into<String>,
    {
        Self::new(
            SolverResult::Unknown,
            TerminationReason::Aborted(reason.into()),
            statistics,
        )
    }

    #[inline]
    pub fn ruler(&self) -> Option<&Ruler> {
        match &self.result {
            SolverResult::Found(ruler) => Some(ruler),
            _ => None,
        }
    }

    #[inline]
    pub fn into_ruler(self) -> Option<Ruler> {
        match self.result {
            SolverResult::Found(ruler) => Some(ruler),
            _ => None,
        }
    }

    #[inline]
    pub fn has_ruler(&self) -> bool {
        matches!(self.result, SolverResult::Found(_))
    }

    #[inline]
    pub fn is_aborted(&self) -> bool {
        matches!(self.reason, TerminationReason::Aborted(_))
    }
}

impl std::fmt::Display for SolverOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Result: {}", self.result)?;
        writeln!(f, "Termination: {}", self.reason)?;
        write!(f, "{}", self.statistics)
    }
}
