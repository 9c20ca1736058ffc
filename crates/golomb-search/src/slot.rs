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

//! # Result Slot
//!
//! A single-assignment cell shared by concurrent search workers. The first
//! worker to publish a ruler wins; every later attempt is rejected. Workers
//! poll `is_published` (a lock-free atomic read) to stop early once another
//! worker has succeeded.
//!
//! ## Highlights
//!
//! - `try_publish(&Ruler) -> bool` claims the slot with a compare-and-set on
//!   an `AtomicBool`; only the claimant takes the lock and stores the ruler.
//! - `snapshot()` returns a clone of the published ruler, if any.
//! - `into_inner()` consumes the slot once all workers have joined.
//!
//! ## Usage
//!
//! ```rust
//! use golomb_search::slot::ResultSlot;
//! use golomb_model::ruler::Ruler;
//!
//! let slot = ResultSlot::new();
//! let ruler = Ruler::from_positions([0, 1, 3]).unwrap();
//! assert!(slot.try_publish(&ruler));
//! assert!(!slot.try_publish(&ruler));
//! assert_eq!(slot.into_inner(), Some(ruler));
//! ```

use golomb_model::ruler::Ruler;
use std::sync::{
    Mutex, PoisonError,
    atomic::{AtomicBool, Ordering},
};

/// A write-once holder for the ruler found by a concurrent search.
///
/// The `published` flag is the claim: once set, it never resets, and the
/// worker that flipped it is the only one that writes `ruler`. Readers that
/// observe `published == true` through `snapshot` may briefly see `None` while
/// the winner is still storing; `into_inner` is exact once workers joined.
#[derive(Debug, Default)]
pub struct ResultSlot {
    published: AtomicBool,
    ruler: Mutex<Option<Ruler>>,
}

impl ResultSlot {
    #[inline]
    pub fn new() -> Self {
        Self {
            published: AtomicBool::new(false),
            ruler: Mutex::new(None),
        }
    }

    /// Returns `true` once some worker has published a ruler.
    #[inline]
    pub fn is_published(&self) -> bool {
        self.published.load(Ordering::Acquire)
    }

    /// Attempts to publish `candidate`.
    /// Returns `true` if this call won the slot, `false` if it was already taken.
    pub fn try_publish(&self, candidate: &Ruler) -> bool {
        if self
            .published
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return false;
        }

        let mut guard = self.ruler.lock().unwrap_or_else(PoisonError::into_inner);
        *guard = Some(candidate.clone());
        true
    }

    /// Returns a clone of the published ruler, if any.
    pub fn snapshot(&self) -> Option<Ruler> {
        self.ruler
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Consumes the slot and returns the published ruler, if any.
    pub fn into_inner(self) -> Option<Ruler> {
        self.ruler
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl std::fmt::Display for ResultSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ResultSlot(published: {})", self.is_published())
    }
}
