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

use crate::{
    monitor::search_monitor::{SearchCommand, SearchMonitor},
    shape::RulerShape,
    slot::ResultSlot,
};
use golomb_model::ruler::Ruler;

/// A search monitor that terminates once any worker has published a
/// ruler into the shared `ResultSlot`.
#[derive(Debug, Clone, Copy)]
pub struct PublishedMonitor<'a> {
    slot: &'a ResultSlot,
}

impl<'a> PublishedMonitor<'a> {
    #[inline(always)]
    pub fn new(slot: &'a ResultSlot) -> Self {
        Self { slot }
    }
}

impl SearchMonitor for PublishedMonitor<'_> {
    fn name(&self) -> &str {
        "PublishedMonitor"
    }

    fn on_enter_search(&mut self, _shape: &RulerShape) {}
    fn on_exit_search(&mut self) {}
    fn on_solution_found(&mut self, _ruler: &Ruler) {}
    fn on_step(&mut self) {}

    fn search_command(&self) -> SearchCommand {
        if self.slot.is_published() {
            SearchCommand::Terminate("Result published by another worker".to_string())
        } else {
            SearchCommand::Continue
        }
    }
}
