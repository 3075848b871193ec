// Copyright 2024 Saptak Santra
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Monotonic id generation
//!
//! Event ids are the final tie-break of the event ordering, so every event
//! created by one runtime must draw from the same generator. The generator is
//! owned by the runtime context and handed to constructors as
//! `Rc<EventIdGenerator>`.

use std::cell::Cell;

/// Strictly increasing, never repeating id counter
#[derive(Debug, Default)]
pub struct EventIdGenerator {
    next: Cell<u64>,
}

impl EventIdGenerator {
    /// Create a generator starting at 0
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue the next id
    pub fn next_id(&self) -> u64 {
        let id = self.next.get();
        self.next.set(id + 1);
        id
    }

    /// Id that the next call to [`next_id`](Self::next_id) will return
    pub fn peek(&self) -> u64 {
        self.next.get()
    }
}
