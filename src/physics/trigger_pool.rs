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

//! Trigger events recorded during a physics step

#[cfg(feature = "profiling")]
use tracing::info_span;
use tracing::debug;

use crate::error::Result;
use crate::event::ContactPhase;
use crate::physics::Collider2D;

#[derive(Debug)]
struct TriggerEventRecord {
    phase: ContactPhase,
    collider_a: Option<Collider2D>,
    collider_b: Option<Collider2D>,
}

/// Pooled queue of trigger events
///
/// Written by the contact listener while the solver steps, replayed once
/// after the step. Record slots are kept between steps, so a steady contact
/// load stops allocating.
#[derive(Debug, Default)]
pub struct TriggerEventPool {
    records: Vec<TriggerEventRecord>,
    size: usize,
}

impl TriggerEventPool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            records: Vec::with_capacity(capacity),
            size: 0,
        }
    }

    /// Record a trigger event; never runs user code
    pub fn insert(&mut self, phase: ContactPhase, collider_a: Collider2D, collider_b: Collider2D) {
        if self.size == self.records.len() {
            self.records.push(TriggerEventRecord {
                phase,
                collider_a: None,
                collider_b: None,
            });
        }
        let record = &mut self.records[self.size];
        record.phase = phase;
        record.collider_a = Some(collider_a);
        record.collider_b = Some(collider_b);
        self.size += 1;
    }

    /// Replay every record in insertion order, then empty the pool
    ///
    /// Each record tells A's game object about B and B's about A. The first
    /// callback error discards the remaining records and is returned.
    pub fn invoke(&mut self) -> Result<()> {
        #[cfg(feature = "profiling")]
        let _span = info_span!("trigger_pool_invoke", records = self.size).entered();

        if self.size > 0 {
            debug!(records = self.size, "flushing trigger events");
        }
        let result = self.replay();
        self.discard();
        result
    }

    fn replay(&self) -> Result<()> {
        for record in &self.records[..self.size] {
            let (Some(a), Some(b)) = (&record.collider_a, &record.collider_b) else {
                continue;
            };
            a.game_object().invoke_on_trigger(record.phase, b)?;
            b.game_object().invoke_on_trigger(record.phase, a)?;
        }
        Ok(())
    }

    /// Drop recorded events without dispatching them
    pub fn discard(&mut self) {
        for record in &mut self.records[..self.size] {
            record.collider_a = None;
            record.collider_b = None;
        }
        self.size = 0;
    }

    /// Number of recorded events
    pub fn len(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Number of record slots allocated so far
    pub fn backing_len(&self) -> usize {
        self.records.len()
    }
}
