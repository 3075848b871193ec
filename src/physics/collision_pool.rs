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

//! Collision events recorded during a physics step

#[cfg(feature = "profiling")]
use tracing::info_span;
use tracing::debug;

use crate::error::Result;
use crate::event::ContactPhase;
use crate::physics::{Collider2D, Collision2D, CollisionDetailPool};

#[derive(Debug)]
struct CollisionEventRecord {
    phase: ContactPhase,
    collider_a: Option<Collider2D>,
    collider_b: Option<Collider2D>,
    detail: Option<Collision2D>,
}

/// Pooled queue of collision events
///
/// Like [`TriggerEventPool`](super::TriggerEventPool), but every record also
/// carries a collision detail taken from the pool's detail free list. The
/// detail goes back to the free list once both participants have seen it.
#[derive(Debug, Default)]
pub struct CollisionEventPool {
    records: Vec<CollisionEventRecord>,
    size: usize,
    details: CollisionDetailPool,
}

impl CollisionEventPool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(records: usize, details: usize) -> Self {
        Self {
            records: Vec::with_capacity(records),
            size: 0,
            details: CollisionDetailPool::with_capacity(details),
        }
    }

    /// Take a cleared detail to fill before [`insert`](Self::insert)
    pub fn acquire_detail(&mut self) -> Collision2D {
        self.details.acquire()
    }

    /// Record a collision event; never runs user code
    pub fn insert(
        &mut self,
        phase: ContactPhase,
        collider_a: Collider2D,
        collider_b: Collider2D,
        detail: Collision2D,
    ) {
        if self.size == self.records.len() {
            self.records.push(CollisionEventRecord {
                phase,
                collider_a: None,
                collider_b: None,
                detail: None,
            });
        }
        let record = &mut self.records[self.size];
        record.phase = phase;
        record.collider_a = Some(collider_a);
        record.collider_b = Some(collider_b);
        record.detail = Some(detail);
        self.size += 1;
    }

    /// Replay every record in insertion order, then empty the pool
    ///
    /// A sees the detail bound as (A, B); the same detail is then flipped and
    /// B sees (B, A). The first callback error discards the remaining records
    /// and is returned.
    pub fn invoke(&mut self) -> Result<()> {
        #[cfg(feature = "profiling")]
        let _span = info_span!("collision_pool_invoke", records = self.size).entered();

        if self.size > 0 {
            debug!(records = self.size, "flushing collision events");
        }
        let result = self.replay();
        self.discard();
        result
    }

    fn replay(&mut self) -> Result<()> {
        let Self {
            records,
            size,
            details,
        } = self;
        for record in &mut records[..*size] {
            let (Some(a), Some(b), Some(mut detail)) = (
                record.collider_a.take(),
                record.collider_b.take(),
                record.detail.take(),
            ) else {
                continue;
            };
            detail.bind(a.clone(), b.clone());
            let result = a
                .game_object()
                .invoke_on_collision(record.phase, &detail)
                .and_then(|()| {
                    detail.swap_participants();
                    b.game_object().invoke_on_collision(record.phase, &detail)
                });
            details.release(detail);
            result?;
        }
        Ok(())
    }

    /// Drop recorded events without dispatching them
    pub fn discard(&mut self) {
        for record in &mut self.records[..self.size] {
            record.collider_a = None;
            record.collider_b = None;
            if let Some(detail) = record.detail.take() {
                self.details.release(detail);
            }
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

    pub fn detail_pool(&self) -> &CollisionDetailPool {
        &self.details
    }
}
