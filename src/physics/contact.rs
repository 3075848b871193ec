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

//! Solver-facing contact listener and the per-step physics event flush

use std::collections::BTreeMap;
use std::rc::Rc;

use slotmap::SlotMap;
#[cfg(feature = "profiling")]
use tracing::info_span;
use tracing::{debug, trace};

use crate::config::SchedulerConfig;
use crate::error::Result;
use crate::event::ContactPhase;
use crate::game_object::GameObjectEventContainer;
use crate::physics::{
    Collider2D, ColliderId, CollisionEventPool, ContactManifold, TriggerEventPool,
};

/// Contact notifications raised by the solver while it steps
///
/// Implementations must only record; user callbacks run later, from
/// [`PhysicsEventDispatcher::flush`].
pub trait ContactListener2D {
    fn begin_contact(&mut self, a: ColliderId, b: ColliderId, manifold: &ContactManifold);

    fn end_contact(&mut self, a: ColliderId, b: ColliderId);

    /// Called once the solver has finished the step
    fn end_step(&mut self);
}

#[derive(Debug)]
struct ActiveContact {
    a: ColliderId,
    b: ColliderId,
    manifold: ContactManifold,
    began_this_step: bool,
}

fn pair_key(a: ColliderId, b: ColliderId) -> (ColliderId, ColliderId) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

/// Routes solver contacts into the trigger and collision pools
///
/// A pair is reported through the trigger callbacks when either collider is
/// a trigger, through the collision callbacks otherwise. Pairs still touching
/// at the end of a step produce Stay events.
#[derive(Debug)]
pub struct PhysicsEventDispatcher {
    colliders: SlotMap<ColliderId, Collider2D>,
    active_contacts: BTreeMap<(ColliderId, ColliderId), ActiveContact>,
    trigger_pool: TriggerEventPool,
    collision_pool: CollisionEventPool,
    emit_stay_events: bool,
}

impl Default for PhysicsEventDispatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl PhysicsEventDispatcher {
    pub fn new() -> Self {
        Self::with_config(&SchedulerConfig::default())
    }

    pub fn with_config(config: &SchedulerConfig) -> Self {
        Self {
            colliders: SlotMap::with_key(),
            active_contacts: BTreeMap::new(),
            trigger_pool: TriggerEventPool::with_capacity(config.trigger_pool_capacity),
            collision_pool: CollisionEventPool::with_capacity(
                config.collision_pool_capacity,
                config.detail_pool_capacity,
            ),
            emit_stay_events: config.emit_stay_events,
        }
    }

    /// Attach a collider to `game_object`, returning the id the solver reports it by
    pub fn add_collider(&mut self, game_object: Rc<GameObjectEventContainer>, is_trigger: bool) -> ColliderId {
        let id = self
            .colliders
            .insert_with_key(|id| Collider2D::new(id, is_trigger, game_object));
        trace!(?id, is_trigger, "collider added");
        id
    }

    /// Detach a collider, recording Exit events for the contacts it still has
    pub fn remove_collider(&mut self, id: ColliderId) -> Option<Collider2D> {
        let touching: Vec<(ColliderId, ColliderId)> = self
            .active_contacts
            .values()
            .filter(|contact| contact.a == id || contact.b == id)
            .map(|contact| (contact.a, contact.b))
            .collect();
        for (a, b) in touching {
            self.end_contact(a, b);
        }
        self.colliders.remove(id)
    }

    pub fn collider(&self, id: ColliderId) -> Option<&Collider2D> {
        self.colliders.get(id)
    }

    pub fn collider_count(&self) -> usize {
        self.colliders.len()
    }

    /// Replace the manifold of a touching pair, used by later Stay and Exit events
    pub fn update_contact(&mut self, a: ColliderId, b: ColliderId, manifold: &ContactManifold) {
        if let Some(contact) = self.active_contacts.get_mut(&pair_key(a, b)) {
            contact.manifold.clone_from(manifold);
        }
    }

    pub fn is_touching(&self, a: ColliderId, b: ColliderId) -> bool {
        self.active_contacts.contains_key(&pair_key(a, b))
    }

    pub fn active_contact_count(&self) -> usize {
        self.active_contacts.len()
    }

    /// Events waiting for the next [`flush`](Self::flush)
    pub fn pending_events(&self) -> usize {
        self.trigger_pool.len() + self.collision_pool.len()
    }

    pub fn trigger_pool(&self) -> &TriggerEventPool {
        &self.trigger_pool
    }

    pub fn collision_pool(&self) -> &CollisionEventPool {
        &self.collision_pool
    }

    fn record(&mut self, phase: ContactPhase, a: ColliderId, b: ColliderId, manifold: &ContactManifold) {
        let (Some(collider_a), Some(collider_b)) = (self.colliders.get(a), self.colliders.get(b)) else {
            return;
        };
        if collider_a.is_trigger() || collider_b.is_trigger() {
            self.trigger_pool
                .insert(phase, collider_a.clone(), collider_b.clone());
        } else {
            let mut detail = self.collision_pool.acquire_detail();
            detail.set_manifold(manifold);
            self.collision_pool
                .insert(phase, collider_a.clone(), collider_b.clone(), detail);
        }
    }

    /// Replay recorded events: triggers first, then collisions
    ///
    /// Call once per step, after the solver has returned. If a trigger
    /// callback fails the collision records are dropped as well.
    pub fn flush(&mut self) -> Result<()> {
        #[cfg(feature = "profiling")]
        let _span = info_span!("physics_flush").entered();

        debug!(
            triggers = self.trigger_pool.len(),
            collisions = self.collision_pool.len(),
            "flushing physics events"
        );
        if let Err(err) = self.trigger_pool.invoke() {
            self.collision_pool.discard();
            return Err(err);
        }
        self.collision_pool.invoke()
    }

    /// [`end_step`](ContactListener2D::end_step) followed by [`flush`](Self::flush)
    pub fn finish_step(&mut self) -> Result<()> {
        self.end_step();
        self.flush()
    }
}

impl ContactListener2D for PhysicsEventDispatcher {
    fn begin_contact(&mut self, a: ColliderId, b: ColliderId, manifold: &ContactManifold) {
        if !self.colliders.contains_key(a) || !self.colliders.contains_key(b) {
            trace!(?a, ?b, "contact with unknown collider ignored");
            return;
        }
        let key = pair_key(a, b);
        if let Some(contact) = self.active_contacts.get_mut(&key) {
            contact.manifold.clone_from(manifold);
            return;
        }
        self.active_contacts.insert(
            key,
            ActiveContact {
                a,
                b,
                manifold: manifold.clone(),
                began_this_step: true,
            },
        );
        self.record(ContactPhase::Enter, a, b, manifold);
    }

    fn end_contact(&mut self, a: ColliderId, b: ColliderId) {
        let Some(contact) = self.active_contacts.remove(&pair_key(a, b)) else {
            return;
        };
        self.record(ContactPhase::Exit, contact.a, contact.b, &contact.manifold);
    }

    fn end_step(&mut self) {
        let mut staying = Vec::new();
        for contact in self.active_contacts.values_mut() {
            if self.emit_stay_events && !contact.began_this_step {
                staying.push((contact.a, contact.b, contact.manifold.clone()));
            }
            contact.began_this_step = false;
        }
        for (a, b, manifold) in staying {
            self.record(ContactPhase::Stay, a, b, &manifold);
        }
    }
}
