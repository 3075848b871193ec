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

//! Per-game-object fan-out of physics and transform callbacks

use std::cell::RefCell;

use ahash::AHashMap;
use smallvec::SmallVec;
use tracing::trace;

use crate::collection::MutIterableCollection;
use crate::component_events::{ComponentEventContainer, WorldMatrixListener};
use crate::error::Result;
use crate::event::{CollisionEvent, ContactPhase, TriggerEvent};
use crate::physics::{Collider2D, Collision2D};

/// Listeners of every component attached to one game object
///
/// Physics callbacks dispatch in event order through mutation-safe
/// collections, so a listener may disable or destroy components (including
/// its own) while the dispatch is running.
#[derive(Default)]
pub struct GameObjectEventContainer {
    world_matrix_listeners: RefCell<AHashMap<u64, WorldMatrixListener>>,
    collision: [MutIterableCollection<CollisionEvent>; 3],
    trigger: [MutIterableCollection<TriggerEvent>; 3],
}

impl GameObjectEventContainer {
    /// Create container with no listeners
    pub fn new() -> Self {
        Self::default()
    }

    /// Add every physics event and the world-matrix listener of `component`
    pub fn register_component(&self, component: &ComponentEventContainer) {
        for phase in ContactPhase::ALL {
            if let Some(event) = component.collision_event(phase) {
                self.collision[phase as usize].insert(event.clone());
            }
            if let Some(event) = component.trigger_event(phase) {
                self.trigger[phase as usize].insert(event.clone());
            }
        }
        if let Some(listener) = component.world_matrix_listener() {
            self.world_matrix_listeners
                .borrow_mut()
                .insert(component.instance_id(), listener.clone());
        }
        trace!(component = component.name(), "registered with game object");
    }

    /// Remove everything [`register_component`](Self::register_component) added
    pub fn unregister_component(&self, component: &ComponentEventContainer) {
        for phase in ContactPhase::ALL {
            if let Some(event) = component.collision_event(phase) {
                self.collision[phase as usize].delete(event);
            }
            if let Some(event) = component.trigger_event(phase) {
                self.trigger[phase as usize].delete(event);
            }
        }
        self.world_matrix_listeners
            .borrow_mut()
            .remove(&component.instance_id());
        trace!(component = component.name(), "unregistered from game object");
    }

    /// Notify world-matrix listeners immediately
    ///
    /// Listeners run in registration order. A listener unregistered by an
    /// earlier one in the same fan-out is skipped; one registered during the
    /// fan-out waits for the next call.
    pub fn invoke_on_world_matrix_updated(&self) -> Result<()> {
        let mut ids: SmallVec<[u64; 8]> = self.world_matrix_listeners.borrow().keys().copied().collect();
        ids.sort_unstable();
        for id in ids {
            let listener = self.world_matrix_listeners.borrow().get(&id).cloned();
            if let Some(listener) = listener {
                listener()?;
            }
        }
        Ok(())
    }

    /// Dispatch a collision callback to every registered listener
    pub fn invoke_on_collision(&self, phase: ContactPhase, collision: &Collision2D) -> Result<()> {
        let listeners = &self.collision[phase as usize];
        if listeners.is_empty() {
            return Ok(());
        }
        listeners.for_each(|event| event.invoke(collision))
    }

    /// Dispatch a trigger callback to every registered listener
    pub fn invoke_on_trigger(&self, phase: ContactPhase, other: &Collider2D) -> Result<()> {
        let listeners = &self.trigger[phase as usize];
        if listeners.is_empty() {
            return Ok(());
        }
        listeners.for_each(|event| event.invoke(other))
    }

    pub fn invoke_on_collision_enter_2d(&self, collision: &Collision2D) -> Result<()> {
        self.invoke_on_collision(ContactPhase::Enter, collision)
    }

    pub fn invoke_on_collision_stay_2d(&self, collision: &Collision2D) -> Result<()> {
        self.invoke_on_collision(ContactPhase::Stay, collision)
    }

    pub fn invoke_on_collision_exit_2d(&self, collision: &Collision2D) -> Result<()> {
        self.invoke_on_collision(ContactPhase::Exit, collision)
    }

    pub fn invoke_on_trigger_enter_2d(&self, other: &Collider2D) -> Result<()> {
        self.invoke_on_trigger(ContactPhase::Enter, other)
    }

    pub fn invoke_on_trigger_stay_2d(&self, other: &Collider2D) -> Result<()> {
        self.invoke_on_trigger(ContactPhase::Stay, other)
    }

    pub fn invoke_on_trigger_exit_2d(&self, other: &Collider2D) -> Result<()> {
        self.invoke_on_trigger(ContactPhase::Exit, other)
    }

    /// Number of registered collision listeners for `phase`
    pub fn collision_listener_count(&self, phase: ContactPhase) -> usize {
        self.collision[phase as usize].len()
    }

    /// Number of registered trigger listeners for `phase`
    pub fn trigger_listener_count(&self, phase: ContactPhase) -> usize {
        self.trigger[phase as usize].len()
    }

    pub fn world_matrix_listener_count(&self) -> usize {
        self.world_matrix_listeners.borrow().len()
    }
}

impl std::fmt::Debug for GameObjectEventContainer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let collision: Vec<usize> = self.collision.iter().map(MutIterableCollection::len).collect();
        let trigger: Vec<usize> = self.trigger.iter().map(MutIterableCollection::len).collect();
        f.debug_struct("GameObjectEventContainer")
            .field("world_matrix_listeners", &self.world_matrix_listener_count())
            .field("collision", &collision)
            .field("trigger", &trigger)
            .finish()
    }
}
