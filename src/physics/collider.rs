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

//! Collider handles and collision details handed to physics callbacks

use std::rc::Rc;

use glam::Vec2;
use slotmap::new_key_type;
use smallvec::SmallVec;

use crate::game_object::GameObjectEventContainer;

new_key_type! {
    /// Collider identifier, the user data the solver reports contacts with
    pub struct ColliderId;
}

/// Collider attached to a game object
///
/// Cheap to clone; clones share the game object's event container.
#[derive(Clone)]
pub struct Collider2D {
    id: ColliderId,
    is_trigger: bool,
    game_object: Rc<GameObjectEventContainer>,
}

impl Collider2D {
    pub fn new(id: ColliderId, is_trigger: bool, game_object: Rc<GameObjectEventContainer>) -> Self {
        Self {
            id,
            is_trigger,
            game_object,
        }
    }

    pub fn id(&self) -> ColliderId {
        self.id
    }

    /// Triggers report overlaps through the trigger callbacks only
    pub fn is_trigger(&self) -> bool {
        self.is_trigger
    }

    /// Event container of the owning game object
    pub fn game_object(&self) -> &Rc<GameObjectEventContainer> {
        &self.game_object
    }
}

impl PartialEq for Collider2D {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Collider2D {}

impl std::fmt::Debug for Collider2D {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Collider2D")
            .field("id", &self.id)
            .field("is_trigger", &self.is_trigger)
            .finish()
    }
}

/// One contact point of a collision, seen from the receiving collider
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ContactPoint2D {
    pub point: Vec2,
    /// Points away from the other collider
    pub normal: Vec2,
    pub separation: f32,
}

/// Contact data reported by the solver for one collider pair
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContactManifold {
    pub points: SmallVec<[ContactPoint2D; 2]>,
    /// Velocity of collider A relative to collider B
    pub relative_velocity: Vec2,
}

/// Collision detail passed to collision callbacks
///
/// Details are pooled: a callback must copy out anything it wants to keep,
/// the same object is rebound for the other participant and then recycled.
#[derive(Debug, Clone, Default)]
pub struct Collision2D {
    collider: Option<Collider2D>,
    other_collider: Option<Collider2D>,
    contacts: Vec<ContactPoint2D>,
    relative_velocity: Vec2,
}

impl Collision2D {
    /// Collider receiving the callback
    pub fn collider(&self) -> Option<&Collider2D> {
        self.collider.as_ref()
    }

    /// The collider it hit
    pub fn other_collider(&self) -> Option<&Collider2D> {
        self.other_collider.as_ref()
    }

    pub fn contacts(&self) -> &[ContactPoint2D] {
        &self.contacts
    }

    pub fn contact_count(&self) -> usize {
        self.contacts.len()
    }

    /// Velocity of the receiving collider relative to the other one
    pub fn relative_velocity(&self) -> Vec2 {
        self.relative_velocity
    }

    /// Fill from a solver manifold, reusing the contact storage
    pub fn set_manifold(&mut self, manifold: &ContactManifold) {
        self.contacts.clear();
        self.contacts.extend_from_slice(&manifold.points);
        self.relative_velocity = manifold.relative_velocity;
    }

    pub(crate) fn bind(&mut self, collider: Collider2D, other: Collider2D) {
        self.collider = Some(collider);
        self.other_collider = Some(other);
    }

    /// Flip to the other participant's point of view
    pub(crate) fn swap_participants(&mut self) {
        std::mem::swap(&mut self.collider, &mut self.other_collider);
        self.relative_velocity = -self.relative_velocity;
        for contact in &mut self.contacts {
            contact.normal = -contact.normal;
        }
    }

    fn reset(&mut self) {
        self.collider = None;
        self.other_collider = None;
        self.contacts.clear();
        self.relative_velocity = Vec2::ZERO;
    }
}

/// Free list of collision details
#[derive(Debug, Default)]
pub struct CollisionDetailPool {
    free: Vec<Collision2D>,
}

impl CollisionDetailPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create pool holding `capacity` ready details
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            free: (0..capacity).map(|_| Collision2D::default()).collect(),
        }
    }

    /// Take a cleared detail, allocating only when the pool is empty
    pub fn acquire(&mut self) -> Collision2D {
        self.free.pop().unwrap_or_default()
    }

    /// Return a detail for reuse
    pub fn release(&mut self, mut detail: Collision2D) {
        detail.reset();
        self.free.push(detail);
    }

    /// Number of details ready for reuse
    pub fn available(&self) -> usize {
        self.free.len()
    }
}
