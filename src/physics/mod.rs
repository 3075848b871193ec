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


//! 2D physics event plumbing
//!
//! The solver reports contacts through [`ContactListener2D`] while it steps.
//! Those notifications only fill the pools; [`PhysicsEventDispatcher::flush`]
//! replays them through each game object's event container afterwards.

pub mod collider;
pub mod collision_pool;
pub mod contact;
pub mod trigger_pool;

#[cfg(test)]
pub(crate) mod test_support;

pub use collider::{Collider2D, ColliderId, Collision2D, CollisionDetailPool, ContactManifold, ContactPoint2D};
pub use collision_pool::CollisionEventPool;
pub use contact::{ContactListener2D, PhysicsEventDispatcher};
pub use trigger_pool::TriggerEventPool;
