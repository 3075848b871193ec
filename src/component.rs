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

//! Component lifecycle surface
//!
//! Every lifecycle method is optional. A component declares which ones it
//! implements through [`Component::capabilities`]; the set is read once when
//! the component's [`ComponentEventContainer`](crate::ComponentEventContainer)
//! is built and events are only created for declared capabilities.

use bitflags::bitflags;

use crate::error::Result;
use crate::event::ContactPhase;
use crate::physics::{Collider2D, Collision2D};

bitflags! {
    /// Optional lifecycle methods a component implements
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Capabilities: u16 {
        const AWAKE = 1 << 0;
        const START = 1 << 1;
        const UPDATE = 1 << 2;
        const ON_ENABLE = 1 << 3;
        const ON_DISABLE = 1 << 4;
        const ON_DESTROY = 1 << 5;
        const ON_WORLD_MATRIX_UPDATED = 1 << 6;
        const ON_COLLISION_ENTER_2D = 1 << 7;
        const ON_COLLISION_STAY_2D = 1 << 8;
        const ON_COLLISION_EXIT_2D = 1 << 9;
        const ON_TRIGGER_ENTER_2D = 1 << 10;
        const ON_TRIGGER_STAY_2D = 1 << 11;
        const ON_TRIGGER_EXIT_2D = 1 << 12;

        const COLLISION_2D = Self::ON_COLLISION_ENTER_2D.bits()
            | Self::ON_COLLISION_STAY_2D.bits()
            | Self::ON_COLLISION_EXIT_2D.bits();
        const TRIGGER_2D = Self::ON_TRIGGER_ENTER_2D.bits()
            | Self::ON_TRIGGER_STAY_2D.bits()
            | Self::ON_TRIGGER_EXIT_2D.bits();
    }
}

impl Capabilities {
    /// Capability flag of the collision callback for `phase`
    pub fn collision(phase: ContactPhase) -> Self {
        match phase {
            ContactPhase::Enter => Self::ON_COLLISION_ENTER_2D,
            ContactPhase::Stay => Self::ON_COLLISION_STAY_2D,
            ContactPhase::Exit => Self::ON_COLLISION_EXIT_2D,
        }
    }

    /// Capability flag of the trigger callback for `phase`
    pub fn trigger(phase: ContactPhase) -> Self {
        match phase {
            ContactPhase::Enter => Self::ON_TRIGGER_ENTER_2D,
            ContactPhase::Stay => Self::ON_TRIGGER_STAY_2D,
            ContactPhase::Exit => Self::ON_TRIGGER_EXIT_2D,
        }
    }
}

/// Scripted behaviour attached to a game object
///
/// Methods not listed in [`capabilities`](Component::capabilities) are never
/// called, so their default bodies only exist to make them optional.
pub trait Component: 'static {
    /// Lifecycle methods this component implements
    fn capabilities(&self) -> Capabilities;

    /// Get component name for debugging
    fn name(&self) -> &str {
        "Component"
    }

    fn awake(&mut self) -> Result<()> {
        Ok(())
    }

    fn start(&mut self) -> Result<()> {
        Ok(())
    }

    fn update(&mut self) -> Result<()> {
        Ok(())
    }

    fn on_enable(&mut self) -> Result<()> {
        Ok(())
    }

    fn on_disable(&mut self) -> Result<()> {
        Ok(())
    }

    fn on_destroy(&mut self) -> Result<()> {
        Ok(())
    }

    /// Called synchronously when the owning transform's world matrix changes
    fn on_world_matrix_updated(&mut self) -> Result<()> {
        Ok(())
    }

    fn on_collision_enter_2d(&mut self, _collision: &Collision2D) -> Result<()> {
        Ok(())
    }

    fn on_collision_stay_2d(&mut self, _collision: &Collision2D) -> Result<()> {
        Ok(())
    }

    fn on_collision_exit_2d(&mut self, _collision: &Collision2D) -> Result<()> {
        Ok(())
    }

    fn on_trigger_enter_2d(&mut self, _other: &Collider2D) -> Result<()> {
        Ok(())
    }

    fn on_trigger_stay_2d(&mut self, _other: &Collider2D) -> Result<()> {
        Ok(())
    }

    fn on_trigger_exit_2d(&mut self, _other: &Collider2D) -> Result<()> {
        Ok(())
    }
}
