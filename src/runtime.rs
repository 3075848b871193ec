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


//! Runtime context tying the frame queue, id generator and physics together

use std::cell::RefCell;
use std::rc::Rc;

use tracing::debug;

use crate::component::Component;
use crate::component_events::ComponentEventContainer;
use crate::config::SchedulerConfig;
use crate::error::Result;
use crate::frame::{EventSink, FrameEventQueue};
use crate::game_object::GameObjectEventContainer;
use crate::id::EventIdGenerator;
use crate::physics::{ColliderId, ContactListener2D, PhysicsEventDispatcher};

/// Owner of everything shared by the components of one scene
pub struct EventRuntime {
    config: SchedulerConfig,
    ids: Rc<EventIdGenerator>,
    frames: Rc<FrameEventQueue>,
    physics: PhysicsEventDispatcher,
}

impl EventRuntime {
    /// Create runtime with the default configuration
    pub fn new() -> Self {
        Self::with_config(SchedulerConfig::default())
    }

    pub fn with_config(config: SchedulerConfig) -> Self {
        debug!(?config, "event runtime created");
        Self {
            physics: PhysicsEventDispatcher::with_config(&config),
            config,
            ids: Rc::new(EventIdGenerator::new()),
            frames: Rc::new(FrameEventQueue::new()),
        }
    }

    /// Build event container for `component` at the default execution order
    pub fn create_component_events<C: Component>(
        &self,
        component: &Rc<RefCell<C>>,
    ) -> Result<ComponentEventContainer> {
        self.create_component_events_with_order(component, self.config.default_execution_order)
    }

    pub fn create_component_events_with_order<C: Component>(
        &self,
        component: &Rc<RefCell<C>>,
        execution_order: i32,
    ) -> Result<ComponentEventContainer> {
        let sink: Rc<dyn EventSink> = self.frames.clone();
        ComponentEventContainer::new(component, execution_order, self.ids.clone(), sink)
    }

    pub fn spawn_game_object(&self) -> Rc<GameObjectEventContainer> {
        Rc::new(GameObjectEventContainer::new())
    }

    pub fn add_collider(&mut self, game_object: &Rc<GameObjectEventContainer>, is_trigger: bool) -> ColliderId {
        self.physics.add_collider(game_object.clone(), is_trigger)
    }

    /// Run one frame of lifecycle events
    pub fn run_frame(&self) -> Result<()> {
        self.frames.run_frame()
    }

    /// Let `solver` report contacts for one step, then flush physics events
    pub fn step_physics<F>(&mut self, solver: F) -> Result<()>
    where
        F: FnOnce(&mut dyn ContactListener2D),
    {
        solver(&mut self.physics);
        self.physics.finish_step()
    }

    pub fn physics(&self) -> &PhysicsEventDispatcher {
        &self.physics
    }

    pub fn physics_mut(&mut self) -> &mut PhysicsEventDispatcher {
        &mut self.physics
    }

    pub fn frames(&self) -> &Rc<FrameEventQueue> {
        &self.frames
    }

    pub fn ids(&self) -> &Rc<EventIdGenerator> {
        &self.ids
    }

    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }
}

impl Default for EventRuntime {
    fn default() -> Self {
        Self::new()
    }
}
