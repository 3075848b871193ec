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

//! Shared fixtures for physics tests

use std::cell::RefCell;
use std::rc::Rc;

use ahash::AHashMap;
use slotmap::SlotMap;

use crate::component::{Capabilities, Component};
use crate::component_events::ComponentEventContainer;
use crate::error::{EventError, Result};
use crate::frame::{EventSink, FrameEventQueue};
use crate::game_object::GameObjectEventContainer;
use crate::id::EventIdGenerator;
use crate::physics::{Collider2D, ColliderId, Collision2D, PhysicsEventDispatcher};

type Names = Rc<RefCell<AHashMap<ColliderId, &'static str>>>;

/// Component logging every physics callback as `label.callback(other)`
pub(crate) struct ContactRecorder {
    label: &'static str,
    log: Rc<RefCell<Vec<String>>>,
    names: Names,
    pub fail: bool,
}

impl ContactRecorder {
    fn record(&self, callback: &str, other: Option<&Collider2D>) -> Result<()> {
        let other = other
            .and_then(|collider| self.names.borrow().get(&collider.id()).copied())
            .unwrap_or("?");
        self.log
            .borrow_mut()
            .push(format!("{}.{callback}({other})", self.label));
        if self.fail {
            return Err(EventError::callback(self.label));
        }
        Ok(())
    }
}

impl Component for ContactRecorder {
    fn capabilities(&self) -> Capabilities {
        Capabilities::COLLISION_2D | Capabilities::TRIGGER_2D
    }

    fn on_collision_enter_2d(&mut self, collision: &Collision2D) -> Result<()> {
        self.record("collision_enter", collision.other_collider())
    }

    fn on_collision_stay_2d(&mut self, collision: &Collision2D) -> Result<()> {
        self.record("collision_stay", collision.other_collider())
    }

    fn on_collision_exit_2d(&mut self, collision: &Collision2D) -> Result<()> {
        self.record("collision_exit", collision.other_collider())
    }

    fn on_trigger_enter_2d(&mut self, other: &Collider2D) -> Result<()> {
        self.record("trigger_enter", Some(other))
    }

    fn on_trigger_stay_2d(&mut self, other: &Collider2D) -> Result<()> {
        self.record("trigger_stay", Some(other))
    }

    fn on_trigger_exit_2d(&mut self, other: &Collider2D) -> Result<()> {
        self.record("trigger_exit", Some(other))
    }
}

/// Game objects with one recorder each, sharing a log
pub(crate) struct Arena {
    ids: Rc<EventIdGenerator>,
    sink: Rc<dyn EventSink>,
    log: Rc<RefCell<Vec<String>>>,
    names: Names,
    keys: RefCell<SlotMap<ColliderId, ()>>,
    // Callbacks hold recorders weakly
    recorders: RefCell<Vec<Rc<RefCell<ContactRecorder>>>>,
}

impl Arena {
    pub fn new() -> Self {
        Self {
            ids: Rc::new(EventIdGenerator::new()),
            sink: Rc::new(FrameEventQueue::new()),
            log: Rc::new(RefCell::new(Vec::new())),
            names: Rc::new(RefCell::new(AHashMap::new())),
            keys: RefCell::new(SlotMap::with_key()),
            recorders: RefCell::new(Vec::new()),
        }
    }

    fn game_object(&self, label: &'static str) -> (Rc<GameObjectEventContainer>, Rc<RefCell<ContactRecorder>>) {
        let recorder = Rc::new(RefCell::new(ContactRecorder {
            label,
            log: self.log.clone(),
            names: self.names.clone(),
            fail: false,
        }));
        let events = ComponentEventContainer::new(&recorder, 0, self.ids.clone(), self.sink.clone())
            .expect("recorder is not borrowed");
        let game_object = Rc::new(GameObjectEventContainer::new());
        events.attach(&game_object);
        events.enable().expect("recorder has no lifecycle callbacks");
        self.recorders.borrow_mut().push(recorder.clone());
        (game_object, recorder)
    }

    /// Standalone collider with its own game object
    pub fn body(&self, label: &'static str, is_trigger: bool) -> (Collider2D, Rc<RefCell<ContactRecorder>>) {
        let (game_object, recorder) = self.game_object(label);
        let id = self.keys.borrow_mut().insert(());
        self.names.borrow_mut().insert(id, label);
        (Collider2D::new(id, is_trigger, game_object), recorder)
    }

    /// Collider registered with `dispatcher`
    pub fn body_in(
        &self,
        dispatcher: &mut PhysicsEventDispatcher,
        label: &'static str,
        is_trigger: bool,
    ) -> (ColliderId, Rc<RefCell<ContactRecorder>>) {
        let (game_object, recorder) = self.game_object(label);
        let id = dispatcher.add_collider(game_object, is_trigger);
        self.names.borrow_mut().insert(id, label);
        (id, recorder)
    }

    pub fn log(&self) -> Vec<String> {
        self.log.borrow().clone()
    }

    pub fn take_log(&self) -> Vec<String> {
        std::mem::take(&mut *self.log.borrow_mut())
    }
}
